// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed field access over EC-JSON objects
//!
//! Every accessor reports the offending field by name, so malformed input
//! fails with a precise `InvalidECJson` error instead of a silent default.

use ec_lite_model::{EcError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::str::FromStr;

/// A JSON object together with the name of the item it describes
pub(crate) struct JsonObject<'a> {
    context: String,
    map: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    /// Wrap `value`, failing unless it is a JSON object
    pub fn new(value: &'a Value, context: impl Into<String>) -> Result<Self> {
        let context = context.into();
        match value {
            Value::Object(map) => Ok(Self { context, map }),
            other => Err(EcError::json(
                context,
                format!("expected a JSON object, found {}", type_name(other)),
            )),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn map(&self) -> &'a Map<String, Value> {
        self.map
    }

    /// Raw member; `null` counts as absent
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn invalid(&self, key: &str, expected: &str, found: &Value) -> EcError {
        EcError::json(
            &self.context,
            format!(
                "attribute '{}' must be {}, found {}",
                key,
                expected,
                type_name(found)
            ),
        )
    }

    pub fn missing(&self, key: &str) -> EcError {
        EcError::json(
            &self.context,
            format!("missing required attribute '{}'", key),
        )
    }

    pub fn get_str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.invalid(key, "a string", other)),
        }
    }

    pub fn require_str(&self, key: &str) -> Result<&'a str> {
        self.get_str(key)?.ok_or_else(|| self.missing(key))
    }

    /// String member parsed with its `FromStr` impl, which supplies the status code
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr<Err = EcError>,
    {
        self.get_str(key)?.map(str::parse).transpose()
    }

    pub fn require_parsed<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr<Err = EcError>,
    {
        self.require_str(key)?.parse()
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.invalid(key, "a boolean", other)),
        }
    }

    pub fn get_object(&self, key: &str) -> Result<Option<&'a Value>> {
        match self.get(key) {
            None => Ok(None),
            Some(value @ Value::Object(_)) => Ok(Some(value)),
            Some(other) => Err(self.invalid(key, "an object", other)),
        }
    }

    pub fn get_array(&self, key: &str) -> Result<Option<&'a [Value]>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(self.invalid(key, "an array", other)),
        }
    }

    /// Array of strings
    pub fn get_str_list(&self, key: &str) -> Result<Option<Vec<&'a str>>> {
        let Some(items) = self.get_array(key)? else {
            return Ok(None);
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.as_str()),
                other => Err(self.invalid(key, "an array of strings", other)),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// A single name or an array of names
    pub fn get_names(&self, key: &str) -> Result<Option<Vec<&'a str>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(vec![s.as_str()])),
            Some(Value::Array(_)) => self.get_str_list(key),
            Some(other) => Err(self.invalid(key, "a string or an array of strings", other)),
        }
    }
}

/// Deserialize a nested value with serde
pub(crate) fn decode<T: DeserializeOwned>(value: &Value, context: &str) -> Result<T> {
    T::deserialize(value).map_err(|e| EcError::json(context, e.to_string()))
}

/// JSON type name for error messages
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accumulates independent errors so one pass reports all of them
#[derive(Default)]
pub(crate) struct Errors {
    errors: Vec<EcError>,
}

impl Errors {
    /// Keep the value of `result`, recording its error
    pub fn take<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    pub fn push(&mut self, err: EcError) {
        self.errors.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` when nothing was recorded, otherwise the consolidated error
    pub fn finish(self) -> Result<()> {
        match EcError::collect(self.errors) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}
