// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-schema EC-JSON reader

use crate::fields::{Errors, JsonObject};
use crate::from_json::FromEcJson;
use ec_lite_model::{
    validate_ec_name, ClassId, ClassKind, ClassModifier, EcError, ProgressCallback, Result, Schema,
    SchemaParser,
};
use serde_json::Value;

/// Version assumed when a schema document has none
const DEFAULT_VERSION: &str = "01.00.00";

/// EC-JSON schema reader implementing `SchemaParser`
///
/// Loading runs in two phases: every class item is first added to the
/// schema bare, so references between classes resolve regardless of the
/// order of the items; then each class is populated from its JSON.
///
/// # Example
///
/// ```ignore
/// use ec_lite_parser::JsonSchemaReader;
/// use ec_lite_model::SchemaParser;
///
/// let reader = JsonSchemaReader::new().with_fail_fast(true);
/// let schema = reader.parse(schema_json)?;
/// let wall = schema.get_class("Wall").unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct JsonSchemaReader {
    /// Stop at the first failing item instead of reporting all of them
    pub fail_fast: bool,
    /// Skip schema items that are not classes (enumerations, units...)
    /// instead of failing
    pub skip_unknown_items: bool,
}

impl Default for JsonSchemaReader {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSchemaReader {
    /// Create a reader with default settings
    pub fn new() -> Self {
        Self {
            fail_fast: false,
            skip_unknown_items: true,
        }
    }

    /// Set whether to stop at the first error
    pub fn with_fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Set whether non-class schema items are skipped
    pub fn with_skip_unknown_items(mut self, enabled: bool) -> Self {
        self.skip_unknown_items = enabled;
        self
    }

    /// Read a schema from an already parsed JSON document
    pub fn read_value(&self, json: &Value) -> Result<Schema> {
        self.load(json, &|_, _| {})
    }

    fn load(&self, json: &Value, on_progress: &dyn Fn(&str, f32)) -> Result<Schema> {
        let obj = JsonObject::new(json, "schema")?;
        let name = obj.require_str("name")?;
        validate_ec_name(name)?;
        let alias = obj.get_str("alias")?.unwrap_or(name);
        let version = obj.get_str("version")?.unwrap_or(DEFAULT_VERSION);

        let mut schema = Schema::new(name, alias, version);
        schema.label = obj.get_str("label")?.map(str::to_string);
        schema.description = obj.get_str("description")?.map(str::to_string);

        let items = match obj.get_object("items")? {
            Some(items) => Some(items),
            None => obj.get_object("children")?,
        };
        let items: Vec<(&str, &Value)> = match items {
            Some(items) => JsonObject::new(items, format!("{}.items", name))?
                .map()
                .iter()
                .map(|(item_name, item)| (item_name.as_str(), item))
                .collect(),
            None => {
                log::warn!("Schema {} has no items", name);
                Vec::new()
            }
        };

        let mut errors = Errors::default();

        // Phase 1: bare classes
        on_progress("Creating classes", 10.0);
        let mut pending = Vec::with_capacity(items.len());
        for (item_name, item) in items {
            let created = self.create_item(&mut schema, item_name, item);
            if let Some(Some(id)) = self.check(&mut errors, created)? {
                pending.push((id, item));
            }
        }
        log::debug!(
            "Schema {}: created {} classes",
            schema.name(),
            schema.class_count()
        );

        // Phase 2: populate every class
        on_progress("Resolving classes", 30.0);
        let total = pending.len().max(1) as f32;
        for (done, (id, item)) in pending.into_iter().enumerate() {
            if let Some((class, lookup)) = schema.edit(id) {
                self.check(&mut errors, class.from_json(item, lookup))?;
            }
            on_progress("Resolving classes", 30.0 + 70.0 * (done + 1) as f32 / total);
        }

        errors.finish()?;
        on_progress("Complete", 100.0);
        Ok(schema)
    }

    /// Add the bare class for one schema item
    ///
    /// Returns `None` for a skipped non-class item.
    fn create_item(
        &self,
        schema: &mut Schema,
        name: &str,
        item: &Value,
    ) -> Result<Option<ClassId>> {
        let obj = JsonObject::new(item, name)?;
        let item_type = match obj.get_str("schemaItemType")? {
            Some(item_type) => item_type,
            None => obj
                .get_str("schemaChildType")?
                .ok_or_else(|| obj.missing("schemaItemType"))?,
        };

        match ClassKind::from_item_type(item_type) {
            Some(kind) => schema.add_class(name, ClassModifier::None, kind).map(Some),
            None if self.skip_unknown_items => {
                log::warn!("Skipping {} {}: not a class", item_type, name);
                Ok(None)
            }
            None => Err(EcError::json(
                name,
                format!("unsupported schema item type '{}'", item_type),
            )),
        }
    }

    /// Record an error, or return it right away in fail-fast mode
    fn check<T>(&self, errors: &mut Errors, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.fail_fast => Err(err),
            Err(err) => {
                errors.push(err);
                Ok(None)
            }
        }
    }
}

impl SchemaParser for JsonSchemaReader {
    fn parse(&self, content: &str) -> Result<Schema> {
        let json: Value =
            serde_json::from_str(content).map_err(|e| EcError::json("schema", e.to_string()))?;
        self.load(&json, &|_, _| {})
    }

    fn parse_with_progress(&self, content: &str, on_progress: ProgressCallback) -> Result<Schema> {
        on_progress("Reading document", 0.0);
        let json: Value =
            serde_json::from_str(content).map_err(|e| EcError::json("schema", e.to_string()))?;
        self.load(&json, on_progress.as_ref())
    }
}
