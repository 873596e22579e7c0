// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for schema construction and EC-JSON loading

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for schema operations
pub type Result<T> = std::result::Result<T, EcError>;

/// Fixed status codes reported by every [`EcError`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum EcStatus {
    /// Catch-all for failures without a more specific code
    Error,
    DuplicateItem,
    DuplicateProperty,
    InvalidContainerType,
    InvalidECJson,
    InvalidECName,
    InvalidModifier,
    InvalidMultiplicity,
    InvalidPrimitiveType,
    InvalidStrength,
    InvalidStrengthDirection,
    InvalidType,
}

impl fmt::Display for EcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EcStatus::Error => "Error",
            EcStatus::DuplicateItem => "DuplicateItem",
            EcStatus::DuplicateProperty => "DuplicateProperty",
            EcStatus::InvalidContainerType => "InvalidContainerType",
            EcStatus::InvalidECJson => "InvalidECJson",
            EcStatus::InvalidECName => "InvalidECName",
            EcStatus::InvalidModifier => "InvalidModifier",
            EcStatus::InvalidMultiplicity => "InvalidMultiplicity",
            EcStatus::InvalidPrimitiveType => "InvalidPrimitiveType",
            EcStatus::InvalidStrength => "InvalidStrength",
            EcStatus::InvalidStrengthDirection => "InvalidStrengthDirection",
            EcStatus::InvalidType => "InvalidType",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building or loading a schema
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EcError {
    /// A schema item with the same name already exists
    #[error("Schema {schema} already contains an item named '{name}'")]
    DuplicateItem { schema: String, name: String },

    /// A property with the same name already exists on the class
    #[error("Class {class} already has a property named '{property}'")]
    DuplicateProperty { class: String, property: String },

    /// Name is not a valid EC name
    #[error("'{0}' is not a valid EC name")]
    InvalidName(String),

    /// Malformed or unresolvable EC-JSON input
    #[error("Invalid EC-JSON for {context}: {message}")]
    InvalidJson { context: String, message: String },

    /// Unknown class modifier string
    #[error("'{0}' is not a valid class modifier")]
    InvalidModifier(String),

    /// Unparseable multiplicity string
    #[error("'{0}' is not a valid relationship multiplicity")]
    InvalidMultiplicity(String),

    /// Unknown primitive type name
    #[error("'{0}' is not a valid primitive type")]
    InvalidPrimitiveType(String),

    /// Unknown relationship strength
    #[error("'{0}' is not a valid relationship strength")]
    InvalidStrength(String),

    /// Unknown relationship strength direction
    #[error("'{0}' is not a valid strength direction")]
    InvalidStrengthDirection(String),

    /// Unknown custom attribute container type
    #[error("'{0}' is not a valid custom attribute container type")]
    InvalidContainerType(String),

    /// Reference resolved to the wrong kind of class, or did not resolve
    #[error("Invalid type for {context}: {message}")]
    InvalidType { context: String, message: String },

    /// Several independent failures collected in one pass
    #[error("{}", multiple_message(.0))]
    Multiple(Vec<EcError>),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

fn multiple_message(errors: &[EcError]) -> String {
    match errors.first() {
        Some(first) => format!("{} errors, first: {}", errors.len(), first),
        None => "no errors".to_string(),
    }
}

impl EcError {
    /// Status code of this error
    ///
    /// A consolidated [`EcError::Multiple`] reports the status of its first member.
    pub fn status(&self) -> EcStatus {
        match self {
            EcError::DuplicateItem { .. } => EcStatus::DuplicateItem,
            EcError::DuplicateProperty { .. } => EcStatus::DuplicateProperty,
            EcError::InvalidName(_) => EcStatus::InvalidECName,
            EcError::InvalidJson { .. } => EcStatus::InvalidECJson,
            EcError::InvalidModifier(_) => EcStatus::InvalidModifier,
            EcError::InvalidMultiplicity(_) => EcStatus::InvalidMultiplicity,
            EcError::InvalidPrimitiveType(_) => EcStatus::InvalidPrimitiveType,
            EcError::InvalidStrength(_) => EcStatus::InvalidStrength,
            EcError::InvalidStrengthDirection(_) => EcStatus::InvalidStrengthDirection,
            EcError::InvalidContainerType(_) => EcStatus::InvalidContainerType,
            EcError::InvalidType { .. } => EcStatus::InvalidType,
            EcError::Multiple(errors) => errors.first().map_or(EcStatus::Error, EcError::status),
            EcError::Other(_) => EcStatus::Error,
        }
    }

    /// Create an EC-JSON error
    pub fn json(context: impl Into<String>, msg: impl Into<String>) -> Self {
        EcError::InvalidJson {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(context: impl Into<String>, msg: impl Into<String>) -> Self {
        EcError::InvalidType {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        EcError::Other(msg.into())
    }

    /// Collapse a list of errors: `None` when empty, the error itself when
    /// there is exactly one, [`EcError::Multiple`] otherwise
    pub fn collect(mut errors: Vec<EcError>) -> Option<EcError> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(EcError::Multiple(errors)),
        }
    }

    /// Iterate over the individual errors, flattening [`EcError::Multiple`]
    pub fn iter(&self) -> Box<dyn Iterator<Item = &EcError> + '_> {
        match self {
            EcError::Multiple(errors) => Box::new(errors.iter().flat_map(|e| e.iter())),
            other => Box::new(std::iter::once(other)),
        }
    }
}
