// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! EC-Lite Parser - EC-JSON schema reader
//!
//! This crate loads EC schemas from EC-JSON. It implements the traits
//! defined in `ec-lite-model` for a clean abstraction.
//!
//! # Features
//!
//! - **Two-phase loading** - classes are created first, so references
//!   resolve regardless of item order
//! - **Validated fields** - malformed input fails with the offending field
//!   named in the error
//! - **Consolidated errors** - every failure of a document in one pass
//! - **Multiplicity parsing** using `nom` combinators
//! - **Progress reporting** for large schemas
//!
//! # Example
//!
//! ```ignore
//! use ec_lite_parser::JsonSchemaReader;
//! use ec_lite_model::SchemaParser;
//!
//! let reader = JsonSchemaReader::new();
//! let schema = reader.parse(schema_json)?;
//!
//! let wall = schema.get_class("Wall").unwrap();
//! println!("Wall has {} properties", wall.properties().len());
//! ```

mod draft;
mod fields;
mod from_json;
mod multiplicity;
mod reader;
mod resolve;

pub use from_json::FromEcJson;
pub use multiplicity::parse_multiplicity;
pub use reader::JsonSchemaReader;

use ec_lite_model::{Result, Schema, SchemaParser};

/// Quick parse function for simple use cases
pub fn parse(content: &str) -> Result<Schema> {
    JsonSchemaReader::new().parse(content)
}

/// Parse with progress reporting
pub fn parse_with_progress(
    content: &str,
    on_progress: impl Fn(&str, f32) + Send + 'static,
) -> Result<Schema> {
    JsonSchemaReader::new().parse_with_progress(content, Box::new(on_progress))
}
