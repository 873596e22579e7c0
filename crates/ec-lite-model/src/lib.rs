// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! EC-Lite Model - EC schema class metadata
//!
//! This crate provides the in-memory model of an EC schema: entity, mixin,
//! struct, custom attribute and relationship classes, their properties, and
//! the source/target constraints of relationship classes.
//!
//! # Architecture
//!
//! - [`Schema`] - Arena of classes plus a case-insensitive name index
//! - [`EcClass`] - Common class data with a closed [`ClassVariant`] payload
//! - [`Property`] - Primitive, struct, array and navigation properties
//! - [`RelationshipConstraint`] - One end of a relationship class
//! - [`SchemaLookup`] - Name resolution used while building classes
//! - [`SchemaParser`] - Entry point implemented by schema readers
//!
//! # Example
//!
//! ```ignore
//! use ec_lite_model::{ClassModifier, PrimitiveType, Schema};
//!
//! let mut schema = Schema::new("Building", "bld", "01.00.00");
//! let point = schema.add_struct_class("Point", ClassModifier::None)?;
//! let wall = schema.add_entity_class("Wall", ClassModifier::None)?;
//!
//! let (class, lookup) = schema.edit(wall).unwrap();
//! class.create_primitive_property("Height", PrimitiveType::Double)?;
//! class.create_struct_property("Origin", "Point", lookup)?;
//! ```

pub mod class;
pub mod constraint;
pub mod error;
pub mod lookup;
pub mod property;
pub mod schema;
pub mod traits;
pub mod types;
pub mod value;

// Re-export all public types
pub use class::*;
pub use constraint::*;
pub use error::*;
pub use lookup::*;
pub use property::*;
pub use schema::*;
pub use traits::*;
pub use types::*;
pub use value::*;
