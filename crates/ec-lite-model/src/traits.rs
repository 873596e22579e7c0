// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for schema readers

use crate::{Result, Schema};

/// Progress callback type for loading operations
pub type ProgressCallback = Box<dyn Fn(&str, f32) + Send>;

/// Schema loading interface - entry point for reading serialized schemas
///
/// # Example
///
/// ```ignore
/// use ec_lite_model::SchemaParser;
///
/// let parser: Box<dyn SchemaParser> = get_parser();
/// let schema = parser.parse(schema_json)?;
/// println!("Schema {} has {} classes", schema.name(), schema.class_count());
/// ```
pub trait SchemaParser: Send + Sync {
    /// Parse serialized schema content
    ///
    /// # Arguments
    /// * `content` - The schema document as a string
    ///
    /// # Returns
    /// The loaded `Schema` with every class reference resolved, or an
    /// `EcError` on failure
    fn parse(&self, content: &str) -> Result<Schema>;

    /// Parse schema content with progress reporting
    ///
    /// # Arguments
    /// * `content` - The schema document as a string
    /// * `on_progress` - Callback function receiving (phase_name, percent_complete)
    fn parse_with_progress(&self, content: &str, on_progress: ProgressCallback) -> Result<Schema>;
}
