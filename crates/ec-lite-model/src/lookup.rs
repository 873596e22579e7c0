// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Name lookup of schema children
//!
//! Classes reference each other by name in EC-JSON. Resolution goes through
//! a [`SchemaLookup`], which the owning schema provides.

use crate::{ClassId, ClassKind, EcError, Result};

/// Lookup of schema classes by name and id
///
/// Implementations resolve names case-insensitively. A name may be
/// qualified with the schema name or alias (`Alias.Name` or `Alias:Name`).
///
/// # Example
///
/// ```ignore
/// use ec_lite_model::{SchemaLookup, SchemaLookupExt, ClassKind};
///
/// fn mixin_of(lookup: &dyn SchemaLookup, name: &str) {
///     if let Some(id) = lookup.find_of_kind(name, &[ClassKind::Mixin]) {
///         println!("{} -> {}", name, id);
///     }
/// }
/// ```
pub trait SchemaLookup: Send + Sync {
    /// Find a class by (possibly qualified) name
    fn find(&self, name: &str) -> Option<ClassId>;

    /// Kind of the class with the given id
    fn kind_of(&self, id: ClassId) -> Option<ClassKind>;

    /// Name of the class with the given id
    fn name_of(&self, id: ClassId) -> Option<&str>;
}

/// Extension methods for SchemaLookup
pub trait SchemaLookupExt: SchemaLookup {
    /// Check if a class exists
    fn exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Find a class and its kind
    fn find_with_kind(&self, name: &str) -> Option<(ClassId, ClassKind)> {
        let id = self.find(name)?;
        Some((id, self.kind_of(id)?))
    }

    /// Find a class whose kind is one of `kinds`
    fn find_of_kind(&self, name: &str, kinds: &[ClassKind]) -> Option<ClassId> {
        self.find_with_kind(name)
            .filter(|(_, kind)| kinds.contains(kind))
            .map(|(id, _)| id)
    }

    /// Resolve a reference or return an `InvalidECJson` error
    ///
    /// `context` names the referencing item (e.g. `Wall.baseClass`) and ends
    /// up in the error message.
    fn resolve_or_err(&self, context: &str, name: &str, kinds: &[ClassKind]) -> Result<ClassId> {
        match self.find_with_kind(name) {
            Some((id, kind)) if kinds.contains(&kind) => Ok(id),
            Some((_, kind)) => Err(EcError::json(
                context,
                format!("'{}' is a {}, expected {}", name, kind, kind_list(kinds)),
            )),
            None => Err(EcError::json(
                context,
                format!("unable to locate class '{}'", name),
            )),
        }
    }

    /// Display name of a class id, falling back to the id itself
    fn display_name(&self, id: ClassId) -> String {
        self.name_of(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }
}

// Blanket implementation for all SchemaLookup types
impl<T: SchemaLookup + ?Sized> SchemaLookupExt for T {}

fn kind_list(kinds: &[ClassKind]) -> String {
    kinds
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(" or ")
}
