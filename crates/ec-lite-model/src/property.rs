// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Class properties: named, typed fields of a class

use crate::{ClassId, PrimitiveType, StrengthDirection};
use serde::{Deserialize, Serialize};

/// Occurrence bounds of an array property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayBounds {
    pub min_occurs: u32,
    /// `None` means unbounded
    pub max_occurs: Option<u32>,
}

impl Default for ArrayBounds {
    fn default() -> Self {
        Self {
            min_occurs: 0,
            max_occurs: None,
        }
    }
}

/// Variant-specific part of a property
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropertyKind {
    Primitive(PrimitiveType),
    PrimitiveArray(PrimitiveType, ArrayBounds),
    Struct(ClassId),
    StructArray(ClassId, ArrayBounds),
    Navigation {
        relationship: ClassId,
        direction: StrengthDirection,
    },
}

impl PropertyKind {
    /// EC-JSON property type name
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyKind::Primitive(_) => "PrimitiveProperty",
            PropertyKind::PrimitiveArray(..) => "PrimitiveArrayProperty",
            PropertyKind::Struct(_) => "StructProperty",
            PropertyKind::StructArray(..) => "StructArrayProperty",
            PropertyKind::Navigation { .. } => "NavigationProperty",
        }
    }
}

/// A property of an EC class
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name (unique per class, case-insensitive)
    pub name: String,
    pub kind: PropertyKind,
    pub label: Option<String>,
    pub description: Option<String>,
    pub is_read_only: bool,
    pub priority: i32,
}

impl Property {
    /// Create a property with no label, description or priority
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            description: None,
            is_read_only: false,
            priority: 0,
        }
    }

    /// Primitive type of primitive and primitive array properties
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match &self.kind {
            PropertyKind::Primitive(ty) | PropertyKind::PrimitiveArray(ty, _) => Some(*ty),
            _ => None,
        }
    }

    /// Struct class of struct and struct array properties
    pub fn struct_class(&self) -> Option<ClassId> {
        match &self.kind {
            PropertyKind::Struct(id) | PropertyKind::StructArray(id, _) => Some(*id),
            _ => None,
        }
    }

    /// Relationship class and direction of navigation properties
    pub fn navigation(&self) -> Option<(ClassId, StrengthDirection)> {
        match &self.kind {
            PropertyKind::Navigation {
                relationship,
                direction,
            } => Some((*relationship, *direction)),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self.kind,
            PropertyKind::PrimitiveArray(..) | PropertyKind::StructArray(..)
        )
    }

    /// Array occurrence bounds, if this is an array property
    pub fn array_bounds(&self) -> Option<ArrayBounds> {
        match &self.kind {
            PropertyKind::PrimitiveArray(_, bounds) | PropertyKind::StructArray(_, bounds) => {
                Some(*bounds)
            }
            _ => None,
        }
    }

    /// Mutable array occurrence bounds, if this is an array property
    pub fn array_bounds_mut(&mut self) -> Option<&mut ArrayBounds> {
        match &mut self.kind {
            PropertyKind::PrimitiveArray(_, bounds) | PropertyKind::StructArray(_, bounds) => {
                Some(bounds)
            }
            _ => None,
        }
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
