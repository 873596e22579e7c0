// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for EC schema metadata
//!
//! Enumerations shared by classes, properties and relationship constraints,
//! together with their string parsers.

use crate::{EcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe class identifier
///
/// Index of a class in its owning [`Schema`](crate::Schema). References between
/// classes are stored as `ClassId` once resolved.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ClassId {
    fn from(id: u32) -> Self {
        ClassId(id)
    }
}

impl From<ClassId> for usize {
    fn from(id: ClassId) -> Self {
        id.0 as usize
    }
}

/// Check whether `name` is a valid EC name
///
/// EC names start with a letter or underscore, followed by letters, digits
/// or underscores.
pub fn is_valid_ec_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Fail with `InvalidECName` unless `name` is a valid EC name
pub fn validate_ec_name(name: &str) -> Result<()> {
    if is_valid_ec_name(name) {
        Ok(())
    } else {
        Err(EcError::InvalidName(name.to_string()))
    }
}

/// Class-level flag constraining instantiability
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum ClassModifier {
    #[default]
    None,
    Abstract,
    Sealed,
}

impl FromStr for ClassModifier {
    type Err = EcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(ClassModifier::None),
            "abstract" => Ok(ClassModifier::Abstract),
            "sealed" => Ok(ClassModifier::Sealed),
            _ => Err(EcError::InvalidModifier(s.to_string())),
        }
    }
}

impl fmt::Display for ClassModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClassModifier::None => "None",
            ClassModifier::Abstract => "Abstract",
            ClassModifier::Sealed => "Sealed",
        })
    }
}

/// Discriminant of the closed set of class variants
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ClassKind {
    Entity,
    Mixin,
    Struct,
    CustomAttribute,
    Relationship,
}

impl ClassKind {
    /// EC-JSON `schemaItemType` name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            ClassKind::Entity => "EntityClass",
            ClassKind::Mixin => "Mixin",
            ClassKind::Struct => "StructClass",
            ClassKind::CustomAttribute => "CustomAttributeClass",
            ClassKind::Relationship => "RelationshipClass",
        }
    }

    /// Parse an EC-JSON `schemaItemType`; `None` for non-class schema items
    pub fn from_item_type(s: &str) -> Option<Self> {
        match s {
            "EntityClass" => Some(ClassKind::Entity),
            "Mixin" | "MixinClass" => Some(ClassKind::Mixin),
            "StructClass" => Some(ClassKind::Struct),
            "CustomAttributeClass" => Some(ClassKind::CustomAttribute),
            "RelationshipClass" => Some(ClassKind::Relationship),
            _ => None,
        }
    }

    /// Whether a class of this kind may appear as a relationship constraint class
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            ClassKind::Entity | ClassKind::Mixin => Some(ConstraintKind::Entity),
            ClassKind::Relationship => Some(ConstraintKind::Relationship),
            ClassKind::Struct | ClassKind::CustomAttribute => None,
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element kind of a relationship constraint's class collection
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Entity classes (mixins included)
    Entity,
    /// Relationship classes
    Relationship,
}

/// EC primitive types
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum PrimitiveType {
    Binary,
    Boolean,
    DateTime,
    Double,
    #[default]
    Integer,
    Long,
    Point2d,
    Point3d,
    String,
    IGeometry,
}

impl PrimitiveType {
    /// EC-JSON type name
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Binary => "binary",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::DateTime => "dateTime",
            PrimitiveType::Double => "double",
            PrimitiveType::Integer => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Point2d => "point2d",
            PrimitiveType::Point3d => "point3d",
            PrimitiveType::String => "string",
            PrimitiveType::IGeometry => "Bentley.Geometry.Common.IGeometry",
        }
    }
}

impl FromStr for PrimitiveType {
    type Err = EcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "binary" => Ok(PrimitiveType::Binary),
            "bool" | "boolean" => Ok(PrimitiveType::Boolean),
            "datetime" => Ok(PrimitiveType::DateTime),
            "double" => Ok(PrimitiveType::Double),
            "int" | "integer" => Ok(PrimitiveType::Integer),
            "long" => Ok(PrimitiveType::Long),
            "point2d" => Ok(PrimitiveType::Point2d),
            "point3d" => Ok(PrimitiveType::Point3d),
            "string" => Ok(PrimitiveType::String),
            "bentley.geometry.common.igeometry" => Ok(PrimitiveType::IGeometry),
            _ => Err(EcError::InvalidPrimitiveType(s.to_string())),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Relationship strength: ownership and cascade semantics
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum StrengthType {
    #[default]
    Referencing,
    Holding,
    Embedding,
}

impl FromStr for StrengthType {
    type Err = EcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "referencing" => Ok(StrengthType::Referencing),
            "holding" => Ok(StrengthType::Holding),
            "embedding" => Ok(StrengthType::Embedding),
            _ => Err(EcError::InvalidStrength(s.to_string())),
        }
    }
}

impl fmt::Display for StrengthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrengthType::Referencing => "Referencing",
            StrengthType::Holding => "Holding",
            StrengthType::Embedding => "Embedding",
        })
    }
}

/// Direction in which a relationship's strength applies
///
/// Also used as the direction of navigation properties.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum StrengthDirection {
    #[default]
    Forward,
    Backward,
}

impl FromStr for StrengthDirection {
    type Err = EcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(StrengthDirection::Forward),
            "backward" => Ok(StrengthDirection::Backward),
            _ => Err(EcError::InvalidStrengthDirection(s.to_string())),
        }
    }
}

impl fmt::Display for StrengthDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrengthDirection::Forward => "Forward",
            StrengthDirection::Backward => "Backward",
        })
    }
}

/// Which end of a relationship a constraint describes
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum RelationshipEnd {
    Source,
    Target,
}

impl fmt::Display for RelationshipEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationshipEnd::Source => "Source",
            RelationshipEnd::Target => "Target",
        })
    }
}

/// Set of locations a custom attribute class may be attached to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct CustomAttributeContainerType(pub u32);

impl CustomAttributeContainerType {
    pub const SCHEMA: Self = Self(1);
    pub const ENTITY_CLASS: Self = Self(1 << 1);
    pub const CUSTOM_ATTRIBUTE_CLASS: Self = Self(1 << 2);
    pub const STRUCT_CLASS: Self = Self(1 << 3);
    pub const RELATIONSHIP_CLASS: Self = Self(1 << 4);
    pub const ANY_CLASS: Self = Self(0x1E);
    pub const PRIMITIVE_PROPERTY: Self = Self(1 << 5);
    pub const STRUCT_PROPERTY: Self = Self(1 << 6);
    pub const PRIMITIVE_ARRAY_PROPERTY: Self = Self(1 << 7);
    pub const STRUCT_ARRAY_PROPERTY: Self = Self(1 << 8);
    pub const NAVIGATION_PROPERTY: Self = Self(1 << 9);
    pub const ANY_PROPERTY: Self = Self(0x3E0);
    pub const SOURCE_RELATIONSHIP_CONSTRAINT: Self = Self(1 << 10);
    pub const TARGET_RELATIONSHIP_CONSTRAINT: Self = Self(1 << 11);
    pub const ANY_RELATIONSHIP_CONSTRAINT: Self = Self(0xC00);
    pub const ANY: Self = Self(0xFFF);

    const NAMED: [(&'static str, Self); 16] = [
        ("Schema", Self::SCHEMA),
        ("EntityClass", Self::ENTITY_CLASS),
        ("CustomAttributeClass", Self::CUSTOM_ATTRIBUTE_CLASS),
        ("StructClass", Self::STRUCT_CLASS),
        ("RelationshipClass", Self::RELATIONSHIP_CLASS),
        ("AnyClass", Self::ANY_CLASS),
        ("PrimitiveProperty", Self::PRIMITIVE_PROPERTY),
        ("StructProperty", Self::STRUCT_PROPERTY),
        ("ArrayProperty", Self::PRIMITIVE_ARRAY_PROPERTY),
        ("StructArrayProperty", Self::STRUCT_ARRAY_PROPERTY),
        ("NavigationProperty", Self::NAVIGATION_PROPERTY),
        ("AnyProperty", Self::ANY_PROPERTY),
        ("SourceRelationshipConstraint", Self::SOURCE_RELATIONSHIP_CONSTRAINT),
        ("TargetRelationshipConstraint", Self::TARGET_RELATIONSHIP_CONSTRAINT),
        ("AnyRelationshipConstraint", Self::ANY_RELATIONSHIP_CONSTRAINT),
        ("Any", Self::ANY),
    ];

    /// Whether every location in `other` is also in `self`
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for CustomAttributeContainerType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl FromStr for CustomAttributeContainerType {
    type Err = EcError;

    /// Parse a comma separated list of container names, e.g.
    /// `"EntityClass, StructClass"`
    fn from_str(s: &str) -> Result<Self> {
        let mut result = Self(0);
        for part in s.split([',', ';']) {
            let part = part.trim();
            let flag = Self::NAMED
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(part))
                .map(|(_, flag)| *flag)
                // synonym of "ArrayProperty"
                .or_else(|| {
                    part.eq_ignore_ascii_case("PrimitiveArrayProperty")
                        .then_some(Self::PRIMITIVE_ARRAY_PROPERTY)
                })
                .ok_or_else(|| EcError::InvalidContainerType(s.to_string()))?;
            result = result | flag;
        }
        Ok(result)
    }
}

impl fmt::Display for CustomAttributeContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ANY {
            return f.write_str("Any");
        }
        let mut remaining = self.0;
        let mut names = Vec::new();
        // Widest groups first so "AnyClass" wins over its members
        for (name, flag) in Self::NAMED.iter().rev() {
            if flag.0 != 0 && remaining & flag.0 == flag.0 {
                names.push(*name);
                remaining &= !flag.0;
            }
        }
        names.reverse();
        f.write_str(&names.join(", "))
    }
}

/// Allowed cardinality range of a relationship endpoint
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct RelationshipMultiplicity {
    pub lower: u32,
    /// `None` for `*`
    pub upper: Option<u32>,
}

impl RelationshipMultiplicity {
    pub const ZERO_ONE: Self = Self {
        lower: 0,
        upper: Some(1),
    };
    pub const ZERO_MANY: Self = Self {
        lower: 0,
        upper: None,
    };
    pub const ONE_ONE: Self = Self {
        lower: 1,
        upper: Some(1),
    };
    pub const ONE_MANY: Self = Self {
        lower: 1,
        upper: None,
    };

    /// Create a multiplicity, rejecting ranges with `lower > upper`
    pub fn new(lower: u32, upper: Option<u32>) -> Result<Self> {
        if let Some(upper) = upper.filter(|upper| lower > *upper) {
            return Err(EcError::InvalidMultiplicity(format!(
                "({}..{})",
                lower, upper
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper.is_none()
    }
}

impl Default for RelationshipMultiplicity {
    fn default() -> Self {
        Self::ZERO_ONE
    }
}

impl fmt::Display for RelationshipMultiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "({}..{})", self.lower, upper),
            None => write!(f, "({}..*)", self.lower),
        }
    }
}
