// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! EC classes
//!
//! All class kinds share [`EcClass`]: name, modifier, base class, an ordered
//! property list and applied custom attributes. What differs per kind lives
//! in the closed [`ClassVariant`] payload.

use crate::{
    validate_ec_name, ArrayBounds, AttributeValue, ClassId, ClassKind, ClassModifier,
    ConstraintMut, CustomAttributeContainerType, EcError, PrimitiveType, Property, PropertyKind,
    RelationshipConstraint, RelationshipEnd, Result, SchemaLookup, SchemaLookupExt,
    StrengthDirection, StrengthType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Primitive type argument: already resolved, or a name from the primitive type table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveTypeRef<'a> {
    Type(PrimitiveType),
    Name(&'a str),
}

impl From<PrimitiveType> for PrimitiveTypeRef<'_> {
    fn from(ty: PrimitiveType) -> Self {
        PrimitiveTypeRef::Type(ty)
    }
}

impl<'a> From<&'a str> for PrimitiveTypeRef<'a> {
    fn from(name: &'a str) -> Self {
        PrimitiveTypeRef::Name(name)
    }
}

impl PrimitiveTypeRef<'_> {
    pub fn resolve(self) -> Result<PrimitiveType> {
        match self {
            PrimitiveTypeRef::Type(ty) => Ok(ty),
            PrimitiveTypeRef::Name(name) => name.parse(),
        }
    }
}

/// Class argument: already resolved, or a name to look up in the schema
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassRef<'a> {
    Id(ClassId),
    Name(&'a str),
}

impl From<ClassId> for ClassRef<'_> {
    fn from(id: ClassId) -> Self {
        ClassRef::Id(id)
    }
}

impl<'a> From<&'a str> for ClassRef<'a> {
    fn from(name: &'a str) -> Self {
        ClassRef::Name(name)
    }
}

/// Direction argument of navigation properties
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionRef<'a> {
    Direction(StrengthDirection),
    Name(&'a str),
}

impl From<StrengthDirection> for DirectionRef<'_> {
    fn from(direction: StrengthDirection) -> Self {
        DirectionRef::Direction(direction)
    }
}

impl<'a> From<&'a str> for DirectionRef<'a> {
    fn from(name: &'a str) -> Self {
        DirectionRef::Name(name)
    }
}

impl DirectionRef<'_> {
    pub fn resolve(self) -> Result<StrengthDirection> {
        match self {
            DirectionRef::Direction(direction) => Ok(direction),
            DirectionRef::Name(name) => name.parse(),
        }
    }
}

/// An applied custom attribute instance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomAttribute {
    /// Name of the custom attribute class, possibly schema-qualified
    pub class_name: String,
    /// Property values of the instance
    pub properties: BTreeMap<String, AttributeValue>,
}

impl CustomAttribute {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            properties: BTreeMap::new(),
        }
    }
}

/// Custom attributes applied to a class, at most one per attribute class
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomAttributeSet {
    attributes: Vec<CustomAttribute>,
}

impl CustomAttributeSet {
    /// Add an attribute, replacing one of the same class
    pub fn insert(&mut self, attribute: CustomAttribute) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.class_name.eq_ignore_ascii_case(&attribute.class_name))
        {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Get an attribute by class name (case-insensitive)
    pub fn get(&self, class_name: &str) -> Option<&CustomAttribute> {
        self.attributes
            .iter()
            .find(|a| a.class_name.eq_ignore_ascii_case(class_name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomAttribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Entity class payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityClass {
    /// Mixins applied to this class, in declaration order
    pub mixins: Vec<ClassId>,
}

/// Mixin class payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MixinClass {
    /// Entity class this mixin can be applied to
    pub applies_to: Option<ClassId>,
}

/// Custom attribute class payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomAttributeClass {
    pub container_type: CustomAttributeContainerType,
}

/// Relationship class payload
///
/// Both constraints are created with the class and never replaced.
#[derive(Debug, PartialEq, Serialize)]
pub struct RelationshipClass {
    pub strength: StrengthType,
    pub strength_direction: StrengthDirection,
    source: RelationshipConstraint,
    target: RelationshipConstraint,
}

impl RelationshipClass {
    fn new(
        id: ClassId,
        strength: Option<StrengthType>,
        strength_direction: Option<StrengthDirection>,
    ) -> Self {
        Self {
            strength: strength.unwrap_or_default(),
            strength_direction: strength_direction.unwrap_or_default(),
            source: RelationshipConstraint::new(id, RelationshipEnd::Source),
            target: RelationshipConstraint::new(id, RelationshipEnd::Target),
        }
    }

    pub fn source(&self) -> &RelationshipConstraint {
        &self.source
    }

    pub fn target(&self) -> &RelationshipConstraint {
        &self.target
    }

    pub fn source_mut(&mut self) -> ConstraintMut<'_> {
        ConstraintMut::new(&mut self.source)
    }

    pub fn target_mut(&mut self) -> ConstraintMut<'_> {
        ConstraintMut::new(&mut self.target)
    }
}

/// Variant-specific part of a class
///
/// Fixed when the class is added to its schema.
#[derive(Debug, PartialEq, Serialize)]
pub enum ClassVariant {
    Entity(EntityClass),
    Mixin(MixinClass),
    Struct,
    CustomAttribute(CustomAttributeClass),
    Relationship(RelationshipClass),
}

impl ClassVariant {
    pub fn kind(&self) -> ClassKind {
        match self {
            ClassVariant::Entity(_) => ClassKind::Entity,
            ClassVariant::Mixin(_) => ClassKind::Mixin,
            ClassVariant::Struct => ClassKind::Struct,
            ClassVariant::CustomAttribute(_) => ClassKind::CustomAttribute,
            ClassVariant::Relationship(_) => ClassKind::Relationship,
        }
    }
}

/// A class of an EC schema
#[derive(Debug, PartialEq, Serialize)]
pub struct EcClass {
    id: ClassId,
    name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub modifier: ClassModifier,
    pub base_class: Option<ClassId>,
    properties: Vec<Property>,
    pub custom_attributes: CustomAttributeSet,
    variant: ClassVariant,
}

impl EcClass {
    /// Create a bare class of the given kind
    ///
    /// Relationship classes get default strength and direction; use
    /// [`EcClass::new_relationship`] to set them.
    pub(crate) fn new(id: ClassId, name: String, modifier: ClassModifier, kind: ClassKind) -> Self {
        let variant = match kind {
            ClassKind::Entity => ClassVariant::Entity(EntityClass::default()),
            ClassKind::Mixin => ClassVariant::Mixin(MixinClass::default()),
            ClassKind::Struct => ClassVariant::Struct,
            ClassKind::CustomAttribute => {
                ClassVariant::CustomAttribute(CustomAttributeClass::default())
            }
            ClassKind::Relationship => {
                ClassVariant::Relationship(RelationshipClass::new(id, None, None))
            }
        };
        Self::with_variant(id, name, modifier, variant)
    }

    pub(crate) fn new_relationship(
        id: ClassId,
        name: String,
        modifier: ClassModifier,
        strength: Option<StrengthType>,
        strength_direction: Option<StrengthDirection>,
    ) -> Self {
        let variant =
            ClassVariant::Relationship(RelationshipClass::new(id, strength, strength_direction));
        Self::with_variant(id, name, modifier, variant)
    }

    fn with_variant(
        id: ClassId,
        name: String,
        modifier: ClassModifier,
        variant: ClassVariant,
    ) -> Self {
        Self {
            id,
            name,
            label: None,
            description: None,
            modifier,
            base_class: None,
            properties: Vec::new(),
            custom_attributes: CustomAttributeSet::default(),
            variant,
        }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ClassKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> &ClassVariant {
        &self.variant
    }

    pub fn as_entity(&self) -> Option<&EntityClass> {
        match &self.variant {
            ClassVariant::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn as_entity_mut(&mut self) -> Option<&mut EntityClass> {
        match &mut self.variant {
            ClassVariant::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn as_mixin(&self) -> Option<&MixinClass> {
        match &self.variant {
            ClassVariant::Mixin(mixin) => Some(mixin),
            _ => None,
        }
    }

    pub fn as_mixin_mut(&mut self) -> Option<&mut MixinClass> {
        match &mut self.variant {
            ClassVariant::Mixin(mixin) => Some(mixin),
            _ => None,
        }
    }

    pub fn as_custom_attribute(&self) -> Option<&CustomAttributeClass> {
        match &self.variant {
            ClassVariant::CustomAttribute(ca) => Some(ca),
            _ => None,
        }
    }

    pub fn as_custom_attribute_mut(&mut self) -> Option<&mut CustomAttributeClass> {
        match &mut self.variant {
            ClassVariant::CustomAttribute(ca) => Some(ca),
            _ => None,
        }
    }

    pub fn as_relationship(&self) -> Option<&RelationshipClass> {
        match &self.variant {
            ClassVariant::Relationship(rel) => Some(rel),
            _ => None,
        }
    }

    pub fn as_relationship_mut(&mut self) -> Option<&mut RelationshipClass> {
        match &mut self.variant {
            ClassVariant::Relationship(rel) => Some(rel),
            _ => None,
        }
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Local properties in insertion order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Get a local property by name (case-insensitive)
    ///
    /// The base class chain is not searched.
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.has_name(name))
    }

    /// Create a primitive property
    pub fn create_primitive_property<'a>(
        &mut self,
        name: &str,
        primitive_type: impl Into<PrimitiveTypeRef<'a>>,
    ) -> Result<&mut Property> {
        self.check_new_property(name)?;
        let ty = primitive_type.into().resolve()?;
        Ok(self.push_property(name, PropertyKind::Primitive(ty)))
    }

    /// Create a primitive array property with unbounded occurrences
    pub fn create_primitive_array_property<'a>(
        &mut self,
        name: &str,
        primitive_type: impl Into<PrimitiveTypeRef<'a>>,
    ) -> Result<&mut Property> {
        self.check_new_property(name)?;
        let ty = primitive_type.into().resolve()?;
        Ok(self.push_property(
            name,
            PropertyKind::PrimitiveArray(ty, ArrayBounds::default()),
        ))
    }

    /// Create a struct property
    ///
    /// A struct type given by name is resolved through `lookup`; it must
    /// name a struct class.
    pub fn create_struct_property<'a>(
        &mut self,
        name: &str,
        struct_type: impl Into<ClassRef<'a>>,
        lookup: &dyn SchemaLookup,
    ) -> Result<&mut Property> {
        self.check_new_property(name)?;
        let id = self.resolve_struct(name, struct_type.into(), lookup)?;
        Ok(self.push_property(name, PropertyKind::Struct(id)))
    }

    /// Create a struct array property with unbounded occurrences
    pub fn create_struct_array_property<'a>(
        &mut self,
        name: &str,
        struct_type: impl Into<ClassRef<'a>>,
        lookup: &dyn SchemaLookup,
    ) -> Result<&mut Property> {
        self.check_new_property(name)?;
        let id = self.resolve_struct(name, struct_type.into(), lookup)?;
        Ok(self.push_property(
            name,
            PropertyKind::StructArray(id, ArrayBounds::default()),
        ))
    }

    /// Create a navigation property
    ///
    /// Only entity and relationship classes carry navigation properties.
    /// `relationship` must be a resolved relationship class.
    pub fn create_navigation_property<'a>(
        &mut self,
        name: &str,
        relationship: ClassId,
        direction: impl Into<DirectionRef<'a>>,
        lookup: &dyn SchemaLookup,
    ) -> Result<&mut Property> {
        self.check_new_property(name)?;
        let context = format!("{}.{}", self.name, name);
        if !matches!(self.kind(), ClassKind::Entity | ClassKind::Relationship) {
            return Err(EcError::invalid_type(
                context,
                format!(
                    "navigation properties need an entity or relationship class, {} is a {}",
                    self.name,
                    self.kind()
                ),
            ));
        }
        match lookup.kind_of(relationship) {
            Some(ClassKind::Relationship) => {}
            Some(kind) => {
                return Err(EcError::invalid_type(
                    context,
                    format!(
                        "'{}' is a {}, expected RelationshipClass",
                        lookup.display_name(relationship),
                        kind
                    ),
                ))
            }
            None => {
                return Err(EcError::invalid_type(
                    context,
                    format!("unknown relationship class {}", relationship),
                ))
            }
        }
        let direction = direction.into().resolve()?;
        Ok(self.push_property(
            name,
            PropertyKind::Navigation {
                relationship,
                direction,
            },
        ))
    }

    fn check_new_property(&self, name: &str) -> Result<()> {
        if self.get_property(name).is_some() {
            return Err(EcError::DuplicateProperty {
                class: self.name.clone(),
                property: name.to_string(),
            });
        }
        validate_ec_name(name)
    }

    fn push_property(&mut self, name: &str, kind: PropertyKind) -> &mut Property {
        let index = self.properties.len();
        self.properties.push(Property::new(name, kind));
        &mut self.properties[index]
    }

    fn resolve_struct(
        &self,
        property: &str,
        struct_type: ClassRef<'_>,
        lookup: &dyn SchemaLookup,
    ) -> Result<ClassId> {
        let context = format!("{}.{}", self.name, property);
        let (id, kind) = match struct_type {
            ClassRef::Id(id) => match lookup.kind_of(id) {
                Some(kind) => (id, kind),
                None => {
                    return Err(EcError::invalid_type(
                        context,
                        format!("unknown struct class {}", id),
                    ))
                }
            },
            ClassRef::Name(type_name) => lookup.find_with_kind(type_name).ok_or_else(|| {
                EcError::invalid_type(
                    &context,
                    format!("unable to locate struct class '{}'", type_name),
                )
            })?,
        };
        if kind != ClassKind::Struct {
            return Err(EcError::invalid_type(
                context,
                format!(
                    "'{}' is a {}, expected StructClass",
                    lookup.display_name(id),
                    kind
                ),
            ));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EcStatus, RelationshipMultiplicity, Schema};

    fn schema() -> (Schema, ClassId) {
        let mut schema = Schema::new("Test", "ts", "01.00.00");
        let wall = schema.add_entity_class("Wall", ClassModifier::None).unwrap();
        schema.add_struct_class("Point", ClassModifier::None).unwrap();
        schema.add_entity_class("Door", ClassModifier::None).unwrap();
        schema
            .add_relationship_class("WallOwnsDoors", ClassModifier::None, None, None)
            .unwrap();
        (schema, wall)
    }

    #[test]
    fn test_get_property_case_insensitive() {
        let (mut schema, wall) = schema();
        let class = schema.class_mut(wall).unwrap();
        class
            .create_primitive_property("Height", PrimitiveType::Double)
            .unwrap();

        let a = class.get_property("height").unwrap() as *const Property;
        let b = class.get_property("HEIGHT").unwrap() as *const Property;
        assert_eq!(a, b);
        assert!(class.get_property("Width").is_none());
    }

    #[test]
    fn test_primitive_type_from_name() {
        let (mut schema, wall) = schema();
        let class = schema.class_mut(wall).unwrap();
        let prop = class.create_primitive_property("Tag", "string").unwrap();
        assert_eq!(prop.primitive_type(), Some(PrimitiveType::String));

        let err = class.create_primitive_property("Bad", "decimal").unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidPrimitiveType);
        assert_eq!(class.properties().len(), 1);
    }

    #[test]
    fn test_duplicate_property_every_create_call() {
        let (mut schema, wall) = schema();
        let point = schema.lookup_id("Point").unwrap();
        let rel = schema.lookup_id("WallOwnsDoors").unwrap();
        let (class, lookup) = schema.edit(wall).unwrap();
        class.create_primitive_property("Name", "string").unwrap();

        let results = [
            class.create_primitive_property("NAME", PrimitiveType::String).map(|_| ()),
            class
                .create_primitive_array_property("name", PrimitiveType::Integer)
                .map(|_| ()),
            class.create_struct_property("Name", point, lookup).map(|_| ()),
            class
                .create_struct_array_property("nAmE", "Point", lookup)
                .map(|_| ()),
            class
                .create_navigation_property("NaMe", rel, StrengthDirection::Forward, lookup)
                .map(|_| ()),
        ];
        for result in results {
            assert_eq!(result.unwrap_err().status(), EcStatus::DuplicateProperty);
        }
        assert_eq!(class.properties().len(), 1);
    }

    #[test]
    fn test_properties_keep_insertion_order() {
        let (mut schema, wall) = schema();
        let (class, lookup) = schema.edit(wall).unwrap();
        class.create_primitive_property("B", PrimitiveType::Long).unwrap();
        class.create_struct_property("A", "Point", lookup).unwrap();
        class.create_primitive_array_property("C", "point3d").unwrap();

        let names: Vec<_> = class.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
        assert!(class.properties()[2].is_array());
    }

    #[test]
    fn test_struct_property_requires_struct_class() {
        let (mut schema, wall) = schema();
        let door = schema.lookup_id("Door").unwrap();
        let (class, lookup) = schema.edit(wall).unwrap();

        let err = class.create_struct_property("Pos", "Missing", lookup).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidType);
        assert!(err.to_string().contains("unable to locate struct class 'Missing'"));

        let err = class.create_struct_property("Pos", door, lookup).unwrap_err();
        assert!(err.to_string().contains("'Door' is a EntityClass"));
        assert!(class.properties().is_empty());
    }

    #[test]
    fn test_invalid_property_name() {
        let (mut schema, wall) = schema();
        let class = schema.class_mut(wall).unwrap();
        let err = class
            .create_primitive_property("1st", PrimitiveType::Integer)
            .unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECName);
    }

    #[test]
    fn test_navigation_property() {
        let (mut schema, wall) = schema();
        let rel = schema.lookup_id("WallOwnsDoors").unwrap();
        let door = schema.lookup_id("Door").unwrap();
        let (class, lookup) = schema.edit(wall).unwrap();

        let prop = class
            .create_navigation_property("Owner", rel, "backward", lookup)
            .unwrap();
        prop.is_read_only = true;
        assert_eq!(
            class.get_property("owner").unwrap().navigation(),
            Some((rel, StrengthDirection::Backward))
        );

        let err = class
            .create_navigation_property("Other", door, StrengthDirection::Forward, lookup)
            .unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidType);

        let err = class
            .create_navigation_property("Third", rel, "up", lookup)
            .unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidStrengthDirection);
    }

    #[test]
    fn test_navigation_property_not_on_struct() {
        let (mut schema, _) = schema();
        let point = schema.lookup_id("Point").unwrap();
        let rel = schema.lookup_id("WallOwnsDoors").unwrap();
        let (class, lookup) = schema.edit(point).unwrap();
        let err = class
            .create_navigation_property("Owner", rel, StrengthDirection::Forward, lookup)
            .unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidType);
    }

    #[test]
    fn test_relationship_defaults() {
        let (schema, _) = schema();
        let rel_id = schema.lookup_id("WallOwnsDoors").unwrap();
        let class = schema.class(rel_id).unwrap();
        let rel = class.as_relationship().unwrap();

        assert_eq!(rel.strength, StrengthType::Referencing);
        assert_eq!(rel.strength_direction, StrengthDirection::Forward);
        assert_eq!(rel.source().relationship(), rel_id);
        assert_eq!(rel.target().relationship(), rel_id);
        assert_eq!(rel.source().end(), RelationshipEnd::Source);
        assert_eq!(rel.target().end(), RelationshipEnd::Target);
    }

    #[test]
    fn test_relationship_explicit_strength() {
        let mut schema = Schema::new("Test", "ts", "01.00.00");
        let id = schema
            .add_relationship_class(
                "WallHasOpenings",
                ClassModifier::Sealed,
                Some(StrengthType::Embedding),
                Some(StrengthDirection::Backward),
            )
            .unwrap();

        let class = schema.class(id).unwrap();
        assert_eq!(class.modifier, ClassModifier::Sealed);
        let rel = class.as_relationship().unwrap();
        assert_eq!(rel.strength, StrengthType::Embedding);
        assert_eq!(rel.strength_direction, StrengthDirection::Backward);
        assert_eq!(rel.source().relationship(), id);
        assert_eq!(rel.target().end(), RelationshipEnd::Target);
    }

    #[test]
    fn test_constraint_edits_keep_owner_and_end() {
        let (mut schema, wall) = schema();
        let rel_id = schema.lookup_id("WallOwnsDoors").unwrap();
        let door = schema.lookup_id("Door").unwrap();
        let (class, lookup) = schema.edit(rel_id).unwrap();
        let rel = class.as_relationship_mut().unwrap();

        let mut source = rel.source_mut();
        source.set_multiplicity(RelationshipMultiplicity::ONE_MANY);
        source.set_polymorphic(true);
        source.set_role_label(Some("owns".into()));
        source.add_class(wall, lookup).unwrap();
        let mut target = rel.target_mut();
        target.add_class(door, lookup).unwrap();
        target.set_abstract_constraint(Some(door));

        let rel = schema.class(rel_id).unwrap().as_relationship().unwrap();
        assert_eq!(rel.source().multiplicity, RelationshipMultiplicity::ONE_MANY);
        assert!(rel.source().polymorphic);
        assert_eq!(rel.source().role_label.as_deref(), Some("owns"));
        assert_eq!(rel.source().abstract_constraint(), Some(wall));
        assert_eq!(rel.target().explicit_abstract_constraint(), Some(door));
        for (constraint, end) in [
            (rel.source(), RelationshipEnd::Source),
            (rel.target(), RelationshipEnd::Target),
        ] {
            assert_eq!(constraint.relationship(), rel_id);
            assert_eq!(constraint.end(), end);
        }
    }

    #[test]
    fn test_class_kind_matches_index() {
        let (mut schema, wall) = schema();
        let (class, lookup) = schema.edit(wall).unwrap();
        class.create_struct_property("Origin", "Point", lookup).unwrap();
        class.as_entity_mut().unwrap().mixins.clear();

        for class in schema.classes() {
            assert_eq!(schema.index().kind_of(class.id()), Some(class.kind()));
            assert_eq!(schema.index().name_of(class.id()), Some(class.name()));
        }
        let point = schema.get_class("Point").unwrap();
        assert!(point.as_entity().is_none());
        assert!(matches!(point.variant(), ClassVariant::Struct));
    }

    #[test]
    fn test_custom_attribute_set() {
        let mut set = CustomAttributeSet::default();
        let mut ca = CustomAttribute::new("ClassHasHandler");
        ca.properties
            .insert("Restriction".into(), AttributeValue::String("Delete".into()));
        set.insert(ca);
        set.insert(CustomAttribute::new("classhashandler"));

        assert_eq!(set.len(), 1);
        assert!(set.get("CLASSHASHANDLER").unwrap().properties.is_empty());
    }
}
