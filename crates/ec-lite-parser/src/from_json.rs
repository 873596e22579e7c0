// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Population of existing classes and constraints from EC-JSON

use crate::draft::{ClassDraft, ConstraintDraft};
use ec_lite_model::{ConstraintMut, EcClass, Result, SchemaLookup};
use serde_json::Value;

/// Load EC-JSON into an item that already exists in its schema
///
/// Class references in the input are resolved through `lookup`, so every
/// class they name must have been added to the schema beforehand.
///
/// # Example
///
/// ```ignore
/// use ec_lite_parser::FromEcJson;
///
/// let wall = schema.add_entity_class("Wall", ClassModifier::None)?;
/// schema.add_mixin_class("IFireRated", ClassModifier::Abstract)?;
/// let (class, lookup) = schema.edit(wall).unwrap();
/// class.from_json(&json!({ "mixin": "IFireRated" }), lookup)?;
/// ```
pub trait FromEcJson {
    fn from_json(&mut self, json: &Value, lookup: &dyn SchemaLookup) -> Result<()>;
}

impl FromEcJson for EcClass {
    fn from_json(&mut self, json: &Value, lookup: &dyn SchemaLookup) -> Result<()> {
        log::debug!("Loading {} {}", self.kind(), self.name());
        ClassDraft::parse(json, self.name(), self.kind())?.apply(self, lookup)
    }
}

impl FromEcJson for ConstraintMut<'_> {
    fn from_json(&mut self, json: &Value, lookup: &dyn SchemaLookup) -> Result<()> {
        ConstraintDraft::parse(json, self.context(lookup))?.apply(self, lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_lite_model::{
        AttributeValue, ClassId, ClassKind, ClassModifier, CustomAttributeContainerType, EcStatus,
        PrimitiveType, RelationshipMultiplicity, Schema, StrengthDirection, StrengthType,
    };
    use serde_json::json;

    fn schema() -> Schema {
        let mut schema = Schema::new("Building", "bld", "01.00.00");
        schema.add_entity_class("Element", ClassModifier::Abstract).unwrap();
        schema.add_entity_class("Wall", ClassModifier::None).unwrap();
        schema.add_entity_class("Door", ClassModifier::None).unwrap();
        schema.add_mixin_class("IFireRated", ClassModifier::Abstract).unwrap();
        schema.add_mixin_class("IAcoustic", ClassModifier::Abstract).unwrap();
        schema.add_struct_class("Point", ClassModifier::None).unwrap();
        schema
            .add_custom_attribute_class("Hidden", ClassModifier::Sealed)
            .unwrap();
        schema
            .add_relationship_class("WallHasDoors", ClassModifier::None, None, None)
            .unwrap();
        schema
            .add_relationship_class("RelLink", ClassModifier::None, None, None)
            .unwrap();
        schema
    }

    fn load(schema: &mut Schema, name: &str, json: Value) -> Result<ClassId> {
        let id = schema.lookup_id(name).unwrap();
        let (class, lookup) = schema.edit(id).unwrap();
        class.from_json(&json, lookup)?;
        Ok(id)
    }

    fn id(schema: &Schema, name: &str) -> ClassId {
        schema.lookup_id(name).unwrap()
    }

    #[test]
    fn test_common_fields() {
        let mut schema = schema();
        let wall = load(
            &mut schema,
            "Wall",
            json!({
                "schemaItemType": "EntityClass",
                "label": "Wall",
                "description": "A vertical element",
                "modifier": "Sealed",
                "baseClass": "bld:Element",
            }),
        )
        .unwrap();

        let class = schema.class(wall).unwrap();
        assert_eq!(class.label.as_deref(), Some("Wall"));
        assert_eq!(class.description.as_deref(), Some("A vertical element"));
        assert_eq!(class.modifier, ClassModifier::Sealed);
        assert_eq!(class.base_class, Some(id(&schema, "Element")));
    }

    #[test]
    fn test_invalid_modifier() {
        let mut schema = schema();
        let err = load(&mut schema, "Wall", json!({ "modifier": "Frozen" })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidModifier);
    }

    #[test]
    fn test_base_class_errors() {
        let mut schema = schema();
        let err = load(&mut schema, "Wall", json!({ "baseClass": 12 })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);

        let err = load(&mut schema, "Wall", json!({ "baseClass": "Point" })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);
        assert!(err.to_string().contains("'Point' is a StructClass"));

        let err = load(&mut schema, "Wall", json!({ "baseClass": "Missing" })).unwrap_err();
        assert!(err.to_string().contains("Wall.baseClass"));

        let err = load(&mut schema, "Wall", json!({ "baseClass": "Wall" })).unwrap_err();
        assert!(err.to_string().contains("cannot derive from itself"));
        assert!(schema.class(id(&schema, "Wall")).unwrap().base_class.is_none());
    }

    #[test]
    fn test_entity_mixins_keep_order() {
        let mut schema = schema();
        let wall = load(
            &mut schema,
            "Wall",
            json!({ "mixin": ["IAcoustic", "Building.IFireRated"] }),
        )
        .unwrap();
        let mixins = &schema.class(wall).unwrap().as_entity().unwrap().mixins;
        assert_eq!(
            mixins,
            &vec![id(&schema, "IAcoustic"), id(&schema, "IFireRated")]
        );

        let door = load(&mut schema, "Door", json!({ "mixin": "IFireRated" })).unwrap();
        assert_eq!(
            schema.class(door).unwrap().as_entity().unwrap().mixins,
            vec![id(&schema, "IFireRated")]
        );
    }

    #[test]
    fn test_entity_mixin_errors() {
        let mut schema = schema();
        let err = load(&mut schema, "Wall", json!({ "mixin": 5 })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);

        let err = load(&mut schema, "Wall", json!({ "mixin": ["IAcoustic", 5] })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);

        // every unresolved name of the class is reported
        let err = load(
            &mut schema,
            "Door",
            json!({ "mixin": ["INope", "Point", "IAcoustic"] }),
        )
        .unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);
        assert_eq!(err.iter().count(), 2);
    }

    #[test]
    fn test_mixin_applies_to() {
        let mut schema = schema();
        let mixin = load(&mut schema, "IFireRated", json!({ "appliesTo": "Wall" })).unwrap();
        assert_eq!(
            schema.class(mixin).unwrap().as_mixin().unwrap().applies_to,
            Some(id(&schema, "Wall"))
        );

        let err = load(&mut schema, "IAcoustic", json!({ "appliesTo": "Nowhere" })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);
        assert!(err.to_string().contains("unable to locate class 'Nowhere'"));

        let err = load(&mut schema, "IAcoustic", json!({ "appliesTo": "Point" })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);

        let err = load(&mut schema, "IAcoustic", json!({ "appliesTo": ["Wall"] })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);
    }

    #[test]
    fn test_custom_attribute_class() {
        let mut schema = schema();
        let hidden = load(
            &mut schema,
            "Hidden",
            json!({ "appliesTo": "EntityClass, StructProperty" }),
        )
        .unwrap();
        let ca = schema.class(hidden).unwrap().as_custom_attribute().unwrap();
        assert_eq!(
            ca.container_type,
            CustomAttributeContainerType::ENTITY_CLASS
                | CustomAttributeContainerType::STRUCT_PROPERTY
        );

        let err = load(&mut schema, "Hidden", json!({ "modifier": "Sealed" })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);
        assert!(err.to_string().contains("'appliesTo'"));
    }

    #[test]
    fn test_relationship_class() {
        let mut schema = schema();
        let rel = load(
            &mut schema,
            "WallHasDoors",
            json!({
                "strength": "Embedding",
                "strengthDirection": "Backward",
                "source": {
                    "polymorphic": true,
                    "multiplicity": "(1..1)",
                    "roleLabel": "has",
                    "constraintClasses": ["Wall"],
                },
                "target": {
                    "multiplicity": "(0..*)",
                    "roleLabel": "is in",
                    "abstractConstraint": "Element",
                    "constraintClasses": ["Door", "IFireRated"],
                },
            }),
        )
        .unwrap();

        let class = schema.class(rel).unwrap().as_relationship().unwrap();
        assert_eq!(class.strength, StrengthType::Embedding);
        assert_eq!(class.strength_direction, StrengthDirection::Backward);

        let source = class.source();
        assert!(source.polymorphic);
        assert_eq!(source.multiplicity, RelationshipMultiplicity::ONE_ONE);
        assert_eq!(source.role_label.as_deref(), Some("has"));
        assert_eq!(source.abstract_constraint(), Some(id(&schema, "Wall")));

        let target = class.target();
        assert_eq!(target.multiplicity, RelationshipMultiplicity::ZERO_MANY);
        assert_eq!(target.abstract_constraint(), Some(id(&schema, "Element")));
        assert_eq!(target.constraint_classes().unwrap().len(), 2);
        assert!(target.has_class(id(&schema, "Door")));
    }

    #[test]
    fn test_relationship_value_errors() {
        let mut schema = schema();
        let err = load(&mut schema, "RelLink", json!({ "strength": "Strong" })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidStrength);

        let err =
            load(&mut schema, "RelLink", json!({ "strengthDirection": "Up" })).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidStrengthDirection);

        let err = load(
            &mut schema,
            "RelLink",
            json!({ "source": { "multiplicity": "(2..1)" } }),
        )
        .unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidMultiplicity);
    }

    #[test]
    fn test_constraint_from_json() {
        let mut schema = schema();
        let rel = id(&schema, "WallHasDoors");
        let (class, lookup) = schema.edit(rel).unwrap();
        let rel_class = class.as_relationship_mut().unwrap();

        rel_class
            .source_mut()
            .from_json(&json!({ "constraintClasses": ["RelLink"] }), lookup)
            .unwrap();

        // homogeneity is enforced through JSON too
        let err = rel_class
            .source_mut()
            .from_json(&json!({ "constraintClasses": ["Wall"] }), lookup)
            .unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);
        assert!(err.to_string().contains("WallHasDoors.Source"));

        let err = rel_class
            .target_mut()
            .from_json(&json!({ "abstractConstraint": "Point" }), lookup)
            .unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECJson);

        let json = json!({ "abstractConstraint": "Ghost", "constraintClasses": ["Nope"] });
        let err = rel_class.target_mut().from_json(&json, lookup).unwrap_err();
        assert_eq!(err.iter().count(), 2);
        assert!(rel_class.target().constraint_classes().is_none());
    }

    #[test]
    fn test_properties() {
        let mut schema = schema();
        let wall = load(
            &mut schema,
            "Wall",
            json!({
                "properties": [
                    { "name": "Height", "type": "PrimitiveProperty", "typeName": "double", "label": "Height", "priority": 10 },
                    { "name": "Origin", "type": "StructProperty", "typeName": "Point" },
                    { "name": "Outline", "type": "StructArrayProperty", "typeName": "Point", "minOccurs": 3 },
                    { "name": "Codes", "type": "PrimitiveArrayProperty", "typeName": "string", "maxOccurs": 4 },
                    { "name": "Doors", "type": "NavigationProperty", "relationshipName": "WallHasDoors", "isReadOnly": true },
                ],
                "customAttributes": [
                    { "className": "Hidden", "Show": false },
                ],
            }),
        )
        .unwrap();

        let class = schema.class(wall).unwrap();
        let names: Vec<_> = class.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Height", "Origin", "Outline", "Codes", "Doors"]);

        let height = class.get_property("height").unwrap();
        assert_eq!(height.primitive_type(), Some(PrimitiveType::Double));
        assert_eq!(height.priority, 10);
        assert_eq!(height.label.as_deref(), Some("Height"));

        assert_eq!(
            class.get_property("Origin").unwrap().struct_class(),
            Some(id(&schema, "Point"))
        );
        let outline = class.get_property("Outline").unwrap().array_bounds().unwrap();
        assert_eq!((outline.min_occurs, outline.max_occurs), (3, None));
        let codes = class.get_property("Codes").unwrap().array_bounds().unwrap();
        assert_eq!((codes.min_occurs, codes.max_occurs), (0, Some(4)));

        let doors = class.get_property("Doors").unwrap();
        assert!(doors.is_read_only);
        assert_eq!(
            doors.navigation(),
            Some((id(&schema, "WallHasDoors"), StrengthDirection::Forward))
        );

        let hidden = class.custom_attributes.get("hidden").unwrap();
        assert_eq!(hidden.properties["Show"], AttributeValue::Bool(false));
    }

    #[test]
    fn test_property_errors_are_collected() {
        let mut schema = schema();
        let err = load(
            &mut schema,
            "Door",
            json!({
                "properties": [
                    { "name": "Width", "type": "PrimitiveProperty", "typeName": "double" },
                    { "name": "WIDTH", "type": "PrimitiveProperty", "typeName": "int" },
                    { "name": "Pos", "type": "StructProperty", "typeName": "Wall" },
                    { "name": "Kind", "type": "PrimitiveProperty", "typeName": "decimal" },
                    { "name": "Owner", "type": "NavigationProperty", "relationshipName": "Nope" },
                ],
            }),
        )
        .unwrap_err();

        let statuses: Vec<_> = err.iter().map(|e| e.status()).collect();
        assert_eq!(
            statuses,
            [
                EcStatus::DuplicateProperty,
                EcStatus::InvalidType,
                EcStatus::InvalidPrimitiveType,
                EcStatus::InvalidType,
            ]
        );
        let door = schema.class(id(&schema, "Door")).unwrap();
        assert_eq!(door.properties().len(), 1);
    }

    #[test]
    fn test_navigation_property_on_struct_rejected() {
        let mut schema = schema();
        let err = load(
            &mut schema,
            "Point",
            json!({
                "properties": [
                    { "name": "Owner", "type": "NavigationProperty", "relationshipName": "WallHasDoors" },
                ],
            }),
        )
        .unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidType);
        assert_eq!(schema.index().kind_of(id(&schema, "Point")), Some(ClassKind::Struct));
    }
}
