// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed drafts of EC-JSON class and constraint objects
//!
//! A draft holds every field of the input in validated form, with class
//! references still given by name. Turning a draft into model state happens
//! in [`crate::resolve`], once all sibling classes exist.

use crate::fields::{decode, Errors, JsonObject};
use crate::multiplicity::parse_multiplicity;
use ec_lite_model::{
    AttributeValue, ClassKind, ClassModifier, CustomAttribute, CustomAttributeContainerType,
    EcError, RelationshipMultiplicity, Result, StrengthDirection, StrengthType,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Unresolved class
#[derive(Debug)]
pub(crate) struct ClassDraft<'a> {
    /// Class name, used as error context
    pub context: String,
    pub label: Option<&'a str>,
    pub description: Option<&'a str>,
    pub modifier: Option<ClassModifier>,
    pub base_class: Option<&'a str>,
    pub properties: Vec<PropertyDraft>,
    pub custom_attributes: Vec<CustomAttribute>,
    pub variant: VariantDraft<'a>,
}

/// Unresolved kind-specific fields
#[derive(Debug)]
pub(crate) enum VariantDraft<'a> {
    Entity {
        mixins: Vec<&'a str>,
    },
    Mixin {
        applies_to: Option<&'a str>,
    },
    Struct,
    CustomAttribute {
        container_type: Option<CustomAttributeContainerType>,
    },
    Relationship {
        strength: Option<StrengthType>,
        strength_direction: Option<StrengthDirection>,
        source: Option<ConstraintDraft<'a>>,
        target: Option<ConstraintDraft<'a>>,
    },
}

/// Unresolved relationship constraint
#[derive(Debug, Default)]
pub(crate) struct ConstraintDraft<'a> {
    /// e.g. `WallHasDoors.Source`
    pub context: String,
    pub role_label: Option<&'a str>,
    pub polymorphic: Option<bool>,
    pub multiplicity: Option<RelationshipMultiplicity>,
    pub abstract_constraint: Option<&'a str>,
    pub constraint_classes: Option<Vec<&'a str>>,
}

/// Property type with the reference names it needs
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PropertyTypeDraft {
    Primitive(String),
    PrimitiveArray(String),
    Struct(String),
    StructArray(String),
    Navigation {
        relationship: String,
        direction: Option<String>,
    },
}

/// Unresolved property
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PropertyDraft {
    pub name: String,
    pub ty: PropertyTypeDraft,
    pub label: Option<String>,
    pub description: Option<String>,
    pub is_read_only: bool,
    pub priority: i32,
    pub min_occurs: Option<u32>,
    pub max_occurs: Option<u32>,
}

/// Property `type` tags of EC-JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
enum PropertyTag {
    PrimitiveProperty,
    PrimitiveArrayProperty,
    StructProperty,
    StructArrayProperty,
    NavigationProperty,
}

/// Property object as it appears in EC-JSON
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyJson {
    name: String,
    #[serde(rename = "type")]
    tag: PropertyTag,
    type_name: Option<String>,
    relationship_name: Option<String>,
    direction: Option<String>,
    min_occurs: Option<u32>,
    max_occurs: Option<u32>,
    label: Option<String>,
    description: Option<String>,
    #[serde(default)]
    is_read_only: bool,
    #[serde(default)]
    priority: i32,
}

impl PropertyDraft {
    fn parse(value: &Value, class_name: &str, index: usize) -> Result<Self> {
        let json: PropertyJson = decode(value, &format!("{}.properties[{}]", class_name, index))?;
        let context = format!("{}.{}", class_name, json.name);

        let type_name = |json: &PropertyJson| {
            json.type_name
                .clone()
                .ok_or_else(|| EcError::json(&context, "missing required attribute 'typeName'"))
        };
        let ty = match json.tag {
            PropertyTag::PrimitiveProperty => PropertyTypeDraft::Primitive(type_name(&json)?),
            PropertyTag::PrimitiveArrayProperty => {
                PropertyTypeDraft::PrimitiveArray(type_name(&json)?)
            }
            PropertyTag::StructProperty => PropertyTypeDraft::Struct(type_name(&json)?),
            PropertyTag::StructArrayProperty => PropertyTypeDraft::StructArray(type_name(&json)?),
            PropertyTag::NavigationProperty => PropertyTypeDraft::Navigation {
                relationship: json.relationship_name.clone().ok_or_else(|| {
                    EcError::json(&context, "missing required attribute 'relationshipName'")
                })?,
                direction: json.direction.clone(),
            },
        };

        let is_array = matches!(
            ty,
            PropertyTypeDraft::PrimitiveArray(_) | PropertyTypeDraft::StructArray(_)
        );
        if !is_array && (json.min_occurs.is_some() || json.max_occurs.is_some()) {
            return Err(EcError::json(
                &context,
                "minOccurs and maxOccurs only apply to array properties",
            ));
        }
        if let (Some(min), Some(max)) = (json.min_occurs, json.max_occurs) {
            if min > max {
                return Err(EcError::json(
                    &context,
                    format!("minOccurs {} exceeds maxOccurs {}", min, max),
                ));
            }
        }

        Ok(Self {
            name: json.name,
            ty,
            label: json.label,
            description: json.description,
            is_read_only: json.is_read_only,
            priority: json.priority,
            min_occurs: json.min_occurs,
            max_occurs: json.max_occurs,
        })
    }
}

impl<'a> ClassDraft<'a> {
    /// Validate the fields of a class object
    ///
    /// Independent field errors are collected and reported together.
    pub fn parse(json: &'a Value, class_name: &str, kind: ClassKind) -> Result<Self> {
        let obj = JsonObject::new(json, class_name)?;
        let mut errors = Errors::default();

        if let Some(name) = errors.take(obj.get_str("name")).flatten() {
            if !name.eq_ignore_ascii_case(class_name) {
                errors.push(EcError::json(
                    class_name,
                    format!("name '{}' does not match the class name", name),
                ));
            }
        }
        let label = errors.take(obj.get_str("label")).flatten();
        let description = errors.take(obj.get_str("description")).flatten();
        let modifier = errors.take(obj.get_parsed::<ClassModifier>("modifier")).flatten();
        let base_class = errors.take(obj.get_str("baseClass")).flatten();

        let mut properties = Vec::new();
        if let Some(items) = errors.take(obj.get_array("properties")).flatten() {
            for (i, item) in items.iter().enumerate() {
                if let Some(draft) = errors.take(PropertyDraft::parse(item, class_name, i)) {
                    properties.push(draft);
                }
            }
        }

        let mut custom_attributes = Vec::new();
        if let Some(items) = errors.take(obj.get_array("customAttributes")).flatten() {
            for (i, item) in items.iter().enumerate() {
                let context = format!("{}.customAttributes[{}]", class_name, i);
                if let Some(ca) = errors.take(parse_custom_attribute(item, context)) {
                    custom_attributes.push(ca);
                }
            }
        }

        let variant = match kind {
            ClassKind::Entity => VariantDraft::Entity {
                mixins: errors.take(obj.get_names("mixin")).flatten().unwrap_or_default(),
            },
            ClassKind::Mixin => VariantDraft::Mixin {
                applies_to: errors.take(obj.get_str("appliesTo")).flatten(),
            },
            ClassKind::Struct => VariantDraft::Struct,
            ClassKind::CustomAttribute => VariantDraft::CustomAttribute {
                container_type: errors
                    .take(obj.require_parsed::<CustomAttributeContainerType>("appliesTo")),
            },
            ClassKind::Relationship => VariantDraft::Relationship {
                strength: errors.take(obj.get_parsed::<StrengthType>("strength")).flatten(),
                strength_direction: errors
                    .take(obj.get_parsed::<StrengthDirection>("strengthDirection"))
                    .flatten(),
                source: parse_end(&obj, "source", &mut errors),
                target: parse_end(&obj, "target", &mut errors),
            },
        };

        errors.finish()?;
        Ok(Self {
            context: class_name.to_string(),
            label,
            description,
            modifier,
            base_class,
            properties,
            custom_attributes,
            variant,
        })
    }
}

fn parse_end<'a>(
    obj: &JsonObject<'a>,
    key: &str,
    errors: &mut Errors,
) -> Option<ConstraintDraft<'a>> {
    let value = errors.take(obj.get_object(key)).flatten()?;
    let end = if key == "source" { "Source" } else { "Target" };
    errors.take(ConstraintDraft::parse(
        value,
        format!("{}.{}", obj.context(), end),
    ))
}

impl<'a> ConstraintDraft<'a> {
    /// Validate the fields of a constraint object
    pub fn parse(json: &'a Value, context: String) -> Result<Self> {
        let obj = JsonObject::new(json, context)?;
        let mut errors = Errors::default();

        let role_label = errors.take(obj.get_str("roleLabel")).flatten();
        let polymorphic = errors.take(obj.get_bool("polymorphic")).flatten();
        let multiplicity = errors
            .take(obj.get_str("multiplicity").and_then(|m| m.map(parse_multiplicity).transpose()))
            .flatten();
        let abstract_constraint = errors.take(obj.get_str("abstractConstraint")).flatten();
        let constraint_classes = errors.take(obj.get_str_list("constraintClasses")).flatten();

        errors.finish()?;
        Ok(Self {
            context: obj.context().to_string(),
            role_label,
            polymorphic,
            multiplicity,
            abstract_constraint,
            constraint_classes,
        })
    }
}

fn parse_custom_attribute(value: &Value, context: String) -> Result<CustomAttribute> {
    let obj = JsonObject::new(value, context)?;
    let mut attribute = CustomAttribute::new(obj.require_str("className")?);
    for (key, member) in obj.map() {
        if key != "className" {
            attribute
                .properties
                .insert(key.clone(), attribute_value(member));
        }
    }
    Ok(attribute)
}

/// Convert a raw JSON member of a custom attribute instance
pub(crate) fn attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null,
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => AttributeValue::Integer(i),
            None => AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => AttributeValue::String(s.clone()),
        Value::Array(items) => AttributeValue::List(items.iter().map(attribute_value).collect()),
        Value::Object(members) => AttributeValue::Struct(
            members
                .iter()
                .map(|(k, v)| (k.clone(), attribute_value(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}
