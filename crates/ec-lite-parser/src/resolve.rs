// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolution of drafts against the owning schema
//!
//! Names become [`ClassId`]s through a [`SchemaLookup`]. An unresolved name
//! is an error, never a silent `None`. All failures found while resolving
//! one class are reported together; on failure the class may be partially
//! populated.
//!
//! [`ClassId`]: ec_lite_model::ClassId

use crate::draft::{ClassDraft, ConstraintDraft, PropertyDraft, PropertyTypeDraft, VariantDraft};
use crate::fields::Errors;
use ec_lite_model::{
    ClassKind, ConstraintMut, DirectionRef, EcClass, EcError, Result, SchemaLookup,
    SchemaLookupExt, StrengthDirection,
};

/// Kinds allowed as abstract constraint
const CONSTRAINT_KINDS: &[ClassKind] = &[
    ClassKind::Entity,
    ClassKind::Mixin,
    ClassKind::Relationship,
];

impl ClassDraft<'_> {
    /// Populate `class` from this draft
    pub fn apply(self, class: &mut EcClass, lookup: &dyn SchemaLookup) -> Result<()> {
        let mut errors = Errors::default();
        let context = self.context;

        if let Some(label) = self.label {
            class.label = Some(label.to_string());
        }
        if let Some(description) = self.description {
            class.description = Some(description.to_string());
        }
        if let Some(modifier) = self.modifier {
            class.modifier = modifier;
        }

        // Base class must be of the same kind
        if let Some(base) = self.base_class {
            let field = format!("{}.baseClass", context);
            if let Some(id) = errors.take(lookup.resolve_or_err(&field, base, &[class.kind()])) {
                if id == class.id() {
                    errors.push(EcError::json(field, "a class cannot derive from itself"));
                } else {
                    class.base_class = Some(id);
                }
            }
        }

        let variant = apply_variant(self.variant, class, &context, lookup, &mut errors);
        errors.take(variant);

        for property in self.properties {
            errors.take(create_property(class, property, lookup));
        }
        for attribute in self.custom_attributes {
            class.custom_attributes.insert(attribute);
        }

        errors.finish()
    }
}

/// Apply the kind-specific part of a draft
///
/// Reference errors go to `errors`; the result only fails when the draft
/// was parsed for another kind of class.
fn apply_variant(
    variant: VariantDraft<'_>,
    class: &mut EcClass,
    context: &str,
    lookup: &dyn SchemaLookup,
    errors: &mut Errors,
) -> Result<()> {
    let kind = class.kind();
    let mismatch = || EcError::other(format!("{}: loaded fields do not match a {}", context, kind));

    match variant {
        VariantDraft::Entity { mixins } => {
            let entity = class.as_entity_mut().ok_or_else(mismatch)?;
            let field = format!("{}.mixin", context);
            for name in mixins {
                if let Some(id) =
                    errors.take(lookup.resolve_or_err(&field, name, &[ClassKind::Mixin]))
                {
                    entity.mixins.push(id);
                }
            }
        }
        VariantDraft::Mixin { applies_to } => {
            let mixin = class.as_mixin_mut().ok_or_else(mismatch)?;
            if let Some(name) = applies_to {
                let field = format!("{}.appliesTo", context);
                mixin.applies_to =
                    errors.take(lookup.resolve_or_err(&field, name, &[ClassKind::Entity]));
            }
        }
        VariantDraft::Struct => {
            if kind != ClassKind::Struct {
                return Err(mismatch());
            }
        }
        VariantDraft::CustomAttribute { container_type } => {
            let ca = class.as_custom_attribute_mut().ok_or_else(mismatch)?;
            if let Some(container_type) = container_type {
                ca.container_type = container_type;
            }
        }
        VariantDraft::Relationship {
            strength,
            strength_direction,
            source,
            target,
        } => {
            let rel = class.as_relationship_mut().ok_or_else(mismatch)?;
            if let Some(strength) = strength {
                rel.strength = strength;
            }
            if let Some(direction) = strength_direction {
                rel.strength_direction = direction;
            }
            if let Some(source) = source {
                errors.take(source.apply(&mut rel.source_mut(), lookup));
            }
            if let Some(target) = target {
                errors.take(target.apply(&mut rel.target_mut(), lookup));
            }
        }
    }
    Ok(())
}

fn create_property(
    class: &mut EcClass,
    draft: PropertyDraft,
    lookup: &dyn SchemaLookup,
) -> Result<()> {
    let name = draft.name.as_str();
    let property = match &draft.ty {
        PropertyTypeDraft::Primitive(ty) => class.create_primitive_property(name, ty.as_str())?,
        PropertyTypeDraft::PrimitiveArray(ty) => {
            class.create_primitive_array_property(name, ty.as_str())?
        }
        PropertyTypeDraft::Struct(ty) => class.create_struct_property(name, ty.as_str(), lookup)?,
        PropertyTypeDraft::StructArray(ty) => {
            class.create_struct_array_property(name, ty.as_str(), lookup)?
        }
        PropertyTypeDraft::Navigation {
            relationship,
            direction,
        } => {
            let rel = lookup.find(relationship).ok_or_else(|| {
                EcError::invalid_type(
                    format!("{}.{}", class.name(), name),
                    format!("unable to locate relationship class '{}'", relationship),
                )
            })?;
            let direction = direction.as_deref().map_or(
                DirectionRef::Direction(StrengthDirection::Forward),
                DirectionRef::Name,
            );
            class.create_navigation_property(name, rel, direction, lookup)?
        }
    };

    property.label = draft.label;
    property.description = draft.description;
    property.is_read_only = draft.is_read_only;
    property.priority = draft.priority;
    if let Some(bounds) = property.array_bounds_mut() {
        if let Some(min) = draft.min_occurs {
            bounds.min_occurs = min;
        }
        if draft.max_occurs.is_some() {
            bounds.max_occurs = draft.max_occurs;
        }
    }
    Ok(())
}

impl ConstraintDraft<'_> {
    /// Populate `constraint` from this draft
    pub fn apply(
        self,
        constraint: &mut ConstraintMut<'_>,
        lookup: &dyn SchemaLookup,
    ) -> Result<()> {
        let mut errors = Errors::default();

        if let Some(role_label) = self.role_label {
            constraint.set_role_label(Some(role_label.to_string()));
        }
        if let Some(polymorphic) = self.polymorphic {
            constraint.set_polymorphic(polymorphic);
        }
        if let Some(multiplicity) = self.multiplicity {
            constraint.set_multiplicity(multiplicity);
        }

        if let Some(name) = self.abstract_constraint {
            let field = format!("{}.abstractConstraint", self.context);
            if let Some(id) = errors.take(lookup.resolve_or_err(&field, name, CONSTRAINT_KINDS)) {
                constraint.set_abstract_constraint(Some(id));
            }
        }

        if let Some(names) = self.constraint_classes {
            let field = format!("{}.constraintClasses", self.context);
            for name in names {
                let added = lookup
                    .find(name)
                    .ok_or_else(|| {
                        EcError::json(&field, format!("unable to locate class '{}'", name))
                    })
                    .and_then(|id| constraint.add_class(id, lookup));
                errors.take(added);
            }
        }

        errors.finish()
    }
}
