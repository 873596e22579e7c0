// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relationship constraints: the source and target ends of a relationship class

use crate::{
    ClassId, ConstraintKind, EcError, RelationshipEnd, RelationshipMultiplicity, Result,
    SchemaLookup, SchemaLookupExt,
};
use serde::Serialize;
use std::ops::Deref;

/// One end (source or target) of a relationship class
///
/// Constraints are created together with their relationship class and keep
/// a back-reference to it. The class collection is homogeneous: either all
/// entity classes (mixins included) or all relationship classes.
///
/// Outside this crate a constraint is only reachable through its class:
/// shared, or mutably through [`ConstraintMut`].
#[derive(Debug, PartialEq, Serialize)]
pub struct RelationshipConstraint {
    relationship: ClassId,
    end: RelationshipEnd,
    pub multiplicity: RelationshipMultiplicity,
    pub polymorphic: bool,
    pub role_label: Option<String>,
    constraint_classes: Option<Vec<ClassId>>,
    constraint_kind: Option<ConstraintKind>,
    abstract_constraint: Option<ClassId>,
}

impl RelationshipConstraint {
    pub(crate) fn new(relationship: ClassId, end: RelationshipEnd) -> Self {
        Self {
            relationship,
            end,
            multiplicity: RelationshipMultiplicity::default(),
            polymorphic: false,
            role_label: None,
            constraint_classes: None,
            constraint_kind: None,
            abstract_constraint: None,
        }
    }

    /// The relationship class owning this constraint
    pub fn relationship(&self) -> ClassId {
        self.relationship
    }

    pub fn end(&self) -> RelationshipEnd {
        self.end
    }

    /// Registered constraint classes, `None` until the first [`add_class`](Self::add_class)
    pub fn constraint_classes(&self) -> Option<&[ClassId]> {
        self.constraint_classes.as_deref()
    }

    /// Element kind of the constraint class collection
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        self.constraint_kind
    }

    /// The abstract constraint
    ///
    /// The explicitly set value if any; otherwise the single constraint
    /// class when exactly one is registered.
    pub fn abstract_constraint(&self) -> Option<ClassId> {
        if self.abstract_constraint.is_some() {
            return self.abstract_constraint;
        }
        match self.constraint_classes.as_deref() {
            Some([single]) => Some(*single),
            _ => None,
        }
    }

    /// The explicitly set abstract constraint, ignoring the implicit fallback
    pub fn explicit_abstract_constraint(&self) -> Option<ClassId> {
        self.abstract_constraint
    }

    fn set_abstract_constraint(&mut self, class: Option<ClassId>) {
        self.abstract_constraint = class;
    }

    fn add_class(&mut self, class: ClassId, lookup: &dyn SchemaLookup) -> Result<()> {
        let context = self.context(lookup);
        let kind = lookup
            .kind_of(class)
            .ok_or_else(|| EcError::json(&context, format!("unknown class {}", class)))?;
        let incoming = kind.constraint_kind().ok_or_else(|| {
            EcError::json(
                &context,
                format!(
                    "{} '{}' cannot be a relationship constraint class",
                    kind,
                    lookup.display_name(class)
                ),
            )
        })?;

        if let Some(existing) = self.constraint_kind {
            if existing != incoming {
                return Err(EcError::json(
                    &context,
                    format!(
                        "cannot add {} '{}': constraint classes must all be {}",
                        kind,
                        lookup.display_name(class),
                        match existing {
                            ConstraintKind::Entity => "entity classes",
                            ConstraintKind::Relationship => "relationship classes",
                        }
                    ),
                ));
            }
        }

        self.constraint_kind = Some(incoming);
        self.constraint_classes.get_or_insert_with(Vec::new).push(class);
        Ok(())
    }

    /// Whether `class` is registered as a constraint class
    pub fn has_class(&self, class: ClassId) -> bool {
        self.constraint_classes
            .as_deref()
            .is_some_and(|classes| classes.contains(&class))
    }

    /// Error context, e.g. `OwnsWalls.Source`
    pub fn context(&self, lookup: &dyn SchemaLookup) -> String {
        format!("{}.{}", lookup.display_name(self.relationship), self.end)
    }
}

/// Mutable access to a constraint of a relationship class
///
/// Every field except the owning relationship and the end can be edited.
#[derive(Debug)]
pub struct ConstraintMut<'a> {
    constraint: &'a mut RelationshipConstraint,
}

impl<'a> ConstraintMut<'a> {
    pub(crate) fn new(constraint: &'a mut RelationshipConstraint) -> Self {
        Self { constraint }
    }

    pub fn set_multiplicity(&mut self, multiplicity: RelationshipMultiplicity) {
        self.constraint.multiplicity = multiplicity;
    }

    pub fn set_polymorphic(&mut self, polymorphic: bool) {
        self.constraint.polymorphic = polymorphic;
    }

    pub fn set_role_label(&mut self, role_label: Option<String>) {
        self.constraint.role_label = role_label;
    }

    /// Set or clear the explicit abstract constraint
    pub fn set_abstract_constraint(&mut self, class: Option<ClassId>) {
        self.constraint.set_abstract_constraint(class);
    }

    /// Register a constraint class
    ///
    /// Fails with `InvalidECJson` if the class is not an entity, mixin or
    /// relationship class, or if its kind differs from the classes already
    /// registered.
    pub fn add_class(&mut self, class: ClassId, lookup: &dyn SchemaLookup) -> Result<()> {
        self.constraint.add_class(class, lookup)
    }
}

impl Deref for ConstraintMut<'_> {
    type Target = RelationshipConstraint;

    fn deref(&self) -> &RelationshipConstraint {
        self.constraint
    }
}
