// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schema container and its class index

use crate::{
    validate_ec_name, ClassId, ClassKind, ClassModifier, EcClass, EcError, Property, Result,
    SchemaLookup, StrengthDirection, StrengthType,
};
use rustc_hash::FxHashMap;

/// Name index of the classes in a schema
///
/// Kept apart from the class arena so a class can be edited while names
/// are resolved against its siblings.
#[derive(Clone, Debug)]
pub struct ClassIndex {
    schema_name: String,
    alias: String,
    /// Lowercased name -> class
    by_name: FxHashMap<String, ClassId>,
    names: Vec<String>,
    kinds: Vec<ClassKind>,
}

impl ClassIndex {
    fn new(schema_name: &str, alias: &str) -> Self {
        Self {
            schema_name: schema_name.to_string(),
            alias: alias.to_string(),
            by_name: FxHashMap::default(),
            names: Vec::new(),
            kinds: Vec::new(),
        }
    }

    fn insert(&mut self, name: &str, kind: ClassKind) -> ClassId {
        let id = ClassId(self.names.len() as u32);
        self.by_name.insert(name.to_ascii_lowercase(), id);
        self.names.push(name.to_string());
        self.kinds.push(kind);
        id
    }

    /// Strip a `Schema.` / `Alias.` (or `:`) qualifier naming this schema
    ///
    /// Returns `None` when the qualifier names another schema.
    fn unqualify<'n>(&self, name: &'n str) -> Option<&'n str> {
        match name.rsplit_once(['.', ':']) {
            None => Some(name),
            Some((prefix, local))
                if prefix.eq_ignore_ascii_case(&self.schema_name)
                    || (!self.alias.is_empty() && prefix.eq_ignore_ascii_case(&self.alias)) =>
            {
                Some(local)
            }
            Some(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl SchemaLookup for ClassIndex {
    fn find(&self, name: &str) -> Option<ClassId> {
        let local = self.unqualify(name)?;
        self.by_name.get(&local.to_ascii_lowercase()).copied()
    }

    fn kind_of(&self, id: ClassId) -> Option<ClassKind> {
        self.kinds.get(id.0 as usize).copied()
    }

    fn name_of(&self, id: ClassId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }
}

/// An EC schema: a named container of classes
///
/// Classes are stored in an arena and refer to each other by [`ClassId`].
/// Names are unique case-insensitively.
///
/// # Example
///
/// ```ignore
/// use ec_lite_model::{Schema, ClassModifier, PrimitiveType};
///
/// let mut schema = Schema::new("Building", "bld", "01.00.00");
/// let wall = schema.add_entity_class("Wall", ClassModifier::None)?;
/// schema
///     .class_mut(wall)
///     .unwrap()
///     .create_primitive_property("Height", PrimitiveType::Double)?;
/// ```
#[derive(Debug)]
pub struct Schema {
    name: String,
    alias: String,
    version: String,
    pub label: Option<String>,
    pub description: Option<String>,
    index: ClassIndex,
    classes: Vec<EcClass>,
}

impl Schema {
    pub fn new(
        name: impl Into<String>,
        alias: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let alias = alias.into();
        let index = ClassIndex::new(&name, &alias);
        Self {
            name,
            alias,
            version: version.into(),
            label: None,
            description: None,
            index,
            classes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The name lookup of this schema
    pub fn index(&self) -> &ClassIndex {
        &self.index
    }

    // ========================================================================
    // Adding classes
    // ========================================================================

    /// Add a bare class of the given kind
    ///
    /// Fails with `InvalidECName` on an invalid name and `DuplicateItem` if a
    /// class of that name already exists.
    pub fn add_class(
        &mut self,
        name: &str,
        modifier: ClassModifier,
        kind: ClassKind,
    ) -> Result<ClassId> {
        self.check_new_class(name)?;
        let id = self.index.insert(name, kind);
        self.classes
            .push(EcClass::new(id, name.to_string(), modifier, kind));
        Ok(id)
    }

    pub fn add_entity_class(&mut self, name: &str, modifier: ClassModifier) -> Result<ClassId> {
        self.add_class(name, modifier, ClassKind::Entity)
    }

    pub fn add_mixin_class(&mut self, name: &str, modifier: ClassModifier) -> Result<ClassId> {
        self.add_class(name, modifier, ClassKind::Mixin)
    }

    pub fn add_struct_class(&mut self, name: &str, modifier: ClassModifier) -> Result<ClassId> {
        self.add_class(name, modifier, ClassKind::Struct)
    }

    pub fn add_custom_attribute_class(
        &mut self,
        name: &str,
        modifier: ClassModifier,
    ) -> Result<ClassId> {
        self.add_class(name, modifier, ClassKind::CustomAttribute)
    }

    /// Add a relationship class
    ///
    /// Strength defaults to `Referencing` and direction to `Forward`. Both
    /// constraints are created here.
    pub fn add_relationship_class(
        &mut self,
        name: &str,
        modifier: ClassModifier,
        strength: Option<StrengthType>,
        strength_direction: Option<StrengthDirection>,
    ) -> Result<ClassId> {
        self.check_new_class(name)?;
        let id = self.index.insert(name, ClassKind::Relationship);
        self.classes.push(EcClass::new_relationship(
            id,
            name.to_string(),
            modifier,
            strength,
            strength_direction,
        ));
        Ok(id)
    }

    fn check_new_class(&self, name: &str) -> Result<()> {
        validate_ec_name(name)?;
        if self.index.find(name).is_some() {
            return Err(EcError::DuplicateItem {
                schema: self.name.clone(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Access
    // ========================================================================

    pub fn class(&self, id: ClassId) -> Option<&EcClass> {
        self.classes.get(id.0 as usize)
    }

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut EcClass> {
        self.classes.get_mut(id.0 as usize)
    }

    /// Mutable class together with the schema lookup, for operations that
    /// resolve names while editing the class
    pub fn edit(&mut self, id: ClassId) -> Option<(&mut EcClass, &ClassIndex)> {
        let class = self.classes.get_mut(id.0 as usize)?;
        Some((class, &self.index))
    }

    /// Find a class id by (possibly qualified) name
    pub fn lookup_id(&self, name: &str) -> Option<ClassId> {
        self.index.find(name)
    }

    /// Get a class by (possibly qualified) name
    pub fn get_class(&self, name: &str) -> Option<&EcClass> {
        self.lookup_id(name).and_then(|id| self.class(id))
    }

    /// Get a class by name if it is of the given kind
    pub fn get_class_of_kind(&self, name: &str, kind: ClassKind) -> Option<&EcClass> {
        self.get_class(name).filter(|c| c.kind() == kind)
    }

    pub fn classes(&self) -> impl Iterator<Item = &EcClass> {
        self.classes.iter()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Base class chain of a class, nearest first
    ///
    /// Stops at a cycle.
    pub fn base_classes(&self, id: ClassId) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut current = self.class(id).and_then(|c| c.base_class);
        while let Some(base) = current {
            if base == id || chain.contains(&base) {
                break;
            }
            chain.push(base);
            current = self.class(base).and_then(|c| c.base_class);
        }
        chain
    }

    /// Find a property on the class or, failing that, on its base classes
    /// and then its mixins
    pub fn get_inherited_property(&self, id: ClassId, name: &str) -> Option<&Property> {
        let class = self.class(id)?;
        if let Some(prop) = class.get_property(name) {
            return Some(prop);
        }
        let bases = self.base_classes(id);
        if let Some(prop) = bases
            .iter()
            .filter_map(|base| self.class(*base))
            .find_map(|base| base.get_property(name))
        {
            return Some(prop);
        }
        std::iter::once(id)
            .chain(bases)
            .filter_map(|c| self.class(c)?.as_entity())
            .flat_map(|entity| entity.mixins.iter())
            .filter_map(|mixin| self.class(*mixin))
            .find_map(|mixin| mixin.get_property(name))
    }
}

impl SchemaLookup for Schema {
    fn find(&self, name: &str) -> Option<ClassId> {
        self.index.find(name)
    }

    fn kind_of(&self, id: ClassId) -> Option<ClassKind> {
        self.index.kind_of(id)
    }

    fn name_of(&self, id: ClassId) -> Option<&str> {
        self.index.name_of(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EcStatus, PrimitiveType, SchemaLookupExt};

    #[test]
    fn test_add_and_lookup() {
        let mut schema = Schema::new("Building", "bld", "01.00.00");
        let wall = schema.add_entity_class("Wall", ClassModifier::Abstract).unwrap();

        assert_eq!(schema.lookup_id("wall"), Some(wall));
        assert_eq!(schema.lookup_id("Building.Wall"), Some(wall));
        assert_eq!(schema.lookup_id("bld:WALL"), Some(wall));
        assert_eq!(schema.lookup_id("Other.Wall"), None);
        assert_eq!(schema.get_class("Wall").unwrap().modifier, ClassModifier::Abstract);
        assert!(schema.get_class_of_kind("Wall", ClassKind::Struct).is_none());
        assert_eq!(schema.display_name(wall), "Wall");
    }

    #[test]
    fn test_duplicate_class() {
        let mut schema = Schema::new("Building", "bld", "01.00.00");
        schema.add_entity_class("Wall", ClassModifier::None).unwrap();
        let err = schema.add_struct_class("WALL", ClassModifier::None).unwrap_err();
        assert_eq!(err.status(), EcStatus::DuplicateItem);
        assert_eq!(schema.class_count(), 1);

        let err = schema.add_struct_class("Bad Name", ClassModifier::None).unwrap_err();
        assert_eq!(err.status(), EcStatus::InvalidECName);
    }

    #[test]
    fn test_base_classes_stop_at_cycle() {
        let mut schema = Schema::new("Building", "bld", "01.00.00");
        let a = schema.add_entity_class("A", ClassModifier::None).unwrap();
        let b = schema.add_entity_class("B", ClassModifier::None).unwrap();
        let c = schema.add_entity_class("C", ClassModifier::None).unwrap();
        schema.class_mut(c).unwrap().base_class = Some(b);
        schema.class_mut(b).unwrap().base_class = Some(a);
        assert_eq!(schema.base_classes(c), vec![b, a]);

        schema.class_mut(a).unwrap().base_class = Some(c);
        assert_eq!(schema.base_classes(c), vec![b, a]);
    }

    #[test]
    fn test_inherited_property() {
        let mut schema = Schema::new("Building", "bld", "01.00.00");
        let element = schema.add_entity_class("Element", ClassModifier::Abstract).unwrap();
        let wall = schema.add_entity_class("Wall", ClassModifier::None).unwrap();
        let mixin = schema.add_mixin_class("IFireRated", ClassModifier::Abstract).unwrap();
        schema
            .class_mut(element)
            .unwrap()
            .create_primitive_property("Code", PrimitiveType::String)
            .unwrap();
        schema
            .class_mut(mixin)
            .unwrap()
            .create_primitive_property("Rating", PrimitiveType::Integer)
            .unwrap();
        {
            let class = schema.class_mut(wall).unwrap();
            class.base_class = Some(element);
            class.as_entity_mut().unwrap().mixins.push(mixin);
        }

        assert!(schema.class(wall).unwrap().get_property("Code").is_none());
        assert_eq!(
            schema.get_inherited_property(wall, "code").unwrap().name,
            "Code"
        );
        assert_eq!(
            schema.get_inherited_property(wall, "RATING").unwrap().name,
            "Rating"
        );
        assert!(schema.get_inherited_property(wall, "Missing").is_none());
    }
}
