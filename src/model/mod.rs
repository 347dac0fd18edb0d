//! The resolved class model.
//!
//! ```text
//! Model
//! ├── packages: Vec<Package>        (diagram order)
//! ├── entities: Vec<Entity>         (diagram order, companions follow their class)
//! ├── index: IndexMap<id, position> (derived, rebuilt on every replacement)
//! └── imports: ImportTable
//! ```
//!
//! Pipeline stages never patch entities in place through the index. They
//! produce a new entity list and hand it to [`Model::with_entities`], which
//! rebuilds the index from scratch.

mod entity;
mod imports;

pub use entity::{Attribute, ClassType, Entity, Mutability, Operation, Parameter, Visibility};
pub use imports::ImportTable;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::Geometry;

/// A package drawn on the diagram.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Package {
    pub name: SmolStr,
    pub geometry: Geometry,
}

impl Package {
    pub fn new(name: impl Into<SmolStr>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
        }
    }
}

/// Packages, entities and the import table of one diagram.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Model {
    pub packages: Vec<Package>,
    entities: Vec<Entity>,
    /// Entity id → position in `entities`.
    #[cfg_attr(feature = "serde", serde(skip))]
    index: IndexMap<SmolStr, usize>,
    pub imports: ImportTable,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_imports(mut self, imports: ImportTable) -> Self {
        self.imports = imports;
        self
    }

    pub fn with_packages(mut self, packages: Vec<Package>) -> Self {
        self.packages = packages;
        self
    }

    /// Replace the entity list and rebuild the id index.
    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.index = build_index(&entities);
        self.entities = entities;
        self
    }

    /// Assemble a model from its parts, building the id index.
    pub fn from_parts(packages: Vec<Package>, entities: Vec<Entity>, imports: ImportTable) -> Self {
        Model {
            packages,
            imports,
            ..Model::default()
        }
        .with_entities(entities)
    }

    /// Apply `f` to every entity, keeping the entity count.
    pub fn map_entities<F>(self, f: F) -> Self
    where
        F: FnMut(Entity) -> Entity,
    {
        let Model {
            packages,
            entities,
            imports,
            ..
        } = self;
        let entities = entities.into_iter().map(f).collect();
        Model::from_parts(packages, entities, imports)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Take the entity list out, e.g. to build a replacement.
    pub fn into_parts(self) -> (Vec<Package>, Vec<Entity>, ImportTable) {
        (self.packages, self.entities, self.imports)
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.index.get(id).map(|&pos| &self.entities[pos])
    }

    /// Position of the entity with this id in [`Model::entities`].
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains_entity(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Entities owned by the named package.
    pub fn entities_in<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a Entity> {
        self.entities.iter().filter(move |e| e.package() == package)
    }

    /// All entities with the given name and package, in model order.
    pub fn find_by_ref<'a>(
        &'a self,
        name: &'a str,
        package: &'a str,
    ) -> impl Iterator<Item = &'a Entity> {
        self.entities
            .iter()
            .filter(move |e| e.name() == name && e.package() == package)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

fn build_index(entities: &[Entity]) -> IndexMap<SmolStr, usize> {
    let mut index = IndexMap::with_capacity(entities.len());
    for (pos, entity) in entities.iter().enumerate() {
        index.entry(entity.id.clone()).or_insert(pos);
    }
    index
}
