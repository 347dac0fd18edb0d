//! Qualifying user type names in member signatures.
//!
//! Two passes over every user leaf of attribute types, parameter types and
//! return types. The first stamps the package of a same-named entity on the
//! diagram. The second asks the import table about whatever is still
//! unqualified. A miss in both is left alone.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::model::{Entity, ImportTable, Model};
use crate::types::EntityRef;

use super::observer::{Observer, Stage};

/// Rewrite every user leaf in the member signatures of `entity`.
pub fn map_member_types<F>(mut entity: Entity, f: &mut F) -> Entity
where
    F: FnMut(&EntityRef) -> EntityRef,
{
    for attribute in &mut entity.attributes {
        if let Some(ty) = attribute.type_ref.take() {
            attribute.type_ref = Some(ty.map_user_leaves(f));
        }
    }
    for operation in &mut entity.operations {
        for parameter in &mut operation.parameters {
            parameter.type_ref = parameter.type_ref.map_user_leaves(f);
        }
        if let Some(ty) = operation.return_type.take() {
            operation.return_type = Some(ty.map_user_leaves(f));
        }
    }
    entity
}

/// Name → package of the first entity carrying that name.
fn package_by_name(model: &Model) -> FxHashMap<SmolStr, SmolStr> {
    let mut packages = FxHashMap::default();
    for entity in model.entities() {
        packages
            .entry(entity.reference.name.clone())
            .or_insert_with(|| entity.reference.package.clone());
    }
    packages
}

/// Qualify leaves naming an entity drawn on the diagram.
pub fn resolve_same_package(model: Model) -> Model {
    let packages = package_by_name(&model);
    let mut qualify = |r: &EntityRef| match packages.get(&r.name) {
        Some(package) if !r.is_qualified() => r.with_package(package.clone()),
        _ => r.clone(),
    };
    model.map_entities(|entity| map_member_types(entity, &mut qualify))
}

/// Qualify remaining leaves through the import table.
pub fn resolve_imports(model: Model, imports: &ImportTable) -> Model {
    let mut qualify = |r: &EntityRef| {
        if r.is_qualified() {
            return r.clone();
        }
        match imports.package_for_class(&r.name) {
            Some(package) => {
                tracing::trace!(name = %r.name, package, "qualified from imports");
                r.with_package(package)
            }
            None => r.clone(),
        }
    };
    model.map_entities(|entity| map_member_types(entity, &mut qualify))
}

/// Run both passes with the model's own import table.
pub fn resolve_cross_references(model: Model, observer: &dyn Observer) -> Model {
    observer.stage(Stage::CrossReferences);
    let model = resolve_same_package(model);
    let imports = model.imports.clone();
    resolve_imports(model, &imports)
}
