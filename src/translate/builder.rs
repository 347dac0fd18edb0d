//! Building the entity/package model from diagram objects.
//!
//! ## Steps
//!
//! 1. Packages: every package object, fail-fast on the first malformed one
//! 2. Classes: stereotypes, attributes, operations
//! 3. Package assignment: first package (in package list order) that strictly
//!    contains the class rectangle
//! 4. Companion marking: a class sharing its reference with an object has a
//!    companion
//! 5. Companion synthesis: class-scoped members move to a new object

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::Geometry;
use crate::base::constants::{
    CLASS, CLASS_SCOPE, COMPANION_ID_SUFFIX, ELEM_CORNER, ELEM_HEIGHT, ELEM_WIDTH, NAME,
    OBJECT_KIND, PACKAGE_TYPES, STEREOTYPE, TYPE, UML_ATTRIBUTE, UML_OPERATION, UML_PARAMETER,
    VALUE, VISIBILITY,
};
use crate::model::{
    Attribute, ClassType, Entity, ImportTable, Model, Operation, Package, Parameter, Visibility,
};
use crate::tree::{AttributedTree, Node, TreeError};
use crate::types::{self, EntityRef, TypeRef};

use super::TranslateError;
use super::observer::{Observer, Stage, Warning};
use super::stereotype::{bind_member, parse_class_stereotypes, split_member_name};

/// Run every builder step and produce the initial model.
pub fn build_model<T>(
    tree: &T,
    imports: ImportTable,
    observer: &dyn Observer,
) -> Result<Model, TranslateError>
where
    T: AttributedTree + ?Sized,
{
    let packages = build_packages(tree, observer)?;
    let entities = build_entities(tree, observer)?;
    let model = Model::from_parts(packages, entities, imports);
    let model = assign_packages(model, observer);
    let model = mark_companions(model, observer);
    synthesize_companions(model)
}

// ============================================================================
// PACKAGES
// ============================================================================

/// Read the bounding rectangle of a diagram object.
pub fn read_geometry(node: &Node) -> Result<Geometry, TreeError> {
    let corner = node.point(ELEM_CORNER)?;
    let width = node.real(ELEM_WIDTH)?;
    let height = node.real(ELEM_HEIGHT)?;
    Ok(Geometry::from_corner(corner, width, height))
}

/// Collect packages, large packages first, each kind in document order.
pub fn build_packages<T>(tree: &T, observer: &dyn Observer) -> Result<Vec<Package>, TranslateError>
where
    T: AttributedTree + ?Sized,
{
    observer.stage(Stage::Packages);
    let nodes: Vec<&Node> = PACKAGE_TYPES
        .iter()
        .flat_map(|ty| tree.query(OBJECT_KIND, ty))
        .collect();

    let mut packages = Vec::with_capacity(nodes.len());
    for node in nodes {
        let name = node.string(NAME)?;
        let geometry = read_geometry(node)?;
        tracing::trace!(package = %name, "read package");
        packages.push(Package::new(name.trim(), geometry));
    }
    Ok(packages)
}

// ============================================================================
// CLASSES
// ============================================================================

/// Build one entity per class object, in diagram order.
pub fn build_entities<T>(tree: &T, observer: &dyn Observer) -> Result<Vec<Entity>, TranslateError>
where
    T: AttributedTree + ?Sized,
{
    observer.stage(Stage::Classes);
    tree.query(OBJECT_KIND, CLASS)
        .into_iter()
        .map(|node| build_entity(node, observer))
        .collect()
}

fn build_entity(node: &Node, observer: &dyn Observer) -> Result<Entity, TranslateError> {
    let id = node
        .id()
        .ok_or_else(|| TreeError::missing_attribute(node.describe(), "id"))?;
    let name = node.string(NAME)?.trim().to_string();
    let geometry = read_geometry(node)?;
    let stereotype = node.optional_string(STEREOTYPE)?.unwrap_or_default();

    let stereotypes = parse_class_stereotypes(&name, &stereotype)?;
    for token in stereotypes.unknown {
        observer.warn(Warning::UnknownClassStereotype {
            entity: name.clone(),
            token,
        });
    }

    let mut entity = Entity::new(id, name.as_str(), geometry)
        .with_class_type(stereotypes.class_type);
    entity.mutable = stereotypes.mutable;
    entity.immutable = stereotypes.immutable;

    for record in typed_records(node, "attributes", UML_ATTRIBUTE) {
        let attribute = build_attribute(record, &entity, observer)?;
        entity.attributes.push(attribute);
    }
    for record in typed_records(node, "operations", UML_OPERATION) {
        let operation = build_operation(record, &entity)?;
        entity.operations.push(operation);
    }
    tracing::trace!(
        entity = %entity.name(),
        attributes = entity.attributes.len(),
        operations = entity.operations.len(),
        "read class"
    );
    Ok(entity)
}

/// Records of one composite type held by a named child.
fn typed_records<'a>(node: &'a Node, name: &str, type_name: &str) -> Vec<&'a Node> {
    node.records(name)
        .into_iter()
        .filter(|r| r.type_name() == Some(type_name))
        .collect()
}

/// A string payload that is `None` when blank.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a type string, `None` when blank.
fn parse_optional_type(
    text: &str,
    context: impl FnOnce() -> String,
) -> Result<Option<TypeRef>, TranslateError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    types::parse(text)
        .map(Some)
        .map_err(|e| TranslateError::type_parse(context(), e))
}

fn build_attribute(
    record: &Node,
    owner: &Entity,
    observer: &dyn Observer,
) -> Result<Attribute, TranslateError> {
    let raw_name = record.string(NAME)?;
    let member = split_member_name(&raw_name);
    let flags = bind_member(
        owner.name(),
        owner.mutability(),
        member.name,
        member.stereotype,
        observer,
    )?;

    let type_text = record.string(TYPE)?;
    let type_ref = parse_optional_type(&type_text, || {
        format!("type of attribute '{}' of '{}'", member.name, owner.name())
    })?;

    Ok(Attribute {
        name: SmolStr::new(member.name),
        type_ref,
        visibility: Visibility::from_code(record.enumeration(VISIBILITY)?),
        is_val: flags.is_val,
        default_value: non_empty(record.optional_string(VALUE)?),
        is_lazy: flags.is_lazy,
        is_overriding: false,
        is_class_scope: record.boolean(CLASS_SCOPE)?,
    })
}

fn build_operation(record: &Node, owner: &Entity) -> Result<Operation, TranslateError> {
    let name = record.string(NAME)?.trim().to_string();
    let return_text = record.string(TYPE)?;
    let return_type = parse_optional_type(&return_text, || {
        format!("return type of operation '{name}' of '{}'", owner.name())
    })?;

    let mut operation = Operation::new(name.as_str());
    operation.return_type = return_type;
    operation.visibility = Visibility::from_code(record.enumeration(VISIBILITY)?);
    operation.is_class_scope = record.boolean(CLASS_SCOPE)?;

    for param in typed_records(record, "parameters", UML_PARAMETER) {
        let param_name = param.string(NAME)?.trim().to_string();
        let type_text = param.string(TYPE)?;
        let type_ref = types::parse(&type_text).map_err(|e| {
            TranslateError::type_parse(
                format!(
                    "type of parameter '{param_name}' of operation '{name}' of '{}'",
                    owner.name()
                ),
                e,
            )
        })?;
        operation.parameters.push(Parameter {
            name: SmolStr::new(param_name),
            type_ref,
            default_value: non_empty(param.optional_string(VALUE)?),
        });
    }
    Ok(operation)
}

// ============================================================================
// PACKAGE ASSIGNMENT
// ============================================================================

/// Give each entity the first package whose rectangle strictly contains it.
///
/// Nested packages are not disambiguated: an outer package listed before
/// an inner one wins.
pub fn assign_packages(model: Model, observer: &dyn Observer) -> Model {
    observer.stage(Stage::PackageAssignment);
    let packages = model.packages.clone();
    model.map_entities(|entity| {
        let package = packages
            .iter()
            .find(|p| p.geometry.contains(&entity.geometry))
            .map(|p| p.name.clone())
            .unwrap_or_default();
        entity.with_package(package)
    })
}

// ============================================================================
// COMPANIONS
// ============================================================================

/// Flag classes that share their reference with an object.
pub fn mark_companions(model: Model, observer: &dyn Observer) -> Model {
    observer.stage(Stage::Companions);
    let objects: FxHashSet<EntityRef> = model
        .entities()
        .iter()
        .filter(|e| e.class_type == ClassType::Object)
        .map(|e| e.reference.clone())
        .collect();
    model.map_entities(|mut entity| {
        if entity.class_type == ClassType::Class && objects.contains(&entity.reference) {
            entity.has_companion_object = true;
        }
        entity
    })
}

/// Move class-scoped members of each non-object entity into a new object.
///
/// The companion is placed right after its entity and takes the entity's id
/// plus a fixed suffix. An existing object with the same reference is an
/// error. Objects keep their class-scoped members.
pub fn synthesize_companions(model: Model) -> Result<Model, TranslateError> {
    let objects: FxHashSet<EntityRef> = model
        .entities()
        .iter()
        .filter(|e| e.class_type == ClassType::Object)
        .map(|e| e.reference.clone())
        .collect();

    let (packages, entities, imports) = model.into_parts();
    let mut result = Vec::with_capacity(entities.len());
    for entity in entities {
        if entity.class_type == ClassType::Object || !entity.has_class_scope_members() {
            result.push(entity);
            continue;
        }
        if objects.contains(&entity.reference) {
            return Err(TranslateError::CompanionExists {
                entity: entity.reference.qualified_name(),
            });
        }
        let (instance, companion) = split_companion(entity);
        tracing::debug!(entity = %instance.name(), id = %companion.id, "synthesized companion");
        result.push(instance);
        result.push(companion);
    }
    Ok(Model::from_parts(packages, result, imports))
}

fn split_companion(entity: Entity) -> (Entity, Entity) {
    let (static_attrs, attrs): (Vec<_>, Vec<_>) = entity
        .attributes
        .into_iter()
        .partition(|a| a.is_class_scope);
    let (static_ops, ops): (Vec<_>, Vec<_>) = entity
        .operations
        .into_iter()
        .partition(|o| o.is_class_scope);

    let companion = Entity {
        id: SmolStr::new(format!("{}{COMPANION_ID_SUFFIX}", entity.id)),
        reference: entity.reference.clone(),
        geometry: entity.geometry,
        class_type: ClassType::Object,
        mutable: false,
        immutable: false,
        extends_from: None,
        mixins: Vec::new(),
        attributes: static_attrs,
        operations: static_ops,
        has_companion_object: false,
    };
    let instance = Entity {
        attributes: attrs,
        operations: ops,
        has_companion_object: true,
        ..entity
    };
    (instance, companion)
}
