//! Override detection and inheritance cycle checks.
//!
//! The ancestors of an entity are its superclass chain, followed depth-first
//! through `extends_from`, plus the direct mixins of every entity on that
//! chain (the entity itself included). Mixins of mixins are not followed.

use crate::model::{Attribute, Entity, Model, Operation};
use crate::types::{EntityRef, TypeRef};

use super::TranslateError;
use super::observer::{Observer, Stage};

/// The first inheritable entity with this reference.
pub fn resolve_ancestor<'a>(model: &'a Model, reference: &'a EntityRef) -> Option<&'a Entity> {
    model
        .find_by_ref(&reference.name, &reference.package)
        .find(|e| e.class_type.is_inheritable())
}

fn user_ref(ty: &TypeRef) -> Option<&EntityRef> {
    match ty {
        TypeRef::User(reference) => Some(reference),
        _ => None,
    }
}

/// All ancestors of `entity`, nearest first.
///
/// Fails when the superclass chain reaches an entity already on it.
pub fn ancestors<'a>(
    model: &'a Model,
    entity: &'a Entity,
) -> Result<Vec<&'a Entity>, TranslateError> {
    let mut found = Vec::new();
    collect_ancestors(model, entity, vec![entity.reference.clone()], &mut found)?;
    Ok(found)
}

fn collect_ancestors<'a>(
    model: &'a Model,
    current: &'a Entity,
    mut chain: Vec<EntityRef>,
    found: &mut Vec<&'a Entity>,
) -> Result<(), TranslateError> {
    found.extend(
        current
            .mixins
            .iter()
            .filter_map(user_ref)
            .filter_map(|r| resolve_ancestor(model, r)),
    );

    let Some(parent_ref) = current.extends_from.as_ref().and_then(user_ref) else {
        return Ok(());
    };
    if chain.contains(parent_ref) {
        chain.push(parent_ref.clone());
        let chain = chain
            .iter()
            .map(EntityRef::qualified_name)
            .collect::<Vec<_>>()
            .join(" -> ");
        return Err(TranslateError::CyclicInheritance { chain });
    }
    let Some(parent) = resolve_ancestor(model, parent_ref) else {
        tracing::trace!(parent = %parent_ref, "superclass not on the diagram");
        return Ok(());
    };
    found.push(parent);
    chain.push(parent_ref.clone());
    collect_ancestors(model, parent, chain, found)
}

// ============================================================================
// OVERRIDE RULES
// ============================================================================

/// An attribute overrides a same-named attribute or parameterless operation.
pub fn attribute_overrides(attribute: &Attribute, ancestor: &Entity) -> bool {
    ancestor.attributes.iter().any(|a| a.name == attribute.name)
        || ancestor
            .operations
            .iter()
            .any(|o| o.name == attribute.name && o.parameters.is_empty())
}

/// An operation overrides one with the same name, parameter types and
/// return type. A parameterless operation also overrides a same-named
/// attribute.
pub fn operation_overrides(operation: &Operation, ancestor: &Entity) -> bool {
    let signature = operation.signature();
    let same_operation = ancestor.operations.iter().any(|o| {
        o.name == operation.name
            && o.signature() == signature
            && o.return_type == operation.return_type
    });
    same_operation
        || (operation.parameters.is_empty()
            && ancestor.attributes.iter().any(|a| a.name == operation.name))
}

/// Flag every member that overrides an ancestor's member.
pub fn analyze_overrides(model: Model, observer: &dyn Observer) -> Result<Model, TranslateError> {
    observer.stage(Stage::Overrides);

    let mut flags = Vec::with_capacity(model.entity_count());
    for entity in model.entities() {
        let ancestors = ancestors(&model, entity)?;
        let attributes: Vec<bool> = entity
            .attributes
            .iter()
            .map(|a| ancestors.iter().any(|anc| attribute_overrides(a, anc)))
            .collect();
        let operations: Vec<bool> = entity
            .operations
            .iter()
            .map(|o| ancestors.iter().any(|anc| operation_overrides(o, anc)))
            .collect();
        flags.push((attributes, operations));
    }

    let mut flags = flags.into_iter();
    Ok(model.map_entities(|mut entity| {
        if let Some((attributes, operations)) = flags.next() {
            for (attribute, flag) in entity.attributes.iter_mut().zip(attributes) {
                attribute.is_overriding = flag;
            }
            for (operation, flag) in entity.operations.iter_mut().zip(operations) {
                operation.is_overriding = flag;
            }
        }
        entity
    }))
}
