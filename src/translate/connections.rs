//! Generalization, realization and dependency edges.
//!
//! ```text
//! Edge            handle → (from, to)          stereotype
//! Generalization  1 → from, 0 → to (reversed)  -
//! Realization     1 → from, 0 → to (reversed)  "" | mixin, others dropped
//! Dependency      0 → from, 1 → to             hasA | companionOf, others dropped
//! ```
//!
//! Edges are applied in document order. Entity count never changes here, so
//! positions looked up before an edge stay valid after it.

use crate::base::constants::{
    COMPANION_TOKENS, DEPENDENCY, GENERALIZATION, MIXIN, OBJECT_KIND, REALIZATION, STEREOTYPE,
};
use crate::model::{ClassType, Entity, Model};
use crate::tree::{AttributedTree, Node};
use crate::types::TypeRef;

use super::TranslateError;
use super::observer::{Observer, Stage, Warning};
use super::stereotype::strip_decoration;

/// An edge's two endpoints, already mapped to entity positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Endpoints {
    from: usize,
    to: usize,
}

/// Position of the entity attached at `handle` of `edge`.
fn endpoint(model: &Model, edge: &Node, handle: usize) -> Result<usize, TranslateError> {
    let id = edge.connection_target(handle)?;
    model
        .position(&id)
        .ok_or_else(|| TranslateError::UnresolvedConnection {
            edge: edge.describe(),
            id: id.to_string(),
        })
}

/// Resolve an edge whose `from` end sits on handle 1.
fn reversed(model: &Model, edge: &Node) -> Result<Endpoints, TranslateError> {
    Ok(Endpoints {
        from: endpoint(model, edge, 1)?,
        to: endpoint(model, edge, 0)?,
    })
}

fn natural(model: &Model, edge: &Node) -> Result<Endpoints, TranslateError> {
    Ok(Endpoints {
        from: endpoint(model, edge, 0)?,
        to: endpoint(model, edge, 1)?,
    })
}

fn edge_stereotype(edge: &Node) -> Result<String, TranslateError> {
    let raw = edge.optional_string(STEREOTYPE)?.unwrap_or_default();
    Ok(strip_decoration(&raw).to_string())
}

fn reference_to(entities: &[Entity], position: usize) -> TypeRef {
    TypeRef::entity(&entities[position].reference)
}

// ============================================================================
// GENERALIZATION
// ============================================================================

/// Set `extends_from` on the subclass end of every generalization.
pub fn resolve_generalizations<T>(
    tree: &T,
    model: Model,
    observer: &dyn Observer,
) -> Result<Model, TranslateError>
where
    T: AttributedTree + ?Sized,
{
    observer.stage(Stage::Generalizations);
    let edges = tree.query(OBJECT_KIND, GENERALIZATION);
    let ends = edges
        .iter()
        .map(|edge| reversed(&model, edge))
        .collect::<Result<Vec<_>, _>>()?;

    let (packages, mut entities, imports) = model.into_parts();
    for Endpoints { from, to } in ends {
        let parent = reference_to(&entities, to);
        let child = &mut entities[from];
        if child.extends_from.is_some() {
            return Err(TranslateError::MultipleGeneralizations {
                entity: child.reference.qualified_name(),
            });
        }
        tracing::trace!(child = %child.reference, parent = %parent, "generalization");
        child.extends_from = Some(parent);
    }
    Ok(Model::from_parts(packages, entities, imports))
}

// ============================================================================
// REALIZATION
// ============================================================================

/// Append the realized trait to the implementing end's mixins.
///
/// An unrecognized stereotype drops the edge before its endpoints are
/// looked at.
pub fn resolve_realizations<T>(
    tree: &T,
    model: Model,
    observer: &dyn Observer,
) -> Result<Model, TranslateError>
where
    T: AttributedTree + ?Sized,
{
    observer.stage(Stage::Realizations);
    let mut ends = Vec::new();
    for edge in tree.query(OBJECT_KIND, REALIZATION) {
        let stereotype = edge_stereotype(edge)?;
        if !stereotype.is_empty() && stereotype != MIXIN {
            observer.warn(Warning::UnknownRealizationStereotype {
                edge: edge.describe(),
                stereotype,
            });
            continue;
        }
        ends.push(reversed(&model, edge)?);
    }

    let (packages, mut entities, imports) = model.into_parts();
    for Endpoints { from, to } in ends {
        let realized = reference_to(&entities, to);
        entities[from].mixins.push(realized);
    }
    Ok(Model::from_parts(packages, entities, imports))
}

// ============================================================================
// DEPENDENCY
// ============================================================================

/// Turn the `from` end of each companion dependency into an object and mark
/// the `to` end as having a companion.
pub fn resolve_dependencies<T>(
    tree: &T,
    model: Model,
    observer: &dyn Observer,
) -> Result<Model, TranslateError>
where
    T: AttributedTree + ?Sized,
{
    observer.stage(Stage::Dependencies);
    let mut ends = Vec::new();
    for edge in tree.query(OBJECT_KIND, DEPENDENCY) {
        let stereotype = edge_stereotype(edge)?;
        if stereotype.is_empty() {
            continue;
        }
        if !COMPANION_TOKENS.contains(&stereotype.as_str()) {
            observer.warn(Warning::UnknownDependencyStereotype {
                edge: edge.describe(),
                stereotype,
            });
            continue;
        }
        ends.push(natural(&model, edge)?);
    }

    let (packages, mut entities, imports) = model.into_parts();
    for Endpoints { from, to } in ends {
        entities[from].class_type = ClassType::Object;
        entities[to].has_companion_object = true;
    }
    Ok(Model::from_parts(packages, entities, imports))
}
