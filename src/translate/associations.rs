//! Association edges become attributes.
//!
//! An association has two ends, `a` (handle 0) and `b` (handle 1). Each end
//! with a role or a visible arrow adds an attribute to the entity at the
//! *other* end, typed by the entity at its own end.
//!
//! Role text follows the member grammar, optionally with a declared type:
//!
//! ```text
//! <<var>> owner            name + binding, type from multiplicity
//! items: Map[String, Item] name + declared type
//! ```

use smol_str::SmolStr;

use crate::base::constants::{ASSOCIATION, OBJECT_KIND};
use crate::model::{Attribute, Entity, Model, Visibility};
use crate::tree::{AttributedTree, Node};
use crate::types::{self, TypeRef};

use super::TranslateError;
use super::observer::{Observer, Stage};
use super::stereotype::{bind_member, split_member_name};

/// Which end of an association.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum End {
    A,
    B,
}

impl End {
    fn handle(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

/// The raw payloads of one association end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssociationEnd {
    pub role: String,
    pub multiplicity: String,
    pub visibility: Visibility,
    pub show_arrow: bool,
}

impl AssociationEnd {
    /// Read the `role_x`, `multipicity_x`, `visibility_x` and `show_arrow_x`
    /// children of `edge`.
    pub fn read(edge: &Node, end: End) -> Result<Self, TranslateError> {
        let suffix = end.suffix();
        Ok(Self {
            role: edge.string(&format!("role_{suffix}"))?,
            // Dia's own spelling.
            multiplicity: edge.string(&format!("multipicity_{suffix}"))?,
            visibility: Visibility::from_code(edge.enumeration(&format!("visibility_{suffix}"))?),
            show_arrow: edge.boolean(&format!("show_arrow_{suffix}"))?,
        })
    }

    /// Ends with neither a role nor an arrow add nothing.
    pub fn is_navigable(&self) -> bool {
        !self.role.trim().is_empty() || self.show_arrow
    }
}

/// Wrap `target` according to a multiplicity string.
///
/// `1` and anything unrecognized give a direct reference.
pub fn type_for_multiplicity(multiplicity: &str, target: TypeRef) -> TypeRef {
    match multiplicity.trim() {
        "0..1" | "0-1" => TypeRef::option_of(target),
        "*" | "n" | "0..*" => TypeRef::seq_of(target),
        _ => target,
    }
}

/// Split `name: Type` at the first colon. A blank type counts as absent.
pub fn split_role_type(role: &str) -> (&str, Option<&str>) {
    match role.split_once(':') {
        Some((name, ty)) if !ty.trim().is_empty() => (name.trim(), Some(ty.trim())),
        Some((name, _)) => (name.trim(), None),
        None => (role.trim(), None),
    }
}

/// Build the attribute that end `end` of `edge` contributes to `owner`.
fn end_attribute(
    edge: &Node,
    data: &AssociationEnd,
    owner: &Entity,
    target: &Entity,
    observer: &dyn Observer,
) -> Result<Attribute, TranslateError> {
    let member = split_member_name(&data.role);
    let (name, declared) = split_role_type(member.name);
    if name.is_empty() {
        return Err(TranslateError::EmptyAttributeName {
            edge: edge.describe(),
            entity: owner.reference.qualified_name(),
        });
    }

    let flags = bind_member(
        owner.name(),
        owner.mutability(),
        name,
        member.stereotype,
        observer,
    )?;

    let type_ref = match declared {
        Some(text) => types::parse(text).map_err(|e| {
            TranslateError::type_parse(
                format!("type of association role '{name}' on '{}'", owner.name()),
                e,
            )
        })?,
        None => type_for_multiplicity(&data.multiplicity, TypeRef::entity(&target.reference)),
    };

    Ok(Attribute {
        name: SmolStr::new(name),
        type_ref: Some(type_ref),
        visibility: data.visibility,
        is_val: flags.is_val,
        default_value: None,
        is_lazy: flags.is_lazy,
        is_overriding: false,
        is_class_scope: false,
    })
}

/// Turn every association edge into attributes on its ends' entities.
pub fn resolve_associations<T>(
    tree: &T,
    model: Model,
    observer: &dyn Observer,
) -> Result<Model, TranslateError>
where
    T: AttributedTree + ?Sized,
{
    observer.stage(Stage::Associations);
    let mut additions: Vec<(usize, Attribute)> = Vec::new();

    for edge in tree.query(OBJECT_KIND, ASSOCIATION) {
        let mut positions = [0usize; 2];
        for end in [End::A, End::B] {
            let id = edge.connection_target(end.handle())?;
            positions[end.handle()] =
                model
                    .position(&id)
                    .ok_or_else(|| TranslateError::UnresolvedConnection {
                        edge: edge.describe(),
                        id: id.to_string(),
                    })?;
        }

        for end in [End::A, End::B] {
            let data = AssociationEnd::read(edge, end)?;
            if !data.is_navigable() {
                continue;
            }
            let own = positions[end.handle()];
            let opposite = positions[1 - end.handle()];
            let entities = model.entities();
            let attribute =
                end_attribute(edge, &data, &entities[opposite], &entities[own], observer)?;
            tracing::trace!(
                owner = %entities[opposite].reference,
                attribute = %attribute.name,
                "association attribute"
            );
            additions.push((opposite, attribute));
        }
    }

    let (packages, mut entities, imports) = model.into_parts();
    for (position, attribute) in additions {
        entities[position].attributes.push(attribute);
    }
    Ok(Model::from_parts(packages, entities, imports))
}
