//! Entities and their members.

use smol_str::SmolStr;

use crate::base::Geometry;
use crate::types::{EntityRef, TypeRef};

// ============================================================================
// KINDS
// ============================================================================

/// What an entity is declared as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ClassType {
    #[default]
    Class,
    Trait,
    Enumeration,
    /// A singleton, either declared or synthesized as a companion.
    Object,
}

impl ClassType {
    /// Kinds that can appear as a superclass or mixin.
    pub fn is_inheritable(&self) -> bool {
        matches!(self, Self::Class | Self::Trait | Self::Enumeration)
    }
}

/// Member visibility, decoded from Dia's integer coding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
    /// Package-private.
    Implementation,
}

impl Visibility {
    /// Decode `0..=3`; unknown codes read as public.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Private,
            2 => Self::Protected,
            3 => Self::Implementation,
            _ => Self::Public,
        }
    }
}

/// Declared mutability of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    Mutable,
    Immutable,
}

// ============================================================================
// MEMBERS
// ============================================================================

/// A field of an entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    pub name: SmolStr,
    /// `None` when the diagram leaves the type blank.
    pub type_ref: Option<TypeRef>,
    pub visibility: Visibility,
    /// Immutable binding.
    pub is_val: bool,
    pub default_value: Option<String>,
    pub is_lazy: bool,
    /// Shadows a member of an ancestor (computed).
    pub is_overriding: bool,
    /// Static member.
    pub is_class_scope: bool,
}

impl Attribute {
    /// A public `val` with no default.
    pub fn new(name: impl Into<SmolStr>, type_ref: Option<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_ref,
            visibility: Visibility::Public,
            is_val: true,
            default_value: None,
            is_lazy: false,
            is_overriding: false,
            is_class_scope: false,
        }
    }
}

/// An operation parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Parameter {
    pub name: SmolStr,
    pub type_ref: TypeRef,
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<SmolStr>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            default_value: None,
        }
    }
}

/// A method of an entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Operation {
    pub name: SmolStr,
    pub visibility: Visibility,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
    /// Shadows a member of an ancestor (computed).
    pub is_overriding: bool,
    /// Static member.
    pub is_class_scope: bool,
}

impl Operation {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            parameters: Vec::new(),
            return_type: None,
            is_overriding: false,
            is_class_scope: false,
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, return_type: TypeRef) -> Self {
        self.return_type = Some(return_type);
        self
    }

    /// Types of the parameters, in order.
    pub fn signature(&self) -> Vec<&TypeRef> {
        self.parameters.iter().map(|p| &p.type_ref).collect()
    }
}

// ============================================================================
// ENTITY
// ============================================================================

/// A class, trait, enumeration or object drawn on the diagram.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entity {
    /// Dia object id (synthesized companions append a suffix).
    pub id: SmolStr,
    /// Name and owning package.
    pub reference: EntityRef,
    pub geometry: Geometry,
    pub class_type: ClassType,
    pub mutable: bool,
    pub immutable: bool,
    /// Superclass set by a generalization edge.
    pub extends_from: Option<TypeRef>,
    /// Implemented traits and mixins, in edge order.
    pub mixins: Vec<TypeRef>,
    pub attributes: Vec<Attribute>,
    pub operations: Vec<Operation>,
    pub has_companion_object: bool,
}

impl Entity {
    /// A plain class with no package and no members.
    pub fn new(id: impl Into<SmolStr>, name: impl Into<SmolStr>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            reference: EntityRef::unresolved(name),
            geometry,
            class_type: ClassType::Class,
            mutable: false,
            immutable: false,
            extends_from: None,
            mixins: Vec::new(),
            attributes: Vec::new(),
            operations: Vec::new(),
            has_companion_object: false,
        }
    }

    pub fn with_class_type(mut self, class_type: ClassType) -> Self {
        self.class_type = class_type;
        self
    }

    pub fn with_package(mut self, package: impl Into<SmolStr>) -> Self {
        self.reference.package = package.into();
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn with_extends(mut self, parent: TypeRef) -> Self {
        self.extends_from = Some(parent);
        self
    }

    pub fn name(&self) -> &str {
        &self.reference.name
    }

    pub fn package(&self) -> &str {
        &self.reference.package
    }

    /// The declared mutability, if exactly one of the flags is set.
    pub fn mutability(&self) -> Option<Mutability> {
        match (self.mutable, self.immutable) {
            (true, false) => Some(Mutability::Mutable),
            (false, true) => Some(Mutability::Immutable),
            _ => None,
        }
    }

    pub fn has_class_scope_members(&self) -> bool {
        self.attributes.iter().any(|a| a.is_class_scope)
            || self.operations.iter().any(|o| o.is_class_scope)
    }
}
