use std::fmt;

use smol_str::SmolStr;

// ============================================================================
// BUILTINS
// ============================================================================

/// The closed set of primitive and collection type names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Builtin {
    // Primitives
    Any,
    AnyRef,
    AnyVal,
    Nothing,
    Null,
    Unit,
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    String,
    BigInt,
    BigDecimal,

    // Collections and wrappers
    Option,
    Either,
    Seq,
    List,
    Vector,
    Set,
    Map,
    Array,
    Iterable,
    Iterator,
    Future,
}

const BUILTIN_NAMES: &[(Builtin, &str)] = &[
    (Builtin::Any, "Any"),
    (Builtin::AnyRef, "AnyRef"),
    (Builtin::AnyVal, "AnyVal"),
    (Builtin::Nothing, "Nothing"),
    (Builtin::Null, "Null"),
    (Builtin::Unit, "Unit"),
    (Builtin::Boolean, "Boolean"),
    (Builtin::Byte, "Byte"),
    (Builtin::Short, "Short"),
    (Builtin::Char, "Char"),
    (Builtin::Int, "Int"),
    (Builtin::Long, "Long"),
    (Builtin::Float, "Float"),
    (Builtin::Double, "Double"),
    (Builtin::String, "String"),
    (Builtin::BigInt, "BigInt"),
    (Builtin::BigDecimal, "BigDecimal"),
    (Builtin::Option, "Option"),
    (Builtin::Either, "Either"),
    (Builtin::Seq, "Seq"),
    (Builtin::List, "List"),
    (Builtin::Vector, "Vector"),
    (Builtin::Set, "Set"),
    (Builtin::Map, "Map"),
    (Builtin::Array, "Array"),
    (Builtin::Iterable, "Iterable"),
    (Builtin::Iterator, "Iterator"),
    (Builtin::Future, "Future"),
];

impl Builtin {
    /// Look up a builtin by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(b, _)| *b)
    }

    pub fn name(&self) -> &'static str {
        BUILTIN_NAMES
            .iter()
            .find(|(b, _)| b == self)
            .map(|(_, n)| *n)
            .unwrap_or("Any")
    }
}

// ============================================================================
// ENTITY REFERENCES
// ============================================================================

/// A user type name with the package it lives in.
///
/// An empty package means the name has not been resolved (yet).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntityRef {
    pub name: SmolStr,
    pub package: SmolStr,
}

impl EntityRef {
    pub fn new(name: impl Into<SmolStr>, package: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
        }
    }

    /// An unqualified reference.
    pub fn unresolved(name: impl Into<SmolStr>) -> Self {
        Self::new(name, SmolStr::default())
    }

    pub fn is_qualified(&self) -> bool {
        !self.package.is_empty()
    }

    pub fn with_package(&self, package: impl Into<SmolStr>) -> Self {
        Self::new(self.name.clone(), package)
    }

    /// `package.Name`, or just `Name` when unqualified.
    pub fn qualified_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

// ============================================================================
// TYPE REFERENCES
// ============================================================================

/// A parsed type expression.
///
/// Only [`TypeRef::User`] leaves carry package qualification. The container
/// variants expose their leaves through [`TypeRef::map_user_leaves`] and
/// [`TypeRef::user_leaves`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TypeRef {
    /// No type.
    Empty,
    Builtin(Builtin),
    User(EntityRef),
    /// `base[params]`; `base` is always `Builtin` or `User`.
    Generic {
        base: Box<TypeRef>,
        params: Vec<TypeRef>,
    },
    /// `(inputs) => output`
    Function {
        inputs: Vec<TypeRef>,
        output: Box<TypeRef>,
    },
    /// `(params)`
    Tuple(Vec<TypeRef>),
}

impl TypeRef {
    /// An unqualified user type.
    pub fn user(name: impl Into<SmolStr>) -> Self {
        Self::User(EntityRef::unresolved(name))
    }

    /// A reference to an entity.
    pub fn entity(reference: &EntityRef) -> Self {
        Self::User(reference.clone())
    }

    /// `Seq[inner]`
    pub fn seq_of(inner: TypeRef) -> Self {
        Self::Generic {
            base: Box::new(Self::Builtin(Builtin::Seq)),
            params: vec![inner],
        }
    }

    /// `Option[inner]`
    pub fn option_of(inner: TypeRef) -> Self {
        Self::Generic {
            base: Box::new(Self::Builtin(Builtin::Option)),
            params: vec![inner],
        }
    }

    /// Generic, function and tuple types.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Generic { .. } | Self::Function { .. } | Self::Tuple(_)
        )
    }

    /// Rebuild the type with `f` applied to every user leaf.
    ///
    /// Recurses through generic bases and parameters, function inputs and
    /// outputs, and tuple elements. Everything else is cloned unchanged.
    pub fn map_user_leaves<F>(&self, f: &mut F) -> TypeRef
    where
        F: FnMut(&EntityRef) -> EntityRef,
    {
        match self {
            Self::Empty | Self::Builtin(_) => self.clone(),
            Self::User(reference) => Self::User(f(reference)),
            Self::Generic { base, params } => Self::Generic {
                base: Box::new(base.map_user_leaves(f)),
                params: params.iter().map(|p| p.map_user_leaves(f)).collect(),
            },
            Self::Function { inputs, output } => Self::Function {
                inputs: inputs.iter().map(|i| i.map_user_leaves(f)).collect(),
                output: Box::new(output.map_user_leaves(f)),
            },
            Self::Tuple(params) => {
                Self::Tuple(params.iter().map(|p| p.map_user_leaves(f)).collect())
            }
        }
    }

    /// All user leaves, left to right.
    pub fn user_leaves(&self) -> Vec<&EntityRef> {
        let mut leaves = Vec::new();
        self.collect_user_leaves(&mut leaves);
        leaves
    }

    fn collect_user_leaves<'a>(&'a self, leaves: &mut Vec<&'a EntityRef>) {
        match self {
            Self::Empty | Self::Builtin(_) => {}
            Self::User(reference) => leaves.push(reference),
            Self::Generic { base, params } => {
                base.collect_user_leaves(leaves);
                params.iter().for_each(|p| p.collect_user_leaves(leaves));
            }
            Self::Function { inputs, output } => {
                inputs.iter().for_each(|i| i.collect_user_leaves(leaves));
                output.collect_user_leaves(leaves);
            }
            Self::Tuple(params) => params.iter().for_each(|p| p.collect_user_leaves(leaves)),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeRef]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Builtin(b) => write!(f, "{}", b.name()),
            Self::User(reference) => write!(f, "{reference}"),
            Self::Generic { base, params } => {
                write!(f, "{base}[")?;
                write_list(f, params)?;
                write!(f, "]")
            }
            Self::Function { inputs, output } => {
                match inputs.as_slice() {
                    [single] if !single.is_container() => write!(f, "{single}")?,
                    _ => {
                        write!(f, "(")?;
                        write_list(f, inputs)?;
                        write!(f, ")")?;
                    }
                }
                write!(f, " => {output}")
            }
            Self::Tuple(params) => {
                write!(f, "(")?;
                write_list(f, params)?;
                write!(f, ")")
            }
        }
    }
}
