//! Stereotype parsing for classes and members.
//!
//! Class stereotypes are a comma- or semicolon-separated token list
//! (`trait, immutable`). Member names may carry one stereotype in guillemet
//! form: `<<lazy>> cache`.

use crate::base::constants::{
    ENUMERATION_TOKENS, IMMUTABLE, LAZY, MUTABLE, OBJECT_TOKENS, TRAIT_TOKENS, VAL, VAR,
};
use crate::model::{ClassType, Mutability};

use super::TranslateError;
use super::observer::{Observer, Warning};

// ============================================================================
// CLASS STEREOTYPES
// ============================================================================

/// The recognized content of a class stereotype list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassStereotypes {
    pub class_type: ClassType,
    pub mutable: bool,
    pub immutable: bool,
    /// Tokens that matched nothing, in order.
    pub unknown: Vec<String>,
}

/// Split a stereotype list on `,` and `;`, trimming each token and any
/// `<<`/`>>` decoration around it. Empty tokens are dropped.
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split([',', ';'])
        .map(strip_decoration)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Trim whitespace and surrounding guillemets from one stereotype.
pub fn strip_decoration(token: &str) -> &str {
    token
        .trim()
        .trim_start_matches(['<', '«'])
        .trim_end_matches(['>', '»'])
        .trim()
}

fn class_type_for(token: &str) -> Option<ClassType> {
    if TRAIT_TOKENS.contains(&token) {
        Some(ClassType::Trait)
    } else if ENUMERATION_TOKENS.contains(&token) {
        Some(ClassType::Enumeration)
    } else if OBJECT_TOKENS.contains(&token) {
        Some(ClassType::Object)
    } else {
        None
    }
}

/// Interpret the stereotype list of the class named `entity`.
pub fn parse_class_stereotypes(
    entity: &str,
    text: &str,
) -> Result<ClassStereotypes, TranslateError> {
    let mut result = ClassStereotypes::default();
    let mut kind_token: Option<&str> = None;

    for token in split_tokens(text) {
        if let Some(class_type) = class_type_for(token) {
            if let Some(first) = kind_token {
                return Err(TranslateError::ConflictingClassTypes {
                    entity: entity.to_string(),
                    first: first.to_string(),
                    second: token.to_string(),
                });
            }
            kind_token = Some(token);
            result.class_type = class_type;
        } else if token == MUTABLE {
            result.mutable = true;
        } else if token == IMMUTABLE {
            result.immutable = true;
        } else {
            result.unknown.push(token.to_string());
        }
    }

    if result.mutable && result.immutable {
        return Err(TranslateError::ConflictingMutability {
            entity: entity.to_string(),
        });
    }
    Ok(result)
}

// ============================================================================
// MEMBER STEREOTYPES
// ============================================================================

/// How an attribute is bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    Val,
    Var,
    LazyVal,
}

impl Binding {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            VAL => Some(Self::Val),
            VAR => Some(Self::Var),
            LAZY => Some(Self::LazyVal),
            _ => None,
        }
    }

    pub fn is_val(self) -> bool {
        !matches!(self, Self::Var)
    }

    pub fn is_lazy(self) -> bool {
        matches!(self, Self::LazyVal)
    }

    /// A `var` in an immutable entity, or a `val`/`lazy` in a mutable one.
    pub fn contradicts(self, mutability: Mutability) -> bool {
        match mutability {
            Mutability::Immutable => self == Self::Var,
            Mutability::Mutable => self != Self::Var,
        }
    }
}

/// A member name split into its optional stereotype and the remainder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberName<'a> {
    pub stereotype: Option<&'a str>,
    pub name: &'a str,
}

/// Split `<<stereotype>> name`. Text without a closed `<<...>>` prefix is
/// all name.
pub fn split_member_name(text: &str) -> MemberName<'_> {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("<<") {
        if let Some((stereotype, name)) = rest.split_once(">>") {
            return MemberName {
                stereotype: Some(stereotype.trim()),
                name: name.trim(),
            };
        }
    }
    MemberName {
        stereotype: None,
        name: trimmed,
    }
}

/// The resolved `(is_val, is_lazy)` flags of one attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberFlags {
    pub is_val: bool,
    pub is_lazy: bool,
}

/// Resolve an attribute's binding against its owner's mutability.
///
/// Without a stereotype the attribute is a `val`. An unknown stereotype is
/// reported and also treated as `val`. A declared owner mutability always
/// wins over the attribute's own stereotype.
pub fn bind_member(
    owner: &str,
    mutability: Option<Mutability>,
    attribute: &str,
    stereotype: Option<&str>,
    observer: &dyn Observer,
) -> Result<MemberFlags, TranslateError> {
    let mut flags = MemberFlags {
        is_val: true,
        is_lazy: false,
    };

    if let Some(token) = stereotype {
        match Binding::from_token(token) {
            Some(binding) => {
                if mutability.is_some_and(|m| binding.contradicts(m)) {
                    return Err(TranslateError::MutabilityMismatch {
                        entity: owner.to_string(),
                        attribute: attribute.to_string(),
                        stereotype: token.to_string(),
                    });
                }
                flags.is_val = binding.is_val();
                flags.is_lazy = binding.is_lazy();
            }
            None => observer.warn(Warning::UnknownAttributeStereotype {
                entity: owner.to_string(),
                attribute: attribute.to_string(),
                stereotype: token.to_string(),
            }),
        }
    }

    match mutability {
        Some(Mutability::Immutable) => flags.is_val = true,
        Some(Mutability::Mutable) => flags.is_val = false,
        None => {}
    }
    Ok(flags)
}
