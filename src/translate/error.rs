//! Translation errors.

use thiserror::Error;

use super::validate::ValidationReport;
use crate::tree::TreeError;
use crate::types::TypeParseError;

/// Why a translation failed.
///
/// Every variant except [`TranslateError::Validation`] aborts the pipeline
/// at the stage that raised it. `Display` is the single message reported for
/// the whole run.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Missing or ill-typed child in the diagram tree.
    #[error("Diagram error: {0}")]
    Tree(#[from] TreeError),

    /// Malformed type expression.
    #[error("In {context}: {source}")]
    TypeParse {
        context: String,
        #[source]
        source: TypeParseError,
    },

    /// More than one kind stereotype on one class.
    #[error("Entity '{entity}' declares conflicting stereotypes '{first}' and '{second}'")]
    ConflictingClassTypes {
        entity: String,
        first: String,
        second: String,
    },

    /// Both `mutable` and `immutable` on one class.
    #[error("Entity '{entity}' is declared both mutable and immutable")]
    ConflictingMutability { entity: String },

    /// An attribute stereotype contradicting the owner's mutability.
    #[error(
        "Attribute '{attribute}' of '{entity}' is declared '{stereotype}', contradicting the entity's mutability"
    )]
    MutabilityMismatch {
        entity: String,
        attribute: String,
        stereotype: String,
    },

    /// Class-scoped members on an entity that already has an object.
    #[error(
        "Cannot synthesize a companion for '{entity}': an object with the same name already exists"
    )]
    CompanionExists { entity: String },

    /// An edge attached to an id that is not an entity.
    #[error("{edge} is connected to unknown object '{id}'")]
    UnresolvedConnection { edge: String, id: String },

    #[error("Multiple generalizations for entity '{entity}'")]
    MultipleGeneralizations { entity: String },

    /// An association end that yields no attribute name.
    #[error("{edge} yields an attribute with an empty name on '{entity}'")]
    EmptyAttributeName { edge: String, entity: String },

    /// The superclass chain loops back on itself.
    #[error("Cyclic inheritance: {chain}")]
    CyclicInheritance { chain: String },

    /// Structural problems found by the final validation pass.
    #[error("{0}")]
    Validation(ValidationReport),
}

impl TranslateError {
    /// Wrap a type parse failure with what was being parsed.
    pub fn type_parse(context: impl Into<String>, source: TypeParseError) -> Self {
        Self::TypeParse {
            context: context.into(),
            source,
        }
    }
}
