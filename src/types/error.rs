//! Type-expression parse errors.

use thiserror::Error;

/// A malformed type expression. Translation stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeParseError {
    /// Brackets or parentheses do not pair up.
    #[error("Unbalanced brackets in type expression '{0}'")]
    Unbalanced(String),

    /// A generic whose base is itself a generic, function or tuple.
    #[error("Invalid generic base '{base}' in type expression '{input}'")]
    InvalidGenericBase { input: String, base: String },

    /// Text following the closing bracket of a generic parameter list.
    #[error("Unexpected text after generic parameters in type expression '{0}'")]
    TrailingInput(String),
}
