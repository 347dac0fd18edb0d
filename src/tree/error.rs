//! Error types for attributed-tree access.

use thiserror::Error;

/// Errors raised while reading the diagram tree or extracting payloads.
#[derive(Debug, Error)]
pub enum TreeError {
    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error while loading a document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A named child (or XML attribute) is absent.
    #[error("Missing {kind} '{name}' on {element}")]
    Missing {
        kind: &'static str,
        name: String,
        element: String,
    },

    /// The named child holds a payload of another kind.
    #[error("Child '{name}' on {element} holds a {found} payload, expected {expected}")]
    WrongPayload {
        name: String,
        element: String,
        expected: &'static str,
        found: String,
    },

    /// A payload value could not be decoded.
    #[error("Invalid {kind} payload '{name}' on {element}: {value:?}")]
    Invalid {
        kind: &'static str,
        name: String,
        element: String,
        value: String,
    },
}

impl TreeError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a missing named-child error.
    pub fn missing_child(element: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "child",
            name: name.into(),
            element: element.into(),
        }
    }

    /// Create a missing XML attribute error.
    pub fn missing_attribute(element: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "attribute",
            name: name.into(),
            element: element.into(),
        }
    }

    /// Create an undecodable payload error.
    pub fn invalid(
        kind: &'static str,
        element: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            kind,
            name: name.into(),
            element: element.into(),
            value: value.into(),
        }
    }
}
