//! Observation of pipeline progress and non-fatal conditions.
//!
//! Stages never log through global state. They report to the [`Observer`]
//! passed in by the caller; [`TracingObserver`] forwards to `tracing`.

use std::fmt;

use parking_lot::Mutex;

/// Pipeline stages, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Packages,
    Classes,
    PackageAssignment,
    Companions,
    Generalizations,
    Realizations,
    Dependencies,
    Associations,
    CrossReferences,
    Overrides,
    Validation,
}

/// A condition that drops a token or edge without failing the translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    UnknownClassStereotype {
        entity: String,
        token: String,
    },
    UnknownAttributeStereotype {
        entity: String,
        attribute: String,
        stereotype: String,
    },
    UnknownRealizationStereotype {
        edge: String,
        stereotype: String,
    },
    UnknownDependencyStereotype {
        edge: String,
        stereotype: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClassStereotype { entity, token } => {
                write!(f, "Ignoring unknown stereotype '{token}' on '{entity}'")
            }
            Self::UnknownAttributeStereotype {
                entity,
                attribute,
                stereotype,
            } => write!(
                f,
                "Unknown stereotype '{stereotype}' on attribute '{attribute}' of '{entity}', assuming val"
            ),
            Self::UnknownRealizationStereotype { edge, stereotype } => {
                write!(f, "Dropping {edge} with unknown stereotype '{stereotype}'")
            }
            Self::UnknownDependencyStereotype { edge, stereotype } => {
                write!(f, "Dropping {edge} with unknown stereotype '{stereotype}'")
            }
        }
    }
}

/// Receives stage transitions and warnings.
///
/// Observers are shared with the [`Translator`](super::Translator), which may
/// be sent to other threads.
pub trait Observer: Send + Sync {
    fn stage(&self, _stage: Stage) {}

    fn warn(&self, warning: Warning);
}

/// Forwards everything to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn stage(&self, stage: Stage) {
        tracing::debug!(?stage, "entering stage");
    }

    fn warn(&self, warning: Warning) {
        tracing::warn!("{warning}");
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn warn(&self, _warning: Warning) {}
}

/// Records stages and warnings for later inspection.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    stages: Mutex<Vec<Stage>>,
    warnings: Mutex<Vec<Warning>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.stages.lock().clone()
    }

    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.lock().clone()
    }
}

impl Observer for CollectingObserver {
    fn stage(&self, stage: Stage) {
        self.stages.lock().push(stage);
    }

    fn warn(&self, warning: Warning) {
        self.warnings.lock().push(warning);
    }
}
