//! Final structural validation.
//!
//! Unlike the earlier stages this pass does not stop at the first problem.
//! It collects every diagnostic and the translation fails only if the
//! collected list is non-empty.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::model::Model;

use super::TranslateError;
use super::observer::{Observer, Stage};

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Error code (e.g., "E0103").
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Validation error codes.
///
/// - **E0101-E0102**: per-entity errors
/// - **E0103-E0104**: per-package errors
pub mod codes {
    /// Entity with a blank name.
    pub const EMPTY_ENTITY_NAME: &str = "E0101";

    /// Entity flagged both mutable and immutable.
    pub const CONFLICTING_MUTABILITY: &str = "E0102";

    /// Two packages with the same name.
    pub const DUPLICATE_PACKAGE: &str = "E0103";

    /// Package that owns no entity.
    pub const EMPTY_PACKAGE: &str = "E0104";
}

/// Every diagnostic found in one model, in check order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether any diagnostic carries `code`.
    pub fn has_code(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    fn error(&mut self, code: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(code, message));
    }
}

/// One diagnostic per line.
impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

// ============================================================================
// CHECKS
// ============================================================================

/// Collect all structural problems of `model`.
pub fn validate(model: &Model) -> ValidationReport {
    let mut report = ValidationReport::default();

    for entity in model.entities() {
        if entity.name().trim().is_empty() {
            report.error(
                codes::EMPTY_ENTITY_NAME,
                format!("Entity '{}' has an empty name", entity.id),
            );
        }
        if entity.mutable && entity.immutable {
            report.error(
                codes::CONFLICTING_MUTABILITY,
                format!(
                    "Entity '{}' is both mutable and immutable",
                    entity.reference.qualified_name()
                ),
            );
        }
    }

    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
    for package in &model.packages {
        let count = seen.entry(package.name.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            report.error(
                codes::DUPLICATE_PACKAGE,
                format!("Duplicate package name '{}'", package.name),
            );
        }
    }

    for package in &model.packages {
        if model.entities_in(&package.name).next().is_none() {
            report.error(
                codes::EMPTY_PACKAGE,
                format!("Package '{}' contains no entities", package.name),
            );
        }
    }

    report
}

/// Pass `model` through only if validation finds nothing.
pub fn check(model: Model, observer: &dyn Observer) -> Result<Model, TranslateError> {
    observer.stage(Stage::Validation);
    let report = validate(&model);
    if report.is_empty() {
        Ok(model)
    } else {
        tracing::debug!(errors = report.len(), "validation failed");
        Err(TranslateError::Validation(report))
    }
}
