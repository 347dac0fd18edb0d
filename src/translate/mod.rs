//! Diagram → model translation pipeline.
//!
//! ## Stages (in order)
//!
//! ```text
//! builder      packages, classes, package assignment, companions
//!   ↓
//! connections  generalization, realization, dependency
//!   ↓
//! associations attributes synthesized from association ends
//!   ↓
//! cross_ref    qualify user types (diagram first, then imports)
//!   ↓
//! overrides    cycle check, override flags
//!   ↓
//! validate     aggregated structural checks
//! ```
//!
//! Every stage takes the model by value and returns a new one. The first
//! failing stage ends the run; only validation reports all its findings.

mod associations;
mod builder;
mod connections;
mod cross_ref;
mod error;
pub mod observer;
mod overrides;
mod stereotype;
pub mod validate;

pub use associations::{
    AssociationEnd, End, resolve_associations, split_role_type, type_for_multiplicity,
};
pub use builder::{
    assign_packages, build_entities, build_model, build_packages, mark_companions,
    read_geometry, synthesize_companions,
};
pub use connections::{resolve_dependencies, resolve_generalizations, resolve_realizations};
pub use cross_ref::{
    map_member_types, resolve_cross_references, resolve_imports, resolve_same_package,
};
pub use error::TranslateError;
pub use observer::{CollectingObserver, NoopObserver, Observer, Stage, TracingObserver, Warning};
pub use overrides::{
    analyze_overrides, ancestors, attribute_overrides, operation_overrides, resolve_ancestor,
};
pub use stereotype::{
    Binding, ClassStereotypes, MemberFlags, MemberName, bind_member, parse_class_stereotypes,
    split_member_name, split_tokens, strip_decoration,
};
pub use validate::{Diagnostic, ValidationReport, check, validate};

use std::fmt;
use std::sync::Arc;

use crate::model::{ImportTable, Model};
use crate::tree::AttributedTree;

/// Configured translation run.
///
/// ```ignore
/// let model = Translator::new()
///     .with_imports("java.time.Instant".parse()?)
///     .translate(&document)?;
/// ```
#[derive(Clone)]
pub struct Translator {
    imports: ImportTable,
    observer: Arc<dyn Observer>,
}

impl Default for Translator {
    fn default() -> Self {
        Self {
            imports: ImportTable::default(),
            observer: Arc::new(TracingObserver),
        }
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("imports", &self.imports.len())
            .finish_non_exhaustive()
    }
}

impl Translator {
    /// Empty import table, warnings forwarded to `tracing`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_imports(mut self, imports: ImportTable) -> Self {
        self.imports = imports;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// Run the whole pipeline over `tree`.
    pub fn translate<T>(&self, tree: &T) -> Result<Model, TranslateError>
    where
        T: AttributedTree + ?Sized,
    {
        let observer = self.observer.as_ref();
        tracing::debug!(imports = self.imports.len(), "translating diagram");

        let model = build_model(tree, self.imports.clone(), observer)
            .and_then(|m| resolve_generalizations(tree, m, observer))
            .and_then(|m| resolve_realizations(tree, m, observer))
            .and_then(|m| resolve_dependencies(tree, m, observer))
            .and_then(|m| resolve_associations(tree, m, observer))
            .map(|m| resolve_cross_references(m, observer))
            .and_then(|m| analyze_overrides(m, observer))
            .and_then(|m| check(m, observer))?;

        tracing::debug!(
            packages = model.packages.len(),
            entities = model.entity_count(),
            "translation complete"
        );
        Ok(model)
    }

    /// Parse Dia XML and translate it.
    #[cfg(feature = "dia")]
    pub fn translate_str(&self, xml: &str) -> Result<Model, TranslateError> {
        let document = crate::tree::DiaDocument::parse(xml)?;
        self.translate(&document)
    }
}

/// Translate with the default configuration.
pub fn translate<T>(tree: &T) -> Result<Model, TranslateError>
where
    T: AttributedTree + ?Sized,
{
    Translator::default().translate(tree)
}
