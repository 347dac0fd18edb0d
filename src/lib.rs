//! # dia-classmodel
//!
//! Semantic resolution of Dia UML class diagrams into a typed class model.
//!
//! A diagram carries no type system of its own. Stereotypes, connection
//! handles and the nesting of rectangles are all the translator has to go
//! on when it reconstructs entities, inheritance, companions and qualified
//! member types.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! translate → pipeline stages, Translator, errors, validation
//!   ↓
//! model     → Entity, Attribute, Operation, Package, Model, ImportTable
//!   ↓
//! types     → TypeRef algebra and the type-expression parser
//!   ↓
//! tree      → AttributedTree, Node payload access, Dia XML reader
//!   ↓
//! base      → Geometry, Point, constants
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use classmodel::{DiaDocument, Translator};
//!
//! let document = DiaDocument::open("shop.dia")?;
//! let model = Translator::new().translate(&document)?;
//! for entity in model.entities() {
//!     println!("{}", entity.reference);
//! }
//! ```

// ============================================================================
// MODULES (dependency order: base → tree → types → model → translate)
// ============================================================================

/// Foundation types: Geometry, Point, Dia constants
pub mod base;

/// Attributed tree access and the Dia document reader
pub mod tree;

/// Type expressions: TypeRef, Builtin, EntityRef, parser
pub mod types;

/// The resolved class model
pub mod model;

/// Translation pipeline
pub mod translate;

// Re-export commonly needed items
pub use base::{Geometry, Point};
pub use model::{
    Attribute, ClassType, Entity, ImportTable, Model, Mutability, Operation, Package, Parameter,
    Visibility,
};
pub use translate::{Observer, TranslateError, Translator, ValidationReport, Warning, translate};
#[cfg(feature = "dia")]
pub use tree::DiaDocument;
pub use tree::{AttributedTree, Node, TreeError};
pub use types::{Builtin, EntityRef, TypeParseError, TypeRef};
