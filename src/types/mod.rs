//! Type references.
//!
//! Attribute, parameter and return types are written on the diagram as
//! free text (`Map[String, Seq[Int]]`, `(Int, String) => Boolean`). This
//! module parses that text into the recursive [`TypeRef`] algebra:
//!
//! ```text
//! TypeRef
//! ├── Empty
//! ├── Builtin(Builtin)                 Int, String, Seq, Map, ...
//! ├── User(EntityRef)                  name + package (empty = unresolved)
//! ├── Generic { base, params }         base is Builtin or User
//! ├── Function { inputs, output }
//! └── Tuple(params)
//! ```

mod error;
mod parser;
mod type_ref;

pub use error::TypeParseError;
pub use parser::{chop_generic_parameters, find_top_level_arrow, parse};
pub use type_ref::{Builtin, EntityRef, TypeRef};
