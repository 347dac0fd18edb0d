//! Foundation types for the class-model translator.
//!
//! This module provides the primitives shared by every stage:
//! - [`Geometry`], [`Point`] - diagram rectangles used for package containment
//! - Domain constants (Dia object and payload names, stereotype tokens)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod geometry;

pub use geometry::{Geometry, Point};
