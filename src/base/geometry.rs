//! Diagram geometry.
//!
//! Only the bounding rectangle of an object is kept; it is needed for
//! deciding which package a class was drawn inside.

/// A point on the diagram canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of a diagram object (top-left corner plus extent).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a geometry from its top-left corner and extent.
    pub fn from_corner(corner: Point, width: f64, height: f64) -> Self {
        Self::new(corner.x, corner.y, width, height)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Check if `inner` lies strictly inside this rectangle.
    ///
    /// Both corners are compared with strict inequalities, so a rectangle
    /// never contains itself and shared edges do not count.
    pub fn contains(&self, inner: &Geometry) -> bool {
        let (outer_tl, outer_br) = (self.top_left(), self.bottom_right());
        let (inner_tl, inner_br) = (inner.top_left(), inner.bottom_right());
        outer_tl.x < inner_tl.x
            && outer_tl.y < inner_tl.y
            && inner_br.x < outer_br.x
            && inner_br.y < outer_br.y
    }
}
