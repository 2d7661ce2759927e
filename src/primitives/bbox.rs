//! Axis-aligned bounding box.

use serde::{Deserialize, Serialize};

use crate::primitives::{Segment, Vector};

/// A 2D axis-aligned bounding box.
///
/// Used both as a geometric shape and as the key of the spatial index. A
/// non-degenerate box satisfies `xmin <= xmax` and `ymin <= ymax`; the
/// [`Box2::empty`] box is the identity element of [`Box2::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box2 {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Box2 {
    /// Creates a new box from its extents.
    #[inline]
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Creates the empty box, the identity element for [`Box2::merge`].
    #[inline]
    pub fn empty() -> Self {
        Self {
            xmin: f64::INFINITY,
            ymin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymax: f64::NEG_INFINITY,
        }
    }

    /// Low corner of the box.
    #[inline]
    pub fn low(&self) -> Vector {
        Vector::new(self.xmin, self.ymin)
    }

    /// High corner of the box.
    #[inline]
    pub fn high(&self) -> Vector {
        Vector::new(self.xmax, self.ymax)
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> Vector {
        Vector::new((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }

    /// Width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        (self.xmax - self.xmin).abs()
    }

    /// Height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        (self.ymax - self.ymin).abs()
    }

    /// Returns `true` if this box does not intersect `other`.
    #[inline]
    pub fn not_intersects(&self, other: &Box2) -> bool {
        self.xmax < other.xmin
            || self.xmin > other.xmax
            || self.ymax < other.ymin
            || self.ymin > other.ymax
    }

    /// Returns `true` if this box intersects `other`.
    #[inline]
    pub fn intersects(&self, other: &Box2) -> bool {
        !self.not_intersects(other)
    }

    /// Returns `true` if the point lies inside or on the boundary.
    #[inline]
    pub fn contains_point(&self, pt: &Vector) -> bool {
        pt.x >= self.xmin && pt.x <= self.xmax && pt.y >= self.ymin && pt.y <= self.ymax
    }

    /// Returns the smallest box containing both boxes.
    #[inline]
    pub fn merge(&self, other: &Box2) -> Box2 {
        Box2::new(
            self.xmin.min(other.xmin),
            self.ymin.min(other.ymin),
            self.xmax.max(other.xmax),
            self.ymax.max(other.ymax),
        )
    }

    /// Ordering predicate over (low, high) corners, used by the spatial
    /// index. Exact comparison, no tolerance.
    pub fn less_than(&self, other: &Box2) -> bool {
        let lows = (self.xmin, self.ymin);
        let other_lows = (other.xmin, other.ymin);
        if lows < other_lows {
            return true;
        }
        lows == other_lows && (self.xmax, self.ymax) < (other.xmax, other.ymax)
    }

    /// Tolerance equality over both corners.
    pub fn equal_to(&self, other: &Box2) -> bool {
        self.low().equal_to(&other.low()) && self.high().equal_to(&other.high())
    }

    /// Corner points from the lower-left corner, counter-clockwise.
    pub fn to_points(&self) -> [Vector; 4] {
        [
            Vector::new(self.xmin, self.ymin),
            Vector::new(self.xmax, self.ymin),
            Vector::new(self.xmax, self.ymax),
            Vector::new(self.xmin, self.ymax),
        ]
    }

    /// Boundary segments from the lower-left corner, counter-clockwise.
    pub fn to_segments(&self) -> [Segment; 4] {
        let pts = self.to_points();
        [
            Segment::new(pts[0], pts[1]),
            Segment::new(pts[1], pts[2]),
            Segment::new(pts[2], pts[3]),
            Segment::new(pts[3], pts[0]),
        ]
    }
}
