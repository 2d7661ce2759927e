//! Bounded line segment between two points.

use serde::{Deserialize, Serialize};

use crate::primitives::{Box2, Shape, Vector};
use crate::tolerance::eq_0;

/// A line segment bounded by `start` and `end`.
///
/// Zero-length segments (start equal to end up to tolerance) are valid and
/// special-cased by every algorithm that consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vector,
    pub end: Vector,
}

impl Segment {
    /// Creates a new segment between two points.
    #[inline]
    pub fn new(start: Vector, end: Vector) -> Self {
        Self { start, end }
    }

    /// Creates a segment from coordinate pairs.
    #[inline]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Vector::new(x1, y1), Vector::new(x2, y2))
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        Vector::from_points(self.start, self.end).len()
    }

    /// Angle of the segment direction in `[0, 2π)`.
    pub fn slope(&self) -> f64 {
        Vector::from_points(self.start, self.end).slope()
    }

    /// Bounding box of the segment.
    pub fn bounding_box(&self) -> Box2 {
        Box2::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    /// Returns `true` if start equals end up to the tolerance.
    #[inline]
    pub fn is_zero_length(&self) -> bool {
        self.start.equal_to(&self.end)
    }

    /// Tolerance equality of both endpoints, in order.
    pub fn equal_to(&self, other: &Segment) -> bool {
        self.start.equal_to(&other.start) && self.end.equal_to(&other.end)
    }

    /// Returns `true` if the point lies on the segment.
    pub fn contains(&self, pt: &Vector) -> bool {
        eq_0(crate::algorithms::distance::point_to_segment(pt, self).0)
    }

    /// Returns the segment with swapped endpoints.
    #[inline]
    pub fn reverse(&self) -> Segment {
        Segment::new(self.end, self.start)
    }

    /// Middle point of the segment.
    #[inline]
    pub fn middle(&self) -> Vector {
        Vector::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Unit vector from start towards end.
    pub fn tangent_in_start(&self) -> Vector {
        Vector::from_points(self.start, self.end).normalize()
    }

    /// Unit vector from end towards start.
    pub fn tangent_in_end(&self) -> Vector {
        Vector::from_points(self.end, self.start).normalize()
    }

    /// Splits the segment at a point assumed to lie on it.
    ///
    /// Returns `(None, Some(clone))` or `(Some(clone), None)` when the point
    /// coincides with an endpoint.
    pub fn split(&self, pt: &Vector) -> (Option<Segment>, Option<Segment>) {
        if self.start.equal_to(pt) {
            return (None, Some(*self));
        }
        if self.end.equal_to(pt) {
            return (Some(*self), None);
        }
        (
            Some(Segment::new(self.start, *pt)),
            Some(Segment::new(*pt, self.end)),
        )
    }

    /// Point at the given arc length from the start, or `None` outside
    /// `[0, length]`.
    pub fn point_at_length(&self, length: f64) -> Option<Vector> {
        if length < 0.0 || length > self.length() {
            return None;
        }
        if length == 0.0 {
            return Some(self.start);
        }
        let factor = length / self.length();
        Some(Vector::new(
            (self.end.x - self.start.x) * factor + self.start.x,
            (self.end.y - self.start.y) * factor + self.start.y,
        ))
    }

    /// Signed area between the segment and the horizontal baseline `ymin`
    /// (trapezoid rule), used for face area computation.
    pub fn definite_integral(&self, ymin: f64) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy1 = self.start.y - ymin;
        let dy2 = self.end.y - ymin;
        dx * (dy1 + dy2) / 2.0
    }

    /// Returns the segment translated by `v`.
    #[inline]
    pub fn translate(&self, v: Vector) -> Segment {
        Segment::new(self.start.translate(v), self.end.translate(v))
    }

    /// Sorts points lying on the segment from start to end.
    pub fn sort_points(&self, points: &[Vector]) -> Vec<Vector> {
        let tangent = self.tangent_in_start();
        let param = |pt: &Vector| Vector::from_points(self.start, *pt).dot(&tangent);
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| param(a).total_cmp(&param(b)));
        sorted
    }

    /// Returns intersection points with another shape.
    pub fn intersect(&self, other: &Shape) -> Vec<Vector> {
        crate::algorithms::intersect::intersect(&Shape::Segment(*self), other)
    }

    /// Returns the minimal distance to another shape and the witness
    /// segment from this segment to it.
    pub fn distance_to(&self, other: &Shape) -> (f64, Segment) {
        crate::algorithms::distance::distance(&Shape::Segment(*self), other)
    }
}
