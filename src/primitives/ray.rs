//! Half-infinite ray defined by a start point and a unit normal.

use serde::{Deserialize, Serialize};

use crate::primitives::{Box2, Line, Segment, Shape, Vector};
use crate::tolerance::{eq_0, ge};

/// A ray starting at `pt`, orthogonal to the unit normal `norm`.
///
/// The direction of travel is `norm` rotated 90° clockwise, so the default
/// normal `(0, 1)` yields a horizontal ray pointing in the positive x
/// direction, the convention the ray-shooting test relies on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Start point of the ray.
    pub pt: Vector,
    /// Unit normal vector to the ray.
    pub norm: Vector,
}

impl Ray {
    /// Creates a new ray. The normal is normalized at construction.
    #[inline]
    pub fn new(pt: Vector, norm: Vector) -> Self {
        Self {
            pt,
            norm: norm.normalize(),
        }
    }

    /// Creates a horizontal ray from `pt` pointing in the positive x
    /// direction.
    #[inline]
    pub fn shooting_right(pt: Vector) -> Self {
        Self::new(pt, Vector::new(0.0, 1.0))
    }

    /// Unit direction of travel.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.norm.rotate_90_cw()
    }

    /// Angle of the ray direction in `[0, 2π)`.
    pub fn slope(&self) -> f64 {
        self.direction().slope()
    }

    /// The supporting line of the ray.
    pub fn line(&self) -> Line {
        // the normal is non-zero by construction
        Line::from_point_normal(self.pt, self.norm).unwrap_or(Line {
            pt: self.pt,
            norm: self.norm,
        })
    }

    /// Bounding box, unbounded in the direction of travel.
    pub fn bounding_box(&self) -> Box2 {
        let dir = self.direction();
        let xmin = if ge(dir.x, 0.0) { self.pt.x } else { f64::NEG_INFINITY };
        let xmax = if ge(0.0, dir.x) { self.pt.x } else { f64::INFINITY };
        let ymin = if ge(dir.y, 0.0) { self.pt.y } else { f64::NEG_INFINITY };
        let ymax = if ge(0.0, dir.y) { self.pt.y } else { f64::INFINITY };
        Box2::new(xmin, ymin, xmax, ymax)
    }

    /// Returns `true` if the point lies on the ray.
    pub fn contains(&self, pt: &Vector) -> bool {
        if self.pt.equal_to(pt) {
            return true;
        }
        let vec = Vector::from_points(self.pt, *pt);
        eq_0(self.norm.dot(&vec)) && ge(vec.dot(&self.direction()), 0.0)
    }

    /// Splits the ray at points assumed to lie on it, producing a chain of
    /// segments followed by the remaining ray, ordered from the start.
    pub fn split(&self, points: &[Vector]) -> Vec<Shape> {
        if points.is_empty() {
            return vec![Shape::Ray(*self)];
        }
        let sorted = self.sort_points(points);
        let mut shapes = Vec::with_capacity(sorted.len() + 1);
        let mut prev = self.pt;
        for pt in &sorted {
            if !prev.equal_to(pt) {
                shapes.push(Shape::Segment(Segment::new(prev, *pt)));
            }
            prev = *pt;
        }
        shapes.push(Shape::Ray(Ray::new(prev, self.norm)));
        shapes
    }

    /// Sorts points lying on the ray by distance from the start.
    pub fn sort_points(&self, points: &[Vector]) -> Vec<Vector> {
        let dir = self.direction();
        let param = |pt: &Vector| Vector::from_points(self.pt, *pt).dot(&dir);
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| param(a).total_cmp(&param(b)));
        sorted
    }

    /// Returns intersection points with another shape.
    pub fn intersect(&self, other: &Shape) -> Vec<Vector> {
        crate::algorithms::intersect::intersect(&Shape::Ray(*self), other)
    }
}
