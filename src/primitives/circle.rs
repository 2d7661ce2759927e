//! Circle defined by center and radius.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::primitives::{Arc, Box2, Segment, Shape, Vector};
use crate::tolerance::le;

/// A circle with non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vector,
    pub radius: f64,
}

impl Circle {
    /// Creates a new circle.
    #[inline]
    pub fn new(center: Vector, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Bounding box of the circle.
    pub fn bounding_box(&self) -> Box2 {
        Box2::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    /// Returns `true` if the point lies inside or on the circle.
    pub fn contains(&self, pt: &Vector) -> bool {
        le(Vector::from_points(self.center, *pt).len(), self.radius)
    }

    /// Tolerance equality of center and radius.
    pub fn equal_to(&self, other: &Circle) -> bool {
        self.center.equal_to(&other.center) && crate::tolerance::eq(self.radius, other.radius)
    }

    /// Converts the circle to a full-circle arc.
    pub fn to_arc(&self, counter_clockwise: bool) -> Arc {
        Arc::new(self.center, self.radius, PI, -PI, counter_clockwise)
    }

    /// Returns intersection points with another shape.
    pub fn intersect(&self, other: &Shape) -> Vec<Vector> {
        crate::algorithms::intersect::intersect(&Shape::Circle(*self), other)
    }

    /// Returns the minimal distance to another shape and the witness
    /// segment from this circle to it.
    pub fn distance_to(&self, other: &Shape) -> (f64, Segment) {
        crate::algorithms::distance::distance(&Shape::Circle(*self), other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    #[test]
    fn test_bounding_box() {
        let c = Circle::new(Vector::new(1.0, 2.0), 3.0);
        assert_eq!(c.bounding_box(), Box2::new(-2.0, -1.0, 4.0, 5.0));
    }

    #[test]
    fn test_contains() {
        let c = Circle::new(Vector::zero(), 5.0);
        assert!(c.contains(&Vector::new(3.0, 3.0)));
        assert!(c.contains(&Vector::new(5.0, 0.0))); // on boundary
        assert!(!c.contains(&Vector::new(4.0, 4.0)));
    }

    #[test]
    fn test_to_arc_is_full_circle() {
        let c = Circle::new(Vector::new(2.0, 0.0), 1.5);
        let arc = c.to_arc(true);
        assert_relative_eq!(arc.sweep(), TAU, epsilon = 1e-12);
        assert_relative_eq!(arc.length(), TAU * 1.5, epsilon = 1e-12);
        assert!(arc.start().equal_to(&Vector::new(0.5, 0.0)));
    }
}
