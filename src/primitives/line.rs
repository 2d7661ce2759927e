//! Infinite line defined by an anchor point and a unit normal.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::primitives::{Box2, Segment, Shape, Vector};
use crate::tolerance::eq_0;

/// An infinite line through `pt` with unit normal `norm`.
///
/// The normal is always normalized and oriented so that `norm · pt < 0`
/// (flipped at construction otherwise), which gives every line a canonical
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// A point the line passes through.
    pub pt: Vector,
    /// Unit normal vector to the line.
    pub norm: Vector,
}

impl Line {
    /// Creates a line through two distinct points.
    ///
    /// Returns [`GeometryError::IllegalParameters`] if the points coincide
    /// up to the tolerance.
    pub fn new(a: Vector, b: Vector) -> Result<Self, GeometryError> {
        if a.equal_to(&b) {
            return Err(GeometryError::IllegalParameters);
        }
        let norm = Vector::from_points(a, b).normalize().rotate_90_ccw();
        Ok(Self::orient(a, norm))
    }

    /// Creates a line through `pt` with the given normal direction.
    ///
    /// Returns [`GeometryError::IllegalParameters`] for a zero normal.
    pub fn from_point_normal(pt: Vector, norm: Vector) -> Result<Self, GeometryError> {
        if eq_0(norm.x) && eq_0(norm.y) {
            return Err(GeometryError::IllegalParameters);
        }
        Ok(Self::orient(pt, norm.normalize()))
    }

    fn orient(pt: Vector, norm: Vector) -> Self {
        let norm = if norm.dot(&pt) >= 0.0 {
            norm.invert()
        } else {
            norm
        };
        Self { pt, norm }
    }

    /// Angle between the line and the x axis in `[0, 2π)`.
    pub fn slope(&self) -> f64 {
        Vector::new(self.norm.y, -self.norm.x).slope()
    }

    /// Coefficients `[A, B, C]` of the standard equation `Ax + By = C`.
    #[inline]
    pub fn standard(&self) -> [f64; 3] {
        [self.norm.x, self.norm.y, self.norm.dot(&self.pt)]
    }

    /// A line's bounding box is the infinite box.
    pub fn bounding_box(&self) -> Box2 {
        Box2::new(
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::INFINITY,
        )
    }

    /// Returns `true` if the lines are parallel (or coincident).
    #[inline]
    pub fn parallel_to(&self, other: &Line) -> bool {
        eq_0(self.norm.cross(&other.norm))
    }

    /// Returns `true` if the lines are coincident.
    pub fn incident_to(&self, other: &Line) -> bool {
        self.parallel_to(other) && other.contains(&self.pt)
    }

    /// Returns `true` if the point lies on the line.
    ///
    /// True when the point equals the anchor or the vector from the anchor
    /// to the point is orthogonal to the normal.
    pub fn contains(&self, pt: &Vector) -> bool {
        if self.pt.equal_to(pt) {
            return true;
        }
        let vec = Vector::from_points(self.pt, *pt);
        eq_0(self.norm.dot(&vec))
    }

    /// Signed coordinate of a point along the line, used for sorting points
    /// that lie on it. Assumes (and does not check) that the point is on
    /// the line.
    ///
    /// The coordinate grows along the canonical direction of the line (the
    /// re-oriented normal rotated clockwise), which is independent of the
    /// order the construction points were given in.
    #[inline]
    pub fn coord(&self, pt: &Vector) -> f64 {
        pt.cross(&self.norm)
    }

    /// Sorts points lying on the line by their coordinate along it, in the
    /// canonical direction.
    pub fn sort_points(&self, points: &[Vector]) -> Vec<Vector> {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| self.coord(a).total_cmp(&self.coord(b)));
        sorted
    }

    /// Splits the line at the given points, which are assumed to lie on it.
    ///
    /// A single point yields two opposite rays; several points yield an
    /// ordered chain of rays and segments.
    pub fn split(&self, points: &[Vector]) -> Vec<Shape> {
        use crate::polygon::Multiline;
        use crate::primitives::Ray;

        match points {
            [] => vec![Shape::Line(*self)],
            [pt] => vec![
                Shape::Ray(Ray::new(*pt, self.norm.invert())),
                Shape::Ray(Ray::new(*pt, self.norm)),
            ],
            _ => {
                let mut multiline = Multiline::from_line(*self);
                multiline.split(&self.sort_points(points));
                multiline.to_shapes()
            }
        }
    }

    /// Returns intersection points with another shape.
    pub fn intersect(&self, other: &Shape) -> Vec<Vector> {
        crate::algorithms::intersect::intersect(&Shape::Line(*self), other)
    }

    /// Returns the minimal distance to another shape and the witness
    /// segment from this line to it.
    pub fn distance_to(&self, other: &Shape) -> (f64, Segment) {
        crate::algorithms::distance::distance(&Shape::Line(*self), other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_from_points() {
        let line = Line::new(Vector::new(0.0, 1.0), Vector::new(1.0, 1.0)).unwrap();
        assert_relative_eq!(line.norm.len(), 1.0, epsilon = 1e-12);
        assert!(line.norm.dot(&line.pt) < 0.0);
    }

    #[test]
    fn test_new_coincident_points() {
        let res = Line::new(Vector::new(1.0, 1.0), Vector::new(1.0, 1.0));
        assert_eq!(res, Err(GeometryError::IllegalParameters));
    }

    #[test]
    fn test_from_point_normal_zero() {
        let res = Line::from_point_normal(Vector::new(1.0, 1.0), Vector::zero());
        assert_eq!(res, Err(GeometryError::IllegalParameters));
    }

    #[test]
    fn test_contains() {
        let line = Line::new(Vector::new(0.0, 0.0), Vector::new(1.0, 1.0)).unwrap();
        assert!(line.contains(&Vector::new(2.0, 2.0)));
        assert!(line.contains(&Vector::new(-3.0, -3.0)));
        assert!(!line.contains(&Vector::new(1.0, 0.0)));
    }

    #[test]
    fn test_standard() {
        let line = Line::new(Vector::new(0.0, 2.0), Vector::new(1.0, 2.0)).unwrap();
        let [a, b, c] = line.standard();
        // horizontal line y = 2
        assert_relative_eq!(a, 0.0, epsilon = 1e-12);
        assert_relative_eq!((c / b).abs(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_and_incident() {
        let l1 = Line::new(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)).unwrap();
        let l2 = Line::new(Vector::new(0.0, 1.0), Vector::new(1.0, 1.0)).unwrap();
        let l3 = Line::new(Vector::new(5.0, 0.0), Vector::new(6.0, 0.0)).unwrap();
        assert!(l1.parallel_to(&l2));
        assert!(!l1.incident_to(&l2));
        assert!(l1.incident_to(&l3));
    }

    #[test]
    fn test_sort_points() {
        let line = Line::new(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)).unwrap();
        let pts = [
            Vector::new(3.0, 0.0),
            Vector::new(-1.0, 0.0),
            Vector::new(1.0, 0.0),
        ];
        // the canonical direction of the x axis through the origin is -x,
        // so coordinates grow with decreasing x
        let sorted = line.sort_points(&pts);
        assert_eq!(sorted[0].x, 3.0);
        assert_eq!(sorted[1].x, 1.0);
        assert_eq!(sorted[2].x, -1.0);
        assert!(line.coord(&sorted[0]) < line.coord(&sorted[1]));
    }

    #[test]
    fn test_split_single_point() {
        let line = Line::new(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)).unwrap();
        let parts = line.split(&[Vector::new(2.0, 0.0)]);
        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[0], Shape::Ray(_)));
        assert!(matches!(parts[1], Shape::Ray(_)));
    }

    #[test]
    fn test_split_two_points() {
        let line = Line::new(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)).unwrap();
        let parts = line.split(&[Vector::new(1.0, 0.0), Vector::new(4.0, 0.0)]);
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[0], Shape::Ray(_)));
        match &parts[1] {
            // the chain runs in the canonical direction, here -x
            Shape::Segment(seg) => {
                assert!(seg.start.equal_to(&Vector::new(4.0, 0.0)));
                assert!(seg.end.equal_to(&Vector::new(1.0, 0.0)));
            }
            other => panic!("expected segment, got {other:?}"),
        }
        assert!(matches!(parts[2], Shape::Ray(_)));
    }
}
