//! Closed sum type over every planar shape the kernel knows about.

use serde::{Deserialize, Serialize};

use crate::polygon::Polygon;
use crate::primitives::{Arc, Box2, Circle, Line, Ray, Segment, Vector};

/// Any planar shape.
///
/// Serialized with an internal `name` tag, so a segment round-trips as
/// `{"name":"segment","start":...,"end":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum Shape {
    Point(Vector),
    Line(Line),
    Ray(Ray),
    Segment(Segment),
    Arc(Arc),
    Circle(Circle),
    #[serde(rename = "box")]
    Box(Box2),
    Polygon(Polygon),
}

impl Shape {
    /// Bounding box of the shape. Infinite for lines and unbounded in the
    /// direction of travel for rays.
    pub fn bounding_box(&self) -> Box2 {
        match self {
            Shape::Point(pt) => pt.box_of(),
            Shape::Line(line) => line.bounding_box(),
            Shape::Ray(ray) => ray.bounding_box(),
            Shape::Segment(seg) => seg.bounding_box(),
            Shape::Arc(arc) => arc.bounding_box(),
            Shape::Circle(circle) => circle.bounding_box(),
            Shape::Box(bbox) => *bbox,
            Shape::Polygon(poly) => poly.bounding_box(),
        }
    }

    /// Returns `true` if the point lies on (or, for areal shapes, inside)
    /// the shape.
    pub fn contains_point(&self, pt: &Vector) -> bool {
        match self {
            Shape::Point(p) => p.equal_to(pt),
            Shape::Line(line) => line.contains(pt),
            Shape::Ray(ray) => ray.contains(pt),
            Shape::Segment(seg) => seg.contains(pt),
            Shape::Arc(arc) => arc.contains(pt),
            Shape::Circle(circle) => circle.contains(pt),
            Shape::Box(bbox) => bbox.contains_point(pt),
            Shape::Polygon(poly) => poly.contains(pt),
        }
    }

    /// Returns intersection points with another shape.
    pub fn intersect(&self, other: &Shape) -> Vec<Vector> {
        crate::algorithms::intersect::intersect(self, other)
    }

    /// Returns the minimal distance to another shape together with the
    /// witness segment realizing it.
    pub fn distance_to(&self, other: &Shape) -> (f64, Segment) {
        crate::algorithms::distance::distance(self, other)
    }

    /// Tolerance equality. Shapes of different kinds are never equal, even
    /// when they cover the same point set.
    pub fn equal_to(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Point(a), Shape::Point(b)) => a.equal_to(b),
            (Shape::Line(a), Shape::Line(b)) => a.incident_to(b),
            (Shape::Ray(a), Shape::Ray(b)) => a.pt.equal_to(&b.pt) && a.norm.equal_to(&b.norm),
            (Shape::Segment(a), Shape::Segment(b)) => a.equal_to(b),
            (Shape::Arc(a), Shape::Arc(b)) => {
                a.start().equal_to(&b.start())
                    && a.end().equal_to(&b.end())
                    && a.middle().equal_to(&b.middle())
            }
            (Shape::Circle(a), Shape::Circle(b)) => a.equal_to(b),
            (Shape::Box(a), Shape::Box(b)) => a.equal_to(b),
            (Shape::Polygon(a), Shape::Polygon(b)) => a == b,
            _ => false,
        }
    }

    /// Returns the shape translated by `v`. Lines and rays translate their
    /// anchor point.
    pub fn translate(&self, v: Vector) -> Shape {
        match self {
            Shape::Point(pt) => Shape::Point(pt.translate(v)),
            Shape::Line(line) => Shape::Line(
                // re-orient, translation can flip the canonical normal sign
                Line::from_point_normal(line.pt.translate(v), line.norm).unwrap_or(*line),
            ),
            Shape::Ray(ray) => Shape::Ray(Ray::new(ray.pt.translate(v), ray.norm)),
            Shape::Segment(seg) => Shape::Segment(seg.translate(v)),
            Shape::Arc(arc) => Shape::Arc(arc.translate(v)),
            Shape::Circle(circle) => Shape::Circle(Circle::new(circle.center.translate(v), circle.radius)),
            Shape::Box(bbox) => Shape::Box(Box2::new(
                bbox.xmin + v.x,
                bbox.ymin + v.y,
                bbox.xmax + v.x,
                bbox.ymax + v.y,
            )),
            Shape::Polygon(poly) => Shape::Polygon(poly.translate(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_to_same_kind() {
        let a = Shape::Segment(Segment::new(Vector::zero(), Vector::new(1.0, 1.0)));
        let b = Shape::Segment(Segment::new(Vector::new(1e-9, 0.0), Vector::new(1.0, 1.0)));
        assert!(a.equal_to(&b));
        assert!(!a.equal_to(&Shape::Point(Vector::zero())));
    }

    #[test]
    fn test_equal_to_lines_compares_loci() {
        // same line built from different point pairs
        let l1 = Line::new(Vector::new(0.0, 1.0), Vector::new(5.0, 1.0)).unwrap();
        let l2 = Line::new(Vector::new(-3.0, 1.0), Vector::new(2.0, 1.0)).unwrap();
        assert!(Shape::Line(l1).equal_to(&Shape::Line(l2)));
    }

    #[test]
    fn test_translate_keeps_line_membership() {
        let line = Line::new(Vector::new(0.0, 1.0), Vector::new(1.0, 2.0)).unwrap();
        let moved = Shape::Line(line).translate(Vector::new(3.0, -4.0));
        assert!(moved.contains_point(&Vector::new(3.0, -3.0)));
        assert!(moved.contains_point(&Vector::new(4.0, -2.0)));
    }
}
