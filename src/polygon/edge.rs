//! Polygon edge: a segment or arc in a face cycle, plus the classification
//! flags the boolean engine caches on it.

use serde::{Deserialize, Serialize};

use crate::primitives::{Arc, Box2, Segment, Shape, Vector};

/// Index of an edge in the polygon's edge arena.
pub type EdgeId = usize;
/// Index of a face in the polygon's face arena.
pub type FaceId = usize;

/// Position of a point or an edge relative to a polygon region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inclusion {
    Inside,
    Outside,
    Boundary,
}

/// How two coincident boundary edges are traversed relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlap {
    Same,
    Opposite,
}

/// The geometry an edge can carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum EdgeShape {
    Segment(Segment),
    Arc(Arc),
}

impl EdgeShape {
    /// Start point of the edge.
    #[inline]
    pub fn start(&self) -> Vector {
        match self {
            EdgeShape::Segment(seg) => seg.start,
            EdgeShape::Arc(arc) => arc.start(),
        }
    }

    /// End point of the edge.
    #[inline]
    pub fn end(&self) -> Vector {
        match self {
            EdgeShape::Segment(seg) => seg.end,
            EdgeShape::Arc(arc) => arc.end(),
        }
    }

    /// Length of the edge.
    #[inline]
    pub fn length(&self) -> f64 {
        match self {
            EdgeShape::Segment(seg) => seg.length(),
            EdgeShape::Arc(arc) => arc.length(),
        }
    }

    /// Bounding box of the edge.
    pub fn bounding_box(&self) -> Box2 {
        match self {
            EdgeShape::Segment(seg) => seg.bounding_box(),
            EdgeShape::Arc(arc) => arc.bounding_box(),
        }
    }

    /// Returns `true` if the point lies on the edge.
    pub fn contains(&self, pt: &Vector) -> bool {
        match self {
            EdgeShape::Segment(seg) => seg.contains(pt),
            EdgeShape::Arc(arc) => arc.contains(pt),
        }
    }

    /// Middle point of the edge.
    pub fn middle(&self) -> Vector {
        match self {
            EdgeShape::Segment(seg) => seg.middle(),
            EdgeShape::Arc(arc) => arc.middle(),
        }
    }

    /// Splits the edge at a point assumed to lie on it.
    pub fn split(&self, pt: &Vector) -> (Option<EdgeShape>, Option<EdgeShape>) {
        match self {
            EdgeShape::Segment(seg) => {
                let (a, b) = seg.split(pt);
                (a.map(EdgeShape::Segment), b.map(EdgeShape::Segment))
            }
            EdgeShape::Arc(arc) => {
                let (a, b) = arc.split(pt);
                (a.map(EdgeShape::Arc), b.map(EdgeShape::Arc))
            }
        }
    }

    /// Unit tangent at the start, pointing into the edge.
    pub fn tangent_in_start(&self) -> Vector {
        match self {
            EdgeShape::Segment(seg) => seg.tangent_in_start(),
            EdgeShape::Arc(arc) => arc.tangent_in_start(),
        }
    }

    /// Unit tangent at the end, pointing back into the edge.
    pub fn tangent_in_end(&self) -> Vector {
        match self {
            EdgeShape::Segment(seg) => seg.tangent_in_end(),
            EdgeShape::Arc(arc) => arc.tangent_in_end(),
        }
    }

    /// The edge traversed in the opposite direction.
    pub fn reverse(&self) -> EdgeShape {
        match self {
            EdgeShape::Segment(seg) => EdgeShape::Segment(seg.reverse()),
            EdgeShape::Arc(arc) => EdgeShape::Arc(arc.reverse()),
        }
    }

    /// Signed area between the edge and the baseline `ymin`.
    pub fn definite_integral(&self, ymin: f64) -> f64 {
        match self {
            EdgeShape::Segment(seg) => seg.definite_integral(ymin),
            EdgeShape::Arc(arc) => arc.definite_integral(ymin),
        }
    }

    /// Sorts points lying on the edge from start to end.
    pub fn sort_points(&self, points: &[Vector]) -> Vec<Vector> {
        match self {
            EdgeShape::Segment(seg) => seg.sort_points(points),
            EdgeShape::Arc(arc) => arc.sort_points(points),
        }
    }

    /// The edge translated by `v`.
    pub fn translate(&self, v: Vector) -> EdgeShape {
        match self {
            EdgeShape::Segment(seg) => EdgeShape::Segment(seg.translate(v)),
            EdgeShape::Arc(arc) => EdgeShape::Arc(arc.translate(v)),
        }
    }

    /// The edge as a general shape, for the pairwise dispatchers.
    pub fn as_shape(&self) -> Shape {
        match self {
            EdgeShape::Segment(seg) => Shape::Segment(*seg),
            EdgeShape::Arc(arc) => Shape::Arc(*arc),
        }
    }
}

/// One directed edge of a polygon face.
///
/// `next`, `prev` and `face` are arena ids; the chain around each face is
/// doubly linked. `arc_length` is the distance from the face start along
/// the boundary, refreshed by the owning polygon when faces change. The
/// `Option` flags are boolean-engine caches, `None` until classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub shape: EdgeShape,
    pub next: EdgeId,
    pub prev: EdgeId,
    pub face: FaceId,
    pub arc_length: f64,
    pub inclusion: Option<Inclusion>,
    pub start_inclusion: Option<Inclusion>,
    pub end_inclusion: Option<Inclusion>,
    pub overlap: Option<Overlap>,
}

impl Edge {
    /// Creates an unlinked edge; the polygon wires `next`/`prev`/`face`
    /// when the edge joins a cycle.
    pub fn new(shape: EdgeShape) -> Self {
        Self {
            shape,
            next: 0,
            prev: 0,
            face: 0,
            arc_length: 0.0,
            inclusion: None,
            start_inclusion: None,
            end_inclusion: None,
            overlap: None,
        }
    }

    /// Start point of the edge geometry.
    #[inline]
    pub fn start(&self) -> Vector {
        self.shape.start()
    }

    /// End point of the edge geometry.
    #[inline]
    pub fn end(&self) -> Vector {
        self.shape.end()
    }

    /// Length of the edge geometry.
    #[inline]
    pub fn length(&self) -> f64 {
        self.shape.length()
    }

    /// Determines how this edge overlaps a coincident edge of another
    /// polygon.
    ///
    /// Both edges are assumed to cover the same point set, which is what
    /// splitting at shared intersection points guarantees. Matching
    /// endpoint order decides; for partial matches the start tangents
    /// break the tie.
    pub fn overlap_with(&self, other: &Edge) -> Overlap {
        let (s1, e1) = (self.start(), self.end());
        let (s2, e2) = (other.start(), other.end());
        if s1.equal_to(&s2) && e1.equal_to(&e2) {
            return Overlap::Same;
        }
        if s1.equal_to(&e2) && e1.equal_to(&s2) {
            return Overlap::Opposite;
        }
        if self.shape.tangent_in_start().dot(&other.shape.tangent_in_start()) > 0.0 {
            Overlap::Same
        } else {
            Overlap::Opposite
        }
    }

    /// Drops every cached classification flag.
    pub fn clear_flags(&mut self) {
        self.inclusion = None;
        self.start_inclusion = None;
        self.end_inclusion = None;
        self.overlap = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::CCW;
    use std::f64::consts::PI;

    #[test]
    fn test_edge_shape_split_segment() {
        let shape = EdgeShape::Segment(Segment::from_coords(0.0, 0.0, 4.0, 0.0));
        let (first, second) = shape.split(&Vector::new(1.0, 0.0));
        assert!(first.unwrap().end().equal_to(&Vector::new(1.0, 0.0)));
        assert!(second.unwrap().start().equal_to(&Vector::new(1.0, 0.0)));
    }

    #[test]
    fn test_edge_shape_arc_endpoints() {
        let shape = EdgeShape::Arc(Arc::new(Vector::zero(), 1.0, 0.0, PI, CCW));
        assert!(shape.start().equal_to(&Vector::new(1.0, 0.0)));
        assert!(shape.end().equal_to(&Vector::new(-1.0, 0.0)));
    }

    #[test]
    fn test_overlap_with() {
        let fwd = Edge::new(EdgeShape::Segment(Segment::from_coords(0.0, 0.0, 2.0, 0.0)));
        let same = Edge::new(EdgeShape::Segment(Segment::from_coords(0.0, 0.0, 2.0, 0.0)));
        let back = Edge::new(EdgeShape::Segment(Segment::from_coords(2.0, 0.0, 0.0, 0.0)));
        assert_eq!(fwd.overlap_with(&same), Overlap::Same);
        assert_eq!(fwd.overlap_with(&back), Overlap::Opposite);
    }
}
