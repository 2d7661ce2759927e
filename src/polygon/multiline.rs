//! Ordered chain of shapes produced by splitting a line, ray, segment or
//! arc at intersection points.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::polygon::Inclusion;
use crate::primitives::{Arc, Box2, Line, Ray, Segment, Shape, Vector};

/// Geometry a multiline edge can carry. Unbounded pieces appear only at
/// the ends of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum MultilineShape {
    Line(Line),
    Ray(Ray),
    Segment(Segment),
    Arc(Arc),
}

impl MultilineShape {
    /// Returns `true` if the point lies on the piece.
    pub fn contains(&self, pt: &Vector) -> bool {
        match self {
            MultilineShape::Line(line) => line.contains(pt),
            MultilineShape::Ray(ray) => ray.contains(pt),
            MultilineShape::Segment(seg) => seg.contains(pt),
            MultilineShape::Arc(arc) => arc.contains(pt),
        }
    }

    /// Bounding box of the piece.
    pub fn bounding_box(&self) -> Box2 {
        match self {
            MultilineShape::Line(line) => line.bounding_box(),
            MultilineShape::Ray(ray) => ray.bounding_box(),
            MultilineShape::Segment(seg) => seg.bounding_box(),
            MultilineShape::Arc(arc) => arc.bounding_box(),
        }
    }

    /// A representative interior point of the piece, used to classify it
    /// against a region.
    pub fn interior_point(&self) -> Vector {
        match self {
            MultilineShape::Line(line) => line.pt,
            MultilineShape::Ray(ray) => ray.pt.translate(ray.direction()),
            MultilineShape::Segment(seg) => seg.middle(),
            MultilineShape::Arc(arc) => arc.middle(),
        }
    }

    /// Splits the piece at a point assumed to lie on it, preserving chain
    /// order: a line becomes a backward and a forward ray.
    pub fn split(&self, pt: &Vector) -> (Option<MultilineShape>, Option<MultilineShape>) {
        match self {
            MultilineShape::Line(line) => (
                Some(MultilineShape::Ray(Ray::new(*pt, line.norm.invert()))),
                Some(MultilineShape::Ray(Ray::new(*pt, line.norm))),
            ),
            MultilineShape::Ray(ray) => {
                if ray.pt.equal_to(pt) {
                    (None, Some(*self))
                } else {
                    (
                        Some(MultilineShape::Segment(Segment::new(ray.pt, *pt))),
                        Some(MultilineShape::Ray(Ray::new(*pt, ray.norm))),
                    )
                }
            }
            MultilineShape::Segment(seg) => {
                let (a, b) = seg.split(pt);
                (a.map(MultilineShape::Segment), b.map(MultilineShape::Segment))
            }
            MultilineShape::Arc(arc) => {
                let (a, b) = arc.split(pt);
                (a.map(MultilineShape::Arc), b.map(MultilineShape::Arc))
            }
        }
    }

    /// The piece as a general shape.
    pub fn as_shape(&self) -> Shape {
        match self {
            MultilineShape::Line(line) => Shape::Line(*line),
            MultilineShape::Ray(ray) => Shape::Ray(*ray),
            MultilineShape::Segment(seg) => Shape::Segment(*seg),
            MultilineShape::Arc(arc) => Shape::Arc(*arc),
        }
    }
}

/// One piece of a multiline, with the region classification the relation
/// builder caches on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultilineEdge {
    pub shape: MultilineShape,
    pub inclusion: Option<Inclusion>,
}

impl MultilineEdge {
    pub fn new(shape: MultilineShape) -> Self {
        Self {
            shape,
            inclusion: None,
        }
    }
}

/// An ordered open chain of line, ray, segment and arc pieces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Multiline {
    pub edges: Vec<MultilineEdge>,
}

impl Multiline {
    /// Creates an empty multiline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a one-piece multiline covering the whole line.
    pub fn from_line(line: Line) -> Self {
        Self {
            edges: vec![MultilineEdge::new(MultilineShape::Line(line))],
        }
    }

    /// Creates a multiline from a list of shapes.
    ///
    /// Only line, ray, segment and arc shapes are allowed; anything else
    /// reports [`GeometryError::IllegalParameters`].
    pub fn from_shapes(shapes: &[Shape]) -> Result<Self, GeometryError> {
        let mut edges = Vec::with_capacity(shapes.len());
        for shape in shapes {
            let piece = match shape {
                Shape::Line(line) => MultilineShape::Line(*line),
                Shape::Ray(ray) => MultilineShape::Ray(*ray),
                Shape::Segment(seg) => MultilineShape::Segment(*seg),
                Shape::Arc(arc) => MultilineShape::Arc(*arc),
                _ => return Err(GeometryError::IllegalParameters),
            };
            edges.push(MultilineEdge::new(piece));
        }
        Ok(Self { edges })
    }

    /// Splits the chain at each point, in order; each point splits the
    /// piece it lies on.
    ///
    /// A ray at the head of a longer chain comes in from infinity, so its
    /// travel direction runs against the chain and its split keeps the ray
    /// first. A lone ray is taken as forward.
    pub fn split(&mut self, points: &[Vector]) {
        for pt in points {
            let Some(index) = self.edges.iter().position(|e| e.shape.contains(pt)) else {
                continue;
            };
            let head_ray = match self.edges[index].shape {
                MultilineShape::Ray(ray) if index == 0 && self.edges.len() > 1 => Some(ray),
                _ => None,
            };
            let (first, second) = match head_ray {
                Some(ray) if !ray.pt.equal_to(pt) => (
                    Some(MultilineShape::Ray(Ray::new(*pt, ray.norm))),
                    Some(MultilineShape::Segment(Segment::new(*pt, ray.pt))),
                ),
                Some(_) => (Some(self.edges[index].shape), None),
                None => self.edges[index].shape.split(pt),
            };
            let mut replacement = Vec::with_capacity(2);
            if let Some(first) = first {
                replacement.push(MultilineEdge::new(first));
            }
            if let Some(second) = second {
                replacement.push(MultilineEdge::new(second));
            }
            self.edges.splice(index..=index, replacement);
        }
    }

    /// The chain as a list of general shapes.
    pub fn to_shapes(&self) -> Vec<Shape> {
        self.edges.iter().map(|e| e.shape.as_shape()).collect()
    }
}
