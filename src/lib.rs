//! planar - 2D computational geometry kernel
//!
//! Shapes (points, lines, rays, segments, arcs, circles, boxes and
//! multi-face polygons with circular-arc edges), pairwise intersection
//! and distance queries, boolean operations on polygon regions and
//! DE-9IM topological predicates. All comparisons go through a global
//! tolerance, so nearly-touching geometry behaves as touching.

pub mod algorithms;
pub mod error;
pub mod polygon;
pub mod primitives;
pub mod spatial;
pub mod tolerance;

pub use algorithms::boolean::{
    calculate_intersections, cut_polygon, inner_clip, outer_clip, subtract, unify,
};
pub use algorithms::distance::distance;
pub use algorithms::intersect::intersect;
pub use algorithms::ray_casting::ray_shoot;
pub use algorithms::relation::{relate, DE9IM};
pub use error::GeometryError;
pub use polygon::{Edge, EdgeShape, Face, Inclusion, Multiline, MultilineShape, Overlap, Polygon};
pub use primitives::{Arc, Box2, Circle, Line, Ray, Segment, Shape, Vector, CCW, CW};
pub use spatial::{IntervalTree, PlanarSet};
pub use tolerance::{get_tolerance, set_tolerance};
