//! Geometric primitives: points, lines, rays, segments, arcs, circles and
//! boxes, plus the [`Shape`] sum type that closes over all of them.

mod arc;
mod bbox;
mod circle;
mod line;
mod ray;
mod segment;
mod shape;
mod vector;

pub use arc::{Arc, CCW, CW};
pub use bbox::Box2;
pub use circle::Circle;
pub use line::Line;
pub use ray::Ray;
pub use segment::Segment;
pub use shape::Shape;
pub use vector::Vector;
