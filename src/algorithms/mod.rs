//! Geometric algorithms over the shape primitives: intersection,
//! distance, point-in-polygon, boolean operations and DE-9IM relations.

pub mod boolean;
pub mod distance;
pub mod intersect;
pub mod ray_casting;
pub mod relation;
