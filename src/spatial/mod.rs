//! Spatial indexing: the interval tree and the planar set built on top of
//! it.

mod interval_tree;
mod planar_set;

pub use interval_tree::IntervalTree;
pub use planar_set::PlanarSet;
