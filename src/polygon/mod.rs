//! Polygon model: the edge arena, faces, the polygon itself and the
//! multiline split-chain helper.

mod edge;
mod multiline;
#[allow(clippy::module_inception)]
mod polygon;

pub use edge::{Edge, EdgeId, EdgeShape, FaceId, Inclusion, Overlap};
pub use multiline::{Multiline, MultilineEdge, MultilineShape};
pub use polygon::{Face, Polygon};
