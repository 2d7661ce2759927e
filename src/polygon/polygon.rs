//! Polygon with multiple faces over an arena of edges.

use serde::{Deserialize, Serialize};

use crate::algorithms::ray_casting::ray_shoot;
use crate::error::GeometryError;
use crate::polygon::{Edge, EdgeId, EdgeShape, FaceId, Inclusion};
use crate::primitives::{Box2, Circle, Segment, Vector};
use crate::spatial::IntervalTree;

/// One closed boundary cycle of a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub first: EdgeId,
    pub last: EdgeId,
}

/// A planar region bounded by one or more faces.
///
/// Faces are closed chains of segment and arc edges; counter-clockwise
/// faces bound islands and clockwise faces bound holes, with a negative
/// signed area marking the counter-clockwise direction. Edges live in a
/// slab arena and link to each other by id, and every edge box is kept in
/// an interval tree so boundary queries avoid a full scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "PolygonRepr", try_from = "PolygonRepr")]
pub struct Polygon {
    edges: Vec<Option<Edge>>,
    faces: Vec<Option<Face>>,
    free_edges: Vec<EdgeId>,
    free_faces: Vec<FaceId>,
    tree: IntervalTree<EdgeId>,
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges && self.faces == other.faces
    }
}

impl Polygon {
    /// Creates an empty polygon.
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            faces: Vec::new(),
            free_edges: Vec::new(),
            free_faces: Vec::new(),
            tree: IntervalTree::new(),
        }
    }

    /// Creates a single-face polygon from a point list.
    pub fn from_points(points: &[Vector]) -> Result<Self, GeometryError> {
        let mut polygon = Self::new();
        polygon.add_face_from_points(points)?;
        Ok(polygon)
    }

    /// Lifts a circle into a one-edge polygon bounded by a full
    /// counter-clockwise arc.
    pub fn from_circle(circle: &Circle) -> Self {
        let mut polygon = Self::new();
        polygon.add_face_unchecked(vec![EdgeShape::Arc(circle.to_arc(true))]);
        polygon
    }

    /// Lifts a box into a four-edge counter-clockwise polygon.
    pub fn from_box(bbox: &Box2) -> Self {
        let mut polygon = Self::new();
        let shapes = bbox
            .to_segments()
            .iter()
            .map(|seg| EdgeShape::Segment(*seg))
            .collect();
        polygon.add_face_unchecked(shapes);
        polygon
    }

    /// Adds a face from a point list, closing the ring back to the first
    /// point. Fails on fewer than three points or coincident neighbors.
    pub fn add_face_from_points(&mut self, points: &[Vector]) -> Result<FaceId, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::IllegalParameters);
        }
        let mut shapes = Vec::with_capacity(points.len());
        for i in 0..points.len() {
            let start = points[i];
            let end = points[(i + 1) % points.len()];
            if start.equal_to(&end) {
                return Err(GeometryError::IllegalParameters);
            }
            shapes.push(EdgeShape::Segment(Segment::new(start, end)));
        }
        self.add_face(shapes)
    }

    /// Adds a face from a chain of segments and arcs.
    ///
    /// Each shape must start where the previous one ends and the chain
    /// must close back to the first start.
    pub fn add_face(&mut self, shapes: Vec<EdgeShape>) -> Result<FaceId, GeometryError> {
        if shapes.is_empty() {
            return Err(GeometryError::IllegalParameters);
        }
        for i in 0..shapes.len() {
            let end = shapes[i].end();
            let next_start = shapes[(i + 1) % shapes.len()].start();
            if !end.equal_to(&next_start) {
                return Err(GeometryError::IllegalParameters);
            }
        }
        Ok(self.add_face_unchecked(shapes))
    }

    pub(crate) fn add_face_unchecked(&mut self, shapes: Vec<EdgeShape>) -> FaceId {
        let face_id = self.alloc_face();
        let ids: Vec<EdgeId> = shapes
            .into_iter()
            .map(|shape| self.alloc_edge(Edge::new(shape)))
            .collect();
        let n = ids.len();
        for (i, &id) in ids.iter().enumerate() {
            let next = ids[(i + 1) % n];
            let prev = ids[(i + n - 1) % n];
            let edge = self.edge_mut(id);
            edge.next = next;
            edge.prev = prev;
            edge.face = face_id;
        }
        for &id in &ids {
            let bounding = self.edge(id).shape.bounding_box();
            self.tree.insert(bounding, id);
        }
        self.faces[face_id] = Some(Face {
            first: ids[0],
            last: ids[n - 1],
        });
        self.recalc_arc_lengths(face_id);
        face_id
    }

    /// Deletes a face and all its edges.
    pub fn delete_face(&mut self, face_id: FaceId) -> Result<(), GeometryError> {
        let ids = self.face_edges(face_id)?;
        for id in ids {
            let bounding = self.edge(id).shape.bounding_box();
            self.tree.remove(&bounding, &id);
            self.edges[id] = None;
            self.free_edges.push(id);
        }
        self.faces[face_id] = None;
        self.free_faces.push(face_id);
        Ok(())
    }

    fn alloc_edge(&mut self, edge: Edge) -> EdgeId {
        match self.free_edges.pop() {
            Some(id) => {
                self.edges[id] = Some(edge);
                id
            }
            None => {
                self.edges.push(Some(edge));
                self.edges.len() - 1
            }
        }
    }

    fn alloc_face(&mut self) -> FaceId {
        match self.free_faces.pop() {
            Some(id) => id,
            None => {
                self.faces.push(None);
                self.faces.len() - 1
            }
        }
    }

    /// The edge with the given id.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        self.edges[id].as_ref().unwrap()
    }

    #[inline]
    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        self.edges[id].as_mut().unwrap()
    }

    /// The face with the given id.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        self.faces[id].as_ref().unwrap()
    }

    /// Ids of all live edges.
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|_| id))
            .collect()
    }

    /// Ids of all live faces.
    pub fn face_ids(&self) -> Vec<FaceId> {
        self.faces
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|_| id))
            .collect()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|slot| slot.is_some()).count()
    }

    /// Walks the edge cycle of a face from its first edge.
    ///
    /// A chain that fails to close within the arena size means corrupted
    /// links and reports [`GeometryError::InfiniteLoop`].
    pub fn face_edges(&self, face_id: FaceId) -> Result<Vec<EdgeId>, GeometryError> {
        let first = self.face(face_id).first;
        let mut ids = Vec::new();
        let mut current = first;
        loop {
            ids.push(current);
            current = self.edge(current).next;
            if current == first {
                return Ok(ids);
            }
            if ids.len() > self.edges.len() {
                return Err(GeometryError::InfiniteLoop);
            }
        }
    }

    /// Edge geometries of a face in boundary order.
    pub fn face_shapes(&self, face_id: FaceId) -> Vec<EdgeShape> {
        self.face_edges(face_id)
            .map(|ids| ids.iter().map(|&id| self.edge(id).shape).collect())
            .unwrap_or_default()
    }

    /// Edge ids whose boxes intersect the query box.
    pub fn search(&self, query: &Box2) -> Vec<EdgeId> {
        self.tree.search(query).into_iter().copied().collect()
    }

    /// Bounding box of the whole boundary.
    pub fn bounding_box(&self) -> Box2 {
        self.edge_ids()
            .iter()
            .fold(Box2::empty(), |acc, &id| {
                acc.merge(&self.edge(id).shape.bounding_box())
            })
    }

    /// Signed area of one face: negative for counter-clockwise boundaries.
    pub fn face_signed_area(&self, face_id: FaceId) -> f64 {
        let Ok(ids) = self.face_edges(face_id) else {
            return 0.0;
        };
        let ymin = ids
            .iter()
            .fold(Box2::empty(), |acc, &id| {
                acc.merge(&self.edge(id).shape.bounding_box())
            })
            .ymin;
        ids.iter()
            .map(|&id| self.edge(id).shape.definite_integral(ymin))
            .sum()
    }

    /// Returns `true` if the face is traversed counter-clockwise.
    pub fn face_ccw(&self, face_id: FaceId) -> bool {
        self.face_signed_area(face_id) < 0.0
    }

    /// Total area of the region, holes subtracted.
    pub fn area(&self) -> f64 {
        self.face_ids()
            .iter()
            .map(|&id| self.face_signed_area(id))
            .sum::<f64>()
            .abs()
    }

    /// Returns `true` if the point lies inside the region or on its
    /// boundary.
    pub fn contains(&self, pt: &Vector) -> bool {
        ray_shoot(self, *pt) != Inclusion::Outside
    }

    /// Splits an edge at an interior point, inserting a new edge that
    /// covers the part before the point. Returns the inserted edge id, or
    /// the edge itself when the point coincides with one of its endpoints.
    pub fn add_vertex(&mut self, pt: Vector, edge_id: EdgeId) -> EdgeId {
        let old_shape = self.edge(edge_id).shape;
        let (first, second) = old_shape.split(&pt);
        let (Some(first), Some(second)) = (first, second) else {
            return edge_id;
        };
        let old_box = old_shape.bounding_box();
        let face_id = self.edge(edge_id).face;
        let prev_id = self.edge(edge_id).prev;

        let mut new_edge = Edge::new(first);
        new_edge.prev = prev_id;
        new_edge.next = edge_id;
        new_edge.face = face_id;
        let new_id = self.alloc_edge(new_edge);

        self.edge_mut(prev_id).next = new_id;
        let edge = self.edge_mut(edge_id);
        edge.prev = new_id;
        edge.shape = second;

        let face = self.faces[face_id].as_mut().unwrap();
        if face.first == edge_id {
            face.first = new_id;
        }
        if face.last == prev_id {
            face.last = new_id;
        }

        self.tree.remove(&old_box, &edge_id);
        let new_box = self.edge(new_id).shape.bounding_box();
        self.tree.insert(new_box, new_id);
        let rest_box = self.edge(edge_id).shape.bounding_box();
        self.tree.insert(rest_box, edge_id);

        self.recalc_arc_lengths(face_id);
        new_id
    }

    /// Refreshes the cumulative boundary lengths of a face chain.
    pub(crate) fn recalc_arc_lengths(&mut self, face_id: FaceId) {
        let Ok(ids) = self.face_edges(face_id) else {
            return;
        };
        let mut acc = 0.0;
        for id in ids {
            self.edge_mut(id).arc_length = acc;
            acc += self.edge(id).length();
        }
    }

    /// Drops cached boolean-engine flags from every edge.
    pub(crate) fn clear_flags(&mut self) {
        for slot in self.edges.iter_mut() {
            if let Some(edge) = slot {
                edge.clear_flags();
            }
        }
    }

    /// The polygon with every face traversed in the opposite direction.
    pub fn reverse(&self) -> Polygon {
        let mut reversed = Polygon::new();
        for face_id in self.face_ids() {
            let mut shapes: Vec<EdgeShape> = self
                .face_shapes(face_id)
                .iter()
                .map(|shape| shape.reverse())
                .collect();
            shapes.reverse();
            reversed.add_face_unchecked(shapes);
        }
        reversed
    }

    /// The polygon translated by `v`.
    pub fn translate(&self, v: Vector) -> Polygon {
        let mut moved = Polygon::new();
        for face_id in self.face_ids() {
            let shapes = self
                .face_shapes(face_id)
                .iter()
                .map(|shape| shape.translate(v))
                .collect();
            moved.add_face_unchecked(shapes);
        }
        moved
    }
}

/// Wire representation: faces as ordered shape chains.
#[derive(Serialize, Deserialize)]
struct PolygonRepr {
    faces: Vec<Vec<EdgeShape>>,
}

impl From<Polygon> for PolygonRepr {
    fn from(polygon: Polygon) -> Self {
        Self {
            faces: polygon
                .face_ids()
                .iter()
                .map(|&id| polygon.face_shapes(id))
                .collect(),
        }
    }
}

impl TryFrom<PolygonRepr> for Polygon {
    type Error = GeometryError;

    fn try_from(repr: PolygonRepr) -> Result<Self, Self::Error> {
        let mut polygon = Polygon::new();
        for shapes in repr.faces {
            polygon.add_face(shapes)?;
        }
        Ok(polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Polygon {
        Polygon::from_points(&[
            Vector::new(0.0, 0.0),
            Vector::new(4.0, 0.0),
            Vector::new(4.0, 4.0),
            Vector::new(0.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_points_builds_cycle() {
        let poly = square();
        assert_eq!(poly.face_ids().len(), 1);
        let edges = poly.face_edges(0).unwrap();
        assert_eq!(edges.len(), 4);
        // the chain closes
        let last = *edges.last().unwrap();
        assert!(poly.edge(last).end().equal_to(&poly.edge(edges[0]).start()));
    }

    #[test]
    fn test_from_points_rejects_degenerate() {
        let res = Polygon::from_points(&[Vector::zero(), Vector::new(1.0, 0.0)]);
        assert!(matches!(res, Err(GeometryError::IllegalParameters)));
    }

    #[test]
    fn test_add_face_rejects_broken_chain() {
        let mut poly = Polygon::new();
        let res = poly.add_face(vec![
            EdgeShape::Segment(Segment::from_coords(0.0, 0.0, 1.0, 0.0)),
            EdgeShape::Segment(Segment::from_coords(5.0, 5.0, 0.0, 0.0)),
        ]);
        assert!(matches!(res, Err(GeometryError::IllegalParameters)));
    }

    #[test]
    fn test_area_square() {
        assert_relative_eq!(square().area(), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ccw_orientation() {
        let poly = square();
        assert!(poly.face_ccw(0));
        let reversed = poly.reverse();
        assert!(!reversed.face_ccw(0));
        assert_relative_eq!(reversed.area(), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_area_with_hole() {
        let mut poly = square();
        // clockwise inner square is a hole
        poly.add_face_from_points(&[
            Vector::new(1.0, 1.0),
            Vector::new(1.0, 3.0),
            Vector::new(3.0, 3.0),
            Vector::new(3.0, 1.0),
        ])
        .unwrap();
        assert_relative_eq!(poly.area(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_from_circle_area() {
        let poly = Polygon::from_circle(&Circle::new(Vector::new(2.0, 2.0), 1.0));
        assert_eq!(poly.edge_count(), 1);
        assert_relative_eq!(poly.area(), std::f64::consts::PI, epsilon = 1e-6);
    }

    #[test]
    fn test_from_box() {
        let poly = Polygon::from_box(&Box2::new(0.0, 0.0, 2.0, 3.0));
        assert_relative_eq!(poly.area(), 6.0, epsilon = 1e-9);
        assert!(poly.face_ccw(0));
    }

    #[test]
    fn test_contains() {
        let poly = square();
        assert!(poly.contains(&Vector::new(2.0, 2.0)));
        assert!(poly.contains(&Vector::new(0.0, 2.0))); // boundary
        assert!(!poly.contains(&Vector::new(5.0, 2.0)));
    }

    #[test]
    fn test_add_vertex_splits_edge() {
        let mut poly = square();
        let bottom = poly
            .edge_ids()
            .into_iter()
            .find(|&id| poly.edge(id).shape.contains(&Vector::new(2.0, 0.0)))
            .unwrap();
        let edges_before = poly.edge_count();
        let new_id = poly.add_vertex(Vector::new(2.0, 0.0), bottom);
        assert_eq!(poly.edge_count(), edges_before + 1);
        assert!(poly.edge(new_id).end().equal_to(&Vector::new(2.0, 0.0)));
        assert!(poly.edge(bottom).start().equal_to(&Vector::new(2.0, 0.0)));
        // the cycle still closes and the area is unchanged
        assert_eq!(poly.face_edges(0).unwrap().len(), 5);
        assert_relative_eq!(poly.area(), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_delete_face() {
        let mut poly = square();
        let hole = poly
            .add_face_from_points(&[
                Vector::new(1.0, 1.0),
                Vector::new(1.0, 2.0),
                Vector::new(2.0, 2.0),
                Vector::new(2.0, 1.0),
            ])
            .unwrap();
        poly.delete_face(hole).unwrap();
        assert_eq!(poly.face_ids().len(), 1);
        assert_relative_eq!(poly.area(), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_search_uses_index() {
        let poly = square();
        let hits = poly.search(&Box2::new(-1.0, -1.0, 0.5, 0.5));
        // left and bottom edges
        assert_eq!(hits.len(), 2);
    }
}
