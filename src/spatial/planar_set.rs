//! Searchable container of shapes backed by the interval tree.

use crate::primitives::{Box2, Shape, Vector};
use crate::spatial::IntervalTree;
use crate::tolerance::get_tolerance;

/// A set of shapes indexed by their bounding boxes.
///
/// Shapes are stored in a slab and addressed by the id returned from
/// [`PlanarSet::add`]; freed ids are recycled. Box queries and point
/// hit-tests go through the interval tree instead of a linear scan.
#[derive(Debug, Clone, Default)]
pub struct PlanarSet {
    shapes: Vec<Option<Shape>>,
    free: Vec<usize>,
    tree: IntervalTree<usize>,
    len: usize,
}

impl PlanarSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a shape and returns its id.
    pub fn add(&mut self, shape: Shape) -> usize {
        let bounding = shape.bounding_box();
        let id = match self.free.pop() {
            Some(id) => {
                self.shapes[id] = Some(shape);
                id
            }
            None => {
                self.shapes.push(Some(shape));
                self.shapes.len() - 1
            }
        };
        self.tree.insert(bounding, id);
        self.len += 1;
        id
    }

    /// Removes a shape by id, returning it if it was present.
    pub fn remove(&mut self, id: usize) -> Option<Shape> {
        let shape = self.shapes.get_mut(id)?.take()?;
        self.tree.remove(&shape.bounding_box(), &id);
        self.free.push(id);
        self.len -= 1;
        Some(shape)
    }

    /// Returns the shape with the given id.
    #[inline]
    pub fn get(&self, id: usize) -> Option<&Shape> {
        self.shapes.get(id)?.as_ref()
    }

    /// Removes every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.free.clear();
        self.tree.clear();
        self.len = 0;
    }

    /// Returns every shape whose bounding box intersects the query box.
    pub fn search(&self, query: &Box2) -> Vec<&Shape> {
        self.tree
            .search(query)
            .into_iter()
            .filter_map(|&id| self.get(id))
            .collect()
    }

    /// Returns every shape the point lies on or inside.
    ///
    /// Candidates come from a tolerance-padded box query around the point,
    /// then each candidate is tested exactly.
    pub fn hit(&self, pt: &Vector) -> Vec<&Shape> {
        let tol = get_tolerance();
        let query = Box2::new(pt.x - tol, pt.y - tol, pt.x + tol, pt.y + tol);
        self.search(&query)
            .into_iter()
            .filter(|shape| shape.contains_point(pt))
            .collect()
    }

    /// Visits shapes guided by `bound`, a lower bound on the score a shape
    /// with the given bounding box can achieve, pruning subtrees of the
    /// index whose merged box cannot beat the best score `visit` has
    /// reported so far.
    pub fn descend_nearest(&self, bound: impl Fn(&Box2) -> f64, mut visit: impl FnMut(&Shape) -> f64) {
        self.tree.descend_nearest(&bound, &mut |&id| match self.get(id) {
            Some(shape) => visit(shape),
            None => f64::INFINITY,
        });
    }

    /// Iterates over `(id, shape)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Shape)> {
        self.shapes
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|shape| (id, shape)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Circle, Segment};

    #[test]
    fn test_add_remove() {
        let mut set = PlanarSet::new();
        let id = set.add(Shape::Segment(Segment::from_coords(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(set.len(), 1);
        assert!(set.get(id).is_some());
        assert!(set.remove(id).is_some());
        assert!(set.remove(id).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_search() {
        let mut set = PlanarSet::new();
        set.add(Shape::Segment(Segment::from_coords(0.0, 0.0, 1.0, 1.0)));
        set.add(Shape::Circle(Circle::new(Vector::new(10.0, 10.0), 1.0)));

        let found = set.search(&Box2::new(-1.0, -1.0, 2.0, 2.0));
        assert_eq!(found.len(), 1);
        assert!(matches!(found[0], Shape::Segment(_)));

        let found = set.search(&Box2::new(-1.0, -1.0, 20.0, 20.0));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_hit() {
        let mut set = PlanarSet::new();
        set.add(Shape::Circle(Circle::new(Vector::zero(), 5.0)));
        set.add(Shape::Segment(Segment::from_coords(-10.0, 0.0, 10.0, 0.0)));

        // on the segment and inside the circle
        assert_eq!(set.hit(&Vector::new(1.0, 0.0)).len(), 2);
        // inside the circle only
        assert_eq!(set.hit(&Vector::new(1.0, 1.0)).len(), 1);
        // outside everything
        assert!(set.hit(&Vector::new(100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_id_reuse() {
        let mut set = PlanarSet::new();
        let id = set.add(Shape::Segment(Segment::from_coords(0.0, 0.0, 1.0, 0.0)));
        set.remove(id);
        let id2 = set.add(Shape::Segment(Segment::from_coords(2.0, 0.0, 3.0, 0.0)));
        assert_eq!(id, id2);
        assert_eq!(set.len(), 1);
    }
}
