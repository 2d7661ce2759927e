//! Interval tree over bounding boxes, the core of the spatial index.

use crate::primitives::Box2;

#[derive(Debug, Clone)]
struct Node<T> {
    key: Box2,
    value: T,
    left: Option<usize>,
    right: Option<usize>,
    /// Merged box of the whole subtree rooted here, used to prune searches.
    max: Box2,
}

/// A binary search tree of `(Box2, T)` entries ordered by
/// [`Box2::less_than`], with each node augmented by the merged box of its
/// subtree.
///
/// The augmentation lets [`IntervalTree::search`] skip every subtree whose
/// merged box misses the query, and drives the pruning in
/// [`IntervalTree::descend_nearest`]. Nodes live in an arena and freed
/// slots are recycled. The tree is not rebalanced; the planar set workloads it backs
/// insert in effectively random key order.
#[derive(Debug, Clone, Default)]
pub struct IntervalTree<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
}

impl<T> IntervalTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Number of entries in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    #[inline]
    fn node(&self, idx: usize) -> &Node<T> {
        self.nodes[idx].as_ref().unwrap()
    }

    #[inline]
    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        self.nodes[idx].as_mut().unwrap()
    }

    /// Inserts an entry. Entries with equal keys are kept; ties go to the
    /// right subtree.
    pub fn insert(&mut self, key: Box2, value: T) {
        let new = self.alloc(Node {
            key,
            value,
            left: None,
            right: None,
            max: key,
        });
        self.len += 1;

        let Some(mut cur) = self.root else {
            self.root = Some(new);
            return;
        };
        loop {
            let merged = self.node(cur).max.merge(&key);
            self.node_mut(cur).max = merged;
            if key.less_than(&self.node(cur).key) {
                match self.node(cur).left {
                    Some(left) => cur = left,
                    None => {
                        self.node_mut(cur).left = Some(new);
                        return;
                    }
                }
            } else {
                match self.node(cur).right {
                    Some(right) => cur = right,
                    None => {
                        self.node_mut(cur).right = Some(new);
                        return;
                    }
                }
            }
        }
    }

    /// Collects every value whose key box intersects the query box.
    pub fn search(&self, query: &Box2) -> Vec<&T> {
        let mut found = Vec::new();
        self.search_in(self.root, query, &mut found);
        found
    }

    fn search_in<'a>(&'a self, idx: Option<usize>, query: &Box2, found: &mut Vec<&'a T>) {
        let Some(idx) = idx else { return };
        let node = self.node(idx);
        if node.max.not_intersects(query) {
            return;
        }
        self.search_in(node.left, query, found);
        if node.key.intersects(query) {
            found.push(&node.value);
        }
        self.search_in(node.right, query, found);
    }

    /// Visits entries guided by `bound`, a lower bound on the score an
    /// entry whose key lies in the given box can achieve.
    ///
    /// `visit` returns the score achieved for an entry. Subtrees whose
    /// merged-box bound cannot beat the best score reported so far are
    /// skipped, and of two live subtrees the one with the smaller bound is
    /// entered first so the best score tightens early.
    pub fn descend_nearest(&self, bound: &impl Fn(&Box2) -> f64, visit: &mut impl FnMut(&T) -> f64) {
        let mut best = f64::INFINITY;
        self.descend_in(self.root, bound, visit, &mut best);
    }

    fn descend_in(
        &self,
        idx: Option<usize>,
        bound: &impl Fn(&Box2) -> f64,
        visit: &mut impl FnMut(&T) -> f64,
        best: &mut f64,
    ) {
        let Some(idx) = idx else { return };
        let node = self.node(idx);
        if bound(&node.max) >= *best {
            return;
        }
        if bound(&node.key) < *best {
            let score = visit(&node.value);
            if score < *best {
                *best = score;
            }
        }
        let left_bound = node.left.map(|left| bound(&self.node(left).max));
        let right_bound = node.right.map(|right| bound(&self.node(right).max));
        let (first, second) = match (left_bound, right_bound) {
            (Some(lb), Some(rb)) if rb < lb => (node.right, node.left),
            _ => (node.left, node.right),
        };
        self.descend_in(first, bound, visit, best);
        self.descend_in(second, bound, visit, best);
    }

    /// Visits every entry in key order.
    pub fn for_each(&self, mut f: impl FnMut(&Box2, &T)) {
        self.for_each_in(self.root, &mut f);
    }

    fn for_each_in(&self, idx: Option<usize>, f: &mut impl FnMut(&Box2, &T)) {
        let Some(idx) = idx else { return };
        let node = self.node(idx);
        self.for_each_in(node.left, f);
        f(&node.key, &node.value);
        self.for_each_in(node.right, f);
    }
}

impl<T: PartialEq> IntervalTree<T> {
    /// Removes the entry with exactly this key and value. Returns `false`
    /// if no such entry exists.
    pub fn remove(&mut self, key: &Box2, value: &T) -> bool {
        let Some(target) = self.find(key, value) else {
            return false;
        };
        self.remove_node(target);
        self.len -= 1;
        self.recompute_max(self.root);
        true
    }

    fn find(&self, key: &Box2, value: &T) -> Option<usize> {
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = self.node(idx);
            if key.less_than(&node.key) {
                cur = node.left;
            } else if node.key.less_than(key) {
                cur = node.right;
            } else if node.value == *value {
                return Some(idx);
            } else {
                // duplicate keys chain to the right
                cur = node.right;
            }
        }
        None
    }

    fn remove_node(&mut self, target: usize) {
        let (left, right) = {
            let node = self.node(target);
            (node.left, node.right)
        };
        match (left, right) {
            (None, child) | (child, None) => self.replace_child(target, child),
            (Some(_), Some(right)) => {
                // move the in-order successor into the target slot
                let mut succ_parent = target;
                let mut succ = right;
                while let Some(left) = self.node(succ).left {
                    succ_parent = succ;
                    succ = left;
                }
                let succ_right = self.node(succ).right;
                if succ_parent == target {
                    self.node_mut(succ_parent).right = succ_right;
                } else {
                    self.node_mut(succ_parent).left = succ_right;
                }
                let succ_node = self.nodes[succ].take().unwrap();
                self.free.push(succ);
                let node = self.node_mut(target);
                node.key = succ_node.key;
                node.value = succ_node.value;
            }
        }
    }

    fn replace_child(&mut self, target: usize, child: Option<usize>) {
        if self.root == Some(target) {
            self.root = child;
        } else {
            // the tree is consistent, so target has a parent
            let parent = self.parent_of(target).unwrap();
            let parent_node = self.node_mut(parent);
            if parent_node.left == Some(target) {
                parent_node.left = child;
            } else {
                parent_node.right = child;
            }
        }
        self.nodes[target] = None;
        self.free.push(target);
    }

    fn parent_of(&self, target: usize) -> Option<usize> {
        let key = self.node(target).key;
        let mut parent = None;
        let mut cur = self.root;
        while let Some(idx) = cur {
            if idx == target {
                return parent;
            }
            let node = self.node(idx);
            parent = Some(idx);
            cur = if key.less_than(&node.key) {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    fn recompute_max(&mut self, idx: Option<usize>) -> Box2 {
        let Some(idx) = idx else {
            return Box2::empty();
        };
        let (left, right, key) = {
            let node = self.node(idx);
            (node.left, node.right, node.key)
        };
        let max = key
            .merge(&self.recompute_max(left))
            .merge(&self.recompute_max(right));
        self.node_mut(idx).max = max;
        max
    }
}
