use crate::bounds::BoundingBox;
use crate::candidates::CandidateSet;
use crate::metric::{Chebyshev, Metric};
use crate::node::{NodeArena, NIL};
use crate::representation::NodeRepr;

/// A mutable k-d tree over `D`-dimensional points.
///
/// The tree splits on axis `depth mod D`: at a node splitting on axis `a`,
/// every point in the left subtree has axis-`a` coordinate at most the node's,
/// and every point in the right subtree at least the node's. Insertion sends
/// strictly smaller coordinates left and everything else right.
///
/// Insertion does not rebalance, so the tree degrades toward the bias of the
/// insertion order; call [`balance`](KdTree::balance) when
/// [`balance_factor`](KdTree::balance_factor) reports degradation. Nodes
/// removed by deletion or rebuilds are recycled through an internal arena.
///
/// The metric used by [`nearest`](KdTree::nearest) defaults to
/// [`Chebyshev`] and can be swapped for any [`Metric`] implementation via
/// [`with_metric`](KdTree::with_metric).
pub struct KdTree<const D: usize, M: Metric<D> = Chebyshev> {
    arena: NodeArena<D>,
    root: u32,
    len: usize,
    metric: M,
    rebuild_buffer: Vec<[f64; D]>,
}

impl<const D: usize> KdTree<D> {
    /// Creates an empty tree with the Chebyshev metric.
    pub fn new() -> KdTree<D> {
        KdTree::with_metric(Chebyshev)
    }
}

impl<const D: usize> Default for KdTree<D> {
    fn default() -> Self {
        KdTree::new()
    }
}

impl<const D: usize, M: Metric<D>> KdTree<D, M> {
    /// Creates an empty tree with a caller-supplied metric.
    ///
    /// # Panics
    ///
    /// Panics when `D` is zero.
    pub fn with_metric(metric: M) -> KdTree<D, M> {
        assert!(D > 0, "dimension must be positive");
        KdTree {
            arena: NodeArena::new(),
            root: NIL,
            len: 0,
            metric,
            rebuild_buffer: Vec::new(),
        }
    }

    /// Number of points in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Inserts a point, descending to a free child slot.
    ///
    /// A point with any non-finite coordinate is degenerate and ignored.
    /// Cost is O(height); no rebalancing happens here.
    pub fn insert(&mut self, point: [f64; D]) {
        if !point.iter().all(|coordinate| coordinate.is_finite()) {
            return;
        }

        if self.root == NIL {
            self.root = self.arena.allocate(point, 0, NIL);
            self.len = 1;
            return;
        }

        let mut current = self.root;
        loop {
            let node = self.arena.node(current);
            let axis = node.axis as usize;
            let child = if point[axis] < node.point[axis] {
                node.left
            } else {
                node.right
            };
            if child == NIL {
                break;
            }
            current = child;
        }

        let node = self.arena.node(current);
        let axis = node.axis as usize;
        let goes_left = point[axis] < node.point[axis];
        let child_axis = ((axis + 1) % D) as u8;
        let leaf = self.arena.allocate(point, child_axis, current);

        let node = self.arena.node_mut(current);
        if goes_left {
            node.left = leaf;
        } else {
            node.right = leaf;
        }
        self.len += 1;
    }

    /// Removes the point with exactly these coordinates, if present.
    ///
    /// The point is located by the same axis-comparison descent insertion
    /// uses; removing a point that is not in the tree is a no-op.
    pub fn remove(&mut self, point: &[f64; D]) {
        let target = self.locate(point);
        if target == NIL {
            return;
        }
        self.remove_node(target);
        self.len -= 1;
    }

    fn locate(&self, point: &[f64; D]) -> u32 {
        let mut current = self.root;
        while current != NIL {
            let node = self.arena.node(current);
            if node.point == *point {
                return current;
            }
            let axis = node.axis as usize;
            current = if point[axis] < node.point[axis] {
                node.left
            } else {
                node.right
            };
        }
        NIL
    }

    fn remove_node(&mut self, target: u32) {
        let (left, right, parent, axis) = {
            let node = self.arena.node(target);
            (node.left, node.right, node.parent, node.axis as usize)
        };

        if left == NIL && right == NIL {
            if parent == NIL {
                self.arena.free(target);
                self.root = NIL;
                return;
            }
            let parent_node = self.arena.node_mut(parent);
            if parent_node.left == target {
                parent_node.left = NIL;
            } else {
                parent_node.right = NIL;
            }
            self.arena.free(target);
            return;
        }

        // Pull up the extremum along this node's own axis, then delete the
        // donor node, which now holds a duplicate point. Axis labels stay put:
        // only points move between nodes.
        let donor = if left != NIL {
            self.find_max(left, axis)
        } else {
            self.find_min(right, axis)
        };
        let donor_point = self.arena.node(donor).point;
        self.remove_node(donor);
        self.arena.node_mut(target).point = donor_point;
    }

    /// Node holding the maximum coordinate along `axis` within a subtree.
    ///
    /// A node splitting on `axis` itself cannot hide the maximum in its left
    /// half, so only the right child is searched there; a node splitting on
    /// any other axis gives no ordering along `axis` and both children are
    /// searched.
    fn find_max(&self, index: u32, axis: usize) -> u32 {
        let node = self.arena.node(index);

        if node.axis as usize == axis {
            if node.right != NIL {
                return self.find_max(node.right, axis);
            }
            return index;
        }

        let mut best = index;
        if node.left != NIL {
            let left = self.find_max(node.left, axis);
            if self.arena.node(left).point[axis] > self.arena.node(best).point[axis] {
                best = left;
            }
        }
        if node.right != NIL {
            let right = self.find_max(node.right, axis);
            if self.arena.node(right).point[axis] > self.arena.node(best).point[axis] {
                best = right;
            }
        }
        best
    }

    /// Mirror of [`find_max`](KdTree::find_max): minimum along `axis`, with
    /// one-sided descent into the left child on an axis match.
    fn find_min(&self, index: u32, axis: usize) -> u32 {
        let node = self.arena.node(index);

        if node.axis as usize == axis {
            if node.left != NIL {
                return self.find_min(node.left, axis);
            }
            return index;
        }

        let mut best = index;
        if node.left != NIL {
            let left = self.find_min(node.left, axis);
            if self.arena.node(left).point[axis] < self.arena.node(best).point[axis] {
                best = left;
            }
        }
        if node.right != NIL {
            let right = self.find_min(node.right, axis);
            if self.arena.node(right).point[axis] < self.arena.node(best).point[axis] {
                best = right;
            }
        }
        best
    }

    /// The up-to-`count` points closest to `point`, closest first.
    ///
    /// Points tied at the cut-off distance are all returned, so the result may
    /// hold more than `count` points; it never holds more than the tree does.
    /// An empty tree or a `count` of zero yields an empty result.
    pub fn nearest(&self, point: &[f64; D], count: usize) -> Vec<[f64; D]> {
        if count == 0 || self.root == NIL {
            return Vec::new();
        }
        let mut set = CandidateSet::new(count);
        self.nearest_search(self.root, point, &mut set);
        set.into_sorted()
            .into_iter()
            .map(|candidate| self.arena.node(candidate.index).point)
            .collect()
    }

    fn nearest_search(&self, index: u32, query: &[f64; D], set: &mut CandidateSet) {
        let node = self.arena.node(index);
        let axis = node.axis as usize;
        let own_distance = self.metric.distance(query, &node.point);

        // Descend toward the query's side of the split first.
        let (near, far) = if query[axis] < node.point[axis] {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        if near != NIL {
            self.nearest_search(near, query, set);
        }

        if set.admits(own_distance) {
            set.admit(own_distance, index);
        }

        // The far half can only improve on the current worst if the splitting
        // plane itself is closer than that worst.
        if far != NIL {
            let bound = self.metric.plane_bound(query, &node.point, axis);
            if set.admits(bound) {
                self.nearest_search(far, query, set);
            }
        }
    }

    /// Appends every point inside `bounds` to `out`.
    pub fn points_in_range(&self, bounds: &BoundingBox<D>, out: &mut Vec<[f64; D]>) {
        if self.root == NIL {
            return;
        }
        self.range_search(self.root, bounds, out);
    }

    /// [`points_in_range`](KdTree::points_in_range) with the interleaved limit
    /// layout `[min0, max0, min1, max1, ...]`.
    ///
    /// # Panics
    ///
    /// Panics unless `limits` holds exactly `2 * D` values.
    pub fn points_in_limits(&self, limits: &[f64], out: &mut Vec<[f64; D]>) {
        let bounds = BoundingBox::from_limits(limits);
        self.points_in_range(&bounds, out);
    }

    fn range_search(&self, index: u32, bounds: &BoundingBox<D>, out: &mut Vec<[f64; D]>) {
        let node = self.arena.node(index);
        let axis = node.axis as usize;
        let value = node.point[axis];

        // The right half holds coordinates >= value: skip it once value is
        // past the axis maximum. Mirror case for the left half.
        if value <= bounds.max[axis] && node.right != NIL {
            self.range_search(node.right, bounds, out);
        }
        if value >= bounds.min[axis] && node.left != NIL {
            self.range_search(node.left, bounds, out);
        }

        if bounds.contains(&node.point) {
            out.push(node.point);
        }
    }

    /// Rebuilds the tree to minimal height.
    ///
    /// Flattens the tree into a reused buffer, returns every node to the
    /// arena, and rebuilds by median split: the rebuilt height is
    /// `ceil(log2(n + 1))`. No-op on an empty tree.
    pub fn balance(&mut self) {
        if self.root == NIL {
            return;
        }
        let mut points = std::mem::take(&mut self.rebuild_buffer);
        points.clear();
        self.collect_points(self.root, &mut points);
        self.arena.free_subtree(self.root);
        self.root = self.build_range(&mut points, 0, NIL);
        self.rebuild_buffer = points;
    }

    fn build_range(&mut self, points: &mut [[f64; D]], depth: usize, parent: u32) -> u32 {
        if points.is_empty() {
            return NIL;
        }
        let axis = (depth % D) as u8;
        if points.len() == 1 {
            return self.arena.allocate(points[0], axis, parent);
        }

        let median = points.len() / 2;
        points.select_nth_unstable_by(median, |a, b| {
            a[axis as usize]
                .partial_cmp(&b[axis as usize])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let index = self.arena.allocate(points[median], axis, parent);
        let (lower, rest) = points.split_at_mut(median);
        let upper = &mut rest[1..];
        let left = self.build_range(lower, depth + 1, index);
        let right = self.build_range(upper, depth + 1, index);
        let node = self.arena.node_mut(index);
        node.left = left;
        node.right = right;
        index
    }

    /// Height over log2 of the point count; 1.0 is a perfectly balanced tree.
    ///
    /// Trees of zero or one point report the 1.0 sentinel instead of dividing
    /// by log2(0) or log2(1).
    pub fn balance_factor(&self) -> f64 {
        if self.len <= 1 {
            return 1.0;
        }
        self.height() as f64 / (self.len as f64).log2()
    }

    /// Height of the tree; 0 when empty, 1 for a lone root.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn height_of(&self, index: u32) -> usize {
        if index == NIL {
            return 0;
        }
        let node = self.arena.node(index);
        1 + self.height_of(node.left).max(self.height_of(node.right))
    }

    /// Every point in the tree, in traversal order.
    pub fn points(&self) -> Vec<[f64; D]> {
        let mut out = Vec::with_capacity(self.len);
        if self.root != NIL {
            self.collect_points(self.root, &mut out);
        }
        out
    }

    fn collect_points(&self, index: u32, out: &mut Vec<[f64; D]>) {
        let node = self.arena.node(index);
        out.push(node.point);
        if node.left != NIL {
            self.collect_points(node.left, out);
        }
        if node.right != NIL {
            self.collect_points(node.right, out);
        }
    }

    /// Empties the tree, returning every node to the arena.
    pub fn clear(&mut self) {
        if self.root != NIL {
            self.arena.free_subtree(self.root);
            self.root = NIL;
        }
        self.len = 0;
    }

    /// Nested view of the tree for display layers; `None` when empty.
    pub fn to_representation(&self) -> Option<NodeRepr<D>> {
        if self.root == NIL {
            return None;
        }
        Some(self.node_repr(self.root))
    }

    fn node_repr(&self, index: u32) -> NodeRepr<D> {
        let node = self.arena.node(index);
        NodeRepr {
            point: node.point,
            axis: node.axis,
            left: (node.left != NIL).then(|| Box::new(self.node_repr(node.left))),
            right: (node.right != NIL).then(|| Box::new(self.node_repr(node.right))),
        }
    }
}
