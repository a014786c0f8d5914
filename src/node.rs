/// Sentinel slot index marking an absent node link.
pub(crate) const NIL: u32 = u32::MAX;

/// A tree vertex addressed by its arena slot index.
///
/// Links are slot indices rather than owning pointers; the parent back-link in
/// particular must never own, or the tree would cycle. `NIL` marks an absent
/// child or the root's missing parent.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node<const D: usize> {
    pub point: [f64; D],
    pub axis: u8,
    pub left: u32,
    pub right: u32,
    pub parent: u32,
}

/// Free-list arena backing all nodes of one tree.
///
/// Freed slots are recycled before the slot vector grows, so insert/delete
/// churn and full rebuilds run without allocating once the arena has reached
/// its working size. A freed slot is never reachable from the tree root.
pub(crate) struct NodeArena<const D: usize> {
    slots: Vec<Node<D>>,
    free: Vec<u32>,
}

impl<const D: usize> NodeArena<D> {
    pub fn new() -> Self {
        NodeArena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn node(&self, index: u32) -> &Node<D> {
        &self.slots[index as usize]
    }

    pub fn node_mut(&mut self, index: u32) -> &mut Node<D> {
        &mut self.slots[index as usize]
    }

    /// Takes a slot from the free list, or grows the arena by one slot.
    /// Child links of a recycled slot are reset.
    pub fn allocate(&mut self, point: [f64; D], axis: u8, parent: u32) -> u32 {
        match self.free.pop() {
            Some(index) => {
                let node = &mut self.slots[index as usize];
                node.point = point;
                node.axis = axis;
                node.left = NIL;
                node.right = NIL;
                node.parent = parent;
                index
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Node {
                    point,
                    axis,
                    left: NIL,
                    right: NIL,
                    parent,
                });
                index
            }
        }
    }

    /// Returns a detached node's slot to the free list.
    pub fn free(&mut self, index: u32) {
        self.free.push(index);
    }

    /// Returns a whole subtree to the free list.
    pub fn free_subtree(&mut self, index: u32) {
        if index == NIL {
            return;
        }
        let (left, right) = {
            let node = self.node(index);
            (node.left, node.right)
        };
        self.free(index);
        self.free_subtree(left);
        self.free_subtree(right);
    }

    /// Number of slots ever created, live or pooled.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_reuses_freed_slots() {
        let mut arena = NodeArena::<2>::new();
        let a = arena.allocate([1.0, 2.0], 0, NIL);
        let b = arena.allocate([3.0, 4.0], 1, a);
        assert_eq!(arena.slot_count(), 2);

        arena.free(b);
        let c = arena.allocate([5.0, 6.0], 0, NIL);
        assert_eq!(c, b, "freed slot should be handed out again");
        assert_eq!(arena.slot_count(), 2);
    }

    #[test]
    fn test_recycled_slot_links_are_reset() {
        let mut arena = NodeArena::<2>::new();
        let root = arena.allocate([0.0, 0.0], 0, NIL);
        let child = arena.allocate([1.0, 1.0], 1, root);
        arena.node_mut(root).left = child;

        arena.free_subtree(root);
        let reused = arena.allocate([9.0, 9.0], 0, NIL);
        let node = arena.node(reused);
        assert_eq!(node.left, NIL);
        assert_eq!(node.right, NIL);
        assert_eq!(node.parent, NIL);
    }

    #[test]
    fn test_free_subtree_returns_every_slot() {
        let mut arena = NodeArena::<2>::new();
        let root = arena.allocate([0.0, 0.0], 0, NIL);
        let left = arena.allocate([-1.0, 0.0], 1, root);
        let right = arena.allocate([1.0, 0.0], 1, root);
        arena.node_mut(root).left = left;
        arena.node_mut(root).right = right;

        arena.free_subtree(root);
        assert_eq!(arena.free.len(), 3);
    }
}
