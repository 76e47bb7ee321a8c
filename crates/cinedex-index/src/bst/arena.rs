//! Slot arena for tree nodes.

use crate::bst::node::Node;

/// Stable identifier of a node slot in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Slot storage for tree nodes.
///
/// Node ids map directly to slot indices. Released slots go on a free
/// list and are reused by later allocations, so a live id stays valid
/// exactly until its node is released.
pub(crate) struct NodeArena {
    /// Slots indexed by NodeId (None = released).
    slots: Vec<Option<Node>>,
    /// Released slot ids available for reuse.
    free: Vec<NodeId>,
}

impl NodeArena {
    /// Creates an empty arena.
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Stores a node, reusing a released slot when one is available.
    #[inline]
    pub(crate) fn allocate(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = Some(node);
            id
        } else {
            let id = NodeId(self.slots.len() as u32);
            self.slots.push(Some(node));
            id
        }
    }

    /// Empties a slot and returns the node it held.
    ///
    /// Panics if the slot is already empty; that can only happen through
    /// a stale id, which the index never hands out.
    #[inline]
    pub(crate) fn release(&mut self, id: NodeId) -> Node {
        let node = self.slots[id.index()]
            .take()
            .expect("released an empty arena slot");
        self.free.push(id);
        node
    }

    /// Gets a node by id (read-only).
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(|slot| slot.as_ref())
    }

    /// Gets a mutable node by id.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index())
            .and_then(|slot| slot.as_mut())
    }

    /// Number of occupied slots.
    pub(crate) fn live_nodes(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Total slots ever allocated, occupied or reusable.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
