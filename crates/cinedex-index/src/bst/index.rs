//! Ordered, mutable index over catalog records keyed by title.

use crate::bst::arena::{NodeArena, NodeId};
use crate::bst::node::Node;
use cinedex_common::{CinedexError, Record, Result};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Binary search tree index over a movie catalog.
///
/// Titles order the tree; no rebalancing is performed, so the shape
/// depends entirely on insertion order. The handle stays valid across
/// every mutation, including removal of the record currently held by
/// the root node.
pub struct CatalogIndex {
    /// Slot storage for all nodes.
    arena: NodeArena,
    /// Root node id (None when the index is empty).
    root: Option<NodeId>,
}

/// Basic shape statistics for an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of records in the index.
    pub len: usize,
    /// Tree height (-1 when empty, 0 for a single record).
    pub height: i32,
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "size = {}; height = {}", self.len, self.height)
    }
}

impl CatalogIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
        }
    }

    /// Bulk-builds an index from an ordered record sequence.
    ///
    /// The root is seeded from the last element and the remainder is
    /// inserted in source order. Fails with
    /// [`CinedexError::EmptyCatalog`] on an empty sequence.
    pub fn from_records(mut records: Vec<Record>) -> Result<Self> {
        let seed = records.pop().ok_or(CinedexError::EmptyCatalog)?;
        let mut index = Self::new();
        index.root = Some(index.arena.allocate(Node::leaf(seed)));
        for record in records {
            index.insert(record);
        }
        Ok(index)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns the record with the given title, if present.
    pub fn search(&self, title: &str) -> Option<&Record> {
        self.find(title).map(|id| &self.node(id).record)
    }

    /// Returns the record with the smallest title.
    ///
    /// Fails with [`CinedexError::EmptyIndex`] when the index is empty.
    pub fn min(&self) -> Result<&Record> {
        let root = self.root.ok_or(CinedexError::EmptyIndex)?;
        Ok(&self.node(self.subtree_min(root)).record)
    }

    /// Returns the record with the largest title.
    ///
    /// Fails with [`CinedexError::EmptyIndex`] when the index is empty.
    pub fn max(&self) -> Result<&Record> {
        let root = self.root.ok_or(CinedexError::EmptyIndex)?;
        Ok(&self.node(self.subtree_max(root)).record)
    }

    /// Returns the record currently held by the root node.
    pub fn root_record(&self) -> Option<&Record> {
        self.root.map(|id| &self.node(id).record)
    }

    /// Descends from the root to the node holding `title`.
    fn find(&self, title: &str) -> Option<NodeId> {
        let mut current = self.root?;
        loop {
            let node = self.node(current);
            current = match title.cmp(node.title()) {
                Ordering::Equal => return Some(current),
                Ordering::Less => node.left?,
                Ordering::Greater => node.right?,
            };
        }
    }

    /// Descends all-left from `start` to the minimum of its subtree.
    fn subtree_min(&self, start: NodeId) -> NodeId {
        let mut current = start;
        while let Some(left) = self.node(current).left {
            current = left;
        }
        current
    }

    /// Descends all-right from `start` to the maximum of its subtree.
    fn subtree_max(&self, start: NodeId) -> NodeId {
        let mut current = start;
        while let Some(right) = self.node(current).right {
            current = right;
        }
        current
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Inserts a record, keeping the tree ordered by title.
    ///
    /// A record whose title is already present is dropped without any
    /// effect: the existing record is kept and nothing is reported.
    pub fn insert(&mut self, record: Record) {
        let Some(mut current) = self.root else {
            self.root = Some(self.arena.allocate(Node::leaf(record)));
            return;
        };

        loop {
            let node = self.node(current);
            let (go_left, next) = match record.title.cmp(&node.record.title) {
                Ordering::Less => (true, node.left),
                Ordering::Greater => (false, node.right),
                // Same title already present: keep the existing record.
                Ordering::Equal => return,
            };

            match next {
                Some(child) => current = child,
                None => {
                    let mut leaf = Node::leaf(record);
                    leaf.parent = Some(current);
                    let id = self.arena.allocate(leaf);
                    let node = self.node_mut(current);
                    if go_left {
                        node.left = Some(id);
                    } else {
                        node.right = Some(id);
                    }
                    return;
                }
            }
        }
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes and returns the record with the given title.
    ///
    /// Returns None when the title is absent; the tree is not touched.
    pub fn remove(&mut self, title: &str) -> Option<Record> {
        let target = self.find(title)?;
        Some(self.remove_node(target))
    }

    /// Removes the node at `target`, returning the record it held when
    /// the removal started.
    ///
    /// Full nodes and parentless semileafs are emptied by copying a
    /// descendant's record up and then removing the descendant's old
    /// position; the copied-from position is a leaf or a spliceable
    /// semileaf, so the loop finishes within two hops. Copying instead
    /// of relinking keeps the root id stable for callers.
    fn remove_node(&mut self, target: NodeId) -> Record {
        let mut current = target;
        let mut removed = None;

        loop {
            let node = self.node(current);
            let (left, right, parent) = (node.left, node.right, node.parent);

            match (left, right, parent) {
                // Leaf: unlink from the parent slot and release.
                (None, None, parent) => {
                    let record = self.unlink_leaf(current, parent);
                    return removed.unwrap_or(record);
                }
                // Full node: substitute the in-order predecessor, then
                // remove the predecessor's old position.
                (Some(left), Some(_), _) => {
                    let pred = self.subtree_max(left);
                    current = self.substitute(current, pred, &mut removed);
                }
                // Semileaf with a parent: splice the lone child into
                // this node's slot.
                (_, _, Some(parent)) => {
                    let record = self.splice(current, parent);
                    return removed.unwrap_or(record);
                }
                // Parentless semileaf: pull the extreme descendant of
                // the lone subtree up so the root keeps its id.
                (Some(left), None, None) => {
                    let desc = self.subtree_max(left);
                    current = self.substitute(current, desc, &mut removed);
                }
                (None, Some(right), None) => {
                    let desc = self.subtree_min(right);
                    current = self.substitute(current, desc, &mut removed);
                }
            }
        }
    }

    /// Copies `source`'s record into `dest`, capturing the record that
    /// left the tree on the first copy. Returns `source` as the next
    /// position to remove physically.
    fn substitute(
        &mut self,
        dest: NodeId,
        source: NodeId,
        removed: &mut Option<Record>,
    ) -> NodeId {
        let record = self.node(source).record.clone();
        let displaced = std::mem::replace(&mut self.node_mut(dest).record, record);
        removed.get_or_insert(displaced);
        source
    }

    /// Unlinks a leaf from its parent (or empties the tree for a
    /// parentless leaf) and releases its slot.
    fn unlink_leaf(&mut self, id: NodeId, parent: Option<NodeId>) -> Record {
        match parent {
            Some(parent) => self.clear_child_slot(parent, id),
            None => self.root = None,
        }
        self.arena.release(id).record
    }

    /// Clears whichever of the parent's child slots points at `child`.
    fn clear_child_slot(&mut self, parent: NodeId, child: NodeId) {
        let node = self.node_mut(parent);
        if node.left == Some(child) {
            node.left = None;
        } else {
            debug_assert_eq!(node.right, Some(child), "child not linked to parent");
            node.right = None;
        }
    }

    /// Splices a semileaf's lone child into its former slot under the
    /// parent, rewriting both the parent's child slot and the child's
    /// back-reference, then releases the semileaf.
    fn splice(&mut self, id: NodeId, parent: NodeId) -> Record {
        let child = self
            .node(id)
            .only_child()
            .expect("splice on a non-semileaf");
        self.node_mut(child).parent = Some(parent);

        let parent_node = self.node_mut(parent);
        if parent_node.left == Some(id) {
            parent_node.left = Some(child);
        } else {
            debug_assert_eq!(parent_node.right, Some(id), "node not linked to parent");
            parent_node.right = Some(child);
        }
        self.arena.release(id).record
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Number of records in the index, counted structurally.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Tree height: -1 when empty, 0 for a single record, otherwise
    /// 1 + the larger child height.
    pub fn height(&self) -> i32 {
        let Some(root) = self.root else { return -1 };
        let mut height = 0;
        let mut stack = vec![(root, 0)];
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(id);
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Theoretical lower bound on the height of any tree holding `n`
    /// records: `ceil(log2(n + 1) - 1)`, computed exactly as the
    /// smallest `h` with `2^(h+1) - 1 >= n`. Informational only; no
    /// rebalancing drives the actual shape toward it.
    pub fn minimum_possible_height(n: usize) -> i32 {
        (n + 1).next_power_of_two().trailing_zeros() as i32 - 1
    }

    /// Shape statistics for this index.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            len: self.len(),
            height: self.height(),
        }
    }

    /// In-order iterator over the records (ascending title order).
    pub fn iter(&self) -> InOrderIter<'_> {
        let mut iter = InOrderIter {
            index: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Checks the structural invariants and reports every violation as
    /// a human-readable description. Diagnostic only; an empty result
    /// means the tree is sound.
    ///
    /// Checked per node: the strict ordering window inherited from its
    /// ancestors, the child -> parent back-references, the parent's
    /// mirror (exactly one parent child slot points back), and single
    /// reachability (a repeated id means the child links do not form a
    /// tree).
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let Some(root) = self.root else {
            return violations;
        };

        if let Some(parent) = self.node(root).parent {
            violations.push(format!("root {root} has a parent back-reference to {parent}"));
        }

        let mut visited = std::collections::HashSet::new();
        visited.insert(root);
        let mut stack: Vec<(NodeId, Option<&str>, Option<&str>)> = vec![(root, None, None)];

        while let Some((id, lower, upper)) = stack.pop() {
            let node = self.node(id);
            let title = node.title();

            if let Some(lower) = lower {
                if title <= lower {
                    violations.push(format!(
                        "ordering violated at {id}: {title:?} is not above {lower:?}"
                    ));
                }
            }
            if let Some(upper) = upper {
                if title >= upper {
                    violations.push(format!(
                        "ordering violated at {id}: {title:?} is not below {upper:?}"
                    ));
                }
            }

            if let Some(parent) = node.parent {
                let parent_node = self.node(parent);
                let links = (parent_node.left == Some(id)) as u8
                    + (parent_node.right == Some(id)) as u8;
                if links != 1 {
                    violations.push(format!(
                        "parent mirror violated: {parent} references {id} via {links} child slots"
                    ));
                }
            }

            for (side, child, lower, upper) in [
                ("left", node.left, lower, Some(title)),
                ("right", node.right, Some(title), upper),
            ] {
                let Some(child) = child else { continue };
                if !visited.insert(child) {
                    violations.push(format!(
                        "{child} is reachable more than once (via {side} child of {id})"
                    ));
                    continue;
                }
                let back = self.node(child).parent;
                if back != Some(id) {
                    violations.push(match back {
                        Some(back) => format!(
                            "{side} child {child} of {id} points back to {back} instead"
                        ),
                        None => format!("{side} child {child} of {id} has no back-reference"),
                    });
                }
                stack.push((child, lower, upper));
            }
        }

        violations
    }

    /// Renders one line per node: title, subtree height, child titles,
    /// and the parent's title, with `*` for absent links.
    pub fn dump_structure(&self) -> String {
        let Some(root) = self.root else {
            return String::from("(empty)");
        };

        let heights = self.subtree_heights();
        let mut out = String::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let node = self.node(id);
            out.push_str(node.title());
            out.push_str(&format!("({})[", heights[&id]));
            match node.left {
                Some(left) => out.push_str(self.node(left).title()),
                None => out.push('*'),
            }
            out.push(' ');
            match node.right {
                Some(right) => out.push_str(self.node(right).title()),
                None => out.push('*'),
            }
            out.push_str("] -- ");
            match node.parent {
                Some(parent) => out.push_str(self.node(parent).title()),
                None => out.push('*'),
            }
            out.push('\n');

            // Pre-order, left subtree first.
            if let Some(right) = node.right {
                stack.push(right);
            }
            if let Some(left) = node.left {
                stack.push(left);
            }
        }
        out
    }

    /// Post-order sweep computing the height of every subtree.
    fn subtree_heights(&self) -> HashMap<NodeId, i32> {
        let mut heights = HashMap::new();
        let Some(root) = self.root else {
            return heights;
        };

        let mut stack = vec![(root, false)];
        while let Some((id, children_done)) = stack.pop() {
            let node = self.node(id);
            if children_done {
                let left = node.left.map_or(-1, |left| heights[&left]);
                let right = node.right.map_or(-1, |right| heights[&right]);
                heights.insert(id, 1 + left.max(right));
            } else {
                stack.push((id, true));
                if let Some(left) = node.left {
                    stack.push((left, false));
                }
                if let Some(right) = node.right {
                    stack.push((right, false));
                }
            }
        }
        heights
    }

    // =========================================================================
    // Arena access
    // =========================================================================

    #[inline]
    fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id).expect("stale node id")
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.arena.get_mut(id).expect("stale node id")
    }

    #[cfg(test)]
    pub(crate) fn arena_slot_count(&self) -> usize {
        self.arena.slot_count()
    }

    #[cfg(test)]
    pub(crate) fn arena_live_nodes(&self) -> usize {
        self.arena.live_nodes()
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CatalogIndex {
    /// In-order rendering of the held titles.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for record in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", record.title)?;
            first = false;
        }
        Ok(())
    }
}

/// In-order iterator over an index.
///
/// Holds an explicit left-spine stack so iteration never recurses, even
/// over a fully degenerate tree.
pub struct InOrderIter<'a> {
    index: &'a CatalogIndex,
    stack: Vec<NodeId>,
}

impl<'a> InOrderIter<'a> {
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        let index = self.index;
        while let Some(id) = current {
            self.stack.push(id);
            current = index.node(id).left;
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<&'a Record> {
        let id = self.stack.pop()?;
        let node = self.index.node(id);
        self.push_left_spine(node.right);
        Some(&node.record)
    }
}

impl<'a> IntoIterator for &'a CatalogIndex {
    type Item = &'a Record;
    type IntoIter = InOrderIter<'a>;

    fn into_iter(self) -> InOrderIter<'a> {
        self.iter()
    }
}
