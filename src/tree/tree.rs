//! Tree operations: create, destroy, link, walk.

use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};

use super::node::{NodeData, NodeId, NodeKind};

/// The scene graph, backed by a fixed-capacity generational arena.
///
/// Structure is encoded entirely in per-node links: each node stores its
/// parent plus first/last child and prev/next sibling ids, so attach and
/// detach are O(1) and child order is insertion order. Insertion order is
/// paint order, back to front — later siblings paint over earlier ones.
#[derive(Debug)]
pub struct Tree {
    nodes: Arena<NodeId, NodeData>,
}

impl Tree {
    /// Create a tree whose arena holds at most `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
        }
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Create a top-level window node (no parent).
    ///
    /// Fails with [`Error::ArenaFull`] on arena exhaustion.
    pub fn create_window(&mut self, data: NodeData) -> Result<NodeId> {
        debug_assert_eq!(data.kind, NodeKind::Window, "window nodes must be NodeKind::Window");
        let id = self.nodes.insert(data)?;
        tracing::trace!(?id, "created window node");
        Ok(id)
    }

    /// Create a node as the last child of `parent`.
    ///
    /// The new node is appended at the tail of the parent's child list, so it
    /// paints above its existing siblings. Fails with
    /// [`Error::InvalidParent`] if `parent` is stale or absent, and with
    /// [`Error::ArenaFull`] on arena exhaustion.
    pub fn create_node(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId> {
        if !self.nodes.contains(parent) {
            tracing::warn!(?parent, "create_node with stale parent");
            return Err(Error::InvalidParent);
        }
        let id = self.nodes.insert(data)?;
        self.link_last(parent, id);
        tracing::trace!(?id, ?parent, "created node");
        Ok(id)
    }

    /// Append `child` at the tail of `parent`'s child list.
    ///
    /// Both ids must be live and `child` must currently be unlinked.
    fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let prev_last = match self.nodes.get_mut(parent) {
            Some(p) => {
                let prev_last = p.last_child;
                p.last_child = Some(child);
                if p.first_child.is_none() {
                    p.first_child = Some(child);
                }
                prev_last
            }
            None => return,
        };
        if let Some(prev) = prev_last {
            if let Some(n) = self.nodes.get_mut(prev) {
                n.next_sibling = Some(child);
            }
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.prev_sibling = prev_last;
            c.next_sibling = None;
        }
    }

    /// Unhook `id` from its parent and siblings. The node itself stays live.
    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.nodes.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if let Some(p) = prev {
            if let Some(n) = self.nodes.get_mut(p) {
                n.next_sibling = next;
            }
        }
        if let Some(nx) = next {
            if let Some(n) = self.nodes.get_mut(nx) {
                n.prev_sibling = prev;
            }
        }
        if let Some(par) = parent {
            if let Some(p) = self.nodes.get_mut(par) {
                if p.first_child == Some(id) {
                    p.first_child = next;
                }
                if p.last_child == Some(id) {
                    p.last_child = prev;
                }
            }
        }

        if let Some(n) = self.nodes.get_mut(id) {
            n.parent = None;
            n.prev_sibling = None;
            n.next_sibling = None;
        }
    }

    // -----------------------------------------------------------------------
    // Destruction
    // -----------------------------------------------------------------------

    /// Destroy a node and its whole subtree, post-order: children first,
    /// then the node's `on_destroy` capability, then detachment from
    /// parent/sibling links, then the arena slot is freed.
    ///
    /// A stale id (already destroyed, or never valid) is a no-op.
    pub fn destroy_node(&mut self, id: NodeId) {
        if !self.nodes.contains(id) {
            return;
        }

        // Children first.
        let kids: Vec<NodeId> = self.children(id).collect();
        for kid in kids {
            self.destroy_node(kid);
        }

        // Teardown capability, while the node is still addressable.
        if let Some(on_destroy) = self.nodes.get(id).and_then(|n| n.caps.on_destroy) {
            if let Some(data) = self.nodes.get_mut(id) {
                on_destroy(data, id);
            }
        }

        self.detach(id);
        self.nodes.remove(id);
        tracing::trace!(?id, "destroyed node");
    }

    // -----------------------------------------------------------------------
    // Access
    // -----------------------------------------------------------------------

    /// Immutable access to a node's data.
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Whether the id addresses a live node (generation check included).
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The arena capacity.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// The parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    /// Iterate over the children of `id` in insertion (paint) order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.nodes.get(id).and_then(|n| n.first_child),
        }
    }

    /// Iterate over the children of `id` in reverse insertion order
    /// (topmost-painted first), the order hit-testing wants.
    pub fn children_rev(&self, id: NodeId) -> ChildrenRev<'_> {
        ChildrenRev {
            tree: self,
            next: self.nodes.get(id).and_then(|n| n.last_child),
        }
    }

    /// Walk from `id` up to its root, collecting ancestor ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.nodes.get(current).and_then(|n| n.parent) {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether a node is effectively hidden: its own hidden flag is set OR
    /// any ancestor is hidden. Hiding a container hides its whole subtree
    /// without mutating descendants. A stale id reports hidden.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            match self.nodes.get(c) {
                Some(n) if n.hidden => return true,
                Some(n) => current = n.parent,
                None => return true,
            }
        }
        false
    }

    /// The node's absolute rectangle: its own rect translated by every
    /// ancestor's origin. `None` for a stale id.
    pub fn abs_rect(&self, id: NodeId) -> Option<Rect> {
        let mut rect = self.nodes.get(id)?.rect;
        for anc in self.ancestors(id) {
            let origin = self.nodes.get(anc)?.rect.origin();
            rect = rect.translate(origin);
        }
        Some(rect)
    }

    /// Depth-first paint-order traversal from `root`: parent before
    /// children, siblings in insertion order, so later-added siblings and
    /// deeper descendants paint over earlier ones.
    pub fn paint_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains(current) {
                continue;
            }
            result.push(current);
            // Push in reverse so the first child is visited first.
            for child in self.children_rev(current) {
                stack.push(child);
            }
        }
        result
    }

    /// The absolute position of a point expressed relative to `id`'s
    /// absolute rect origin. `None` for a stale id.
    pub fn to_local(&self, id: NodeId, point: Point) -> Option<Point> {
        let abs = self.abs_rect(id)?;
        Some(point - abs.origin())
    }
}

// ---------------------------------------------------------------------------
// Child iterators
// ---------------------------------------------------------------------------

/// Iterator over a node's children in insertion order.
pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.nodes.get(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over a node's children in reverse insertion order.
pub struct ChildrenRev<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for ChildrenRev<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.nodes.get(current).and_then(|n| n.prev_sibling);
        Some(current)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
