//! Dirty tracking and redraw batching.
//!
//! [`DirtyTracker`] keeps two levels of invalidation state. The per-node
//! dirty list answers "what exactly changed" and is consulted only when a
//! frame is actually produced. The coarse redraw flag answers "should a frame
//! be produced at all" and is cheap enough to check on every idle iteration
//! of the host loop, so no tree walk happens while nothing changes.

use crate::tree::node::NodeId;

/// Batches per-node invalidations and the coarse frame-level redraw flag.
///
/// The tracker holds non-owning node ids; destroying a node does not scrub
/// its entry, so consumers must filter the list through the tree's
/// generation check before dereferencing.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    /// Nodes pending redraw, in first-marked order, each at most once.
    dirty: Vec<NodeId>,
    /// Coarse "a frame should be produced" flag.
    redraw: bool,
}

impl DirtyTracker {
    /// Create a tracker with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a node as needing redraw. Idempotent: marking an already-dirty
    /// node is a no-op.
    pub fn mark_dirty(&mut self, id: NodeId) {
        if !self.dirty.contains(&id) {
            self.dirty.push(id);
        }
    }

    /// The current pending set, without clearing it.
    pub fn dirty_list(&self) -> &[NodeId] {
        &self.dirty
    }

    /// Whether any node is pending redraw.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Empty the pending set. Called after the consumer has finished issuing
    /// draw calls for the previously retrieved list.
    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    /// Signal that a frame should be produced, independent of per-node
    /// dirtiness.
    pub fn request_redraw(&mut self) {
        if !self.redraw {
            tracing::trace!("redraw requested");
        }
        self.redraw = true;
    }

    /// Read-and-clear the redraw flag. Returns `true` at most once per
    /// request; a frame is produced only when this returns `true`.
    pub fn consume_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
