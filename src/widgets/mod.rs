//! Built-in widgets.
//!
//! Each widget is a builder that mounts a node into the tree with the right
//! payload and capability record. Behavior lives in free functions referenced
//! from [`Caps`](crate::tree::Caps); state lives in the node's
//! [`Payload`](crate::tree::Payload). There is no widget trait object: a
//! custom widget is just a payload variant plus its own capability functions.

mod button;
mod label;
mod slider;

pub use button::Button;
pub use label::Label;
pub use slider::Slider;

use crate::dirty::DirtyTracker;
use crate::error::Result;
use crate::geometry::Rect;
use crate::tree::{NodeData, NodeId, NodeKind, Tree};
use crate::ui::Ui;

/// Mark a node dirty and request a frame, the standard reaction to any
/// visible state change inside a capability function.
pub(crate) fn invalidate(dirty: &mut DirtyTracker, id: NodeId) {
    dirty.mark_dirty(id);
    dirty.request_redraw();
}

/// Fire a node's `on_change` capability, if it has one.
pub(crate) fn fire_on_change(tree: &mut Tree, dirty: &mut DirtyTracker, id: NodeId) {
    let on_change = tree.node(id).and_then(|n| n.caps.on_change);
    if let Some(f) = on_change {
        f(tree, dirty, id);
    }
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// A plain grouping container. Panels have no payload and no behavior; they
/// exist to give a subtree a shared origin and a single hide/show switch.
#[derive(Debug, Default)]
pub struct Panel {
    hidden: bool,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the panel initially hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mount the panel under `parent` with a parent-relative `rect`.
    pub fn mount(self, ui: &mut Ui, parent: NodeId, rect: Rect) -> Result<NodeId> {
        let data = NodeData::new(NodeKind::Panel, rect).hidden(self.hidden);
        ui.mount(parent, data)
    }
}
