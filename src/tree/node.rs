//! Node types: NodeId, NodeKind, Payload, Caps, NodeData.

use slotmap::new_key_type;

use crate::dirty::DirtyTracker;
use crate::event::input::PointerEvent;
use crate::geometry::{Point, Rect};
use crate::surface::{Color, Surface};
use crate::tree::tree::Tree;

new_key_type! {
    /// Unique identifier for a scene-graph node: arena slot index plus a
    /// generation counter, so ids held after destruction are detectably
    /// stale. Copy, lightweight (u64).
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A top-level window; the only node kind without a parent, and the
    /// entry point for event delivery.
    Window,
    /// A grouping container with no intrinsic behavior of its own.
    Panel,
    /// A leaf widget carrying kind-specific payload.
    Widget,
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Kind-specific widget state, owned exclusively by its node.
///
/// The node is the sole owner; the payload is dropped with the node when it
/// is destroyed. Behavior lives separately, in the node's [`Caps`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No widget state (panels, plain containers).
    None,
    /// Window state: title and background color.
    Window { title: String, background: Color },
    /// A text label.
    Label { text: String, color: Color, scale: u16 },
    /// A push button.
    Button { label: String, pressed: bool },
    /// A horizontal value slider over `[min, max]`.
    Slider { value: f32, min: f32, max: f32 },
}

// ---------------------------------------------------------------------------
// Capability references
// ---------------------------------------------------------------------------

/// Draw capability: paint the node into `surface` at its absolute rect.
pub type DrawFn = fn(&Tree, NodeId, Rect, &mut dyn Surface);

/// Hit-test capability: override the default rect containment test.
/// `point` is in absolute coordinates, `abs` is the node's absolute rect.
pub type HitTestFn = fn(&Tree, NodeId, Rect, Point) -> bool;

/// Input capability: handle a pointer event targeted at (or bubbling
/// through) this node. Returns `true` if the event was consumed.
pub type EventFn = fn(&mut Tree, &mut DirtyTracker, NodeId, &PointerEvent) -> bool;

/// Value-changed capability: invoked after a widget mutates its own value
/// (slider drag, button activation).
pub type ChangeFn = fn(&mut Tree, &mut DirtyTracker, NodeId);

/// Destroy capability: teardown hook run before the node's links are
/// detached and its slot freed.
pub type DestroyFn = fn(&mut NodeData, NodeId);

/// Bundle of optional capability references filled in by the concrete
/// widget constructor.
///
/// Dispatch is by direct function invocation — a node with no `draw` simply
/// isn't painted, one with no `on_event` is transparent to input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caps {
    pub draw: Option<DrawFn>,
    pub hit_test: Option<HitTestFn>,
    pub on_event: Option<EventFn>,
    pub on_change: Option<ChangeFn>,
    pub on_destroy: Option<DestroyFn>,
}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// Data associated with a single scene-graph node.
///
/// Children are encoded as a doubly linked sibling list (`first_child` /
/// `last_child` on the parent, `prev_sibling` / `next_sibling` on each
/// child) so attaching and detaching are O(1). All links are non-owning
/// back-references used for traversal and detachment only; ownership flows
/// strictly parent-to-child through [`Tree::destroy_node`].
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Structural role.
    pub kind: NodeKind,
    /// Bounding rectangle; parent-relative except for windows.
    pub rect: Rect,
    /// Whether this node itself is drawn.
    pub visible: bool,
    /// Whether this node (and, effectively, its whole subtree) is hidden.
    pub hidden: bool,
    /// Kind-specific widget state.
    pub payload: Payload,
    /// Capability references for this node.
    pub caps: Caps,

    // Structural links, maintained by Tree only.
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
}

impl NodeData {
    /// Create a new `NodeData` with the given kind and bounds, no payload,
    /// and no capabilities.
    pub fn new(kind: NodeKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            visible: true,
            hidden: false,
            payload: Payload::None,
            caps: Caps::default(),
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Set the payload (builder).
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Set the capability record (builder).
    pub fn with_caps(mut self, caps: Caps) -> Self {
        self.caps = caps;
        self
    }

    /// Set the hidden flag (builder).
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the visible flag (builder).
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// The parent node, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The first child in paint order, if any.
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    /// The last child in paint order (topmost-painted), if any.
    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    /// The next sibling in paint order, if any.
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    /// The previous sibling in paint order, if any.
    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }
}

// ===========================================================================
// Tests
// ===========================================================================
