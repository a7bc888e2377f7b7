//! Engine facade: owns the tree, dirty tracker, and timer table, and drives
//! the frame cycle.
//!
//! The host loop calls three things: [`Ui::deliver_pointer`] with translated
//! input, [`Ui::tick`] with a monotonic millisecond clock, and
//! [`Ui::render_frame`] with a [`Surface`]. `render_frame` is gated on the
//! coarse redraw flag, so an idle loop costs one boolean check per iteration.

use crate::dirty::DirtyTracker;
use crate::error::{Error, Result};
use crate::event::{self, PointerAction, PointerEvent};
use crate::geometry::Rect;
use crate::surface::{Color, Surface};
use crate::timer::{TickCtx, TimerCallback, TimerId, TimerTable};
use crate::tree::{ChangeFn, NodeData, NodeId, NodeKind, Payload, Tree};

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Fixed capacities for the engine's preallocated tables.
#[derive(Debug, Clone, Copy)]
pub struct UiConfig {
    /// Maximum number of live nodes.
    pub arena_capacity: usize,
    /// Maximum number of live timers.
    pub timer_capacity: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            arena_capacity: 256,
            timer_capacity: 32,
        }
    }
}

impl UiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of live nodes (builder).
    pub fn arena_capacity(mut self, capacity: usize) -> Self {
        self.arena_capacity = capacity;
        self
    }

    /// Maximum number of live timers (builder).
    pub fn timer_capacity(mut self, capacity: usize) -> Self {
        self.timer_capacity = capacity;
        self
    }
}

// ---------------------------------------------------------------------------
// Ui
// ---------------------------------------------------------------------------

/// The retained-mode engine: scene graph, invalidation state, timers.
#[derive(Debug)]
pub struct Ui {
    tree: Tree,
    dirty: DirtyTracker,
    timers: TimerTable,
    /// Top-level windows in creation order; later windows paint on top.
    windows: Vec<NodeId>,
    /// Node that consumed the last primary press; Drag/Up route here until
    /// release, so drags past a widget's bounds still reach it.
    capture: Option<NodeId>,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

impl Ui {
    /// Create an engine with the given capacities. All allocation happens
    /// here; steady-state operation allocates nothing for node storage.
    pub fn new(config: UiConfig) -> Self {
        tracing::debug!(
            arena_capacity = config.arena_capacity,
            timer_capacity = config.timer_capacity,
            "engine created"
        );
        Self {
            tree: Tree::with_capacity(config.arena_capacity),
            dirty: DirtyTracker::new(),
            timers: TimerTable::with_capacity(config.timer_capacity),
            windows: Vec::new(),
            capture: None,
        }
    }

    // -----------------------------------------------------------------------
    // Construction & destruction
    // -----------------------------------------------------------------------

    /// Create a top-level window with an absolute `rect` and a background
    /// color.
    pub fn create_window(
        &mut self,
        title: impl Into<String>,
        rect: Rect,
        background: Color,
    ) -> Result<NodeId> {
        let data = NodeData::new(NodeKind::Window, rect).with_payload(Payload::Window {
            title: title.into(),
            background,
        });
        let id = self.tree.create_window(data)?;
        self.windows.push(id);
        self.invalidate(id);
        Ok(id)
    }

    /// Mount a prepared node under `parent` and invalidate it. Widget
    /// builders funnel through here.
    pub fn mount(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId> {
        let id = self.tree.create_node(parent, data)?;
        self.invalidate(id);
        Ok(id)
    }

    /// Destroy a node and its subtree. Stale ids are a no-op. Destroying a
    /// window also unregisters it from the paint list.
    pub fn destroy_node(&mut self, id: NodeId) {
        if !self.tree.contains(id) {
            return;
        }
        self.windows.retain(|&w| w != id);
        self.tree.destroy_node(id);
        // Destroyed ids may linger in the dirty list; render filters them.
        self.dirty.request_redraw();
    }

    // -----------------------------------------------------------------------
    // Access
    // -----------------------------------------------------------------------

    /// The scene graph.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable scene graph access. Direct mutation bypasses invalidation;
    /// callers doing visible changes should pair it with [`Ui::invalidate`].
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The invalidation state.
    pub fn dirty(&self) -> &DirtyTracker {
        &self.dirty
    }

    /// Top-level windows in paint order.
    pub fn windows(&self) -> &[NodeId] {
        &self.windows
    }

    /// Whether a node is hidden itself or through an ancestor.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.tree.is_hidden(id)
    }

    // -----------------------------------------------------------------------
    // Invalidation & mutators
    // -----------------------------------------------------------------------

    /// Mark a node dirty and request a frame.
    pub fn invalidate(&mut self, id: NodeId) {
        self.dirty.mark_dirty(id);
        self.dirty.request_redraw();
    }

    /// Move/resize a node.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> Result<()> {
        let node = self.tree.node_mut(id).ok_or(Error::NodeGone)?;
        if node.rect != rect {
            node.rect = rect;
            self.invalidate(id);
        }
        Ok(())
    }

    /// Hide or show a node and, effectively, its subtree.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<()> {
        let node = self.tree.node_mut(id).ok_or(Error::NodeGone)?;
        if node.hidden != hidden {
            node.hidden = hidden;
            self.invalidate(id);
        }
        Ok(())
    }

    /// Set whether the node itself is drawn (children are unaffected).
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        let node = self.tree.node_mut(id).ok_or(Error::NodeGone)?;
        if node.visible != visible {
            node.visible = visible;
            self.invalidate(id);
        }
        Ok(())
    }

    /// Replace a label's text. Fails with [`Error::NodeGone`] for stale ids
    /// and [`Error::WrongKind`] for live nodes that are not labels.
    pub fn set_label_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        let node = self.tree.node_mut(id).ok_or(Error::NodeGone)?;
        match &mut node.payload {
            Payload::Label { text: t, .. } => {
                let text = text.into();
                if *t != text {
                    *t = text;
                    self.invalidate(id);
                }
                Ok(())
            }
            _ => Err(Error::WrongKind),
        }
    }

    /// Set a slider's value programmatically, clamped to its range. Does not
    /// fire `on_change`; that capability reports user interaction.
    pub fn set_slider_value(&mut self, id: NodeId, value: f32) -> Result<()> {
        let node = self.tree.node_mut(id).ok_or(Error::NodeGone)?;
        match &mut node.payload {
            Payload::Slider { value: v, min, max } => {
                let value = value.clamp(*min, *max);
                if *v != value {
                    *v = value;
                    self.invalidate(id);
                }
                Ok(())
            }
            _ => Err(Error::WrongKind),
        }
    }

    /// Replace a node's `on_change` capability.
    pub fn set_on_change(&mut self, id: NodeId, f: Option<ChangeFn>) -> Result<()> {
        let node = self.tree.node_mut(id).ok_or(Error::NodeGone)?;
        node.caps.on_change = f;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    /// Register a timer. See [`TimerTable::create`].
    pub fn set_timer(&mut self, period_ms: u64, repeat: bool, callback: TimerCallback) -> Result<TimerId> {
        self.timers.create(period_ms, repeat, callback)
    }

    /// Cancel a timer. Stale ids are a no-op.
    pub fn cancel_timer(&mut self, id: TimerId) {
        self.timers.cancel(id);
    }

    /// Number of live timers.
    pub fn active_timers(&self) -> usize {
        self.timers.active_count()
    }

    /// Advance timers to `now_ms`, firing due ones. Returns the number of
    /// timers fired. Callbacks see the tree and dirty tracker through
    /// [`TickCtx`].
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let mut ctx = TickCtx::new(&mut self.tree, &mut self.dirty);
        self.timers.tick(now_ms, &mut ctx)
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Route a pointer event: hit-test each window topmost-first, then
    /// bubble from the hit node. Returns the consuming node, if any.
    ///
    /// The node that consumes a primary press captures the pointer: the
    /// following `Drag`/`Moved`/`Up` events go straight to it regardless of
    /// position, and the capture ends on release. This is what lets a
    /// slider drag past its track and a button notice a release elsewhere.
    pub fn deliver_pointer(&mut self, event: &PointerEvent) -> Option<NodeId> {
        if let Some(captured) = self.capture {
            match event.action {
                // A fresh press always re-resolves from scratch.
                PointerAction::Down(_) => self.capture = None,
                _ => {
                    if self.tree.contains(captured) {
                        let consumer =
                            event::dispatch(&mut self.tree, &mut self.dirty, captured, event);
                        if matches!(event.action, PointerAction::Up(_)) {
                            self.capture = None;
                        }
                        return consumer;
                    }
                    // Captured node was destroyed mid-gesture.
                    self.capture = None;
                }
            }
        }

        let windows: Vec<NodeId> = self.windows.iter().rev().copied().collect();
        for window in windows {
            if let Some(target) = event::hit_test(&self.tree, window, event.pos) {
                let consumer = event::dispatch(&mut self.tree, &mut self.dirty, target, event);
                if matches!(event.action, PointerAction::Down(_)) {
                    self.capture = consumer;
                }
                return consumer;
            }
        }
        None
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Produce a frame if one was requested; returns whether it was.
    ///
    /// When the coarse flag is clear this is a no-op returning `false` and
    /// touches neither the surface nor the dirty list. Otherwise the whole
    /// visible scene is repainted in paint order, the dirty list is cleared,
    /// and the surface is presented.
    pub fn render_frame(&mut self, surface: &mut dyn Surface) -> bool {
        if !self.dirty.consume_redraw() {
            return false;
        }

        let live = self
            .dirty
            .dirty_list()
            .iter()
            .filter(|&&id| self.tree.contains(id))
            .count();
        tracing::debug!(
            dirty_live = live,
            dirty_total = self.dirty.dirty_list().len(),
            "rendering frame"
        );

        surface.clear(Color::BLACK);
        for index in 0..self.windows.len() {
            let window = self.windows[index];
            self.paint_window(window, surface);
        }
        self.dirty.clear_dirty();
        surface.present();
        true
    }

    fn paint_window(&self, window: NodeId, surface: &mut dyn Surface) {
        let Some(node) = self.tree.node(window) else {
            return;
        };
        if node.hidden {
            return;
        }
        if let Payload::Window { background, .. } = &node.payload {
            surface.fill_rect(node.rect, *background);
        }

        for id in self.tree.paint_order(window) {
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            if !node.visible || self.tree.is_hidden(id) {
                continue;
            }
            if let (Some(draw), Some(abs)) = (node.caps.draw, self.tree.abs_rect(id)) {
                draw(&self.tree, id, abs, surface);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
