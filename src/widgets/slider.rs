//! Horizontal value slider.

use crate::dirty::DirtyTracker;
use crate::error::Result;
use crate::event::{PointerAction, PointerButton, PointerEvent};
use crate::geometry::Rect;
use crate::surface::{Color, Surface};
use crate::tree::{Caps, ChangeFn, NodeData, NodeId, NodeKind, Payload, Tree};
use crate::ui::Ui;

use super::{fire_on_change, invalidate};

const TRACK: Color = Color::DARK_GREY;
const HANDLE: Color = Color::WHITE;
const HANDLE_WIDTH: i32 = 4;

/// Builder for a horizontal slider over `[min, max]`.
///
/// Press or drag anywhere on the track to move the handle; each value change
/// fires the `on_change` capability.
#[derive(Debug, Clone)]
pub struct Slider {
    min: f32,
    max: f32,
    value: f32,
    on_change: Option<ChangeFn>,
}

impl Slider {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            value: min,
            on_change: None,
        }
    }

    /// Initial value, clamped into `[min, max]` (default `min`).
    pub fn value(mut self, value: f32) -> Self {
        self.value = value.clamp(self.min, self.max);
        self
    }

    /// Called whenever the value changes.
    pub fn on_change(mut self, f: ChangeFn) -> Self {
        self.on_change = Some(f);
        self
    }

    /// Mount the slider under `parent` with a parent-relative `rect`.
    pub fn mount(self, ui: &mut Ui, parent: NodeId, rect: Rect) -> Result<NodeId> {
        let data = NodeData::new(NodeKind::Widget, rect)
            .with_payload(Payload::Slider {
                value: self.value,
                min: self.min,
                max: self.max,
            })
            .with_caps(Caps {
                draw: Some(draw_slider),
                on_event: Some(slider_on_event),
                on_change: self.on_change,
                ..Caps::default()
            });
        ui.mount(parent, data)
    }
}

/// Draw capability for sliders: full-rect track, then the handle.
pub(crate) fn draw_slider(tree: &Tree, id: NodeId, abs: Rect, surface: &mut dyn Surface) {
    if let Some(Payload::Slider { value, min, max }) = tree.node(id).map(|n| &n.payload) {
        surface.fill_rect(abs, TRACK);

        let span = max - min;
        let fraction = if span > 0.0 { (value - min) / span } else { 0.0 };
        let travel = (abs.width - HANDLE_WIDTH).max(0);
        let handle_x = abs.x + (fraction * travel as f32) as i32;
        surface.fill_rect(
            Rect::new(handle_x, abs.y, HANDLE_WIDTH.min(abs.width), abs.height),
            HANDLE,
        );
    }
}

/// Input capability for sliders.
pub(crate) fn slider_on_event(
    tree: &mut Tree,
    dirty: &mut DirtyTracker,
    id: NodeId,
    event: &PointerEvent,
) -> bool {
    match event.action {
        PointerAction::Down(PointerButton::Primary)
        | PointerAction::Drag(PointerButton::Primary) => {
            let abs = match tree.abs_rect(id) {
                Some(r) if r.width > 0 => r,
                _ => return true,
            };
            // The last column inside the rect (right - 1) maps to 1.0, so
            // the full range is reachable by pointer; out-of-rect drags
            // clamp to the ends.
            let travel = (abs.width - 1).max(1) as f32;
            let fraction = ((event.pos.x - abs.x) as f32 / travel).clamp(0.0, 1.0);

            let changed = match tree.node_mut(id).map(|n| &mut n.payload) {
                Some(Payload::Slider { value, min, max }) => {
                    let new_value = *min + fraction * (*max - *min);
                    let changed = new_value != *value;
                    *value = new_value;
                    changed
                }
                _ => false,
            };
            if changed {
                invalidate(dirty, id);
                fire_on_change(tree, dirty, id);
            }
            true
        }
        PointerAction::Up(PointerButton::Primary) => true,
        _ => false,
    }
}
