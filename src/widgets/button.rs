//! Push button.

use crate::dirty::DirtyTracker;
use crate::error::Result;
use crate::event::{PointerAction, PointerButton, PointerEvent};
use crate::geometry::Rect;
use crate::surface::{Color, Surface};
use crate::tree::{Caps, ChangeFn, NodeData, NodeId, NodeKind, Payload, Tree};
use crate::ui::Ui;

use super::{fire_on_change, invalidate};

const FACE: Color = Color::GREY;
const FACE_PRESSED: Color = Color::DARK_GREY;
const TEXT: Color = Color::WHITE;

/// Builder for a push button.
///
/// A button arms on primary press and activates when the release lands
/// inside it while armed; a release elsewhere disarms without activating.
/// Activation fires the `on_change` capability.
#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    on_change: Option<ChangeFn>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_change: None,
        }
    }

    /// Called when the button is activated (pressed and released).
    pub fn on_change(mut self, f: ChangeFn) -> Self {
        self.on_change = Some(f);
        self
    }

    /// Mount the button under `parent` with a parent-relative `rect`.
    pub fn mount(self, ui: &mut Ui, parent: NodeId, rect: Rect) -> Result<NodeId> {
        let data = NodeData::new(NodeKind::Widget, rect)
            .with_payload(Payload::Button {
                label: self.label,
                pressed: false,
            })
            .with_caps(Caps {
                draw: Some(draw_button),
                on_event: Some(button_on_event),
                on_change: self.on_change,
                ..Caps::default()
            });
        ui.mount(parent, data)
    }
}

/// Draw capability for buttons: face fill, then the label on top.
pub(crate) fn draw_button(tree: &Tree, id: NodeId, abs: Rect, surface: &mut dyn Surface) {
    if let Some(Payload::Button { label, pressed }) = tree.node(id).map(|n| &n.payload) {
        let face = if *pressed { FACE_PRESSED } else { FACE };
        surface.fill_rect(abs, face);
        surface.render_text(label, abs.x + 4, abs.y + abs.height / 2, TEXT, 1);
    }
}

/// Input capability for buttons.
pub(crate) fn button_on_event(
    tree: &mut Tree,
    dirty: &mut DirtyTracker,
    id: NodeId,
    event: &PointerEvent,
) -> bool {
    match event.action {
        PointerAction::Down(PointerButton::Primary) => {
            if let Some(Payload::Button { pressed, .. }) =
                tree.node_mut(id).map(|n| &mut n.payload)
            {
                *pressed = true;
                invalidate(dirty, id);
            }
            true
        }
        PointerAction::Up(PointerButton::Primary) => {
            let was_pressed = match tree.node_mut(id).map(|n| &mut n.payload) {
                Some(Payload::Button { pressed, .. }) => std::mem::take(pressed),
                _ => false,
            };
            if was_pressed {
                invalidate(dirty, id);
                // Release outside the button disarms without activating.
                let inside = tree
                    .abs_rect(id)
                    .is_some_and(|r| r.contains(event.pos));
                if inside {
                    fire_on_change(tree, dirty, id);
                }
            }
            was_pressed
        }
        _ => false,
    }
}
