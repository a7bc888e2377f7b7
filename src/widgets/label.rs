//! Static text label.

use crate::error::Result;
use crate::geometry::Rect;
use crate::surface::{Color, Surface};
use crate::tree::{Caps, NodeData, NodeId, NodeKind, Payload, Tree};
use crate::ui::Ui;

/// Builder for a text label.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    color: Color,
    scale: u16,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::WHITE,
            scale: 1,
        }
    }

    /// Text color (default white).
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Integer text scale (default 1).
    pub fn scale(mut self, scale: u16) -> Self {
        self.scale = scale;
        self
    }

    /// Mount the label under `parent` with a parent-relative `rect`.
    pub fn mount(self, ui: &mut Ui, parent: NodeId, rect: Rect) -> Result<NodeId> {
        let data = NodeData::new(NodeKind::Widget, rect)
            .with_payload(Payload::Label {
                text: self.text,
                color: self.color,
                scale: self.scale,
            })
            .with_caps(Caps {
                draw: Some(draw_label),
                ..Caps::default()
            });
        ui.mount(parent, data)
    }
}

/// Draw capability for labels.
pub(crate) fn draw_label(tree: &Tree, id: NodeId, abs: Rect, surface: &mut dyn Surface) {
    if let Some(Payload::Label { text, color, scale }) = tree.node(id).map(|n| &n.payload) {
        surface.render_text(text, abs.x, abs.y, *color, *scale);
    }
}
