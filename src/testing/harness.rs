//! Headless driver for exercising a UI without a real backend.
//!
//! [`Harness`] bundles a [`Ui`], a [`RecordingSurface`], and a fake
//! millisecond clock. Tests build a scene, synthesize input and time, and
//! assert on the surface transcript — no terminal, no wall clock.

use crate::geometry::{Point, Rect};
use crate::surface::{Color, RecordingSurface};
use crate::tree::NodeId;
use crate::ui::{Ui, UiConfig};

/// A UI under test, with one pre-created window and a controlled clock.
pub struct Harness {
    ui: Ui,
    surface: RecordingSurface,
    root: NodeId,
    now: u64,
}

impl Harness {
    /// Create a harness whose window spans `width x height` at the origin,
    /// black background.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(width, height, UiConfig::default())
    }

    /// Create a harness with explicit engine capacities.
    pub fn with_config(width: i32, height: i32, config: UiConfig) -> Self {
        let mut ui = Ui::new(config);
        let root = ui
            .create_window("harness", Rect::new(0, 0, width, height), Color::BLACK)
            .unwrap_or_else(|_| panic!("harness window must fit the arena"));
        Self {
            ui,
            surface: RecordingSurface::new(),
            root,
            now: 0,
        }
    }

    /// The pre-created window.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The engine.
    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    /// Mutable engine access for scene building.
    pub fn ui_mut(&mut self) -> &mut Ui {
        &mut self.ui
    }

    /// The current fake clock, in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Advance the fake clock by `ms` and tick timers. Returns the number
    /// of timers fired.
    pub fn advance(&mut self, ms: u64) -> usize {
        self.now += ms;
        self.ui.tick(self.now)
    }

    /// Synthesize a primary-button press at `(x, y)`.
    pub fn press(&mut self, x: i32, y: i32) -> Option<NodeId> {
        self.ui
            .deliver_pointer(&crate::event::PointerEvent::down(Point::new(x, y)))
    }

    /// Synthesize a primary-button release at `(x, y)`.
    pub fn release(&mut self, x: i32, y: i32) -> Option<NodeId> {
        self.ui
            .deliver_pointer(&crate::event::PointerEvent::up(Point::new(x, y)))
    }

    /// Synthesize a full click: press then release at `(x, y)`. Returns the
    /// consumer of the release.
    pub fn click(&mut self, x: i32, y: i32) -> Option<NodeId> {
        self.press(x, y);
        self.release(x, y)
    }

    /// Synthesize a primary-button drag to `(x, y)`.
    pub fn drag(&mut self, x: i32, y: i32) -> Option<NodeId> {
        self.ui
            .deliver_pointer(&crate::event::PointerEvent::drag(Point::new(x, y)))
    }

    /// Render into the recording surface if a frame is pending. Returns
    /// whether a frame was produced.
    pub fn render(&mut self) -> bool {
        self.ui.render_frame(&mut self.surface)
    }

    /// The recording surface.
    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    /// The full draw transcript so far, one primitive per line.
    pub fn transcript(&self) -> String {
        self.surface.transcript()
    }

    /// Forget the transcript recorded so far.
    pub fn reset_transcript(&mut self) {
        self.surface.reset();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
