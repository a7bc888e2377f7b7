//! # tinsel
//!
//! A small retained-mode UI core: a scene graph of typed nodes in a
//! fixed-capacity arena, dirty-tracked batched redraw, deterministic
//! millisecond timers, and pointer routing with capture-free bubbling.
//!
//! tinsel owns no event loop and no clock. The host drives it with three
//! calls — deliver input, tick time, render a frame — and supplies the
//! drawing backend through the [`Surface`](surface::Surface) trait, so the
//! whole engine runs headless under test.
//!
//! ## Core Systems
//!
//! - **[`tree`]** — Scene graph: generational node ids, linked-sibling
//!   structure, capability records, typed payloads
//! - **[`arena`]** — Fixed-capacity generational slot storage
//! - **[`dirty`]** — Per-node dirty list plus coarse redraw batching
//! - **[`timer`]** — Fixed-capacity timer table driven by `tick(now_ms)`
//! - **[`event`]** — Input types, hit-testing, bubbling dispatch
//! - **[`widgets`]** — Built-in widgets: Panel, Label, Button, Slider
//! - **[`surface`]** — Drawing boundary, recording and crossterm backends
//! - **[`ui`]** — Engine facade tying everything together
//! - **[`testing`]** — Headless harness over a recording surface
//! - **[`geometry`]** — Point, Size, Rect primitives

// Foundation
pub mod error;
pub mod geometry;

// Storage
pub mod arena;

// Core systems
pub mod dirty;
pub mod timer;
pub mod tree;

// Events
pub mod event;

// Widgets and drawing
pub mod surface;
pub mod widgets;

// Engine
pub mod ui;

// Test support
pub mod testing;

pub use error::{Error, Result};
pub use ui::{Ui, UiConfig};
