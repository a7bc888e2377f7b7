//! Input events and pointer routing.

pub mod input;
pub mod router;

pub use input::{
    from_crossterm, InputEvent, Key, KeyEvent, Modifiers, PointerAction, PointerButton,
    PointerEvent,
};
pub use router::{dispatch, hit_test, route};
