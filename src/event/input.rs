//! Input event types, decoupled from the windowing collaborator.
//!
//! Defines [`PointerEvent`], [`KeyEvent`] and supporting types. Crossterm
//! events are converted via `From` impls so the rest of the toolkit never
//! depends on crossterm directly; a host using another input source builds
//! these types itself.

use std::ops::{BitAnd, BitOr};

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Pointer
// ---------------------------------------------------------------------------

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    Down(PointerButton),
    Up(PointerButton),
    Drag(PointerButton),
    Moved,
    ScrollUp,
    ScrollDown,
}

/// A pointer event with action, position, and modifiers.
///
/// Positions are in the same pixel units as node rectangles, relative to the
/// window origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pos: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a pointer event with no modifiers.
    pub fn new(action: PointerAction, pos: Point) -> Self {
        Self {
            action,
            pos,
            modifiers: Modifiers::NONE,
        }
    }

    /// A primary-button press at `pos`.
    pub fn down(pos: Point) -> Self {
        Self::new(PointerAction::Down(PointerButton::Primary), pos)
    }

    /// A primary-button release at `pos`.
    pub fn up(pos: Point) -> Self {
        Self::new(PointerAction::Up(PointerButton::Primary), pos)
    }

    /// A primary-button drag to `pos`.
    pub fn drag(pos: Point) -> Self {
        Self::new(PointerAction::Drag(PointerButton::Primary), pos)
    }
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from the input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    /// A key with no dedicated variant (function keys, Delete, Home, ...).
    /// Kept distinct so hosts never mistake it for a mapped key.
    Other,
}

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event delivered by the host's input pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    Resize { width: i32, height: i32 },
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

fn convert_button(b: crossterm::event::MouseButton) -> PointerButton {
    match b {
        crossterm::event::MouseButton::Left => PointerButton::Primary,
        crossterm::event::MouseButton::Right => PointerButton::Secondary,
        crossterm::event::MouseButton::Middle => PointerButton::Middle,
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        let code = match ct.code {
            crossterm::event::KeyCode::Char(c) => Key::Char(c),
            crossterm::event::KeyCode::Enter => Key::Enter,
            crossterm::event::KeyCode::Esc => Key::Escape,
            crossterm::event::KeyCode::Tab => Key::Tab,
            crossterm::event::KeyCode::Backspace => Key::Backspace,
            crossterm::event::KeyCode::Left => Key::Left,
            crossterm::event::KeyCode::Right => Key::Right,
            crossterm::event::KeyCode::Up => Key::Up,
            crossterm::event::KeyCode::Down => Key::Down,
            _ => Key::Other,
        };
        KeyEvent {
            code,
            modifiers: convert_modifiers(ct.modifiers),
        }
    }
}

impl From<crossterm::event::MouseEvent> for PointerEvent {
    fn from(ct: crossterm::event::MouseEvent) -> Self {
        let action = match ct.kind {
            crossterm::event::MouseEventKind::Down(b) => PointerAction::Down(convert_button(b)),
            crossterm::event::MouseEventKind::Up(b) => PointerAction::Up(convert_button(b)),
            crossterm::event::MouseEventKind::Drag(b) => PointerAction::Drag(convert_button(b)),
            crossterm::event::MouseEventKind::Moved => PointerAction::Moved,
            crossterm::event::MouseEventKind::ScrollUp => PointerAction::ScrollUp,
            _ => PointerAction::ScrollDown,
        };
        PointerEvent {
            action,
            pos: Point::new(i32::from(ct.column), i32::from(ct.row)),
            modifiers: convert_modifiers(ct.modifiers),
        }
    }
}

/// Convert a crossterm `Event` into an [`InputEvent`].
///
/// Returns `None` for event variants the toolkit does not consume
/// (focus changes, paste).
pub fn from_crossterm(event: crossterm::event::Event) -> Option<InputEvent> {
    match event {
        crossterm::event::Event::Key(ke) => Some(InputEvent::Key(KeyEvent::from(ke))),
        crossterm::event::Event::Mouse(me) => Some(InputEvent::Pointer(PointerEvent::from(me))),
        crossterm::event::Event::Resize(w, h) => Some(InputEvent::Resize {
            width: i32::from(w),
            height: i32::from(h),
        }),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Modifiers ────────────────────────────────────────────────────

    #[test]
    fn modifiers_none_is_empty() {
        assert!(Modifiers::NONE.is_empty());
        assert!(!Modifiers::SHIFT.is_empty());
    }

    #[test]
    fn modifiers_bitops() {
        let m = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(m.contains(Modifiers::SHIFT));
        assert!(m.contains(Modifiers::CTRL));
        assert!(!m.contains(Modifiers::ALT));
        assert_eq!(m & Modifiers::SHIFT, Modifiers::SHIFT);
    }

    // ── PointerEvent constructors ────────────────────────────────────

    #[test]
    fn pointer_down_up_helpers() {
        let p = Point::new(10, 20);
        assert_eq!(
            PointerEvent::down(p).action,
            PointerAction::Down(PointerButton::Primary)
        );
        assert_eq!(
            PointerEvent::up(p).action,
            PointerAction::Up(PointerButton::Primary)
        );
        assert_eq!(PointerEvent::down(p).pos, p);
        assert!(PointerEvent::down(p).modifiers.is_empty());
    }

    // ── crossterm conversion ─────────────────────────────────────────

    #[test]
    fn convert_key_event() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('a'),
            crossterm::event::KeyModifiers::CONTROL,
        );
        let ke = KeyEvent::from(ct);
        assert_eq!(ke.code, Key::Char('a'));
        assert!(ke.modifiers.contains(Modifiers::CTRL));
    }

    #[test]
    fn convert_unmapped_key_is_other_not_escape() {
        let esc = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Esc,
            crossterm::event::KeyModifiers::NONE,
        );
        assert_eq!(KeyEvent::from(esc).code, Key::Escape);

        let delete = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Delete,
            crossterm::event::KeyModifiers::NONE,
        );
        assert_eq!(KeyEvent::from(delete).code, Key::Other);

        let f5 = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::F(5),
            crossterm::event::KeyModifiers::NONE,
        );
        assert_eq!(KeyEvent::from(f5).code, Key::Other);
    }

    #[test]
    fn convert_mouse_event() {
        let ct = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 7,
            row: 3,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        let pe = PointerEvent::from(ct);
        assert_eq!(pe.action, PointerAction::Down(PointerButton::Primary));
        assert_eq!(pe.pos, Point::new(7, 3));
    }

    #[test]
    fn convert_resize_event() {
        let ev = from_crossterm(crossterm::event::Event::Resize(80, 24));
        assert_eq!(
            ev,
            Some(InputEvent::Resize {
                width: 80,
                height: 24
            })
        );
    }

    #[test]
    fn unhandled_events_are_none() {
        assert_eq!(from_crossterm(crossterm::event::Event::FocusGained), None);
    }
}
