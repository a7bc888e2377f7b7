//! Graphics backend boundary: the [`Surface`] trait and [`Color`].
//!
//! The core never talks to a rendering API directly. Everything a widget can
//! draw is expressed through the small primitive set on `Surface`; backends
//! are swappable behind it. Two implementations ship with the crate:
//! [`RecordingSurface`] for headless tests and snapshots, and
//! [`TerminalSurface`], a crossterm-backed reference backend.

pub mod recording;
pub mod terminal;

pub use recording::RecordingSurface;
pub use terminal::TerminalSurface;

use std::fmt;

use crate::geometry::Rect;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A 24-bit RGB color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const DARK_GREY: Color = Color::rgb(64, 64, 64);

    /// Create a color from RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    /// Formats as `#rrggbb`, the form used in recording transcripts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// The primitive drawing interface consumed by the core.
///
/// One frame is: any number of `clear` / `fill_rect` / `render_text` calls
/// followed by a single `present`. Implementations may buffer arbitrarily
/// until `present`.
pub trait Surface {
    /// Fill the entire surface with a color.
    fn clear(&mut self, color: Color);

    /// Fill a rectangle with a color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a text string with its top-left corner at (x, y).
    ///
    /// `scale` is an integer multiplier on the backend's native glyph size.
    fn render_text(&mut self, text: &str, x: i32, y: i32, color: Color, scale: u16);

    /// Present the finished frame (swap buffers / flush).
    fn present(&mut self);
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_display_is_hex() {
        assert_eq!(Color::rgb(255, 136, 0).to_string(), "#ff8800");
        assert_eq!(Color::BLACK.to_string(), "#000000");
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn color_is_copy_and_eq() {
        let c = Color::RED;
        let c2 = c;
        assert_eq!(c, c2);
        assert_ne!(Color::RED, Color::BLUE);
    }

    #[test]
    fn surface_is_object_safe() {
        // Verify Surface can be used as a trait object.
        let mut rec = RecordingSurface::new();
        let surface: &mut dyn Surface = &mut rec;
        surface.clear(Color::BLACK);
        surface.present();
    }
}
