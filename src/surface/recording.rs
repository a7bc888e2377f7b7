//! Headless transcript backend for tests and snapshots.

use crate::geometry::Rect;

use super::{Color, Surface};

/// A [`Surface`] that records one human-readable line per primitive call.
///
/// The transcript makes frame contents assertable without a real backend:
/// integration tests grep it, snapshot tests pin it verbatim.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    lines: Vec<String>,
    /// Number of `present` calls seen.
    pub frames: usize,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines, in call order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The transcript as a single newline-joined string.
    pub fn transcript(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Discard everything recorded so far.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.frames = 0;
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.lines.push(format!("clear {color}"));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.lines.push(format!(
            "fill {},{} {}x{} {color}",
            rect.x, rect.y, rect.width, rect.height
        ));
    }

    fn render_text(&mut self, text: &str, x: i32, y: i32, color: Color, scale: u16) {
        self.lines
            .push(format!("text {x},{y} s{scale} {color} {text:?}"));
    }

    fn present(&mut self) {
        self.lines.push("present".to_owned());
        self.frames += 1;
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mut s = RecordingSurface::new();
        s.clear(Color::BLACK);
        s.fill_rect(Rect::new(1, 2, 3, 4), Color::RED);
        s.render_text("hi", 5, 6, Color::WHITE, 1);
        s.present();

        assert_eq!(
            s.lines(),
            &[
                "clear #000000",
                "fill 1,2 3x4 #ff0000",
                "text 5,6 s1 #ffffff \"hi\"",
                "present",
            ]
        );
        assert_eq!(s.frames, 1);
    }

    #[test]
    fn transcript_joins_lines() {
        let mut s = RecordingSurface::new();
        s.clear(Color::WHITE);
        s.present();
        assert_eq!(s.transcript(), "clear #ffffff\npresent");
    }

    #[test]
    fn contains_searches_lines() {
        let mut s = RecordingSurface::new();
        s.render_text("Submit", 0, 0, Color::WHITE, 1);
        assert!(s.contains("Submit"));
        assert!(!s.contains("Cancel"));
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = RecordingSurface::new();
        s.clear(Color::BLACK);
        s.present();
        s.reset();
        assert!(s.lines().is_empty());
        assert_eq!(s.frames, 0);
    }
}
