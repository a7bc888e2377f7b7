//! Crossterm reference backend.
//!
//! Maps the pixel-unit primitive surface onto a terminal grid, one cell per
//! unit. Wraps a buffered stdout writer; primitives are queued with
//! crossterm's `queue!` and sent on `present`. Useful as a demo backend and
//! as proof that the [`Surface`] boundary is implementable over a real sink.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::geometry::Rect;

use super::{Color, Surface};

fn to_crossterm(color: Color) -> crossterm::style::Color {
    crossterm::style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Terminal output backend using crossterm.
///
/// The backend does NOT automatically enter alternate screen on creation —
/// call `enter_alt_screen` explicitly. Drawing errors are sticky: the first
/// I/O failure is kept and returned by `take_error`, keeping the `Surface`
/// methods infallible for callers.
pub struct TerminalSurface {
    writer: BufWriter<Stdout>,
    error: Option<io::Error>,
}

impl TerminalSurface {
    /// Create a new surface wrapping stdout.
    pub fn new() -> Self {
        Self {
            writer: BufWriter::new(io::stdout()),
            error: None,
        }
    }

    /// Enter alternate screen, enable raw mode, hide the cursor.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()
    }

    /// Leave alternate screen, disable raw mode, show the cursor.
    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.writer, cursor::Show, LeaveAlternateScreen)
    }

    /// Get the terminal size (columns, rows) via crossterm.
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Take the first I/O error seen since the last call, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }

    fn queue_fill(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        if rect.is_empty() || rect.x < 0 || rect.y < 0 {
            return Ok(());
        }
        queue!(self.writer, SetBackgroundColor(to_crossterm(color)))?;
        let row = " ".repeat(rect.width as usize);
        for y in rect.y..rect.bottom() {
            queue!(
                self.writer,
                cursor::MoveTo(rect.x as u16, y as u16),
                Print(&row)
            )?;
        }
        queue!(self.writer, ResetColor)
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self, color: Color) {
        let result = (|| {
            queue!(
                self.writer,
                SetBackgroundColor(to_crossterm(color)),
                Clear(ClearType::All),
                ResetColor
            )
        })();
        self.record(result);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let result = self.queue_fill(rect, color);
        self.record(result);
    }

    fn render_text(&mut self, text: &str, x: i32, y: i32, color: Color, _scale: u16) {
        if x < 0 || y < 0 {
            return;
        }
        let result = (|| {
            queue!(
                self.writer,
                cursor::MoveTo(x as u16, y as u16),
                SetForegroundColor(to_crossterm(color)),
                Print(text),
                ResetColor
            )
        })();
        self.record(result);
    }

    fn present(&mut self) {
        let result = self.writer.flush();
        self.record(result);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
