//! Cursor, attribute state and the character write path.
//!
//! [`Console`] owns a [`Display`] backend plus the cursor position and
//! current color. Every character is rendered synchronously; the
//! hardware cursor is pushed after each mutation.

use super::Display;
use crate::arch::x86_64::vga::{
    Color, ColorCode, ScreenChar, BUFFER_HEIGHT, BUFFER_WIDTH,
};
use core::fmt;

/// Fixed shell prompt rendered at the start of every input line.
pub const PROMPT: &str = "ember -> ";

/// Column offset of the first editable cell on an input line.
pub const PROMPT_LENGTH: usize = PROMPT.len();

/// Default output attribute: white on black.
pub const DEFAULT_COLOR: ColorCode = ColorCode::new(Color::White, Color::Black);

/// Column where the `Screen c/t` indicator starts on row 0.
const INDICATOR_COLUMN: usize = BUFFER_WIDTH - 13;

/// Indicator template; the digits at offsets 7 and 9 are filled in.
const INDICATOR_TEXT: &[u8] = b"Screen  /  ";

/// Text console over a [`Display`] backend.
///
/// Tracks the write position and current attribute, wraps long lines and
/// scrolls when the cursor would leave the bottom row.
pub struct Console<D: Display> {
    display: D,
    row: usize,
    col: usize,
    color: ColorCode,
}

impl<D: Display> Console<D> {
    /// Creates a console over `display` without touching its contents.
    pub fn new(display: D) -> Self {
        Console {
            display,
            row: 0,
            col: 0,
            color: DEFAULT_COLOR,
        }
    }

    /// Current cursor row.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Current cursor column.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Current output attribute.
    pub fn color_code(&self) -> ColorCode {
        self.color
    }

    /// Replaces the output attribute wholesale (used by screen restore).
    pub fn set_color_code(&mut self, color: ColorCode) {
        self.color = color;
    }

    /// Sets the foreground and background colors for subsequent writes.
    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.color = ColorCode::new(foreground, background);
    }

    /// Shared access to the display backend.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Exclusive access to the display backend.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Moves the cursor to `(row, col)` and syncs the cursor device.
    ///
    /// Callers keep the position inside the grid.
    pub fn set_position(&mut self, row: usize, col: usize) {
        debug_assert!(row < BUFFER_HEIGHT && col < BUFFER_WIDTH);
        self.row = row;
        self.col = col;
        self.sync_cursor();
    }

    fn sync_cursor(&mut self) {
        self.display.move_cursor(self.row, self.col);
    }

    /// Writes one cell at `(x, y)` without moving the cursor.
    pub fn put(&mut self, byte: u8, color: ColorCode, x: usize, y: usize) {
        self.display.put(x, y, ScreenChar {
            ascii_character: byte,
            color_code: color,
        });
    }

    /// Writes a single byte at the cursor.
    ///
    /// Newline advances the row; printable bytes advance the column and
    /// wrap at the right edge. Either way, running past the bottom row
    /// scrolls first, never writes out of bounds.
    pub fn put_byte(&mut self, byte: u8) {
        if byte == b'\n' {
            self.row += 1;
            self.col = 0;
            if self.row >= BUFFER_HEIGHT {
                self.scroll();
            }
        } else {
            self.put(byte, self.color, self.col, self.row);
            self.col += 1;
            if self.col >= BUFFER_WIDTH {
                self.col = 0;
                self.row += 1;
                if self.row >= BUFFER_HEIGHT {
                    self.scroll();
                }
            }
        }
        self.sync_cursor();
    }

    /// Renders a byte slice through the write path.
    pub fn write_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.put_byte(byte);
        }
    }

    /// Shifts rows `[1, H)` up by one, blanks the bottom row with the
    /// current attribute and parks the cursor at the bottom left.
    ///
    /// The top row's content is genuinely discarded; there is no
    /// scrollback.
    pub fn scroll(&mut self) {
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                let cell = self.display.get(col, row);
                self.display.put(col, row - 1, cell);
            }
        }
        self.clear_row(BUFFER_HEIGHT - 1);
        self.row = BUFFER_HEIGHT - 1;
        self.col = 0;
        self.sync_cursor();
    }

    /// Blanks a single row with the current attribute.
    pub fn clear_row(&mut self, row: usize) {
        debug_assert!(row < BUFFER_HEIGHT, "row index out of bounds");

        let blank = ScreenChar::blank(self.color);
        for col in 0..BUFFER_WIDTH {
            self.display.put(col, row, blank);
        }
    }

    /// Blanks the entire grid with the current attribute and resets the
    /// cursor to the top left.
    pub fn clear(&mut self) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row);
        }
        self.row = 0;
        self.col = 0;
        self.sync_cursor();
    }

    /// Blanks the editable part of the current row and re-renders the
    /// prompt, leaving the cursor at the prompt column.
    pub fn clear_line(&mut self) {
        for col in PROMPT_LENGTH..BUFFER_WIDTH {
            self.put(b' ', self.color, col, self.row);
        }
        self.draw_prompt_glyphs();
        self.col = PROMPT_LENGTH;
        self.sync_cursor();
    }

    /// Renders the prompt at the start of the current row and parks the
    /// cursor right after it.
    pub fn write_prompt(&mut self) {
        self.draw_prompt_glyphs();
        self.col = PROMPT_LENGTH;
        self.sync_cursor();
    }

    fn draw_prompt_glyphs(&mut self) {
        let prompt_color = ColorCode::new(Color::LightGreen, Color::Black);
        for (col, &byte) in PROMPT.as_bytes().iter().enumerate() {
            self.put(byte, prompt_color, col, self.row);
        }
    }

    /// Redraws the `Screen c/t` indicator at the right end of row 0.
    ///
    /// `active` is 0-indexed; the overlay shows it 1-indexed.
    pub fn draw_indicator(&mut self, active: usize, total: usize) {
        let color = ColorCode::new(Color::White, Color::Black);
        for (offset, &byte) in INDICATOR_TEXT.iter().enumerate() {
            let glyph = match offset {
                7 => b'1' + active as u8,
                9 => b'0' + total as u8,
                _ => byte,
            };
            self.put(glyph, color, INDICATOR_COLUMN + offset, 0);
        }
    }
}

impl<D: Display> fmt::Write for Console<D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            match byte {
                // Printable ASCII or newline
                0x20..=0x7e | b'\n' => self.put_byte(byte),
                // Non-printable: show placeholder
                _ => self.put_byte(0xfe),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::BufferDisplay;

    fn console() -> Console<BufferDisplay> {
        let mut console = Console::new(BufferDisplay::new());
        console.clear();
        console
    }

    fn char_at(console: &Console<BufferDisplay>, x: usize, y: usize) -> u8 {
        console.display().get(x, y).ascii_character
    }

    #[test]
    fn put_byte_advances_and_wraps() {
        let mut c = console();
        for _ in 0..BUFFER_WIDTH {
            c.put_byte(b'x');
        }
        assert_eq!(c.row(), 1);
        assert_eq!(c.col(), 0);
        assert_eq!(char_at(&c, BUFFER_WIDTH - 1, 0), b'x');
    }

    #[test]
    fn newline_resets_column() {
        let mut c = console();
        c.write_bytes(b"ab\n");
        assert_eq!((c.row(), c.col()), (1, 0));
        assert_eq!(char_at(&c, 0, 0), b'a');
        assert_eq!(char_at(&c, 1, 0), b'b');
    }

    #[test]
    fn scroll_discards_top_row() {
        let mut c = console();
        c.write_bytes(b"top\n");
        for _ in 0..BUFFER_HEIGHT - 1 {
            c.put_byte(b'\n');
        }
        // The cursor just scrolled; "top" left through the top edge.
        assert_eq!((c.row(), c.col()), (BUFFER_HEIGHT - 1, 0));
        assert_eq!(char_at(&c, 0, 0), b' ');
    }

    #[test]
    fn full_grid_plus_k_lands_on_bottom_row() {
        let mut c = console();
        let k = 5;
        for _ in 0..BUFFER_HEIGHT * BUFFER_WIDTH {
            c.put_byte(b'a');
        }
        for _ in 0..k {
            c.put_byte(b'b');
        }
        for col in 0..k {
            assert_eq!(char_at(&c, col, BUFFER_HEIGHT - 1), b'b');
        }
        for col in k..BUFFER_WIDTH {
            assert_eq!(char_at(&c, col, BUFFER_HEIGHT - 1), b' ');
        }
        // Every surviving row above is from the final full screen.
        for row in 0..BUFFER_HEIGHT - 1 {
            assert_eq!(char_at(&c, 0, row), b'a');
        }
        assert_eq!(c.col(), k);
    }

    #[test]
    fn clear_resets_cursor() {
        let mut c = console();
        c.write_bytes(b"junk\n\njunk");
        c.clear();
        assert_eq!((c.row(), c.col()), (0, 0));
        assert_eq!(char_at(&c, 0, 0), b' ');
    }

    #[test]
    fn clear_line_keeps_prompt_and_resets_column() {
        let mut c = console();
        c.write_prompt();
        c.write_bytes(b"garbage");
        c.clear_line();
        assert_eq!(c.col(), PROMPT_LENGTH);
        assert_eq!(char_at(&c, 0, 0), b'e');
        assert_eq!(char_at(&c, PROMPT_LENGTH, 0), b' ');
        assert_eq!(char_at(&c, PROMPT_LENGTH + 3, 0), b' ');
    }

    #[test]
    fn indicator_is_one_indexed() {
        let mut c = console();
        c.draw_indicator(0, 2);
        let start = BUFFER_WIDTH - 13;
        assert_eq!(char_at(&c, start, 0), b'S');
        assert_eq!(char_at(&c, start + 7, 0), b'1');
        assert_eq!(char_at(&c, start + 8, 0), b'/');
        assert_eq!(char_at(&c, start + 9, 0), b'2');
    }

    #[test]
    fn cursor_device_tracks_writes() {
        let mut c = console();
        c.write_bytes(b"hi");
        assert_eq!(c.display().cursor, (0, 2));
    }
}
