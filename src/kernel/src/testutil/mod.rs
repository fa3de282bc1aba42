//! Test support: an in-memory display backend and input helpers.
//!
//! [`BufferDisplay`] implements [`Display`] over a plain grid so the
//! whole terminal state machine runs on the host in unit tests and in
//! the boot-time self-test pass, with no VGA hardware behind it.

use crate::arch::x86_64::vga::{
    Color, ColorCode, ScreenChar, BUFFER_HEIGHT, BUFFER_WIDTH,
};
use crate::terminal::{Display, Terminal};

/// An in-memory 80x25 character grid with a tracked cursor position.
pub struct BufferDisplay {
    /// The cell grid, indexed `[row][col]`.
    pub cells: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
    /// Last position pushed to the (simulated) cursor device, `(row, col)`.
    pub cursor: (usize, usize),
}

impl BufferDisplay {
    /// Creates a blank grid with the cursor at the origin.
    pub fn new() -> Self {
        let blank = ScreenChar::blank(ColorCode::new(Color::White, Color::Black));
        BufferDisplay {
            cells: [[blank; BUFFER_WIDTH]; BUFFER_HEIGHT],
            cursor: (0, 0),
        }
    }
}

impl Default for BufferDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for BufferDisplay {
    fn put(&mut self, x: usize, y: usize, cell: ScreenChar) {
        debug_assert!(x < BUFFER_WIDTH && y < BUFFER_HEIGHT);
        self.cells[y][x] = cell;
    }

    fn get(&self, x: usize, y: usize) -> ScreenChar {
        debug_assert!(x < BUFFER_WIDTH && y < BUFFER_HEIGHT);
        self.cells[y][x]
    }

    fn move_cursor(&mut self, row: usize, col: usize) {
        self.cursor = (row, col);
    }
}

/// A fully initialized terminal over an in-memory display.
pub fn terminal() -> Terminal<BufferDisplay> {
    Terminal::new(BufferDisplay::new())
}

/// Feeds a sequence of raw scancodes through the terminal.
pub fn feed(terminal: &mut Terminal<BufferDisplay>, scancodes: &[u8]) {
    for &scancode in scancodes {
        terminal.handle_scancode(scancode);
    }
}
