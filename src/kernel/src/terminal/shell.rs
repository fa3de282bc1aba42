//! Bounded line editing and top-level input routing.
//!
//! [`LineEditor`] accumulates decoded characters into a fixed buffer;
//! [`Terminal`] ties the console, virtual screens, decoder and line
//! editor together and is the single entry point for raw scancodes.

use super::console::{Console, PROMPT_LENGTH};
use super::decoder::{Decoder, KeyEvent};
use super::screens::{ScreenStore, NUM_SCREENS};
use super::{Command, Display};
use crate::arch::x86_64::vga::{Color, BUFFER_WIDTH};

/// Maximum input line length: one display row minus the prompt, leaving
/// the last column free.
pub const INPUT_CAPACITY: usize = BUFFER_WIDTH - 1 - PROMPT_LENGTH;

/// Fixed-capacity input line buffer.
///
/// Characters beyond the capacity are dropped, never truncated after the
/// fact.
pub struct LineEditor {
    buf: [u8; INPUT_CAPACITY],
    len: usize,
}

impl LineEditor {
    /// Creates an empty line.
    pub const fn new() -> Self {
        LineEditor {
            buf: [0; INPUT_CAPACITY],
            len: 0,
        }
    }

    /// Number of buffered characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the line is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The buffered line as a string slice.
    pub fn as_str(&self) -> &str {
        // Table output is pure ASCII, so this never fails.
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Appends a byte; a full buffer drops it and reports `false`.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.len >= INPUT_CAPACITY {
            return false;
        }
        self.buf[self.len] = byte;
        self.len += 1;
        true
    }

    /// Removes and returns the last buffered byte.
    pub fn pop(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.buf[self.len])
    }

    /// Empties the line.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// The complete terminal: console, virtual screens, decoder, line editor.
pub struct Terminal<D: Display> {
    console: Console<D>,
    screens: ScreenStore,
    decoder: Decoder,
    line: LineEditor,
}

impl<D: Display> Terminal<D> {
    /// Creates the terminal over `display`: clears it, renders the first
    /// prompt and snapshots that blank state into every virtual screen.
    pub fn new(display: D) -> Self {
        let mut console = Console::new(display);
        console.clear();
        console.write_prompt();
        console.draw_indicator(0, NUM_SCREENS);
        let screens = ScreenStore::new(&console);
        Terminal {
            console,
            screens,
            decoder: Decoder::new(),
            line: LineEditor::new(),
        }
    }

    /// The underlying console.
    pub fn console(&self) -> &Console<D> {
        &self.console
    }

    /// Exclusive access to the underlying console.
    pub fn console_mut(&mut self) -> &mut Console<D> {
        &mut self.console
    }

    /// The virtual screen store.
    pub fn screens(&self) -> &ScreenStore {
        &self.screens
    }

    /// The current input line.
    pub fn line(&self) -> &LineEditor {
        &self.line
    }

    /// Renders the prompt and the screen indicator on the current row.
    pub fn prompt(&mut self) {
        self.console.write_prompt();
        self.console.draw_indicator(self.screens.active(), NUM_SCREENS);
    }

    /// Feeds one raw scancode through decode and routing.
    ///
    /// This is the cooperative poll step: callable from the bare-metal
    /// loop or from a test harness feeding synthetic bytes. Returns the
    /// event the byte decoded to, if any.
    pub fn handle_scancode(&mut self, scancode: u8) -> Option<KeyEvent> {
        let event = self.decoder.decode(scancode)?;
        self.handle_event(event);
        Some(event)
    }

    /// Applies a decoded key event.
    pub fn handle_event(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Char(byte) => {
                self.append(byte);
            }
            KeyEvent::Enter => self.submit(),
            KeyEvent::Backspace => {
                self.backspace();
            }
            KeyEvent::Interrupt => self.abort(),
            KeyEvent::ClearScreen => self.redraw(),
            KeyEvent::CursorLeft => {
                if self.console.col() > PROMPT_LENGTH {
                    let (row, col) = (self.console.row(), self.console.col());
                    self.console.set_position(row, col - 1);
                }
            }
            KeyEvent::CursorRight => {
                if self.console.col() < BUFFER_WIDTH - 1 {
                    let (row, col) = (self.console.row(), self.console.col());
                    self.console.set_position(row, col + 1);
                }
            }
            KeyEvent::PrevScreen => {
                let id = self.screens.prev_id();
                self.switch_to(id);
            }
            KeyEvent::NextScreen => {
                let id = self.screens.next_id();
                self.switch_to(id);
            }
        }
    }

    /// Appends a character to the line and echoes it.
    ///
    /// Dropped (returns `false`) when the line is at capacity or the
    /// cursor already sits in the last column.
    pub fn append(&mut self, byte: u8) -> bool {
        if self.console.col() >= BUFFER_WIDTH - 1 {
            return false;
        }
        if !self.line.push(byte) {
            return false;
        }
        self.console.put_byte(byte);
        true
    }

    /// Removes the character left of the cursor.
    ///
    /// Ignored at or left of the prompt column.
    pub fn backspace(&mut self) -> bool {
        if self.console.col() <= PROMPT_LENGTH {
            return false;
        }
        self.line.pop();
        let (row, col) = (self.console.row(), self.console.col() - 1);
        self.console.put(b' ', self.console.color_code(), col, row);
        self.console.set_position(row, col);
        true
    }

    /// Submits the line: newline, dispatch, reset, fresh prompt.
    pub fn submit(&mut self) {
        self.console.put_byte(b'\n');
        if let Some(command) = Command::parse(self.line.as_str()) {
            command.execute(&mut self.console);
        }
        self.line.clear();
        self.prompt();
    }

    /// Control+C: renders a highlighted `^C`, advances to a fresh line
    /// and re-renders the prompt.
    ///
    /// Deliberately does not clear the pending line buffer; whatever was
    /// typed stays queued for the next submit.
    pub fn abort(&mut self) {
        let saved = self.console.color_code();
        self.console.set_color(Color::LightRed, Color::Black);
        self.console.write_bytes(b"^C");
        self.console.set_color_code(saved);
        self.console.put_byte(b'\n');
        self.prompt();
    }

    /// Control+L: clears the whole display and re-renders the prompt.
    pub fn redraw(&mut self) {
        self.console.clear();
        self.prompt();
    }

    /// Switches to virtual screen `id`; out-of-range or already-active
    /// ids are ignored.
    pub fn switch_to(&mut self, id: usize) -> bool {
        self.screens.switch_to(id, &mut self.console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::decoder::{
        ALT_PRESS, ALT_RELEASE, CTRL_PRESS, CTRL_RELEASE, ENTER, KEY_C,
        LEFT_ARROW, RIGHT_ARROW,
    };
    use crate::testutil::{feed, terminal, BufferDisplay};

    const KEY_H: u8 = 0x23;
    const KEY_E: u8 = 0x12;
    const KEY_L: u8 = 0x26;
    const KEY_P: u8 = 0x19;
    const KEY_A: u8 = 0x1E;
    const KEY_BACKSPACE: u8 = 0x0E;

    fn char_at(t: &Terminal<BufferDisplay>, x: usize, y: usize) -> u8 {
        t.console().display().get(x, y).ascii_character
    }

    #[test]
    fn typing_echoes_after_the_prompt() {
        let mut t = terminal();
        feed(&mut t, &[KEY_H, KEY_E]);
        assert_eq!(t.line().as_str(), "he");
        assert_eq!(char_at(&t, PROMPT_LENGTH, 0), b'h');
        assert_eq!(char_at(&t, PROMPT_LENGTH + 1, 0), b'e');
        assert_eq!(t.console().col(), PROMPT_LENGTH + 2);
    }

    #[test]
    fn help_line_reaches_the_dispatcher_and_resets() {
        let mut t = terminal();
        feed(&mut t, &[KEY_H, KEY_E, KEY_L, KEY_P]);
        assert_eq!(t.line().as_str(), "help");
        feed(&mut t, &[ENTER]);
        // The dispatcher ran: help output is on the display.
        assert_eq!(char_at(&t, 0, 1), b'C');
        // The line reset and the prompt came back on a fresh row.
        assert!(t.line().is_empty());
        assert_eq!(t.console().col(), PROMPT_LENGTH);
        assert_eq!(char_at(&t, 0, t.console().row()), b'e');
    }

    #[test]
    fn backspace_stops_at_the_prompt() {
        let mut t = terminal();
        feed(&mut t, &[KEY_A, KEY_BACKSPACE]);
        assert!(t.line().is_empty());
        assert_eq!(t.console().col(), PROMPT_LENGTH);
        assert_eq!(char_at(&t, PROMPT_LENGTH, 0), b' ');
        // At the boundary it is a no-op.
        assert!(!t.backspace());
        assert_eq!(t.console().col(), PROMPT_LENGTH);
    }

    #[test]
    fn line_capacity_is_bounded() {
        let mut t = terminal();
        for _ in 0..INPUT_CAPACITY + 10 {
            feed(&mut t, &[KEY_A]);
        }
        assert_eq!(t.line().len(), INPUT_CAPACITY);
        // The cursor never reaches the last column's far side.
        assert!(t.console().col() <= BUFFER_WIDTH - 1);
        assert!(!t.append(b'x'));
    }

    #[test]
    fn arrows_move_within_the_line_without_editing() {
        let mut t = terminal();
        feed(&mut t, &[KEY_A, KEY_A]);
        feed(&mut t, &[LEFT_ARROW, LEFT_ARROW, LEFT_ARROW]);
        // Clamped at the prompt column.
        assert_eq!(t.console().col(), PROMPT_LENGTH);
        assert_eq!(t.line().as_str(), "aa");
        feed(&mut t, &[RIGHT_ARROW]);
        assert_eq!(t.console().col(), PROMPT_LENGTH + 1);
    }

    #[test]
    fn ctrl_c_keeps_the_pending_buffer() {
        let mut t = terminal();
        feed(&mut t, &[KEY_A, KEY_A]);
        let row = t.console().row();
        feed(&mut t, &[CTRL_PRESS, KEY_C, CTRL_RELEASE]);
        // ^C rendered at the old position, prompt on the next row.
        assert_eq!(char_at(&t, PROMPT_LENGTH + 2, row), b'^');
        assert_eq!(char_at(&t, PROMPT_LENGTH + 3, row), b'C');
        assert_eq!(t.console().row(), row + 1);
        assert_eq!(t.console().col(), PROMPT_LENGTH);
        // The typed characters survive the abort.
        assert_eq!(t.line().as_str(), "aa");
    }

    #[test]
    fn ctrl_l_clears_and_reprompts() {
        let mut t = terminal();
        feed(&mut t, &[KEY_A, ENTER, KEY_A]);
        feed(&mut t, &[CTRL_PRESS, KEY_L, CTRL_RELEASE]);
        assert_eq!(t.console().row(), 0);
        assert_eq!(t.console().col(), PROMPT_LENGTH);
        assert_eq!(char_at(&t, 0, 0), b'e');
    }

    #[test]
    fn alt_arrows_cycle_screens_and_preserve_content() {
        let mut t = terminal();
        feed(&mut t, &[KEY_A]);
        assert_eq!(char_at(&t, PROMPT_LENGTH, 0), b'a');

        feed(&mut t, &[ALT_PRESS, RIGHT_ARROW]);
        assert_eq!(t.screens().active(), 1);
        // Screen 1 is the blank boot snapshot: prompt only.
        assert_eq!(char_at(&t, PROMPT_LENGTH, 0), b' ');

        feed(&mut t, &[LEFT_ARROW, ALT_RELEASE]);
        assert_eq!(t.screens().active(), 0);
        assert_eq!(char_at(&t, PROMPT_LENGTH, 0), b'a');
        assert_eq!(t.line().as_str(), "a");
    }

    #[test]
    fn switch_wraps_in_both_directions() {
        let mut t = terminal();
        feed(&mut t, &[ALT_PRESS, LEFT_ARROW]);
        assert_eq!(t.screens().active(), NUM_SCREENS - 1);
        feed(&mut t, &[RIGHT_ARROW, ALT_RELEASE]);
        assert_eq!(t.screens().active(), 0);
    }
}
