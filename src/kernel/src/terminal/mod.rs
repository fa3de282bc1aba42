//! Terminal subsystem: display surface, virtual screens, scancode
//! decoding and line editing.
//!
//! # Architecture
//!
//! - `console`: cursor/attribute state and the character write path
//! - `screens`: virtual-screen snapshots and switching
//! - `decoder`: scancode-set-1 translation with modifier tracking
//! - `shell`: bounded line editor and top-level input routing
//! - `commands`: built-in shell commands
//!
//! All state machines are methods on owned structs generic over
//! [`Display`], so the same code runs against the VGA buffer on hardware
//! and against an in-memory grid in tests. The global instance below
//! exists only for the boot path and the `print!` macros.

pub mod commands;
pub mod console;
pub mod decoder;
pub mod screens;
pub mod shell;

pub use commands::Command;
pub use console::{Console, PROMPT, PROMPT_LENGTH};
pub use decoder::{Decoder, KeyEvent, Modifiers};
pub use screens::{ScreenStore, NUM_SCREENS};
pub use shell::{LineEditor, Terminal};

use crate::arch::x86_64::vga::{Color, ScreenChar, VgaDisplay};
use core::fmt::{self, Write};
use spin::Mutex;

/// Access to a character grid and its cursor device.
///
/// The seam between the console state machine and hardware. Callers are
/// responsible for keeping coordinates inside the 80x25 grid; there is no
/// failure mode for out-of-range access and implementations only
/// debug-assert the bounds.
pub trait Display {
    /// Writes one cell at column `x`, row `y`.
    fn put(&mut self, x: usize, y: usize, cell: ScreenChar);

    /// Reads the cell at column `x`, row `y`.
    fn get(&self, x: usize, y: usize) -> ScreenChar;

    /// Pushes the logical cursor position to the cursor device.
    fn move_cursor(&mut self, row: usize, col: usize);
}

/// Global terminal instance driving the physical VGA display.
pub static TERMINAL: spin::Once<Mutex<Terminal<VgaDisplay>>> = spin::Once::new();

/// Initializes the global terminal.
///
/// Clears the display, renders the first prompt and snapshots the blank
/// state into every virtual screen. Idempotent.
pub fn init() {
    TERMINAL.call_once(|| Mutex::new(Terminal::new(VgaDisplay::new())));
}

/// Returns the global terminal, initializing if necessary.
fn get_terminal() -> &'static Mutex<Terminal<VgaDisplay>> {
    init();
    TERMINAL.get().expect("terminal not initialized")
}

/// Runs `f` with exclusive access to the global terminal.
pub fn with_terminal<R>(f: impl FnOnce(&mut Terminal<VgaDisplay>) -> R) -> R {
    f(&mut get_terminal().lock())
}

/// Prints to the VGA console without a newline.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::terminal::_print(format_args!($($arg)*))
    };
}

/// Prints to the VGA console with a newline.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    let terminal = get_terminal();
    terminal
        .lock()
        .console_mut()
        .write_fmt(args)
        .expect("vga write failed");
}

/// Sets the console output color.
pub fn set_color(foreground: Color, background: Color) {
    get_terminal().lock().console_mut().set_color(foreground, background);
}
