//! Boot-time kernel self-tests.
//!
//! Runs the terminal state machine against an in-memory display and
//! reports over serial. These are the on-hardware counterpart of the
//! host unit tests; they exercise the same invariants without touching
//! the live VGA buffer.

use crate::serial_println;
use crate::terminal::decoder::{
    ALT_PRESS, ALT_RELEASE, LEFT_ARROW, RIGHT_ARROW, SHIFT_LEFT, SHIFT_LEFT_RELEASE,
};
use crate::terminal::{Display, KeyEvent, PROMPT_LENGTH};
use crate::testutil::{feed, terminal};

/// Runs all kernel self-tests.
pub fn run_all() {
    serial_println!("Running kernel self-tests...");

    test_screen_round_trip();
    test_line_capacity();
    test_modifier_symmetry();

    serial_println!("All kernel self-tests passed!");
}

fn test_screen_round_trip() {
    serial_println!("test_screen_round_trip... ");
    let mut t = terminal();
    feed(&mut t, &[0x1E]); // 'a'
    feed(&mut t, &[ALT_PRESS, RIGHT_ARROW]);
    assert_eq!(t.screens().active(), 1);
    feed(&mut t, &[LEFT_ARROW, ALT_RELEASE]);
    assert_eq!(t.screens().active(), 0);
    assert_eq!(
        t.console().display().get(PROMPT_LENGTH, 0).ascii_character,
        b'a'
    );
    serial_println!("[ok]");
}

fn test_line_capacity() {
    serial_println!("test_line_capacity... ");
    let mut t = terminal();
    for _ in 0..200 {
        t.append(b'x');
    }
    assert_eq!(t.line().len(), crate::terminal::shell::INPUT_CAPACITY);
    serial_println!("[ok]");
}

fn test_modifier_symmetry() {
    serial_println!("test_modifier_symmetry... ");
    let mut t = terminal();
    assert_eq!(t.handle_scancode(SHIFT_LEFT), None);
    assert_eq!(t.handle_scancode(0x1E), Some(KeyEvent::Char(b'A')));
    assert_eq!(t.handle_scancode(SHIFT_LEFT_RELEASE), None);
    assert_eq!(t.handle_scancode(0x1E), Some(KeyEvent::Char(b'a')));
    serial_println!("[ok]");
}
