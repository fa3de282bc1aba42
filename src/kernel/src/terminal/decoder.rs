//! Scancode-set-1 decoding with modifier tracking.
//!
//! The decoder is stateless between bytes except for the four modifier
//! flags. Ordinary keys translate through two fixed 128-entry tables
//! (unshifted and shifted); everything with the high bit set that is not
//! a recognized modifier release is an ordinary key-release and decodes
//! to nothing.

/// Control press scancode.
pub const CTRL_PRESS: u8 = 0x1D;
/// Control release scancode.
pub const CTRL_RELEASE: u8 = 0x9D;
/// The `C` key (interrupt when control is held).
pub const KEY_C: u8 = 0x2E;
/// The `L` key (redraw when control is held).
pub const KEY_L: u8 = 0x26;
/// Left shift press scancode.
pub const SHIFT_LEFT: u8 = 0x2A;
/// Right shift press scancode.
pub const SHIFT_RIGHT: u8 = 0x36;
/// Left shift release scancode.
pub const SHIFT_LEFT_RELEASE: u8 = 0xAA;
/// Right shift release scancode.
pub const SHIFT_RIGHT_RELEASE: u8 = 0xB6;
/// Caps-lock press scancode (toggle semantics, release is ignored).
pub const CAPS_LOCK: u8 = 0x3A;
/// Alt press scancode.
pub const ALT_PRESS: u8 = 0x38;
/// Alt release scancode.
pub const ALT_RELEASE: u8 = 0xB8;
/// Left arrow scancode.
pub const LEFT_ARROW: u8 = 0x4B;
/// Right arrow scancode.
pub const RIGHT_ARROW: u8 = 0x4D;
/// Enter scancode (bypasses the lookup tables).
pub const ENTER: u8 = 0x1C;

/// Unshifted scancode-set-1 to ASCII table. 0 means unmapped.
#[rustfmt::skip]
static SCANCODE_TO_ASCII: [u8; 128] = {
    let mut table = [0u8; 128];
    let mapped: [u8; 58] = [
        0, 27, b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8',
        b'9', b'0', b'-', b'=', 0x08, b'\t',
        b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', b'o', b'p',
        b'[', b']', 0, 0,
        b'a', b's', b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';',
        b'\'', b'`', 0, b'\\', b'z', b'x', b'c', b'v', b'b', b'n',
        b'm', b',', b'.', b'/', 0, b'*', 0, b' ',
    ];
    let mut i = 0;
    while i < mapped.len() {
        table[i] = mapped[i];
        i += 1;
    }
    table
};

/// Shifted scancode-set-1 to ASCII table. 0 means unmapped.
#[rustfmt::skip]
static SCANCODE_SHIFT: [u8; 128] = {
    let mut table = [0u8; 128];
    let mapped: [u8; 58] = [
        0, 27, b'!', b'@', b'#', b'$', b'%', b'^', b'&', b'*',
        b'(', b')', b'_', b'+', 0x08, b'\t',
        b'Q', b'W', b'E', b'R', b'T', b'Y', b'U', b'I', b'O', b'P',
        b'{', b'}', 0, 0,
        b'A', b'S', b'D', b'F', b'G', b'H', b'J', b'K', b'L', b':',
        b'"', b'~', 0, b'|', b'Z', b'X', b'C', b'V', b'B', b'N',
        b'M', b'<', b'>', b'?', 0, b'*', 0, b' ',
    ];
    let mut i = 0;
    while i < mapped.len() {
        table[i] = mapped[i];
        i += 1;
    }
    table
};

/// Bounds-checked table lookup: bytes >= 128 or unmapped entries decode
/// to nothing.
fn lookup(table: &[u8; 128], scancode: u8) -> Option<u8> {
    match table.get(scancode as usize) {
        Some(&0) | None => None,
        Some(&byte) => Some(byte),
    }
}

/// The four modifier flags tracked across scancodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Either shift key is currently held.
    pub shift: bool,
    /// Caps-lock toggle state.
    pub caps_lock: bool,
    /// Either control key is currently held.
    pub ctrl: bool,
    /// Either alt key is currently held.
    pub alt: bool,
}

/// A decoded key event, ready for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable 8-bit character.
    Char(u8),
    /// Line submit.
    Enter,
    /// Remove the character left of the cursor.
    Backspace,
    /// Control+C: abort the current line.
    Interrupt,
    /// Control+L: clear and redraw the display.
    ClearScreen,
    /// Move the edit cursor one column left.
    CursorLeft,
    /// Move the edit cursor one column right.
    CursorRight,
    /// Alt+left: cycle to the previous virtual screen.
    PrevScreen,
    /// Alt+right: cycle to the next virtual screen.
    NextScreen,
}

/// Stateful scancode translator.
#[derive(Debug, Default)]
pub struct Decoder {
    modifiers: Modifiers,
}

impl Decoder {
    /// Creates a decoder with all modifiers released.
    pub fn new() -> Self {
        Decoder::default()
    }

    /// Current modifier state.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Feeds one raw scancode byte, returning the event it decodes to.
    ///
    /// Routing priority: alt tracking and alt+arrow screen switching
    /// first, then plain arrow navigation, then control tracking and
    /// control combinations, then shift/caps-lock, then enter, then
    /// ordinary table decode. Control combinations must come before the
    /// table or they would be mistaken for ordinary keys.
    pub fn decode(&mut self, scancode: u8) -> Option<KeyEvent> {
        let m = &mut self.modifiers;
        match scancode {
            ALT_PRESS => {
                m.alt = true;
                None
            }
            ALT_RELEASE => {
                m.alt = false;
                None
            }
            LEFT_ARROW if m.alt => Some(KeyEvent::PrevScreen),
            RIGHT_ARROW if m.alt => Some(KeyEvent::NextScreen),
            LEFT_ARROW => Some(KeyEvent::CursorLeft),
            RIGHT_ARROW => Some(KeyEvent::CursorRight),
            CTRL_PRESS => {
                m.ctrl = true;
                None
            }
            CTRL_RELEASE => {
                m.ctrl = false;
                None
            }
            KEY_C if m.ctrl => Some(KeyEvent::Interrupt),
            KEY_L if m.ctrl => Some(KeyEvent::ClearScreen),
            SHIFT_LEFT | SHIFT_RIGHT => {
                m.shift = true;
                None
            }
            SHIFT_LEFT_RELEASE | SHIFT_RIGHT_RELEASE => {
                m.shift = false;
                None
            }
            CAPS_LOCK => {
                m.caps_lock = !m.caps_lock;
                None
            }
            ENTER => Some(KeyEvent::Enter),
            // While control is held, ordinary decode is suppressed.
            _ if m.ctrl => None,
            _ => {
                let table = if m.shift {
                    &SCANCODE_SHIFT
                } else {
                    &SCANCODE_TO_ASCII
                };
                let mut byte = lookup(table, scancode)?;
                // Caps-lock flips letter case on top of the shift table:
                // caps alone yields uppercase, shift+caps lowercase.
                if m.caps_lock && byte.is_ascii_alphabetic() {
                    byte = if byte.is_ascii_lowercase() {
                        byte.to_ascii_uppercase()
                    } else {
                        byte.to_ascii_lowercase()
                    };
                }
                if byte == 0x08 {
                    Some(KeyEvent::Backspace)
                } else {
                    Some(KeyEvent::Char(byte))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_A: u8 = 0x1E;
    const KEY_1: u8 = 0x02;
    const KEY_BACKSPACE: u8 = 0x0E;

    #[test]
    fn plain_letter() {
        let mut d = Decoder::new();
        assert_eq!(d.decode(KEY_A), Some(KeyEvent::Char(b'a')));
    }

    #[test]
    fn shift_press_and_release_are_symmetric() {
        let mut d = Decoder::new();
        assert_eq!(d.decode(SHIFT_LEFT), None);
        assert!(d.modifiers().shift);
        assert_eq!(d.decode(KEY_A), Some(KeyEvent::Char(b'A')));
        assert_eq!(d.decode(KEY_1), Some(KeyEvent::Char(b'!')));
        assert_eq!(d.decode(SHIFT_LEFT_RELEASE), None);
        assert!(!d.modifiers().shift);
        assert_eq!(d.decode(KEY_A), Some(KeyEvent::Char(b'a')));
        assert_eq!(d.decode(KEY_1), Some(KeyEvent::Char(b'1')));
    }

    #[test]
    fn caps_lock_toggles_and_flips_letters_only() {
        let mut d = Decoder::new();
        assert_eq!(d.decode(CAPS_LOCK), None);
        assert_eq!(d.decode(KEY_A), Some(KeyEvent::Char(b'A')));
        // Digits are unaffected by caps-lock.
        assert_eq!(d.decode(KEY_1), Some(KeyEvent::Char(b'1')));
        // Shift+caps on a letter is the double negation: lowercase.
        assert_eq!(d.decode(SHIFT_RIGHT), None);
        assert_eq!(d.decode(KEY_A), Some(KeyEvent::Char(b'a')));
        assert_eq!(d.decode(SHIFT_RIGHT_RELEASE), None);
        // Second caps-lock press toggles back off.
        assert_eq!(d.decode(CAPS_LOCK), None);
        assert_eq!(d.decode(KEY_A), Some(KeyEvent::Char(b'a')));
    }

    #[test]
    fn control_combinations_win_over_plain_decode() {
        let mut d = Decoder::new();
        // Without control these are ordinary letters.
        assert_eq!(d.decode(KEY_C), Some(KeyEvent::Char(b'c')));
        assert_eq!(d.decode(KEY_L), Some(KeyEvent::Char(b'l')));
        assert_eq!(d.decode(CTRL_PRESS), None);
        assert_eq!(d.decode(KEY_C), Some(KeyEvent::Interrupt));
        assert_eq!(d.decode(KEY_L), Some(KeyEvent::ClearScreen));
        // Any other key is swallowed while control is held.
        assert_eq!(d.decode(KEY_A), None);
        assert_eq!(d.decode(CTRL_RELEASE), None);
        assert_eq!(d.decode(KEY_A), Some(KeyEvent::Char(b'a')));
    }

    #[test]
    fn alt_turns_arrows_into_screen_switches() {
        let mut d = Decoder::new();
        assert_eq!(d.decode(LEFT_ARROW), Some(KeyEvent::CursorLeft));
        assert_eq!(d.decode(RIGHT_ARROW), Some(KeyEvent::CursorRight));
        assert_eq!(d.decode(ALT_PRESS), None);
        assert_eq!(d.decode(LEFT_ARROW), Some(KeyEvent::PrevScreen));
        assert_eq!(d.decode(RIGHT_ARROW), Some(KeyEvent::NextScreen));
        assert_eq!(d.decode(ALT_RELEASE), None);
        assert_eq!(d.decode(LEFT_ARROW), Some(KeyEvent::CursorLeft));
    }

    #[test]
    fn enter_bypasses_the_tables() {
        let mut d = Decoder::new();
        assert_eq!(d.decode(ENTER), Some(KeyEvent::Enter));
        // Shift does not change line submit.
        d.decode(SHIFT_LEFT);
        assert_eq!(d.decode(ENTER), Some(KeyEvent::Enter));
    }

    #[test]
    fn backspace_is_an_edit_event() {
        let mut d = Decoder::new();
        assert_eq!(d.decode(KEY_BACKSPACE), Some(KeyEvent::Backspace));
    }

    #[test]
    fn releases_and_unmapped_bytes_decode_to_nothing() {
        let mut d = Decoder::new();
        // Ordinary key release (high bit set, not a modifier release).
        assert_eq!(d.decode(KEY_A | 0x80), None);
        // Unmapped press codes (F1, and a hole in the table).
        assert_eq!(d.decode(0x3B), None);
        assert_eq!(d.decode(0x7F), None);
    }
}
