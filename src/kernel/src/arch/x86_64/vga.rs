//! VGA text mode backend for x86_64.
//!
//! Owns the cell data model (character + packed color attribute) and the
//! memory-mapped 80x25 buffer at 0xB8000. Console state (cursor, current
//! attribute, scrolling) lives in [`crate::terminal::Console`]; this module
//! only reads and writes cells and drives the hardware cursor.

use crate::terminal::Display;
use core::ptr;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// Number of rows in VGA text mode.
pub const BUFFER_HEIGHT: usize = 25;

/// Number of columns in VGA text mode.
pub const BUFFER_WIDTH: usize = 80;

/// CRT controller index port (register selector).
const CRTC_INDEX_PORT: u16 = 0x3D4;

/// CRT controller data port.
const CRTC_DATA_PORT: u16 = 0x3D5;

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

/// Combined foreground and background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Creates a new color code from foreground and background colors.
    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }
}

/// A single character cell: an 8-bit code point plus a packed attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ScreenChar {
    /// The 8-bit character code point.
    pub ascii_character: u8,
    /// Packed foreground/background attribute.
    pub color_code: ColorCode,
}

impl ScreenChar {
    /// A blank cell (space) with the given attribute.
    pub const fn blank(color_code: ColorCode) -> ScreenChar {
        ScreenChar {
            ascii_character: b' ',
            color_code,
        }
    }
}

/// The VGA text buffer layout.
#[repr(transparent)]
struct Buffer {
    chars: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

/// The physical VGA text display.
///
/// Cell access goes through volatile operations; the hardware cursor is
/// moved with two index/data writes to the CRT controller.
pub struct VgaDisplay {
    /// Pointer to the VGA buffer.
    ///
    /// SAFETY: This pointer is valid for the lifetime of the kernel.
    /// The VGA buffer at 0xB8000 is always mapped in x86 text mode.
    buffer: *mut Buffer,
}

// SAFETY: VgaDisplay only accesses the VGA buffer through volatile
// operations. The buffer is memory-mapped hardware that exists for the
// kernel's lifetime. Access is synchronized through the TERMINAL spinlock.
unsafe impl Send for VgaDisplay {}

impl VgaDisplay {
    /// Creates a handle to the VGA text buffer.
    pub fn new() -> Self {
        VgaDisplay {
            // SAFETY: VGA_BUFFER_ADDR (0xB8000) is the standard VGA text
            // buffer address on x86 systems. This memory is always present
            // and mapped when running in text mode on hardware or in QEMU.
            buffer: VGA_BUFFER_ADDR as *mut Buffer,
        }
    }
}

impl Default for VgaDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for VgaDisplay {
    fn put(&mut self, x: usize, y: usize, cell: ScreenChar) {
        debug_assert!(x < BUFFER_WIDTH && y < BUFFER_HEIGHT);

        // SAFETY: Callers keep (x, y) inside the 80x25 grid; the pointer
        // was validated at construction time. Volatile write because the
        // VGA buffer is memory-mapped I/O read by hardware at any time.
        unsafe {
            ptr::write_volatile(&mut (*self.buffer).chars[y][x], cell);
        }
    }

    fn get(&self, x: usize, y: usize) -> ScreenChar {
        debug_assert!(x < BUFFER_WIDTH && y < BUFFER_HEIGHT);

        // SAFETY: Same bounds contract as `put`; volatile read because the
        // buffer is memory-mapped I/O.
        unsafe { ptr::read_volatile(&(*self.buffer).chars[y][x]) }
    }

    fn move_cursor(&mut self, row: usize, col: usize) {
        use x86_64::instructions::port::Port;

        let pos = (row * BUFFER_WIDTH + col) as u16;
        let mut index: Port<u8> = Port::new(CRTC_INDEX_PORT);
        let mut data: Port<u8> = Port::new(CRTC_DATA_PORT);

        // SAFETY: 0x3D4/0x3D5 are the standard CRT controller ports in VGA
        // text mode. Registers 0x0F/0x0E hold the low/high byte of the
        // 16-bit linear cursor position.
        unsafe {
            index.write(0x0F);
            data.write((pos & 0xFF) as u8);
            index.write(0x0E);
            data.write((pos >> 8) as u8);
        }
    }
}
