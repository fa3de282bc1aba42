//! Polled PS/2 keyboard controller access.
//!
//! No interrupts are enabled for input; the main loop busy-polls the
//! controller status port and reads one scancode byte at a time.

use x86_64::instructions::port::Port;

/// Keyboard controller status port.
const STATUS_PORT: u16 = 0x64;

/// Keyboard controller data port (the scancode byte).
const DATA_PORT: u16 = 0x60;

/// Status bit 0: output buffer full, a byte is ready on the data port.
const OUTPUT_BUFFER_FULL: u8 = 1;

/// Reads one scancode if the controller has a byte pending.
///
/// Returns `None` when no key event is waiting, so callers can poll
/// cooperatively instead of blocking on the port.
pub fn read_scancode() -> Option<u8> {
    let mut status: Port<u8> = Port::new(STATUS_PORT);
    let mut data: Port<u8> = Port::new(DATA_PORT);

    // SAFETY: 0x64/0x60 are the standard 8042 keyboard controller ports.
    // Reading them has no side effects beyond consuming the pending byte.
    unsafe {
        if status.read() & OUTPUT_BUFFER_FULL != 0 {
            Some(data.read())
        } else {
            None
        }
    }
}
