//! EmberOS Kernel
//!
//! A minimal bare-metal kernel whose job is a polled text-mode terminal:
//! VGA display surface, scancode-set-1 keyboard decoding, a bounded line
//! editor and two virtual consoles multiplexed onto the physical display.
//!
//! # Architecture
//!
//! - `arch`: platform-specific code (VGA, serial, keyboard port, GDT)
//! - `terminal`: the console state machine, screens, decoder and shell
//! - `boot`: colored boot logging and the banner
//!
//! # Design constraints
//!
//! Single execution context, no interrupts, no heap. Input is busy-polled
//! and every operation runs to completion, so display and screen-store
//! mutations are implicitly serialized.

#![no_std]
#![warn(missing_docs)]

pub mod arch;
#[cfg(target_arch = "x86_64")]
pub mod boot;
#[cfg(target_arch = "x86_64")]
pub mod logger;
pub mod terminal;
pub mod tests;
pub mod testutil;

/// Initializes core kernel subsystems: serial, logging and the display.
///
/// Called first thing in the boot process, before the segment table is
/// loaded and the prompt is rendered.
pub fn init() {
    #[cfg(target_arch = "x86_64")]
    {
        arch::x86_64::serial::init();
        logger::init();
        terminal::init();
    }
}
