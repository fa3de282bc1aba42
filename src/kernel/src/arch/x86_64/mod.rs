//! x86_64 architecture support.
//!
//! VGA text output, serial, polled PS/2 keyboard input, segment table
//! setup, and CPU control for the poll-driven kernel.

pub mod gdt;
pub mod keyboard;
pub mod serial;
pub mod vga;

pub use vga::{Color, VgaDisplay};

use core::fmt;

/// Halts the CPU until the next interrupt.
///
/// Used in idle loops to reduce power consumption.
#[inline]
pub fn hlt() {
    x86_64::instructions::hlt();
}

/// Halts the CPU in an infinite loop.
///
/// Used after unrecoverable errors (panics).
pub fn halt_loop() -> ! {
    loop {
        hlt();
    }
}

/// Stops the machine: interrupts off, then halt forever.
pub fn halt() -> ! {
    x86_64::instructions::interrupts::disable();
    halt_loop()
}

/// Reboots the machine via the 8042 keyboard controller reset pulse.
pub fn reboot() -> ! {
    use x86_64::instructions::port::Port;

    // SAFETY: Writing 0xFE to the keyboard controller command port (0x64)
    // pulses the CPU reset line. This is the classic PS/2 reboot path.
    unsafe {
        let mut port: Port<u8> = Port::new(0x64);
        port.write(0xFE);
    }
    halt_loop()
}

/// Dumps the current stack pointers and the 16 most recent stack slots.
///
/// Walks from RSP toward RBP, so the output covers at most the current
/// frame.
pub fn print_stack(out: &mut impl fmt::Write) -> fmt::Result {
    let rsp: u64;
    let rbp: u64;

    // SAFETY: Reading RSP/RBP has no side effects.
    unsafe {
        core::arch::asm!("mov {}, rsp", out(reg) rsp, options(nomem, nostack));
        core::arch::asm!("mov {}, rbp", out(reg) rbp, options(nomem, nostack));
    }

    writeln!(out, "\n=== KERNEL STACK DUMP ===")?;
    writeln!(out, "Stack Pointer (RSP): {:#x}", rsp)?;
    writeln!(out, "Base Pointer (RBP):  {:#x}", rbp)?;
    writeln!(out, "Stack size used:     {} bytes\n", rbp.saturating_sub(rsp))?;

    writeln!(out, "Stack contents (16 most recent values):")?;
    writeln!(out, "Address            | Offset | Value")?;
    writeln!(out, "-------------------|--------|-------")?;

    let mut addr = rsp;
    let mut slot = 0;
    while slot < 16 && addr <= rbp {
        // SAFETY: addr lies inside the live kernel stack between RSP and
        // RBP, which is mapped readable memory.
        let value = unsafe { core::ptr::read_volatile(addr as *const u64) };
        writeln!(out, "{:#018x} | +{:<5} | {:#x}", addr, slot * 8, value)?;
        addr += 8;
        slot += 1;
    }
    Ok(())
}
