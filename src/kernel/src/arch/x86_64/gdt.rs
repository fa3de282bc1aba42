//! Global Descriptor Table setup.
//!
//! Builds a flat kernel/user segment layout and loads it once at boot.
//! The rest of the kernel treats this as an opaque service: `init()` at
//! boot, `print_to()` for the `gdt` shell command.

use core::fmt;
use lazy_static::lazy_static;
use x86_64::instructions::segmentation::{Segment, CS, DS, ES, SS};
use x86_64::instructions::tables::sgdt;
use x86_64::structures::gdt::{Descriptor, GlobalDescriptorTable, SegmentSelector};

/// Segment selectors handed out by the GDT build.
struct Selectors {
    kernel_code: SegmentSelector,
    kernel_data: SegmentSelector,
    user_code: SegmentSelector,
    user_data: SegmentSelector,
}

lazy_static! {
    static ref GDT: (GlobalDescriptorTable, Selectors) = {
        let mut gdt = GlobalDescriptorTable::new();

        let kernel_code = gdt.add_entry(Descriptor::kernel_code_segment());
        let kernel_data = gdt.add_entry(Descriptor::kernel_data_segment());
        let user_code = gdt.add_entry(Descriptor::user_code_segment());
        let user_data = gdt.add_entry(Descriptor::user_data_segment());

        (
            gdt,
            Selectors {
                kernel_code,
                kernel_data,
                user_code,
                user_data,
            },
        )
    };
}

/// Loads the GDT and reloads the segment registers.
///
/// Must be called exactly once, after the display is up and before the
/// first prompt is rendered.
pub fn init() {
    GDT.0.load();

    // SAFETY: The selectors reference valid code/data descriptors in the
    // table that was just loaded.
    unsafe {
        CS::set_reg(GDT.1.kernel_code);
        DS::set_reg(GDT.1.kernel_data);
        ES::set_reg(GDT.1.kernel_data);
        SS::set_reg(GDT.1.kernel_data);
    }
}

/// Writes a diagnostic view of the live GDTR and selectors to `out`.
pub fn print_to(out: &mut impl fmt::Write) -> fmt::Result {
    let gdtr = sgdt();

    writeln!(out, "GDT base:  {:#x}", gdtr.base.as_u64())?;
    writeln!(out, "GDT limit: {:#x}", gdtr.limit)?;
    writeln!(out, "Selectors:")?;
    writeln!(out, "  kernel code: {:#x}", GDT.1.kernel_code.0)?;
    writeln!(out, "  kernel data: {:#x}", GDT.1.kernel_data.0)?;
    writeln!(out, "  user code:   {:#x}", GDT.1.user_code.0)?;
    writeln!(out, "  user data:   {:#x}", GDT.1.user_data.0)?;
    Ok(())
}
