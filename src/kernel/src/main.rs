//! EmberOS kernel entry point.
//!
//! Boot order is an invariant: display up first, then the segment table,
//! then the prompt, then the keyboard poll loop. When built for a hosted
//! target this file is a stub so the library's unit tests can run.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod kernel_entry {
    use core::panic::PanicInfo;
    use ember_kernel::arch::x86_64::{self, gdt, keyboard, Color};
    use ember_kernel::boot::{self, Status};
    use ember_kernel::{println, serial_println, terminal};

    /// Multiboot header so a GRUB-style loader can find the kernel image.
    ///
    /// magic, flags, checksum; checksum makes the three sum to zero.
    #[link_section = ".multiboot"]
    #[no_mangle]
    pub static MULTIBOOT_HEADER: [u32; 3] =
        [0x1BAD_B002, 0, 0u32.wrapping_sub(0x1BAD_B002)];

    /// Entry point jumped to by the loader.
    #[no_mangle]
    pub extern "C" fn _start() -> ! {
        kernel_main()
    }

    /// Kernel main: initialize, self-test, then poll the keyboard forever.
    fn kernel_main() -> ! {
        // Phase 1: serial, logging and the display.
        ember_kernel::init();
        boot::banner::print_banner();
        boot::log(Status::Ok, "Serial port initialized");
        boot::log(Status::Ok, "Display initialized");

        // Phase 2: segment table, before anything user-visible runs.
        gdt::init();
        boot::log(Status::Ok, "GDT loaded");
        log::info!("boot: GDT loaded");

        // Phase 3: self-tests against the in-memory display backend.
        ember_kernel::tests::run_all();
        boot::log(Status::Ok, "Kernel self-tests passed");

        terminal::set_color(Color::Cyan, Color::Black);
        println!("\n Type 'help' for available commands.\n");
        terminal::set_color(Color::White, Color::Black);
        log::info!("boot: entering keyboard poll loop");

        // Phase 4: prompt, then busy-poll the keyboard controller.
        terminal::with_terminal(|t| t.prompt());
        loop {
            match keyboard::read_scancode() {
                Some(scancode) => {
                    terminal::with_terminal(|t| {
                        t.handle_scancode(scancode);
                    });
                }
                None => core::hint::spin_loop(),
            }
        }
    }

    /// Panic handler.
    ///
    /// Called when the kernel encounters an unrecoverable error.
    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        serial_println!("KERNEL PANIC: {}", info);

        terminal::set_color(Color::LightRed, Color::Black);
        println!("\n\n!!! KERNEL PANIC !!!");
        terminal::set_color(Color::White, Color::Black);
        println!("{}", info);

        x86_64::halt_loop()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
