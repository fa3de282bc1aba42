//! `log` facade wired to the serial port.
//!
//! Records go out over COM1 so kernel messages reach the host console
//! even when the VGA display is busy with the shell.

use log::{LevelFilter, Metadata, Record};

struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl log::Log for SerialLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        crate::serial_println!("[{:>5}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Installs the serial logger as the global `log` sink.
///
/// Idempotent: a second call leaves the first registration in place.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}
