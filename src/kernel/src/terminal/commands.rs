//! Built-in shell commands.
//!
//! Exact-match, case-sensitive, whitespace-terminated tokens. The
//! dispatcher receives the completed line from the line editor and writes
//! its output through the console's `fmt::Write` sink.

use super::{Console, Display};
use crate::arch::x86_64::vga::Color;
use crate::arch::x86_64::{self, gdt};
use core::fmt::Write;

/// Shell command types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Display help information.
    Help,
    /// Clear the screen.
    Clear,
    /// Reboot the machine.
    Reboot,
    /// Stop the CPU.
    Halt,
    /// Print the segment descriptor table.
    Gdt,
    /// Dump the kernel stack.
    Stack,
    /// Anything that matched no command.
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Parses an input line into a command.
    ///
    /// Only the first whitespace-terminated token matters; matching is
    /// exact and case-sensitive. Empty input parses to nothing.
    pub fn parse(input: &'a str) -> Option<Command<'a>> {
        let token = input.split_whitespace().next()?;
        Some(match token {
            "help" => Command::Help,
            "clear" => Command::Clear,
            "reboot" => Command::Reboot,
            "halt" => Command::Halt,
            "gdt" => Command::Gdt,
            "stack" => Command::Stack,
            other => Command::Unknown(other),
        })
    }

    /// Executes the command, writing output to `console`.
    pub fn execute<D: Display>(self, console: &mut Console<D>) {
        match self {
            Command::Help => cmd_help(console),
            Command::Clear => console.clear(),
            Command::Reboot => x86_64::reboot(),
            Command::Halt => x86_64::halt(),
            Command::Gdt => {
                let _ = gdt::print_to(console);
            }
            Command::Stack => {
                let _ = x86_64::print_stack(console);
            }
            Command::Unknown(token) => {
                let saved = console.color_code();
                console.set_color(Color::LightRed, Color::Black);
                let _ = writeln!(console, "Unknown command: {}", token);
                console.set_color_code(saved);
                let _ = writeln!(console, "Type 'help' for available commands.");
            }
        }
    }
}

/// Display help information.
fn cmd_help<D: Display>(console: &mut Console<D>) {
    let _ = writeln!(console, "Commands:");
    let _ = writeln!(console, "help   - show this message");
    let _ = writeln!(console, "clear  - clear screen");
    let _ = writeln!(console, "reboot - reboot machine");
    let _ = writeln!(console, "halt   - stop cpu");
    let _ = writeln!(console, "gdt    - print gdt");
    let _ = writeln!(console, "stack  - dump kernel stack");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_tokens_parse() {
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("clear"), Some(Command::Clear));
        assert_eq!(Command::parse("reboot"), Some(Command::Reboot));
        assert_eq!(Command::parse("halt"), Some(Command::Halt));
        assert_eq!(Command::parse("gdt"), Some(Command::Gdt));
        assert_eq!(Command::parse("stack"), Some(Command::Stack));
    }

    #[test]
    fn first_token_wins() {
        assert_eq!(Command::parse("help me please"), Some(Command::Help));
        assert_eq!(Command::parse("  clear  "), Some(Command::Clear));
    }

    #[test]
    fn matching_is_case_sensitive_and_exact() {
        assert_eq!(Command::parse("Help"), Some(Command::Unknown("Help")));
        assert_eq!(Command::parse("helpp"), Some(Command::Unknown("helpp")));
        assert_eq!(Command::parse("HALT"), Some(Command::Unknown("HALT")));
    }

    #[test]
    fn empty_input_parses_to_nothing() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   "), None);
    }
}
