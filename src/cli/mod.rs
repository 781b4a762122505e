//! Command-line interface: argument parsing and command dispatch.

use anyhow::{Result, bail};

mod args;
mod commands;
mod exit_status;

pub use args::{Arguments, Command, ScanCommand};
pub use exit_status::ExitStatus;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Scan(cmd)) => commands::scan(cmd),
        Some(Command::Init) => commands::init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
