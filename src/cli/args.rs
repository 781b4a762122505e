//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: extract key bindings and print the keybinding reference
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::render::OutputFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Source code root directory (overrides config file)
    #[arg(long, env = "KEYSCAN_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// File extension to scan, without the dot (overrides config file)
    /// Can be specified multiple times: --extension cc --extension cpp
    #[arg(long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Bytes searched after each call for the end of its arguments (overrides config file)
    #[arg(long)]
    pub lookahead: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the source root and each checked file to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract key bindings from register_key calls and print them
    Scan(ScanCommand),
    /// Initialize a new .keyscanrc.json configuration file
    Init,
}
