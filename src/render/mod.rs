//! Output renderers.
//!
//! Renderers write to any `io::Write` so they can be tested without stdout.

mod json;
mod text;

use clap::ValueEnum;

pub use json::render_json;
pub use text::{format_binding, render_file, render_text};

/// Output format for `keyscan scan`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `name=key  # description` lines grouped by file
    #[default]
    Text,
    /// A JSON array of files and their bindings
    Json,
}
