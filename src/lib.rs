//! keyscan - keybinding reference generator
//!
//! keyscan walks a C++ source tree, finds `register_key (...)` calls and
//! prints one `name=key  # description` line per binding, grouped by file.
//!
//! ## Module Structure
//!
//! - `binding`: Source files, call sites and extracted bindings
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `error`: Fatal scan errors
//! - `extract`: Call-site location and argument parsing
//! - `render`: Text and JSON output
//! - `scanner`: Deterministic directory walk driving the extractor

pub mod binding;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod render;
pub mod scanner;

pub use binding::{Binding, CallSite, FileBindings, SourceFile};
pub use error::{ExtractError, ScanError};
pub use scanner::{Scan, ScanOptions, scan};
