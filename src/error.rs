//! Fatal errors raised while scanning.
//!
//! Both extraction kinds abort the scan: the tool documents a narrow call
//! grammar and a guessed binding is worse than a halted run.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A call site that does not fit the registration grammar.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(
        "{}:{line}:{column}: no end of register_key arguments within {lookahead} bytes (byte offset {offset})",
        .path.display()
    )]
    BoundaryNotFound {
        path: PathBuf,
        offset: usize,
        line: usize,
        column: usize,
        lookahead: usize,
    },

    #[error(
        "{}:{line}:{column}: cannot parse register_key arguments: {reason} (byte offset {offset})\n  --> {snippet:?}",
        .path.display()
    )]
    ArgumentParse {
        path: PathBuf,
        offset: usize,
        line: usize,
        column: usize,
        reason: String,
        snippet: String,
    },
}

/// Any error that ends a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
