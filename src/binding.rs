//! Data model shared by the extractor and the renderers.

use std::path::PathBuf;

use serde::Serialize;

/// Key name used by sources for a binding that has no default key.
pub const UNBOUND_KEY: &str = "UnboundKey";

/// A source file read once for extraction.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Convert a byte offset into a 1-based (line, column) pair.
    ///
    /// Columns count characters, not bytes.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        line_col(&self.text, offset)
    }
}

pub(crate) fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// A located `register_key (` call.
///
/// Only the argument start is known when the site is located; `end` is set
/// once the continuation marker has been found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Byte offset immediately after the opening parenthesis.
    pub start: usize,
    /// Byte offset of the continuation marker that bounds the arguments.
    pub end: Option<usize>,
}

impl CallSite {
    pub fn new(start: usize) -> Self {
        Self { start, end: None }
    }

    /// The bounded argument text, once `end` is known.
    pub fn arguments<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.end.map(|end| &text[self.start..end])
    }
}

/// One documented key binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternates: Option<String>,
    pub name: String,
    pub description: String,
    /// Byte offset of the call's argument list in its source file.
    pub offset: usize,
}

/// Bindings extracted from one source file, in textual order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileBindings {
    #[serde(rename = "file")]
    pub path: PathBuf,
    pub bindings: Vec<Binding>,
}

impl FileBindings {
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
