//! Key-binding extraction from source text.
//!
//! Extraction runs in three steps over one file's text:
//!
//! 1. `locate_call_sites`: find every `.register_key (` / `->register_key (`
//! 2. `bound_arguments`: cut the argument text at the first continuation marker
//! 3. `cursor::parse_arguments`: split the arguments into binding fields

mod cursor;

use std::sync::LazyLock;

use regex::Regex;

pub use cursor::{Arguments, GrammarError, parse_arguments};

use crate::{
    binding::{Binding, CallSite, SourceFile},
    error::ExtractError,
};

/// Default number of bytes searched after a call site for its end.
pub const DEFAULT_LOOKAHEAD: usize = 1024;

/// Text that follows the documented arguments of a call, in priority order.
///
/// `(Key` opens the handler lambda's parameter list, `bind` a bound handler.
pub const CONTINUATION_MARKERS: [&str; 2] = ["(Key", "bind"];

// Both spellings denote the same call; the group is not captured.
static CALL_SITE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\.|->)register_key\s*\(").unwrap());

/// Find all registration calls in `text`, in textual order.
pub fn locate_call_sites(text: &str) -> Vec<CallSite> {
    CALL_SITE_REGEX
        .find_iter(text)
        .map(|m| CallSite::new(m.end()))
        .collect()
}

/// Return the argument text of `site`, bounded by a continuation marker.
///
/// Only the first `lookahead` bytes after the argument start are searched.
/// On success `site.end` is set to the marker's offset.
pub fn bound_arguments<'a>(
    text: &'a str,
    site: &mut CallSite,
    lookahead: usize,
) -> Option<&'a str> {
    let window = lookahead_window(text, site.start, lookahead);
    let end = CONTINUATION_MARKERS
        .iter()
        .find_map(|marker| window.find(marker))?;
    site.end = Some(site.start + end);
    site.arguments(text)
}

fn lookahead_window(text: &str, start: usize, lookahead: usize) -> &str {
    let mut end = start.saturating_add(lookahead).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[start..end]
}

/// Extract every binding declared in `file`.
///
/// Stops at the first call site that does not fit the grammar.
pub fn extract_bindings(
    file: &SourceFile,
    lookahead: usize,
) -> Result<Vec<Binding>, ExtractError> {
    let mut bindings = Vec::new();

    for mut site in locate_call_sites(&file.text) {
        let Some(args) = bound_arguments(&file.text, &mut site, lookahead) else {
            let (line, column) = file.line_col(site.start);
            return Err(ExtractError::BoundaryNotFound {
                path: file.path.clone(),
                offset: site.start,
                line,
                column,
                lookahead,
            });
        };

        let parsed = parse_arguments(args).map_err(|err| {
            let (line, column) = file.line_col(site.start);
            ExtractError::ArgumentParse {
                path: file.path.clone(),
                offset: site.start,
                line,
                column,
                reason: err.to_string(),
                snippet: args.to_string(),
            }
        })?;

        bindings.push(Binding {
            key: parsed.key,
            alternates: parsed.alternates,
            name: parsed.name,
            description: parsed.description,
            offset: site.start,
        });
    }

    Ok(bindings)
}
