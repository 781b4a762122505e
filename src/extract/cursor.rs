//! A small cursor over the bounded argument text of one call site.
//!
//! The grammar is deliberately narrow:
//!
//! ```text
//! args       := key "," [ brace_list "," ] name "," description ( "," | ")" )
//! unbound    := ... "UnboundKey" ... quoted ... quoted
//! field      := any text up to a top-level "," (quotes, (), [] and {} nest)
//!               `//` and `/* */` comments are skipped
//! brace_list := "{" ... matching "}"
//! ```

use std::{borrow::Cow, str::CharIndices};

use thiserror::Error;

use crate::binding::UNBOUND_KEY;

/// Why a bounded argument text does not fit the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("expected ',' after {field}")]
    MissingComma { field: &'static str },
    #[error("expected a quoted string for {field}")]
    MissingQuote { field: &'static str },
    #[error("unterminated string literal in {field}")]
    UnterminatedString { field: &'static str },
    #[error("unterminated comment in {field}")]
    UnterminatedComment { field: &'static str },
    #[error("unterminated brace list")]
    UnterminatedBraceList,
}

/// Fields of one registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    pub key: String,
    pub alternates: Option<String>,
    pub name: String,
    pub description: String,
}

/// Parse the bounded argument text of one call.
pub fn parse_arguments(args: &str) -> Result<Arguments, GrammarError> {
    if let Some(at) = args.find(UNBOUND_KEY) {
        let mut cursor = Cursor::at(args, at + UNBOUND_KEY.len());
        let name = cursor.consume_quoted("name")?;
        let description = cursor.consume_quoted("description")?;
        return Ok(Arguments {
            key: UNBOUND_KEY.to_string(),
            alternates: None,
            name: unescape(name),
            description: unescape(description),
        });
    }

    let mut cursor = Cursor::at(args, 0);
    let key = normalize_field(cursor.consume_field("key")?);

    cursor.skip_whitespace();
    let alternates = if cursor.peek() == Some('{') {
        let list = cursor.consume_brace_list()?;
        cursor.expect_comma("alternates")?;
        Some(normalize_brace_list(list))
    } else {
        None
    };

    let name = normalize_field(cursor.consume_field("name")?);
    let description = normalize_field(cursor.consume_last_field("description")?);

    Ok(Arguments {
        key,
        alternates,
        name,
        description,
    })
}

/// How a field scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Comma,
    CloseParen,
    End,
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn at(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn expect_comma(&mut self, field: &'static str) -> Result<(), GrammarError> {
        self.skip_whitespace();
        if self.peek() == Some(',') {
            self.pos += 1;
            Ok(())
        } else {
            Err(GrammarError::MissingComma { field })
        }
    }

    /// Consume a field that must be followed by a comma.
    fn consume_field(&mut self, field: &'static str) -> Result<&'a str, GrammarError> {
        match self.scan_field(field)? {
            (text, Stop::Comma) => Ok(text),
            _ => Err(GrammarError::MissingComma { field }),
        }
    }

    /// Consume the final field, which may also be closed by the call's `)`.
    fn consume_last_field(&mut self, field: &'static str) -> Result<&'a str, GrammarError> {
        match self.scan_field(field)? {
            (text, Stop::Comma | Stop::CloseParen) => Ok(text),
            (_, Stop::End) => Err(GrammarError::MissingComma { field }),
        }
    }

    /// Scan up to a top-level `,` or an unmatched `)`.
    ///
    /// A comma is consumed, a closing parenthesis is not.
    fn scan_field(&mut self, field: &'static str) -> Result<(&'a str, Stop), GrammarError> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut chars = self.rest().char_indices();

        while let Some((i, c)) = chars.next() {
            match c {
                '"' | '\'' => {
                    skip_literal(&mut chars, c)
                        .ok_or(GrammarError::UnterminatedString { field })?;
                }
                '/' => {
                    skip_comment(&mut chars).ok_or(GrammarError::UnterminatedComment { field })?;
                }
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' if depth > 0 => depth -= 1,
                ')' => {
                    self.pos = start + i;
                    return Ok((&self.text[start..start + i], Stop::CloseParen));
                }
                ',' if depth == 0 => {
                    self.pos = start + i + 1;
                    return Ok((&self.text[start..start + i], Stop::Comma));
                }
                _ => {}
            }
        }

        self.pos = self.text.len();
        Ok((&self.text[start..], Stop::End))
    }

    /// Consume `{ ... }` and return the text between the braces.
    fn consume_brace_list(&mut self) -> Result<&'a str, GrammarError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut depth = 0usize;
        let mut chars = self.rest().char_indices();

        while let Some((i, c)) = chars.next() {
            match c {
                '"' | '\'' => {
                    skip_literal(&mut chars, c).ok_or(GrammarError::UnterminatedString {
                        field: "alternates",
                    })?;
                }
                '/' => {
                    skip_comment(&mut chars).ok_or(GrammarError::UnterminatedComment {
                        field: "alternates",
                    })?;
                }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos = start + i + 1;
                        return Ok(&self.text[start + 1..start + i]);
                    }
                }
                _ => {}
            }
        }

        Err(GrammarError::UnterminatedBraceList)
    }

    /// Skip ahead to the next `"` and consume the string it opens.
    fn consume_quoted(&mut self, field: &'static str) -> Result<&'a str, GrammarError> {
        let open = self
            .rest()
            .find('"')
            .ok_or(GrammarError::MissingQuote { field })?;
        let start = self.pos + open + 1;
        let mut chars = self.text[start..].char_indices();

        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => {
                    self.pos = start + i + 1;
                    return Ok(&self.text[start..start + i]);
                }
                _ => {}
            }
        }

        Err(GrammarError::UnterminatedString { field })
    }
}

/// Advance past a string or character literal opened by `quote`.
///
/// Returns `None` when the literal is not closed.
fn skip_literal(chars: &mut CharIndices<'_>, quote: char) -> Option<()> {
    while let Some((_, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return Some(());
        }
    }
    None
}

/// Advance past a comment when the `/` just consumed opens one.
///
/// Anything else after the `/` is left in place. Returns `None` for a block
/// comment that is not closed.
fn skip_comment(chars: &mut CharIndices<'_>) -> Option<()> {
    match chars.clone().next() {
        Some((_, '/')) => {
            for (_, c) in chars.by_ref() {
                if c == '\n' {
                    break;
                }
            }
            Some(())
        }
        Some((_, '*')) => {
            chars.next();
            let mut prev = ' ';
            for (_, c) in chars.by_ref() {
                if prev == '*' && c == '/' {
                    return Some(());
                }
                prev = c;
            }
            None
        }
        _ => Some(()),
    }
}

/// Replace each comment outside literals with a single space.
fn strip_comments(text: &str) -> Cow<'_, str> {
    if !text.contains("//") && !text.contains("/*") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut kept = 0;
    let mut chars = text.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' | '\'' => {
                skip_literal(&mut chars, c);
            }
            '/' => {
                skip_comment(&mut chars);
                let end = chars.clone().next().map_or(text.len(), |(j, _)| j);
                if end > i + 1 {
                    out.push_str(&text[kept..i]);
                    out.push(' ');
                    kept = end;
                }
            }
            _ => {}
        }
    }
    out.push_str(&text[kept..]);
    Cow::Owned(out)
}

/// Resolve `\"` and `\\` escapes; any other escape is kept as written.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('"' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Trim a field, drop its comments and strip its surrounding quotes.
///
/// Unquoted fields (for example `Key (GDK_KEY_Tab)`) get their whitespace
/// runs collapsed; quoted content keeps its spacing, with `\"` and `\\`
/// unescaped.
fn normalize_field(field: &str) -> String {
    let field = strip_comments(field);
    let field = field.trim();
    match field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => unescape(inner),
        None => collapse_whitespace(field),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render brace list contents as `{part part ...}`.
fn normalize_brace_list(inner: &str) -> String {
    let parts: Vec<String> = split_top_level(inner)
        .into_iter()
        .map(normalize_field)
        .filter(|part| !part.is_empty())
        .collect();
    format!("{{{}}}", parts.join(" "))
}

/// Split on commas that are not nested inside literals or brackets.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut chars = text.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' | '\'' => {
                skip_literal(&mut chars, c);
            }
            '/' => {
                skip_comment(&mut chars);
            }
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
