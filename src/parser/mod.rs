//! Parser for template bodies
//!
//! A body is literal text interleaved with directive tags. The splitter here
//! cuts the source on the configured delimiters; each tag's content is lexed
//! and parsed as one expression by [`grammar`].

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::{Expr, Segment};
pub use grammar::parse_expr;

use crate::config::Syntax;
use crate::error::ParseError;

/// Parse a template body with the default `{{` / `}}` delimiters
pub fn parse(source: &str) -> Result<Vec<Segment>, Vec<ParseError>> {
    parse_with_syntax(source, &Syntax::default())
}

/// Parse a template body with explicit delimiters.
///
/// All directive errors are aggregated; spans refer to byte offsets in the
/// whole source, not the individual tag.
pub fn parse_with_syntax(source: &str, syntax: &Syntax) -> Result<Vec<Segment>, Vec<ParseError>> {
    let mut segments = Vec::new();
    let mut errors = Vec::new();
    let mut rest = source;
    let mut pos = 0usize;

    while let Some(open_at) = rest.find(&syntax.open) {
        if open_at > 0 {
            segments.push(Segment::Literal(rest[..open_at].to_string()));
        }

        let tag_start = pos + open_at;
        let after_open = &rest[open_at + syntax.open.len()..];
        let content_start = tag_start + syntax.open.len();

        match find_close(after_open, &syntax.close) {
            Some(close_at) => {
                let content = &after_open[..close_at];
                match grammar::parse_expr(content) {
                    Ok(expr) => segments.push(Segment::Directive(expr)),
                    Err(tag_errors) => {
                        errors.extend(tag_errors.into_iter().map(|e| e.offset(content_start)));
                    }
                }
                rest = &after_open[close_at + syntax.close.len()..];
                pos = content_start + close_at + syntax.close.len();
            }
            None => {
                errors.push(ParseError::UnclosedDirective {
                    span: tag_start..source.len(),
                    close: syntax.close.clone(),
                });
                rest = "";
                pos = source.len();
            }
        }
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }

    if errors.is_empty() {
        Ok(segments)
    } else {
        Err(errors)
    }
}

/// Find the close delimiter for a tag, ignoring occurrences inside string
/// literals so `{{ output("}}") }}` splits after the real close.
///
/// An unterminated string swallows the rest of the content; the tag is then
/// reported as unclosed.
fn find_close(content: &str, close: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in content.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if content[i..].starts_with(close) {
            return Some(i);
        }
        if c == '"' {
            in_string = true;
        }
    }
    None
}
