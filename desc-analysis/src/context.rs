//! Enclosing block resolution.
//!
//! There is no parser behind this: the resolver walks lines upward from the cursor
//! with a brace counter and stops at the first block opener that has not been closed
//! before the cursor. Blocks whose opening and closing braces both sit above the cursor
//! are skipped as closed siblings. Unbalanced input simply runs out of lines and yields
//! no block.

use crate::document::{line_prefix, DocumentView, Position};
use crate::schema::BlockKeyword;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedContext {
    pub block: Option<BlockKeyword>,
}

/// Find the innermost block still open at `position`.
pub fn resolve<D>(document: &D, position: Position) -> ResolvedContext
where
    D: DocumentView + ?Sized,
{
    let line_count = document.line_count();
    if line_count == 0 {
        return ResolvedContext::default();
    }
    let cursor_line = position.line.min(line_count - 1);
    // A position below the last line sits at the end of the document.
    let cursor_column = if position.line < line_count {
        position.column
    } else {
        usize::MAX
    };

    // Number of lines still to inspect; the next one is `remaining - 1`.
    let mut remaining = cursor_line + 1;
    while remaining > 0 {
        let index = remaining - 1;
        // Only the text before the cursor counts on the cursor line.
        let line = if index == cursor_line {
            line_prefix(document, Position::new(index, cursor_column)).trim()
        } else {
            trimmed_line(document, index)
        };

        if is_comment(line) {
            remaining -= 1;
            continue;
        }

        if line == "}" {
            match opener_of_closed_block(document, index) {
                Some(opener) => {
                    tracing::trace!(closing = index, opener, "skipping closed block");
                    remaining = opener;
                    continue;
                }
                None => return ResolvedContext::default(),
            }
        }

        if let Some(keyword) = opening_keyword(line) {
            if !closes_on_same_line(line) {
                return ResolvedContext {
                    block: Some(keyword),
                };
            }
        }

        remaining -= 1;
    }

    ResolvedContext::default()
}

/// Walk upward from a lone `}` to the line that opened its block.
fn opener_of_closed_block<D>(document: &D, closing: usize) -> Option<usize>
where
    D: DocumentView + ?Sized,
{
    let mut balance = 1usize;
    for index in (0..closing).rev() {
        let line = trimmed_line(document, index);
        if is_comment(line) {
            continue;
        }
        if line == "}" {
            balance += 1;
        } else if line.ends_with('{') {
            balance -= 1;
            if balance == 0 {
                return Some(index);
            }
        }
    }
    None
}

/// Scannable keyword opening a block on this (already trimmed) line.
pub(crate) fn opening_keyword(line: &str) -> Option<BlockKeyword> {
    if !line.contains('{') {
        return None;
    }
    leading_token(line)
        .and_then(BlockKeyword::from_token)
        .filter(|keyword| keyword.is_scannable())
}

fn leading_token(line: &str) -> Option<&str> {
    let end = line
        .char_indices()
        .find(|(_, ch)| !is_identifier_char(*ch))
        .map(|(idx, _)| idx)
        .unwrap_or(line.len());
    (end > 0).then(|| &line[..end])
}

/// `ITEM { name: x }` opens and closes on one line.
fn closes_on_same_line(line: &str) -> bool {
    let opened = line.matches('{').count();
    let closed = line.matches('}').count();
    closed >= opened
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("//")
}

fn trimmed_line<D>(document: &D, index: usize) -> &str
where
    D: DocumentView + ?Sized,
{
    document.line_text(index).unwrap_or_default().trim()
}

pub(crate) fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
