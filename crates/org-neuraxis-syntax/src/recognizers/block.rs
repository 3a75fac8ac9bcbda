//! Greater and lesser blocks: `#+BEGIN_SRC rust` ... `#+END_SRC`.
//!
//! The suffix after `#+BEGIN` (`_SRC`, `_QUOTE`, `:` for dynamic blocks)
//! is the delimiter; only a footer with the same suffix closes the block.
//! Delimiters compare case-insensitively.

use crate::context::{ParentObject, ParseContext};
use crate::engine::Engine;
use crate::scanner::{Cursor, chars};
use crate::token::{Token, TokenKind};

const BEGIN: &[u8] = b"#+BEGIN";
const END: &[u8] = b"#+END";

/// Length of the delimiter suffix at `offset`: `:` or `_NAME` ending at
/// whitespace or the end of the line.
fn suffix_len(cur: &Cursor<'_>, offset: usize) -> Option<usize> {
    match cur.ahead(offset) {
        Some(b':') => Some(1),
        Some(b'_') => {
            let mut n = 1;
            while !chars::is_whitespace_or_eol(cur.ahead(offset + n)) {
                n += 1;
            }
            (n > 1).then_some(n)
        }
        _ => None,
    }
}

/// Upper-cased delimiter of the block header at the cursor.
pub(crate) fn header_suffix(cur: &Cursor<'_>) -> Option<String> {
    if !cur.starts_with_ignore_case(0, BEGIN) {
        return None;
    }
    let len = suffix_len(cur, BEGIN.len())?;
    let suffix = cur.bytes(BEGIN.len() as isize, (BEGIN.len() + len) as isize);
    Some(String::from_utf8_lossy(suffix).to_ascii_uppercase())
}

/// Length of the footer line at `offset` if it closes a block delimited by `suffix`.
fn footer_len(cur: &Cursor<'_>, offset: usize, suffix: &[u8]) -> Option<usize> {
    if !cur.is_line_start(offset) || !cur.starts_with_ignore_case(offset, END) {
        return None;
    }
    let at = offset + END.len();
    let len = suffix_len(cur, at)?;
    let found = cur.bytes(at as isize, (at + len) as isize);
    found
        .eq_ignore_ascii_case(suffix)
        .then(|| cur.line_len(offset))
}

impl Engine {
    /// The `#+BEGIN...` line, accepted only when a matching footer line follows.
    pub fn block_header(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        if !cur.is_line_start(0) || !cur.starts_with_ignore_case(0, BEGIN) {
            return None;
        }
        let suffix_len = suffix_len(cur, BEGIN.len())?;
        let suffix = cur.bytes(BEGIN.len() as isize, (BEGIN.len() + suffix_len) as isize);

        let len = cur.line_len(0);
        let mut line = cur.next_line(0);
        while let Some(offset) = line {
            if footer_len(cur, offset, suffix).is_some() {
                return Some(Token::new(TokenKind::BlockHeader, len));
            }
            line = cur.next_line(offset);
        }
        None
    }

    /// Every line between the header and the footer, taken verbatim.
    pub fn block_content(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        let suffix = self.open_block(ctx)?;
        if cur.eof() || !cur.is_line_start(0) || footer_len(cur, 0, suffix).is_some() {
            return None;
        }
        let mut end = 0;
        while let Some(next) = cur.next_line(end) {
            end = next;
            if footer_len(cur, end, suffix).is_some() {
                return Some(Token::new(TokenKind::BlockContent, end));
            }
        }
        Some(Token::new(TokenKind::BlockContent, cur.remaining()))
    }

    pub fn block_footer(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        let suffix = self.open_block(ctx)?;
        footer_len(cur, 0, suffix).map(|len| Token::new(TokenKind::BlockFooter, len))
    }

    fn open_block<'c>(&self, ctx: &'c ParseContext) -> Option<&'c [u8]> {
        if !ctx.is_innermost(ParentObject::Block) {
            return None;
        }
        ctx.active_block_delimiter().map(str::as_bytes)
    }
}
