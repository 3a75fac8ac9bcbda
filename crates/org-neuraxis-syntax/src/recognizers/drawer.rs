//! Property drawers.
//!
//! ```text
//! :PROPERTIES:
//! :CREATED: [2024-01-01]
//! :END:
//! ```

use crate::context::{ParentObject, ParseContext};
use crate::engine::Engine;
use crate::scanner::Cursor;
use crate::token::{Token, TokenKind};

const HEADER: &[u8] = b":PROPERTIES:";
const FOOTER: &[u8] = b":END:";

/// Whether an `:END:` line starts at `offset`.
pub(crate) fn is_footer(cur: &Cursor<'_>, offset: usize) -> bool {
    cur.is_line_start(offset) && cur.starts_with_ignore_case(offset, FOOTER)
}

/// Length of the `:PROPERTIES:` line at `offset`, newline included.
pub(crate) fn header_len(cur: &Cursor<'_>, offset: usize) -> Option<usize> {
    if !cur.is_line_start(offset) || !cur.starts_with(offset, HEADER) {
        return None;
    }
    let after = offset + HEADER.len();
    if !cur.is_blank_line(after) {
        return None;
    }
    Some(cur.line_len(offset))
}

impl Engine {
    /// The header line, accepted only when an `:END:` line follows somewhere below.
    pub fn property_drawer_header(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        let len = header_len(cur, 0)?;
        if cur.ahead(len - 1) != Some(b'\n') {
            return None;
        }
        let mut line = Some(len);
        while let Some(offset) = line {
            if is_footer(cur, offset) {
                return Some(Token::new(TokenKind::PropertyDrawerHeader, len));
            }
            line = cur.next_line(offset);
        }
        None
    }

    /// One line inside an open drawer.
    pub fn property_drawer_content(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        if !ctx.is_innermost(ParentObject::PropertyDrawer)
            || cur.eof()
            || !cur.is_line_start(0)
            || is_footer(cur, 0)
        {
            return None;
        }
        Some(Token::new(TokenKind::PropertyDrawerContent, cur.line_len(0)))
    }

    /// The `:END:` line, whatever trails it and its newline.
    pub fn property_drawer_footer(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        if !ctx.is_innermost(ParentObject::PropertyDrawer) || !is_footer(cur, 0) {
            return None;
        }
        Some(Token::new(TokenKind::PropertyDrawerFooter, cur.line_len(0)))
    }
}
