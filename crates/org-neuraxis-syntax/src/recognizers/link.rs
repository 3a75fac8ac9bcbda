//! Links: `[[target][description]]`, `<https://example.com>` and bare
//! `https://example.com`.
//!
//! Bracketed forms are validated up to their terminator before the opener is
//! accepted. They may span lines, except across a line that interrupts
//! paragraphs.

use crate::context::{ParentObject, ParseContext};
use crate::engine::Engine;
use crate::recognizers::markup::{closes_at, interrupts_span, span_limit};
use crate::scanner::{Cursor, chars};
use crate::token::{Markup, Token, TokenKind};

impl Engine {
    /// Length of the regular link at the cursor, brackets included.
    pub(crate) fn regular_link_len(&self, cur: &Cursor<'_>, limit: Option<usize>) -> Option<usize> {
        if !cur.starts_with(0, b"[[") {
            return None;
        }
        let mut q = 2;
        let mut described = false;
        loop {
            if limit.is_some_and(|l| q >= l) {
                return None;
            }
            match cur.ahead(q) {
                None | Some(b'[') => return None,
                Some(b'\n') => {
                    if interrupts_span(cur, q + 1) {
                        return None;
                    }
                    q += 1;
                }
                Some(b']') => match cur.ahead(q + 1) {
                    Some(b']') if q > 2 => return Some(q + 2),
                    Some(b'[') if q > 2 && !described => {
                        described = true;
                        q += 2;
                    }
                    _ => return None,
                },
                Some(_) => q += 1,
            }
        }
    }

    /// Length of the angle link at the cursor, brackets included.
    pub(crate) fn angle_link_len(&self, cur: &Cursor<'_>, limit: Option<usize>) -> Option<usize> {
        if cur.ahead(0) != Some(b'<') {
            return None;
        }
        let scheme = self.link_type_len(cur, 1)?;
        let path = 1 + scheme + 1;
        let mut q = path;
        loop {
            if limit.is_some_and(|l| q >= l) {
                return None;
            }
            match cur.ahead(q) {
                None | Some(b'<') => return None,
                Some(b'>') => return (q > path).then_some(q + 1),
                Some(b'\n') => {
                    if interrupts_span(cur, q + 1) {
                        return None;
                    }
                    q += 1;
                }
                Some(_) => q += 1,
            }
        }
    }

    /// Length of a configured link type at `offset`, when a `:` follows it.
    fn link_type_len(&self, cur: &Cursor<'_>, offset: usize) -> Option<usize> {
        let mut end = offset;
        while chars::is_alphanumeric(cur.ahead(end)) {
            end += 1;
        }
        let valid = end > offset
            && cur.ahead(end) == Some(b':')
            && self
                .keywords
                .is_link_type(cur.bytes(offset as isize, end as isize));
        valid.then_some(end - offset)
    }

    pub fn regular_link_start(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        if ctx.in_link() || ctx.in_opaque_markup() {
            return None;
        }
        self.regular_link_len(cur, span_limit(cur, ctx))?;
        Some(Token::new(TokenKind::RegularLinkStart, 2))
    }

    pub fn regular_link_end(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        let closes = ctx.is_innermost(ParentObject::RegularLink) && cur.starts_with(0, b"]]");
        closes.then(|| Token::new(TokenKind::RegularLinkEnd, 2))
    }

    pub fn angle_link_start(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        if ctx.in_link() || ctx.in_opaque_markup() {
            return None;
        }
        self.angle_link_len(cur, span_limit(cur, ctx))?;
        Some(Token::new(TokenKind::AngleLinkStart, 1))
    }

    pub fn angle_link_end(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        let closes = ctx.is_innermost(ParentObject::AngleLink) && cur.ahead(0) == Some(b'>');
        closes.then(|| Token::new(TokenKind::AngleLinkEnd, 1))
    }

    /// `type:path` with a configured type. The path stops at whitespace,
    /// brackets or a closing marker of an open emphasis. Parentheses must
    /// balance within the path and nest at most two deep. One trailing
    /// punctuation character is left out of the link.
    pub fn plain_link(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        if ctx.in_link() || ctx.in_opaque_markup() || !chars::is_plain_link_pre(cur.peek(-1)) {
            return None;
        }
        let path = self.link_type_len(cur, 0)? + 1;
        let mut q = path;
        let mut depth = 0u32;
        loop {
            match cur.ahead(q) {
                Some(b'(') => {
                    depth += 1;
                    if depth > 2 {
                        return None;
                    }
                }
                Some(b')') if depth == 0 => return None,
                Some(b')') => depth -= 1,
                Some(b'[' | b']' | b'<' | b'>') => break,
                c if chars::is_whitespace_or_eol(c) => break,
                _ if ctx.open_markups().any(|m| closes_at(cur, q, m)) => break,
                _ => {}
            }
            q += 1;
        }
        if depth > 0 {
            return None;
        }
        if q > path {
            let last = cur.ahead(q - 1);
            let open_marker = last
                .and_then(Markup::from_marker)
                .is_some_and(|m| ctx.is_open(m.parent()));
            if chars::is_plain_link_trailer(last) || open_marker {
                q -= 1;
            }
        }
        (q > path).then(|| Token::new(TokenKind::PlainLink, q))
    }
}
