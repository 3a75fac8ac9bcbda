//! Emphasis spans: `*bold*`, `/italic/`, `_underline_`, `=verbatim=`,
//! `~code~`, `+strike-through+`.
//!
//! An opening marker is only accepted once its closing marker has been
//! found, so the parser never has to take an emphasis back. The search for
//! the closing marker:
//!
//! - skips over links, which may contain the marker character,
//! - gives up when an enclosing emphasis or link would close first,
//! - gives up at a line that interrupts paragraphs (blank line, heading,
//!   comment or keyword line, property drawer),
//! - stays inside the title when started in one.

use crate::context::{ParentObject, ParseContext};
use crate::engine::Engine;
use crate::recognizers::{drawer, heading};
use crate::scanner::{Cursor, chars};
use crate::token::{Markup, Token, TokenKind};

/// Whether the line starting at `line` ends any span still looking for its end.
pub(crate) fn interrupts_span(cur: &Cursor<'_>, line: usize) -> bool {
    cur.is_blank_line(line)
        || heading::heading_level(cur, line).is_some()
        || (cur.ahead(line) == Some(b'#')
            && (chars::is_whitespace_or_eol(cur.ahead(line + 1)) || cur.ahead(line + 1) == Some(b'+')))
        || drawer::header_len(cur, line).is_some()
}

/// Offset past which a span starting at the cursor may not reach.
pub(crate) fn span_limit(cur: &Cursor<'_>, ctx: &ParseContext) -> Option<usize> {
    ctx.is_open(ParentObject::Title)
        .then(|| heading::title_end(cur, 0))
}

fn opens_at(cur: &Cursor<'_>, m: Markup) -> bool {
    cur.ahead(0) == Some(m.marker())
        && chars::is_markup_pre(cur.peek(-1))
        && !chars::is_whitespace_or_eol(cur.ahead(1))
}

/// Whether a closing `m` marker sits at `offset`. In a run of markers only
/// the last one can close.
pub(crate) fn closes_at(cur: &Cursor<'_>, offset: usize, m: Markup) -> bool {
    let marker = Some(m.marker());
    cur.ahead(offset) == marker
        && !chars::is_whitespace_or_eol(cur.peek(offset as isize - 1))
        && cur.ahead(offset + 1) != marker
        && chars::is_markup_post(cur.ahead(offset + 1))
}

/// Whether the innermost open link is terminated at `offset`.
fn closes_innermost_link(cur: &Cursor<'_>, offset: usize, ctx: &ParseContext) -> bool {
    match ctx.parent_objects().iter().rev().find(|p| p.is_link()) {
        Some(ParentObject::RegularLink) => cur.starts_with(offset, b"]]"),
        Some(ParentObject::AngleLink) => cur.ahead(offset) == Some(b'>'),
        _ => false,
    }
}

impl Engine {
    pub fn markup_start(&self, cur: &Cursor<'_>, ctx: &ParseContext, m: Markup) -> Option<Token> {
        if ctx.is_open(m.parent()) || ctx.in_opaque_markup() {
            return None;
        }
        // `**` followed by a valid closing boundary would be an empty span
        if !opens_at(cur, m) || closes_at(cur, 1, m) {
            return None;
        }
        self.find_markup_end(cur, ctx, m)?;
        Some(Token::new(TokenKind::MarkupStart(m), 1))
    }

    pub fn markup_end(&self, cur: &Cursor<'_>, ctx: &ParseContext, m: Markup) -> Option<Token> {
        (ctx.innermost_markup() == Some(m) && closes_at(cur, 0, m))
            .then(|| Token::new(TokenKind::MarkupEnd(m), 1))
    }

    /// Offset of the marker closing a span of `m` opened at the cursor.
    fn find_markup_end(&self, cur: &Cursor<'_>, ctx: &ParseContext, m: Markup) -> Option<usize> {
        let limit = span_limit(cur, ctx);
        let skip_links = !m.is_opaque() && !ctx.in_link();
        let mut q = 1;
        loop {
            if limit.is_some_and(|l| q >= l) {
                return None;
            }
            match cur.ahead(q) {
                None => return None,
                Some(b'\n') => {
                    if interrupts_span(cur, q + 1) {
                        return None;
                    }
                    q += 1;
                    continue;
                }
                Some(_) => {}
            }
            if closes_at(cur, q, m) {
                return Some(q);
            }
            if ctx.open_markups().any(|a| closes_at(cur, q, a)) || closes_innermost_link(cur, q, ctx) {
                return None;
            }
            if skip_links {
                let here = cur.fork(q);
                let rest = limit.map(|l| l - q);
                if let Some(len) = self
                    .regular_link_len(&here, rest)
                    .or_else(|| self.angle_link_len(&here, rest))
                {
                    q += len;
                    continue;
                }
            }
            q += 1;
        }
    }
}
