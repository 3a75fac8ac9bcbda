//! Plain text runs.
//!
//! The text recognizer is the fallback of the tokenizer: it takes everything
//! up to the next position where some other construct could begin.

use crate::context::{ParentObject, ParseContext};
use crate::engine::Engine;
use crate::recognizers::heading::{heading_level, title_ends_at};
use crate::scanner::Cursor;
use crate::token::{Markup, Token, TokenKind};

impl Engine {
    /// At least one byte of text, stopping before the first later position
    /// where another token could start. Inside a title the run stops at the
    /// end of the title and is empty when already there.
    pub fn text(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        if cur.eof() {
            return None;
        }
        if ctx.is_open(ParentObject::Title) && title_ends_at(cur, 0) {
            return Some(Token::zero(TokenKind::Text));
        }
        let mut len = 1;
        while !self.text_stops_at(cur, ctx, len) {
            len += 1;
        }
        Some(Token::new(TokenKind::Text, len))
    }

    fn text_stops_at(&self, cur: &Cursor<'_>, ctx: &ParseContext, offset: usize) -> bool {
        let at = cur.fork(offset);
        if at.eof() {
            return true;
        }
        if ctx.is_open(ParentObject::Title) && title_ends_at(cur, offset) {
            return true;
        }
        if let Some(m) = ctx.innermost_markup().filter(|m| m.is_opaque()) {
            return self.markup_end(&at, ctx, m).is_some();
        }
        if at.is_line_start(0) && self.starts_element(&at, ctx) {
            return true;
        }
        if !ctx.in_link()
            && (self.regular_link_start(&at, ctx).is_some()
                || self.angle_link_start(&at, ctx).is_some()
                || self.plain_link(&at, ctx).is_some())
        {
            return true;
        }
        if self.regular_link_end(&at, ctx).is_some() || self.angle_link_end(&at, ctx).is_some() {
            return true;
        }
        if let Some(m) = ctx.innermost_markup() {
            if self.markup_end(&at, ctx, m).is_some() {
                return true;
            }
        }
        Markup::ALL
            .into_iter()
            .any(|m| self.markup_start(&at, ctx, m).is_some())
    }

    /// Whether a line-level element starts at the cursor.
    fn starts_element(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> bool {
        heading_level(cur, 0).is_some()
            || self.property_drawer_header(cur, ctx).is_some()
            || self.block_header(cur, ctx).is_some()
            || self.comment_line(cur, ctx).is_some()
            || self.keyword_comment(cur, ctx).is_some()
    }
}
