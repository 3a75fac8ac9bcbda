//! # Object Grammar
//!
//! Objects are the inline contents of titles and sections. At every
//! position the candidates are tried in a fixed order:
//!
//! | Order | Token kind | Node |
//! |-------|------------|------|
//! | 1 | `MarkupStart(M)` for `* / _ = ~ +` | `TEXT_BOLD` ... `TEXT_STRIKE_THROUGH` |
//! | 2 | `RegularLinkStart` | `REGULAR_LINK` |
//! | 3 | `AngleLinkStart` | `ANGLE_LINK` |
//! | 4 | `PlainLink` | `PLAIN_LINK` token |
//! | 5 | `Text` | `TEXT` token |
//!
//! A start token is only handed out when its closing counterpart exists
//! further on, so every emphasis and link loop ends at its own end token.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;
use crate::token::{Markup, Token, TokenKind};

/// Parse one object. Returns false when nothing applies here.
pub fn object(p: &mut Parser<'_, '_>) -> bool {
    for m in Markup::ALL {
        if let Some(start) = p.at(TokenKind::MarkupStart(m)) {
            emphasis(p, start, m);
            return true;
        }
    }
    if let Some(start) = p.at(TokenKind::RegularLinkStart) {
        link(p, start, TokenKind::RegularLinkEnd, SyntaxKind::REGULAR_LINK);
        return true;
    }
    if let Some(start) = p.at(TokenKind::AngleLinkStart) {
        link(p, start, TokenKind::AngleLinkEnd, SyntaxKind::ANGLE_LINK);
        return true;
    }
    if p.eat(TokenKind::PlainLink) {
        return true;
    }
    match p.at(TokenKind::Text) {
        Some(text) if text.len > 0 => {
            p.bump(text);
            true
        }
        _ => false,
    }
}

fn emphasis(p: &mut Parser<'_, '_>, start: Token, m: Markup) {
    let node = p.start();
    p.bump(start);
    contents_until(p, TokenKind::MarkupEnd(m));
    node.complete(p, m.syntax_kind());
}

fn link(p: &mut Parser<'_, '_>, start: Token, end: TokenKind, kind: SyntaxKind) {
    let node = p.start();
    p.bump(start);
    contents_until(p, end);
    node.complete(p, kind);
}

fn contents_until(p: &mut Parser<'_, '_>, end: TokenKind) {
    loop {
        if p.eat(end) {
            return;
        }
        if p.at_end() || !object(p) {
            log::debug!("{end:?} not reached at byte {}", p.position());
            return;
        }
    }
}
