//! The recognizers.
//!
//! Each recognizer is a method on [`Engine`](crate::Engine) with the shape
//! `fn(&self, &Cursor, &ParseContext) -> Option<Token>`. It inspects text
//! around the cursor and the context, and either accepts a token of its kind
//! or refuses. Recognizers never move the cursor and never change the
//! context; the driver does both after it commits the token.
//!
//! Many recognizers scan ahead before accepting: a block header is only a
//! header if its footer exists, an emphasis marker only opens if a closing
//! marker can be found.

pub(crate) mod block;
mod comment;
mod content;
mod drawer;
pub(crate) mod heading;
mod link;
mod markup;
pub(crate) mod planning;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::context::ParseContext;
    use crate::engine::Engine;
    use crate::scanner::Cursor;
    use crate::token::{Token, TokenKind};

    /// Runs `kind`'s recognizer at byte `pos` of `text` under `ctx`.
    pub fn recognize_at(
        text: &str,
        pos: usize,
        ctx: &ParseContext,
        kind: TokenKind,
    ) -> Option<Token> {
        Engine::default().recognize(kind, &Cursor::with_pos(text, pos), ctx)
    }

    /// Length accepted by `kind`'s recognizer at the start of `text`.
    pub fn len_of(text: &str, kind: TokenKind) -> Option<usize> {
        recognize_at(text, 0, &ParseContext::new(), kind).map(|t| t.len)
    }
}
