//! Comment lines (`# note`) and keyword lines (`#+TITLE: Notes`).

use crate::context::ParseContext;
use crate::engine::Engine;
use crate::scanner::{Cursor, chars};
use crate::token::{Token, TokenKind};

impl Engine {
    /// `#` followed by whitespace or the end of the line, at a line start.
    pub fn comment_line(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        let is_comment = cur.is_line_start(0)
            && cur.ahead(0) == Some(b'#')
            && chars::is_whitespace_or_eol(cur.ahead(1));
        is_comment.then(|| Token::zero(TokenKind::CommentLine))
    }

    /// `#+` and a key ending in `:` or at the end of the line. A line that
    /// opens a valid block is a block header instead.
    pub fn keyword_comment(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        if !cur.is_line_start(0) || !cur.starts_with(0, b"#+") {
            return None;
        }
        let mut end = 2;
        let terminated = loop {
            match cur.ahead(end) {
                Some(b':') => break true,
                c if chars::is_end_of_line(c) => break true,
                c if chars::is_whitespace(c) => break false,
                _ => end += 1,
            }
        };
        if !terminated || end == 2 || self.block_header(cur, ctx).is_some() {
            return None;
        }
        Some(Token::zero(TokenKind::KeywordComment))
    }

    /// The rest of a comment line, newline included.
    pub fn comment_text(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        let len = cur.line_len(0);
        (len > 0).then(|| Token::new(TokenKind::CommentText, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::test_support::{len_of, recognize_at};
    use rstest::rstest;

    #[rstest]
    #[case("# note", true)]
    #[case("#\n", true)]
    #[case("#", true)]
    #[case("#note", false)]
    #[case("#+TITLE: x", false)]
    #[case(" # note", false)]
    fn comment_lines(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(len_of(text, TokenKind::CommentLine).is_some(), expected);
    }

    #[rstest]
    #[case("#+TITLE: Notes", true)]
    #[case("#+STARTUP:overview", true)]
    #[case("#+RESULTS\n", true)]
    #[case("#+BEGIN_SRC\nno footer", true)]
    #[case("#+BEGIN_SRC\n#+END_SRC", false)]
    #[case("#+TITLE Notes", false)]
    #[case("#+: x", false)]
    #[case("#+", false)]
    fn keyword_comments(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(len_of(text, TokenKind::KeywordComment), expected.then_some(0));
    }

    #[test]
    fn comments_must_start_a_line() {
        let ctx = ParseContext::new();
        assert_eq!(recognize_at("a # b", 2, &ctx, TokenKind::CommentLine), None);
        assert_eq!(recognize_at("a #+K: b", 2, &ctx, TokenKind::KeywordComment), None);
    }

    #[test]
    fn comment_text_takes_the_line() {
        assert_eq!(len_of("# a b\nnext", TokenKind::CommentText), Some(6));
        assert_eq!(len_of("#+K: v", TokenKind::CommentText), Some(6));
        assert_eq!(len_of("", TokenKind::CommentText), None);
    }
}
