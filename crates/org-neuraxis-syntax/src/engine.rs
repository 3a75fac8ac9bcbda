//! The configured set of recognizers.

use crate::context::ParseContext;
use crate::keywords::{KeywordError, Keywords};
use crate::recognizers::planning::PLANNING_KEYWORDS;
use crate::scanner::{Cursor, WordMatcher};
use crate::token::{Token, TokenKind};

/// Recognizers bound to one keyword configuration.
///
/// An `Engine` is immutable and cheap to share; every recognizer is a pure
/// function of its cursor and context. Build one per configuration and hand
/// it to any number of parses.
///
/// ```
/// use org_neuraxis_syntax::{Cursor, Engine, TokenKind};
///
/// let engine = Engine::default();
/// let ctx = engine.initial_context();
/// let token = engine.recognize(TokenKind::Stars, &Cursor::new("** Notes"), &ctx);
/// assert_eq!(token.map(|t| t.len), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) keywords: Keywords,
    pub(crate) todo_words: WordMatcher,
    pub(crate) planning_words: WordMatcher,
}

impl Engine {
    pub fn new(keywords: Keywords) -> Self {
        let todo_words = WordMatcher::new(keywords.all_keywords());
        Self {
            keywords,
            todo_words,
            planning_words: WordMatcher::new(PLANNING_KEYWORDS),
        }
    }

    /// Validates the lists and builds an engine from them.
    pub fn from_lists<T, D, L>(todo: T, done: D, link_types: L) -> Result<Self, KeywordError>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Keywords::new(todo, done, link_types).map(Self::new)
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// The context a parse starts from.
    pub fn initial_context(&self) -> ParseContext {
        ParseContext::new()
    }

    /// Runs the recognizer for `symbol` at the cursor.
    ///
    /// `Indent` and `Dedent` share one lookahead; asking for either only
    /// succeeds when the lookahead decides on that kind.
    pub fn recognize(&self, symbol: TokenKind, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        match symbol {
            TokenKind::Indent | TokenKind::Dedent => self
                .heading_lookahead(cur, ctx)
                .filter(|t| t.kind == symbol),
            TokenKind::Stars => self.stars(cur, ctx),
            TokenKind::TodoKeyword => self.todo_keyword(cur, ctx),
            TokenKind::Priority => self.priority(cur, ctx),
            TokenKind::Title => self.title(cur, ctx),
            TokenKind::Tags => self.tags(cur, ctx),
            TokenKind::EndOfLine => self.end_of_line(cur, ctx),
            TokenKind::PlanningKeyword => self.planning_keyword(cur, ctx),
            TokenKind::PlanningValue => self.planning_value(cur, ctx),
            TokenKind::PropertyDrawerHeader => self.property_drawer_header(cur, ctx),
            TokenKind::PropertyDrawerContent => self.property_drawer_content(cur, ctx),
            TokenKind::PropertyDrawerFooter => self.property_drawer_footer(cur, ctx),
            TokenKind::BlockHeader => self.block_header(cur, ctx),
            TokenKind::BlockContent => self.block_content(cur, ctx),
            TokenKind::BlockFooter => self.block_footer(cur, ctx),
            TokenKind::CommentLine => self.comment_line(cur, ctx),
            TokenKind::KeywordComment => self.keyword_comment(cur, ctx),
            TokenKind::CommentText => self.comment_text(cur, ctx),
            TokenKind::MarkupStart(m) => self.markup_start(cur, ctx, m),
            TokenKind::MarkupEnd(m) => self.markup_end(cur, ctx, m),
            TokenKind::RegularLinkStart => self.regular_link_start(cur, ctx),
            TokenKind::RegularLinkEnd => self.regular_link_end(cur, ctx),
            TokenKind::AngleLinkStart => self.angle_link_start(cur, ctx),
            TokenKind::AngleLinkEnd => self.angle_link_end(cur, ctx),
            TokenKind::PlainLink => self.plain_link(cur, ctx),
            TokenKind::Text => self.text(cur, ctx),
            TokenKind::Whitespace => self.whitespace(cur, ctx),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Keywords::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Markup;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_lists_validates() {
        assert!(Engine::from_lists(["TODO"], ["DONE"], ["https"]).is_ok());
        assert_eq!(
            Engine::from_lists(["TODO"], ["TODO"], ["https"]).err(),
            Some(KeywordError::TodoAndDone("TODO".into()))
        );
    }

    #[test]
    fn custom_keywords_are_recognized() {
        let engine = Engine::from_lists(["NEXT"], ["CANCELLED"], ["https"]).unwrap();
        let ctx = engine.initial_context();
        let t = engine.recognize(TokenKind::TodoKeyword, &Cursor::new("CANCELLED x"), &ctx);
        assert_eq!(t, Some(Token::new(TokenKind::TodoKeyword, 9)));
        assert_eq!(
            engine.recognize(TokenKind::TodoKeyword, &Cursor::new("TODO x"), &ctx),
            None
        );
    }

    #[test]
    fn custom_link_types_are_recognized() {
        let engine = Engine::from_lists(["TODO"], ["DONE"], ["zotero"]).unwrap();
        let ctx = engine.initial_context();
        let plain = |text| engine.recognize(TokenKind::PlainLink, &Cursor::new(text), &ctx);
        assert!(plain("zotero:abc").is_some());
        assert!(plain("https://x.org").is_none());
    }

    #[test]
    fn indent_and_dedent_share_lookahead() {
        let engine = Engine::default();
        let ctx = engine.initial_context();
        let cur = Cursor::new("* a");
        assert!(engine.recognize(TokenKind::Indent, &cur, &ctx).is_some());
        assert!(engine.recognize(TokenKind::Dedent, &cur, &ctx).is_none());
    }

    #[test]
    fn recognizers_leave_context_untouched() {
        let engine = Engine::default();
        let ctx = engine.initial_context();
        let before = ctx.clone();
        let cur = Cursor::new("*bold* [[link]] text");
        for kind in [
            TokenKind::MarkupStart(Markup::Bold),
            TokenKind::RegularLinkStart,
            TokenKind::Text,
        ] {
            engine.recognize(kind, &cur, &ctx);
        }
        assert_eq!(ctx, before);
        assert_eq!(cur.pos(), 0);
    }
}
