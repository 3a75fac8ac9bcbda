//! Heading lines: `** TODO [#A] Title :tag:`.
//!
//! Headings nest by star count on an off-side scheme. At the start of every
//! heading line the lookahead emits `Indent` when the heading is deeper than
//! the current one, otherwise `Dedent`; one `Dedent` closes one open heading.

use crate::context::ParseContext;
use crate::engine::Engine;
use crate::scanner::{Cursor, chars};
use crate::token::{Token, TokenKind};

/// Star count of the heading line at `offset`.
///
/// `None` unless `offset` is a line start followed by `*`+ and whitespace.
pub(crate) fn heading_level(cur: &Cursor<'_>, offset: usize) -> Option<u32> {
    if !cur.is_line_start(offset) {
        return None;
    }
    let mut n = 0;
    while cur.ahead(offset + n) == Some(b'*') {
        n += 1;
    }
    (n > 0 && chars::is_whitespace(cur.ahead(offset + n))).then_some(n as u32)
}

/// Length of `[#X]` at `offset`.
fn priority_cookie(cur: &Cursor<'_>, offset: usize) -> Option<usize> {
    let valid = cur.ahead(offset) == Some(b'[')
        && cur.ahead(offset + 1) == Some(b'#')
        && chars::is_alphanumeric(cur.ahead(offset + 2))
        && cur.ahead(offset + 3) == Some(b']');
    valid.then_some(4)
}

/// Length of a tag run `:a:b:` starting at `offset`, if the run is followed
/// only by whitespace up to the end of the line.
pub(crate) fn tag_run(cur: &Cursor<'_>, offset: usize) -> Option<usize> {
    if cur.ahead(offset) != Some(b':') {
        return None;
    }
    let mut end = offset;
    while chars::is_tag_char(cur.ahead(end)) {
        end += 1;
    }
    let len = end - offset;
    let closed = len >= 3 && cur.ahead(end - 1) == Some(b':');
    (closed && cur.is_blank_line(end)).then_some(len)
}

/// Whether the title ends at `offset`: only whitespace remains before the end
/// of the line, or whitespace and then a tag run.
pub(crate) fn title_ends_at(cur: &Cursor<'_>, offset: usize) -> bool {
    let after_ws = offset + cur.whitespace_len(offset);
    if chars::is_end_of_line(cur.ahead(after_ws)) {
        return true;
    }
    chars::is_whitespace(cur.peek(after_ws as isize - 1)) && tag_run(cur, after_ws).is_some()
}

/// Offset at which the title containing `offset` ends.
pub(crate) fn title_end(cur: &Cursor<'_>, offset: usize) -> usize {
    let mut end = offset;
    while !title_ends_at(cur, end) {
        end += 1;
    }
    end
}

/// What the heading line has already committed before the title.
#[derive(Debug, Default, PartialEq, Eq)]
struct PrecedingWords {
    keyword: bool,
    priority: bool,
}

impl Engine {
    pub fn stars(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        let level = heading_level(cur, 0)? as usize;
        Some(Token::new(
            TokenKind::Stars,
            level + cur.whitespace_len(level),
        ))
    }

    /// `Indent` or `Dedent` in front of a heading line, `Dedent` at the end
    /// of the text while headings remain open.
    pub fn heading_lookahead(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        if cur.eof() {
            return (!ctx.heading_levels().is_empty()).then(|| Token::zero(TokenKind::Dedent));
        }
        let level = heading_level(cur, 0)?;
        let kind = match ctx.current_heading_level() {
            Some(top) if level <= top => TokenKind::Dedent,
            _ => TokenKind::Indent,
        };
        Some(Token::zero(kind))
    }

    /// A configured keyword followed by whitespace or the end of the line.
    /// The whitespace is left for the next token.
    pub fn todo_keyword(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        self.todo_words
            .matches(cur, 0)
            .map(str::len)
            .find(|&len| chars::is_whitespace_or_eol(cur.ahead(len)))
            .map(|len| Token::new(TokenKind::TodoKeyword, len))
    }

    /// `[#A]`, absorbing whitespace on both sides.
    pub fn priority(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        let lead = cur.whitespace_len(0);
        let cookie = priority_cookie(cur, lead)?;
        let end = lead + cookie;
        Some(Token::new(TokenKind::Priority, end + cur.whitespace_len(end)))
    }

    /// The title span. It may be empty, and stops before the whitespace that
    /// precedes the tags or the end of the line.
    ///
    /// Refuses when the text at the cursor should have been a keyword or a
    /// priority and the heading has not consumed one yet.
    pub fn title(&self, cur: &Cursor<'_>, ctx: &ParseContext) -> Option<Token> {
        let before = self.preceding_words(cur);
        if !before.priority && priority_cookie(cur, 0).is_some() {
            return None;
        }
        if !before.keyword && !before.priority && self.todo_keyword(cur, ctx).is_some() {
            return None;
        }
        Some(Token::new(TokenKind::Title, title_end(cur, 0)))
    }

    /// All-or-nothing tag run. The whitespace before it belongs to the token.
    pub fn tags(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        let lead = cur.whitespace_len(0);
        if !chars::is_whitespace(cur.peek(lead as isize - 1)) {
            return None;
        }
        let run = tag_run(cur, lead)?;
        Some(Token::new(TokenKind::Tags, lead + run + cur.whitespace_len(lead + run)))
    }

    /// Trailing whitespace and the newline of a heading line. Zero-length
    /// at the end of the text.
    pub fn end_of_line(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        if chars::is_end_of_line(cur.peek(-1)) {
            return None;
        }
        let lead = cur.whitespace_len(0);
        match cur.ahead(lead) {
            Some(b'\n') => Some(Token::new(TokenKind::EndOfLine, lead + 1)),
            None => Some(Token::new(TokenKind::EndOfLine, lead)),
            _ => None,
        }
    }

    pub fn whitespace(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        let len = cur.whitespace_len(0);
        (len > 0).then(|| Token::new(TokenKind::Whitespace, len))
    }

    /// Looks back over the heading line for a priority cookie and a keyword
    /// directly after the stars.
    fn preceding_words(&self, cur: &Cursor<'_>) -> PrecedingWords {
        let mut found = PrecedingWords::default();
        let mut o = skip_whitespace_back(cur, -1);

        if cur.peek(o) == Some(b']')
            && chars::is_alphanumeric(cur.peek(o - 1))
            && cur.peek(o - 2) == Some(b'#')
            && cur.peek(o - 3) == Some(b'[')
        {
            found.priority = true;
            o = skip_whitespace_back(cur, o - 4);
        }

        let word_end = o;
        while !chars::is_whitespace_or_eol(cur.peek(o)) {
            o -= 1;
        }
        if word_end == o || !self.keywords.is_keyword(cur.bytes(o + 1, word_end + 1)) {
            return found;
        }

        let mut s = skip_whitespace_back(cur, o);
        let stars_end = s;
        while cur.peek(s) == Some(b'*') {
            s -= 1;
        }
        found.keyword = s < stars_end && chars::is_end_of_line(cur.peek(s));
        found
    }
}

fn skip_whitespace_back(cur: &Cursor<'_>, mut o: isize) -> isize {
    while chars::is_whitespace(cur.peek(o)) {
        o -= 1;
    }
    o
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::test_support::{len_of, recognize_at};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("* a", Some(1))]
    #[case("*** a", Some(3))]
    #[case("*\tb", Some(1))]
    #[case("*a", None)]
    #[case("* ", Some(1))]
    #[case("*", None)]
    #[case(" * a", None)]
    fn heading_levels(#[case] text: &str, #[case] expected: Option<u32>) {
        assert_eq!(heading_level(&Cursor::new(text), 0), expected);
    }

    #[test]
    fn heading_level_requires_line_start() {
        let cur = Cursor::new("x * a\n** b");
        assert_eq!(heading_level(&cur, 2), None);
        assert_eq!(heading_level(&cur, 6), Some(2));
    }

    #[test]
    fn stars_absorb_trailing_whitespace() {
        assert_eq!(len_of("**  Title", TokenKind::Stars), Some(4));
        assert_eq!(len_of("** ", TokenKind::Stars), Some(3));
        assert_eq!(len_of("**Title", TokenKind::Stars), None);
    }

    #[test]
    fn lookahead_indents_first_heading() {
        let ctx = ParseContext::new();
        let t = recognize_at("* a", 0, &ctx, TokenKind::Indent);
        assert_eq!(t, Some(Token::zero(TokenKind::Indent)));
        assert_eq!(recognize_at("* a", 0, &ctx, TokenKind::Dedent), None);
    }

    #[rstest]
    #[case("* sibling", TokenKind::Dedent)]
    #[case("** child", TokenKind::Indent)]
    #[case("*** grandchild", TokenKind::Indent)]
    fn lookahead_compares_with_current_level(#[case] line: &str, #[case] expected: TokenKind) {
        let ctx = ParseContext::new().shift(TokenKind::Indent, &Cursor::new("* a"));
        let engine = Engine::default();
        let t = engine.heading_lookahead(&Cursor::new(line), &ctx);
        assert_eq!(t.map(|t| t.kind), Some(expected));
    }

    #[test]
    fn lookahead_dedents_at_end_of_text() {
        let engine = Engine::default();
        let ctx = ParseContext::new().shift(TokenKind::Indent, &Cursor::new("* a"));
        let end = Cursor::with_pos("* a", 3);
        assert_eq!(
            engine.heading_lookahead(&end, &ctx),
            Some(Token::zero(TokenKind::Dedent))
        );
        assert_eq!(engine.heading_lookahead(&end, &ParseContext::new()), None);
    }

    #[test]
    fn lookahead_ignores_non_heading_lines() {
        let ctx = ParseContext::new().shift(TokenKind::Indent, &Cursor::new("* a"));
        assert_eq!(recognize_at("text\n", 0, &ctx, TokenKind::Dedent), None);
        assert_eq!(recognize_at("a * b", 2, &ctx, TokenKind::Dedent), None);
    }

    #[rstest]
    #[case("TODO item", Some(4))]
    #[case("DONE\n", Some(4))]
    #[case("DONE", Some(4))]
    #[case("TODOS item", None)]
    #[case("todo item", None)]
    fn todo_keywords(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(len_of(text, TokenKind::TodoKeyword), expected);
    }

    #[test]
    fn longer_keyword_wins_when_shorter_is_not_a_word() {
        let engine = Engine::new(
            crate::Keywords::new(["TODO", "TODONE"], ["DONE"], ["https"]).unwrap(),
        );
        let t = engine.todo_keyword(&Cursor::new("TODONE x"), &ParseContext::new());
        assert_eq!(t, Some(Token::new(TokenKind::TodoKeyword, 6)));
    }

    #[rstest]
    #[case("[#A] title", Some(5))]
    #[case(" [#1]  title", Some(7))]
    #[case("[#A]", Some(4))]
    #[case("[#AB] title", None)]
    #[case("[A] title", None)]
    fn priorities(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(len_of(text, TokenKind::Priority), expected);
    }

    #[rstest]
    #[case("* Hello world\n", 2, 11)]
    #[case("* Hello   \n", 2, 5)]
    #[case("* Hello :a:b:\n", 2, 5)]
    #[case("* Hello:a:\n", 2, 8)]
    #[case("* Hello :a: more\n", 2, 14)]
    #[case("* \n", 2, 0)]
    #[case("* :tag:\n", 2, 0)]
    #[case("* TODO ", 7, 0)]
    fn title_extent(#[case] text: &str, #[case] pos: usize, #[case] expected: usize) {
        let t = recognize_at(text, pos, &ParseContext::new(), TokenKind::Title);
        assert_eq!(t, Some(Token::new(TokenKind::Title, expected)));
    }

    #[test]
    fn title_refuses_unconsumed_keyword() {
        assert_eq!(
            recognize_at("* TODO x", 2, &ParseContext::new(), TokenKind::Title),
            None
        );
    }

    #[test]
    fn title_refuses_unconsumed_priority() {
        assert_eq!(
            recognize_at("* [#A] x", 2, &ParseContext::new(), TokenKind::Title),
            None
        );
    }

    #[rstest]
    #[case("* TODO TODO x", 7)]
    #[case("* [#A] TODO x", 7)]
    #[case("* TODO [#A] [#B] x", 12)]
    #[case("* TODO [#A] TODO x", 12)]
    fn title_accepts_repeats_after_consumed_words(#[case] text: &str, #[case] pos: usize) {
        let t = recognize_at(text, pos, &ParseContext::new(), TokenKind::Title);
        assert_eq!(t.map(|t| t.len), Some(text.len() - pos));
    }

    #[test]
    fn preceding_words_sees_keyword_and_priority() {
        let engine = Engine::default();
        let cur = Cursor::with_pos("** DONE [#B] x", 13);
        assert_eq!(
            engine.preceding_words(&cur),
            PrecedingWords {
                keyword: true,
                priority: true
            }
        );
        let cur = Cursor::with_pos("** x DONE y", 10);
        assert_eq!(engine.preceding_words(&cur), PrecedingWords::default());
    }

    #[rstest]
    #[case(" :a:b:\n", Some(6))]
    #[case(" :a:  \n", Some(6))]
    #[case("\t:work@home:", Some(12))]
    #[case(" :a:b", None)]
    #[case(" :a: x", None)]
    #[case(" ::", None)]
    #[case(":a:", None)]
    #[case(" :a-b:", None)]
    fn tag_runs(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(len_of(text, TokenKind::Tags), expected);
    }

    #[test]
    fn tags_accept_run_directly_after_whitespace() {
        let t = recognize_at("* :tag:", 2, &ParseContext::new(), TokenKind::Tags);
        assert_eq!(t, Some(Token::new(TokenKind::Tags, 5)));
    }

    #[rstest]
    #[case("* a  \nnext", 3, Some(3))]
    #[case("* a", 3, Some(0))]
    #[case("* a :t:\n", 3, None)]
    #[case("* a b\n", 3, None)]
    #[case("\n\n", 1, None)]
    fn end_of_line(#[case] text: &str, #[case] pos: usize, #[case] expected: Option<usize>) {
        let t = recognize_at(text, pos, &ParseContext::new(), TokenKind::EndOfLine);
        assert_eq!(t.map(|t| t.len), expected);
    }
}
