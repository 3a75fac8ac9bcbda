//! # Grammar Rules
//!
//! The grammar walks the document top-down and asks the engine, at each
//! step, for the token kinds it expects next. Each function takes a
//! `&mut Parser` and uses its methods to:
//!
//! 1. Ask the engine (`p.at()`, `p.peek_heading()`)
//! 2. Commit tokens (`p.bump()`, `p.eat()`)
//! 3. Build tree structure (`p.start()` → marker → `complete()`/`abandon()`)
//!
//! ## Module Structure
//!
//! - this module - the document and heading skeleton
//! - [`block`] - section contents: planning, blocks, drawers, comments
//! - [`inline`] - objects: emphasis, links, text
//!
//! ## Heading Nesting
//!
//! Headings nest through the zero-width `Indent`/`Dedent` signals. Every
//! heading starts with one `Indent` and ends with one `Dedent`:
//!
//! ```text
//! * a          Indent  HEADING(a) {
//! ** b         Indent    HEADING(b) {
//! * c          Dedent    }  Dedent }  Indent HEADING(c) {
//!              Dedent  }
//! ```
//!
//! ## Error Recovery
//!
//! The grammar never fails. Characters no recognizer accepts become
//! `ERROR_TOKEN`s so that every byte of the input lands in the tree.

mod block;
mod inline;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;
use crate::token::{Token, TokenKind};

/// Parse the root document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    let zeroth = p.start();
    if block::section_body(p) {
        zeroth.complete(p, SyntaxKind::ZEROTH_SECTION);
    } else {
        zeroth.abandon(p);
    }

    loop {
        if let Some(indent) = p.at(TokenKind::Indent) {
            heading(p, indent);
        } else if p.at_end() {
            break;
        } else {
            let e = p.start();
            p.bump_error();
            e.complete(p, SyntaxKind::ERROR);
        }
    }

    m.complete(p, SyntaxKind::ROOT);
}

/// A heading and everything it owns, up to and including its `Dedent`.
fn heading(p: &mut Parser<'_, '_>, indent: Token) {
    let m = p.start();
    p.bump(indent);

    heading_line(p);
    block::planning(p);

    let section = p.start();
    if block::section_body(p) {
        section.complete(p, SyntaxKind::SECTION);
    } else {
        section.abandon(p);
    }

    loop {
        match p.peek_heading() {
            Some(t) if t.kind == TokenKind::Indent => heading(p, t),
            Some(dedent) => {
                p.bump(dedent);
                break;
            }
            None => break,
        }
    }

    m.complete(p, SyntaxKind::HEADING);
}

fn heading_line(p: &mut Parser<'_, '_>) {
    p.eat(TokenKind::Stars);
    let keyword = p.eat(TokenKind::TodoKeyword);
    if !p.eat(TokenKind::Priority) && keyword {
        p.eat(TokenKind::Whitespace);
    }

    if let Some(title) = p.at(TokenKind::Title) {
        if title.len > 0 {
            self::title(p, title);
        }
    }

    p.eat(TokenKind::Tags);
    if !p.eat(TokenKind::EndOfLine) {
        // Still commit as end of line so the title closes.
        let rest = Token::new(TokenKind::EndOfLine, p.rest_of_line());
        p.bump_as(rest, SyntaxKind::ERROR_TOKEN);
    }
}

/// The title span, parsed as objects.
fn title(p: &mut Parser<'_, '_>, title: Token) {
    let end = p.position() + title.len;
    let m = p.start();
    while p.position() < end {
        if !inline::object(p) {
            p.bump_error();
        }
    }
    m.complete(p, SyntaxKind::TITLE);
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax_kind::{SyntaxKind, SyntaxNode};
    use pretty_assertions::assert_eq;

    fn kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children().map(|c| c.kind()).collect()
    }

    #[test]
    fn text_before_first_heading_is_zeroth_section() {
        let tree = parse("intro\n* a\n");
        assert_eq!(kinds(&tree), vec![SyntaxKind::ZEROTH_SECTION, SyntaxKind::HEADING]);
    }

    #[test]
    fn sibling_headings() {
        let tree = parse("* a\n* b\n* c\n");
        assert_eq!(
            kinds(&tree),
            vec![SyntaxKind::HEADING, SyntaxKind::HEADING, SyntaxKind::HEADING]
        );
    }

    #[test]
    fn deeper_headings_nest() {
        let tree = parse("* a\n** b\n*** c\n** d\n* e\n");
        let top: Vec<_> = tree.children().collect();
        assert_eq!(top.len(), 2);
        let a_children = kinds(&top[0]);
        assert_eq!(
            a_children,
            vec![SyntaxKind::TITLE, SyntaxKind::HEADING, SyntaxKind::HEADING]
        );
        let b = top[0].children().nth(1).unwrap();
        assert_eq!(kinds(&b), vec![SyntaxKind::TITLE, SyntaxKind::HEADING]);
    }

    #[test]
    fn skipped_levels_still_nest() {
        let tree = parse("* a\n*** b\n** c\n");
        let a = tree.children().next().unwrap();
        assert_eq!(
            kinds(&a),
            vec![SyntaxKind::TITLE, SyntaxKind::HEADING, SyntaxKind::HEADING]
        );
    }

    #[test]
    fn first_heading_deeper_than_later_ones() {
        let tree = parse("** a\n* b\n");
        assert_eq!(kinds(&tree), vec![SyntaxKind::HEADING, SyntaxKind::HEADING]);
    }

    #[test]
    fn empty_title_has_no_title_node() {
        let tree = parse("* \n");
        let heading = tree.children().next().unwrap();
        assert!(heading.children().all(|c| c.kind() != SyntaxKind::TITLE));
        assert_eq!(heading.text().to_string(), "* \n");
    }

    #[test]
    fn heading_body_is_section() {
        let tree = parse("* a\nbody\n");
        let heading = tree.children().next().unwrap();
        let section = heading.children().find(|c| c.kind() == SyntaxKind::SECTION).unwrap();
        assert_eq!(section.text().to_string(), "body\n");
    }

    #[test]
    fn heading_without_newline_at_end() {
        let input = "* TODO";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
        assert_eq!(kinds(&tree), vec![SyntaxKind::HEADING]);
    }
}
