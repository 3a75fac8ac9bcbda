//! Section-level grammar rules.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;
use crate::token::{Token, TokenKind};

use super::inline;

/// Parse section contents up to the next heading line or the end of input.
///
/// Returns whether anything was consumed.
pub fn section_body(p: &mut Parser<'_, '_>) -> bool {
    let start = p.position();
    while !p.at_end() {
        if p.at_line_start() {
            if p.peek_heading().is_some() {
                break;
            }
            if line_element(p) {
                continue;
            }
        }
        if !inline::object(p) {
            p.bump_error();
        }
    }
    p.position() > start
}

/// The planning line directly below a heading.
pub fn planning(p: &mut Parser<'_, '_>) {
    let Some(keyword) = p.at(TokenKind::PlanningKeyword) else {
        return;
    };
    let m = p.start();
    p.bump(keyword);
    loop {
        if let Some(value) = p.at(TokenKind::PlanningValue) {
            p.bump_planning_value(value);
            if p.at_line_start() {
                break;
            }
        }
        if !p.eat(TokenKind::PlanningKeyword) {
            break;
        }
    }
    m.complete(p, SyntaxKind::PLANNING);
}

/// Line-level elements. Only called at a line start.
fn line_element(p: &mut Parser<'_, '_>) -> bool {
    if let Some(header) = p.at(TokenKind::BlockHeader) {
        block(p, header);
    } else if let Some(header) = p.at(TokenKind::PropertyDrawerHeader) {
        property_drawer(p, header);
    } else if let Some(signal) = p.at(TokenKind::CommentLine) {
        comment(p, signal, SyntaxKind::COMMENT_LINE);
    } else if let Some(signal) = p.at(TokenKind::KeywordComment) {
        comment(p, signal, SyntaxKind::KEYWORD_COMMENT);
    } else {
        return false;
    }
    true
}

fn block(p: &mut Parser<'_, '_>, header: Token) {
    let m = p.start();
    p.bump(header);
    while let Some(content) = p.at(TokenKind::BlockContent) {
        p.bump(content);
    }
    if !p.eat(TokenKind::BlockFooter) {
        log::debug!("block at byte {} has no footer", p.position());
    }
    m.complete(p, SyntaxKind::BLOCK);
}

fn property_drawer(p: &mut Parser<'_, '_>, header: Token) {
    let m = p.start();
    p.bump(header);
    while let Some(content) = p.at(TokenKind::PropertyDrawerContent) {
        p.bump(content);
    }
    if !p.eat(TokenKind::PropertyDrawerFooter) {
        log::debug!("property drawer at byte {} has no :END:", p.position());
    }
    m.complete(p, SyntaxKind::PROPERTY_DRAWER);
}

fn comment(p: &mut Parser<'_, '_>, signal: Token, kind: SyntaxKind) {
    let m = p.start();
    p.bump(signal);
    p.eat(TokenKind::CommentText);
    m.complete(p, kind);
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax_kind::{SyntaxKind, SyntaxNode};
    use pretty_assertions::assert_eq;

    fn find(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
        node.descendants().find(|n| n.kind() == kind)
    }

    #[test]
    fn parse_block() {
        let input = "#+BEGIN_SRC rust\nfn main() {}\n#+END_SRC\nafter\n";
        let tree = parse(input);
        let block = find(&tree, SyntaxKind::BLOCK).unwrap();
        assert_eq!(block.text().to_string(), "#+BEGIN_SRC rust\nfn main() {}\n#+END_SRC\n");
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn block_content_is_not_parsed() {
        let tree = parse("#+begin_example\n* not a heading\n*bold*\n#+end_example\n");
        assert!(find(&tree, SyntaxKind::HEADING).is_none());
        assert!(find(&tree, SyntaxKind::TEXT_BOLD).is_none());
        let tokens: Vec<_> = find(&tree, SyntaxKind::BLOCK)
            .unwrap()
            .children_with_tokens()
            .map(|t| t.kind())
            .collect();
        assert_eq!(
            tokens,
            vec![
                SyntaxKind::BLOCK_HEADER,
                SyntaxKind::BLOCK_CONTENT,
                SyntaxKind::BLOCK_FOOTER
            ]
        );
    }

    #[test]
    fn empty_block() {
        let tree = parse("#+BEGIN_QUOTE\n#+END_QUOTE\n");
        let block = find(&tree, SyntaxKind::BLOCK).unwrap();
        assert_eq!(block.children_with_tokens().count(), 2);
    }

    #[test]
    fn mismatched_block_is_two_keyword_lines() {
        let tree = parse("#+BEGIN_SRC\nmismatched\n#+END_EXPORT");
        assert!(find(&tree, SyntaxKind::BLOCK).is_none());
        let keywords = tree
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::KEYWORD_COMMENT)
            .count();
        assert_eq!(keywords, 2);
    }

    #[test]
    fn property_drawer_spans_three_lines() {
        let tree = parse(":PROPERTIES:\n:CREATED: [x]\n:END:\nrest");
        let drawer = find(&tree, SyntaxKind::PROPERTY_DRAWER).unwrap();
        assert_eq!(drawer.text_range(), rowan::TextRange::new(0.into(), 33.into()));
    }

    #[test]
    fn comments() {
        let tree = parse("# note\n#+TITLE: Notes\ntext\n");
        let section = tree.children().next().unwrap();
        let kinds: Vec<_> = section.children().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::COMMENT_LINE, SyntaxKind::KEYWORD_COMMENT]);
        assert_eq!(section.children().next().unwrap().text().to_string(), "# note\n");
    }

    #[test]
    fn planning_under_heading() {
        let input = "* TODO a\nSCHEDULED: <2024-01-01 Mon> DEADLINE: [2024-01-05]\nbody\n";
        let tree = parse(input);
        let planning = find(&tree, SyntaxKind::PLANNING).unwrap();
        assert_eq!(
            planning.text().to_string(),
            "SCHEDULED: <2024-01-01 Mon> DEADLINE: [2024-01-05]\n"
        );
        let values = planning
            .children()
            .filter(|n| n.kind() == SyntaxKind::PLANNING_VALUE)
            .count();
        assert_eq!(values, 2);
        assert!(find(&tree, SyntaxKind::SECTION).is_some());
    }

    #[test]
    fn planning_covers_a_single_line() {
        let input = "* a\nSCHEDULED: <2024-01-01>\nDEADLINE: <2024-01-02>\n";
        let tree = parse(input);
        let planning: Vec<_> = tree
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::PLANNING)
            .collect();
        assert_eq!(planning.len(), 1);
        assert_eq!(planning[0].text().to_string(), "SCHEDULED: <2024-01-01>\n");
        let section = find(&tree, SyntaxKind::SECTION).unwrap();
        assert_eq!(section.text().to_string(), "DEADLINE: <2024-01-02>\n");
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn planning_only_directly_below_heading() {
        let tree = parse("* a\nbody\nSCHEDULED: <2024-01-01>\n");
        assert!(find(&tree, SyntaxKind::PLANNING).is_none());
    }
}
