//! # org-neuraxis-syntax
//!
//! A context-sensitive org-mode tokenizer and a lossless [Rowan] syntax tree
//! built on top of it, following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Why Not a Plain Lexer?
//!
//! Org syntax can't be tokenized in one context-free pass. Whether `*` is a
//! heading, the start of bold text or just a star depends on where it sits,
//! what is already open around it and whether a matching close exists
//! further on. `#+BEGIN_SRC` is a block only if `#+END_SRC` follows.
//!
//! So instead of a lexer, this crate provides **recognizers**: one pure
//! function per token kind that the parser asks "is there one of you here?"
//!
//! ```text
//! recognize(kind, cursor, context) → Some(Token { kind, len }) | None
//! ```
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Engine (recognizers) → Parser → Events → Sink → Rowan Tree
//!                  ↑          │       (Grammar)       (GreenNodeBuilder)
//!                  └─ ParseContext ←┘
//! ```
//!
//! ### 1. Engine ([`Engine`])
//!
//! Holds the keyword configuration and dispatches to the recognizers. It
//! never moves the cursor and never mutates a context.
//!
//! ### 2. Parse context ([`context`] module)
//!
//! An immutable record of what is open: the heading level stack, emphasis
//! and links, the active block delimiter. Committing a token derives the
//! next context with [`ParseContext::shift`]. Equal [`StructuralKey`]s mean
//! interchangeable contexts, which lets a GLR driver merge stacks.
//!
//! ### 3. Parser ([`parser`] module)
//!
//! A reference driver: it walks the org grammar, asks the engine for the
//! kinds it expects, commits what it gets and records events. The
//! [`parser::sink`] turns the events into a green tree.
//!
//! ```text
//! "* TODO Task\n" → [Indent, Stars, TodoKeyword, Whitespace, Text, EndOfLine, Dedent]
//!                 → HEADING { STARS TODO_KEYWORD WHITESPACE TITLE { TEXT } END_OF_LINE }
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! org-neuraxis-syntax/
//! ├── lib.rs           # This file - public API and snapshot tests
//! ├── engine.rs        # Engine: keyword configuration + recognizer dispatch
//! ├── context.rs       # ParseContext, ParentObject, StructuralKey
//! ├── token.rs         # TokenKind, Token, Markup
//! ├── keywords.rs      # Validated todo/done/link-type lists
//! ├── scanner/         # Cursor, character classes, keyword matcher
//! ├── recognizers/     # One recognizer per token kind
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── timestamp.rs     # Logos sub-lexer for planning timestamps
//! ├── ast.rs           # Typed accessors over the tree
//! └── parser/
//!     ├── mod.rs       # Parser, Marker system, parse() / parse_with()
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/     # Document, heading, section and object rules
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use org_neuraxis_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("* TODO Hello\nworld\n");
//!
//! // The tree preserves all text
//! assert_eq!(tree.text().to_string(), "* TODO Hello\nworld\n");
//!
//! // Navigate the tree structure
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//! let heading = tree.children().next().unwrap();
//! assert_eq!(heading.kind(), SyntaxKind::HEADING);
//! ```
//!
//! Custom keywords go through an [`Engine`]:
//!
//! ```
//! use org_neuraxis_syntax::{Engine, ast::Document};
//!
//! let engine = Engine::from_lists(["NEXT", "WAIT"], ["CANCELLED"], ["https"]).unwrap();
//! let doc = Document::parse_with(&engine, "* WAIT reply\n");
//! let heading = doc.headings().next().unwrap();
//! assert_eq!(heading.todo_keyword().as_deref(), Some("WAIT"));
//! ```

pub mod ast;
pub mod context;
mod engine;
pub mod keywords;
pub mod parser;
mod recognizers;
pub mod scanner;
pub mod syntax_kind;
pub mod timestamp;
pub mod token;

pub use context::{ParentObject, ParseContext, StructuralKey};
pub use engine::Engine;
pub use keywords::{KeywordError, Keywords};
pub use parser::{LexedToken, Parse, parse, parse_with};
pub use scanner::Cursor;
pub use syntax_kind::{OrgLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use timestamp::Timestamp;
pub use token::{Markup, Token, TokenKind};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// Helper to format a syntax tree for snapshot testing.
    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!(
            "{}{:?}@{:?}\n",
            prefix,
            node.kind(),
            node.text_range()
        ));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    let text = t.text().replace('\n', "\\n");
                    result.push_str(&format!(
                        "{}  {:?}@{:?} {:?}\n",
                        prefix,
                        t.kind(),
                        t.text_range(),
                        text
                    ));
                }
            }
        }

        result
    }

    #[test]
    fn snapshot_todo_headings() {
        let tree = parse("* TODO item 1\ncontent\n* TODO item 2\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..36
          HEADING@0..22
            STARS@0..2 "* "
            TODO_KEYWORD@2..6 "TODO"
            WHITESPACE@6..7 " "
            TITLE@7..13
              TEXT@7..13 "item 1"
            END_OF_LINE@13..14 "\\n"
            SECTION@14..22
              TEXT@14..22 "content\\n"
          HEADING@22..36
            STARS@22..24 "* "
            TODO_KEYWORD@24..28 "TODO"
            WHITESPACE@28..29 " "
            TITLE@29..35
              TEXT@29..35 "item 2"
            END_OF_LINE@35..36 "\\n"
        "#);
    }

    #[test]
    fn snapshot_mismatched_block() {
        let tree = parse("#+BEGIN_SRC\nmismatched\n#+END_EXPORT");
        assert_snapshot!(format_tree(&tree, 0), @r##"
        ROOT@0..35
          ZEROTH_SECTION@0..35
            KEYWORD_COMMENT@0..12
              COMMENT_TEXT@0..12 "#+BEGIN_SRC\\n"
            TEXT@12..23 "mismatched\\n"
            KEYWORD_COMMENT@23..35
              COMMENT_TEXT@23..35 "#+END_EXPORT"
        "##);
    }

    #[test]
    fn snapshot_property_drawer() {
        let tree = parse(":PROPERTIES:\n:CREATED: [x]\n:END:\nrest");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..37
          ZEROTH_SECTION@0..37
            PROPERTY_DRAWER@0..33
              PROPERTY_DRAWER_HEADER@0..13 ":PROPERTIES:\\n"
              PROPERTY_DRAWER_CONTENT@13..27 ":CREATED: [x]\\n"
              PROPERTY_DRAWER_FOOTER@27..33 ":END:\\n"
            TEXT@33..37 "rest"
        "#);
    }

    #[test]
    fn snapshot_crossing_emphasis() {
        let tree = parse("*one _two three* four_");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..22
          ZEROTH_SECTION@0..22
            TEXT_BOLD@0..16
              MARKUP_MARKER@0..1 "*"
              TEXT@1..15 "one _two three"
              MARKUP_MARKER@15..16 "*"
            TEXT@16..22 " four_"
        "#);
    }

    #[test]
    fn snapshot_planning() {
        let tree = parse("* a\nSCHEDULED: <2024-01-01 Mon>\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..32
          HEADING@0..32
            STARS@0..2 "* "
            TITLE@2..3
              TEXT@2..3 "a"
            END_OF_LINE@3..4 "\\n"
            PLANNING@4..32
              PLANNING_KEYWORD@4..14 "SCHEDULED:"
              PLANNING_VALUE@14..32
                WHITESPACE@14..15 " "
                TIMESTAMP_ACTIVE@15..31 "<2024-01-01 Mon>"
                NEWLINE@31..32 "\\n"
        "#);
    }

    #[test]
    fn snapshot_heading_line_parts() {
        let tree = parse("** DONE [#A] Ship it :rel:\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..27
          HEADING@0..27
            STARS@0..3 "** "
            TODO_KEYWORD@3..7 "DONE"
            PRIORITY@7..13 " [#A] "
            TITLE@13..20
              TEXT@13..20 "Ship it"
            TAGS@20..26 " :rel:"
            END_OF_LINE@26..27 "\\n"
        "#);
    }

    // === Error tolerance / messy input tests ===

    #[test]
    fn unclosed_markup_is_text() {
        let input = "*bold without end\n/half\n";
        assert_eq!(parse(input).text().to_string(), input);
        assert!(
            parse(input)
                .descendants()
                .all(|n| !n.kind().is_emphasis())
        );
    }

    #[test]
    fn block_without_footer_is_keyword_line() {
        let input = "#+BEGIN_QUOTE\nnever closed\n";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
        assert!(tree.descendants().all(|n| n.kind() != SyntaxKind::BLOCK));
    }

    #[test]
    fn drawer_without_end_is_text() {
        let input = ":PROPERTIES:\n:A: b\n";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
        assert!(tree.descendants().all(|n| n.kind() != SyntaxKind::PROPERTY_DRAWER));
    }

    #[test]
    fn unicode_is_preserved() {
        let input = "* TODO Café ☕ :tag:\nnaïve *bold* 日本語\n";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn crlf_is_preserved() {
        let input = "* a\r\nbody\r\n";
        assert_eq!(parse(input).text().to_string(), input);
    }

    #[test]
    fn stray_stars_and_brackets() {
        for input in ["***", "*\n**\n", "[[", "]]", "<", "[[a][b][c]]", "* [#", "=", ":END:\n"] {
            assert_eq!(parse(input).text().to_string(), input, "input {input:?}");
        }
    }
}
