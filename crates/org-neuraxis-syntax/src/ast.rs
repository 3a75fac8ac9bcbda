//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a [`SyntaxNode`] of one kind and reads its fields from
//! the child tokens. Nothing here re-scans the source; all answers come from
//! the tree the parser built.
//!
//! ```
//! use org_neuraxis_syntax::Keywords;
//! use org_neuraxis_syntax::ast::Document;
//!
//! let doc = Document::parse("* DONE [#A] Ship it :release:\n");
//! let heading = doc.headings().next().unwrap();
//! assert_eq!(heading.todo_keyword().as_deref(), Some("DONE"));
//! assert!(heading.is_done(&Keywords::default()));
//! assert_eq!(heading.priority(), Some('A'));
//! assert_eq!(heading.title_text(), "Ship it");
//! assert_eq!(heading.tags(), vec!["release"]);
//! ```

use crate::engine::Engine;
use crate::keywords::Keywords;
use crate::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::timestamp::Timestamp;

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    fn text(&self) -> String {
        self.syntax().text().to_string()
    }
}

macro_rules! ast_node {
    ($name:ident, $($kind:ident)|+) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Document, ROOT);
ast_node!(Heading, HEADING);
ast_node!(Title, TITLE);
ast_node!(Planning, PLANNING);
ast_node!(Section, SECTION | ZEROTH_SECTION);
ast_node!(Block, BLOCK);
ast_node!(PropertyDrawer, PROPERTY_DRAWER);
ast_node!(RegularLink, REGULAR_LINK);

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

impl Document {
    /// Parses `text` with the default keywords.
    pub fn parse(text: &str) -> Self {
        Self(crate::parser::parse(text))
    }

    pub fn parse_with(engine: &Engine, text: &str) -> Self {
        Self(crate::parser::parse_with(engine, text).syntax())
    }

    /// Top-level headings.
    pub fn headings(&self) -> impl Iterator<Item = Heading> + '_ {
        self.0.children().filter_map(Heading::cast)
    }

    /// Content before the first heading.
    pub fn zeroth_section(&self) -> Option<Section> {
        self.0.children().find_map(Section::cast)
    }
}

impl Heading {
    /// Number of stars.
    pub fn level(&self) -> usize {
        token(&self.0, SyntaxKind::STARS)
            .map_or(0, |t| t.text().bytes().take_while(|&b| b == b'*').count())
    }

    pub fn todo_keyword(&self) -> Option<String> {
        token(&self.0, SyntaxKind::TODO_KEYWORD).map(|t| t.text().to_string())
    }

    /// Whether the todo keyword is one of the configured done keywords.
    pub fn is_done(&self, keywords: &Keywords) -> bool {
        self.todo_keyword().is_some_and(|k| keywords.is_done(&k))
    }

    /// The letter of a `[#A]` cookie.
    pub fn priority(&self) -> Option<char> {
        let cookie = token(&self.0, SyntaxKind::PRIORITY)?;
        cookie.text().trim().strip_prefix("[#")?.chars().next()
    }

    pub fn title(&self) -> Option<Title> {
        self.0.children().find_map(Title::cast)
    }

    /// Title text, empty when the heading has none.
    pub fn title_text(&self) -> String {
        self.title().map(|t| t.text()).unwrap_or_default()
    }

    pub fn tags(&self) -> Vec<String> {
        token(&self.0, SyntaxKind::TAGS)
            .map(|t| {
                t.text()
                    .split(':')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn planning(&self) -> Vec<PlanningEntry> {
        self.0
            .children()
            .find_map(Planning::cast)
            .map(|p| p.entries())
            .unwrap_or_default()
    }

    pub fn section(&self) -> Option<Section> {
        self.0.children().find_map(Section::cast)
    }

    /// Headings nested directly below this one.
    pub fn children(&self) -> impl Iterator<Item = Heading> + '_ {
        self.0.children().filter_map(Heading::cast)
    }
}

/// One `SCHEDULED:`/`DEADLINE:`/`CLOSED:` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningEntry {
    /// The keyword without its colon.
    pub keyword: String,
    pub timestamps: Vec<Timestamp>,
}

impl Planning {
    pub fn entries(&self) -> Vec<PlanningEntry> {
        let mut entries: Vec<PlanningEntry> = Vec::new();
        for element in self.0.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::PLANNING_KEYWORD => {
                    entries.push(PlanningEntry {
                        keyword: t.text().trim().trim_end_matches(':').to_string(),
                        timestamps: Vec::new(),
                    });
                }
                rowan::NodeOrToken::Node(value) if value.kind() == SyntaxKind::PLANNING_VALUE => {
                    let Some(entry) = entries.last_mut() else {
                        continue;
                    };
                    entry.timestamps.extend(
                        value
                            .children_with_tokens()
                            .filter_map(|e| e.into_token())
                            .filter(|t| {
                                matches!(
                                    t.kind(),
                                    SyntaxKind::TIMESTAMP_ACTIVE | SyntaxKind::TIMESTAMP_INACTIVE
                                )
                            })
                            .filter_map(|t| Timestamp::parse(t.text())),
                    );
                }
                _ => {}
            }
        }
        entries
    }
}

impl Section {
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.0.children().filter_map(Block::cast)
    }

    pub fn property_drawer(&self) -> Option<PropertyDrawer> {
        self.0.children().find_map(PropertyDrawer::cast)
    }

    /// Regular links anywhere in the section.
    pub fn links(&self) -> impl Iterator<Item = RegularLink> + '_ {
        self.0.descendants().filter_map(RegularLink::cast)
    }
}

/// What a block is, from the suffix of its `#+BEGIN` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Src { language: Option<String> },
    Quote,
    Example,
    Export,
    Verse,
    Center,
    Comment,
    /// `#+BEGIN: clocktable ...`
    Dynamic,
    /// Any other `#+BEGIN_NAME`, name upper-cased.
    Special(String),
}

impl Block {
    fn header(&self) -> String {
        token(&self.0, SyntaxKind::BLOCK_HEADER)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> BlockKind {
        let header = self.header();
        let rest = header.get("#+BEGIN".len()..).unwrap_or_default();
        if rest.starts_with(':') {
            return BlockKind::Dynamic;
        }
        let mut words = rest.split_whitespace();
        let name = words
            .next()
            .unwrap_or_default()
            .trim_start_matches('_')
            .to_ascii_uppercase();
        match name.as_str() {
            "SRC" => BlockKind::Src {
                language: words
                    .next()
                    .filter(|w| !w.starts_with(':'))
                    .map(str::to_string),
            },
            "QUOTE" => BlockKind::Quote,
            "EXAMPLE" => BlockKind::Example,
            "EXPORT" => BlockKind::Export,
            "VERSE" => BlockKind::Verse,
            "CENTER" => BlockKind::Center,
            "COMMENT" => BlockKind::Comment,
            _ => BlockKind::Special(name),
        }
    }

    /// The language of a source block.
    pub fn language(&self) -> Option<String> {
        match self.kind() {
            BlockKind::Src { language } => language,
            _ => None,
        }
    }

    /// Raw text between the delimiter lines.
    pub fn content(&self) -> String {
        token(&self.0, SyntaxKind::BLOCK_CONTENT)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

impl PropertyDrawer {
    /// `(name, value)` for every `:NAME: value` line, in order.
    pub fn properties(&self) -> Vec<(String, String)> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::PROPERTY_DRAWER_CONTENT)
            .filter_map(|t| {
                let line = t.text().trim();
                let (name, value) = line.strip_prefix(':')?.split_once(':')?;
                if name.is_empty() || name.contains(char::is_whitespace) {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.properties()
            .into_iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

impl RegularLink {
    fn inner(&self) -> String {
        let text = self.text();
        text.trim_start_matches("[[").trim_end_matches("]]").to_string()
    }

    pub fn target(&self) -> String {
        let inner = self.inner();
        match inner.split_once("][") {
            Some((target, _)) => target.to_string(),
            None => inner,
        }
    }

    pub fn description(&self) -> Option<String> {
        self.inner().split_once("][").map(|(_, d)| d.to_string())
    }
}
