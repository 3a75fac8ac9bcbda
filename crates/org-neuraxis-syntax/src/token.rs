//! Token kinds produced by the recognizers.
//!
//! A recognizer answers with a [`Token`]: a kind and a byte length measured
//! from the cursor it was given. Some kinds are zero-width signals
//! ([`TokenKind::Indent`], [`TokenKind::Dedent`], [`TokenKind::CommentLine`],
//! [`TokenKind::KeywordComment`]) that only steer the grammar.

use crate::context::ParentObject;
use crate::syntax_kind::SyntaxKind;

/// The six inline emphasis kinds and their delimiter characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Markup {
    /// `*bold*`
    Bold,
    /// `/italic/`
    Italic,
    /// `_underline_`
    Underline,
    /// `=verbatim=`
    Verbatim,
    /// `~code~`
    Code,
    /// `+strike-through+`
    StrikeThrough,
}

impl Markup {
    pub const ALL: [Markup; 6] = [
        Markup::Bold,
        Markup::Italic,
        Markup::Underline,
        Markup::Verbatim,
        Markup::Code,
        Markup::StrikeThrough,
    ];

    pub fn marker(self) -> u8 {
        match self {
            Markup::Bold => b'*',
            Markup::Italic => b'/',
            Markup::Underline => b'_',
            Markup::Verbatim => b'=',
            Markup::Code => b'~',
            Markup::StrikeThrough => b'+',
        }
    }

    pub fn from_marker(c: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.marker() == c)
    }

    /// Verbatim and code spans hide their content from every other recognizer.
    pub fn is_opaque(self) -> bool {
        matches!(self, Markup::Verbatim | Markup::Code)
    }

    pub fn parent(self) -> ParentObject {
        match self {
            Markup::Bold => ParentObject::TextBold,
            Markup::Italic => ParentObject::TextItalic,
            Markup::Underline => ParentObject::TextUnderline,
            Markup::Verbatim => ParentObject::TextVerbatim,
            Markup::Code => ParentObject::TextCode,
            Markup::StrikeThrough => ParentObject::TextStrikeThrough,
        }
    }

    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            Markup::Bold => SyntaxKind::TEXT_BOLD,
            Markup::Italic => SyntaxKind::TEXT_ITALIC,
            Markup::Underline => SyntaxKind::TEXT_UNDERLINE,
            Markup::Verbatim => SyntaxKind::TEXT_VERBATIM,
            Markup::Code => SyntaxKind::TEXT_CODE,
            Markup::StrikeThrough => SyntaxKind::TEXT_STRIKE_THROUGH,
        }
    }
}

/// Every terminal the grammar can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Zero-width: a heading deeper than the current one starts here.
    Indent,
    /// Zero-width: the current heading ends here.
    Dedent,
    /// `*`+ at line start with the whitespace after it.
    Stars,
    TodoKeyword,
    /// `[#A]` with surrounding whitespace.
    Priority,
    /// Span of a heading title. Reported for its extent; the title's content
    /// is tokenized separately.
    Title,
    /// `:tag1:tag2:` with the whitespace before it.
    Tags,
    /// Trailing whitespace and the newline closing a heading line.
    EndOfLine,
    PlanningKeyword,
    PlanningValue,
    PropertyDrawerHeader,
    PropertyDrawerContent,
    PropertyDrawerFooter,
    BlockHeader,
    BlockContent,
    BlockFooter,
    /// Zero-width: a `# ` comment line starts here.
    CommentLine,
    /// Zero-width: a `#+KEY:` line starts here.
    KeywordComment,
    /// Remainder of a comment line, newline included.
    CommentText,
    MarkupStart(Markup),
    MarkupEnd(Markup),
    RegularLinkStart,
    RegularLinkEnd,
    AngleLinkStart,
    AngleLinkEnd,
    PlainLink,
    Text,
    Whitespace,
}

impl TokenKind {
    /// Zero-width kinds never consume input.
    pub fn is_zero_width(self) -> bool {
        matches!(
            self,
            TokenKind::Indent | TokenKind::Dedent | TokenKind::CommentLine | TokenKind::KeywordComment
        )
    }

    /// The tree token this kind becomes. `None` for signals and for spans the
    /// grammar splits further (titles, planning values).
    pub fn to_syntax_kind(self) -> Option<SyntaxKind> {
        let kind = match self {
            TokenKind::Indent
            | TokenKind::Dedent
            | TokenKind::CommentLine
            | TokenKind::KeywordComment
            | TokenKind::Title
            | TokenKind::PlanningValue => return None,
            TokenKind::Stars => SyntaxKind::STARS,
            TokenKind::TodoKeyword => SyntaxKind::TODO_KEYWORD,
            TokenKind::Priority => SyntaxKind::PRIORITY,
            TokenKind::Tags => SyntaxKind::TAGS,
            TokenKind::EndOfLine => SyntaxKind::END_OF_LINE,
            TokenKind::PlanningKeyword => SyntaxKind::PLANNING_KEYWORD,
            TokenKind::PropertyDrawerHeader => SyntaxKind::PROPERTY_DRAWER_HEADER,
            TokenKind::PropertyDrawerContent => SyntaxKind::PROPERTY_DRAWER_CONTENT,
            TokenKind::PropertyDrawerFooter => SyntaxKind::PROPERTY_DRAWER_FOOTER,
            TokenKind::BlockHeader => SyntaxKind::BLOCK_HEADER,
            TokenKind::BlockContent => SyntaxKind::BLOCK_CONTENT,
            TokenKind::BlockFooter => SyntaxKind::BLOCK_FOOTER,
            TokenKind::CommentText => SyntaxKind::COMMENT_TEXT,
            TokenKind::MarkupStart(_) | TokenKind::MarkupEnd(_) => SyntaxKind::MARKUP_MARKER,
            TokenKind::RegularLinkStart | TokenKind::AngleLinkStart => SyntaxKind::LINK_OPEN,
            TokenKind::RegularLinkEnd | TokenKind::AngleLinkEnd => SyntaxKind::LINK_CLOSE,
            TokenKind::PlainLink => SyntaxKind::PLAIN_LINK,
            TokenKind::Text => SyntaxKind::TEXT,
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
        };
        Some(kind)
    }
}

/// A recognized token: what it is and how many bytes it spans from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub len: usize,
}

impl Token {
    pub fn new(kind: TokenKind, len: usize) -> Self {
        Self { kind, len }
    }

    /// A token that consumes nothing.
    pub fn zero(kind: TokenKind) -> Self {
        Self { kind, len: 0 }
    }
}
