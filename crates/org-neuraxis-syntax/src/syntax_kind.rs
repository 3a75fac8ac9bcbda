//! SyntaxKind enum for all tokens and nodes in the org CST.
//!
//! Tokens and nodes share a single enum, rust-analyzer style. Every byte of
//! the source ends up in exactly one token of the tree.

/// All syntax kinds for the org CST.
///
/// The `repr(u16)` lets rowan store kinds in its green tree directly.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending inside a planning value
    NEWLINE,
    /// Plain text run
    TEXT,
    /// Heading stars and the whitespace after them
    STARS,
    /// `TODO`, `DONE` or any configured keyword
    TODO_KEYWORD,
    /// `[#A]`
    PRIORITY,
    /// `:work:urgent:`
    TAGS,
    /// Newline closing a heading line, with trailing whitespace
    END_OF_LINE,
    /// `SCHEDULED:`, `DEADLINE:`, `CLOSED:`
    PLANNING_KEYWORD,
    /// `<2024-01-01 Mon>`
    TIMESTAMP_ACTIVE,
    /// `[2024-01-01 Mon]`
    TIMESTAMP_INACTIVE,
    /// `:PROPERTIES:` line
    PROPERTY_DRAWER_HEADER,
    /// One `:KEY: value` line inside a drawer
    PROPERTY_DRAWER_CONTENT,
    /// `:END:` line
    PROPERTY_DRAWER_FOOTER,
    /// `#+BEGIN_...` line
    BLOCK_HEADER,
    /// Raw lines between block delimiters
    BLOCK_CONTENT,
    /// `#+END_...` line
    BLOCK_FOOTER,
    /// Text of a comment or keyword line
    COMMENT_TEXT,
    /// Opening or closing emphasis delimiter
    MARKUP_MARKER,
    /// `[[` or `<`
    LINK_OPEN,
    /// `]]` or `>`
    LINK_CLOSE,
    /// `https://example.com`
    PLAIN_LINK,
    /// Input nothing else accepted
    ERROR_TOKEN,

    // === Composite Nodes ===
    /// Root document node
    ROOT,
    /// Content before the first heading
    ZEROTH_SECTION,
    HEADING,
    TITLE,
    PLANNING,
    PLANNING_VALUE,
    /// Content under a heading line, up to the next heading
    SECTION,
    PROPERTY_DRAWER,
    BLOCK,
    COMMENT_LINE,
    KEYWORD_COMMENT,
    TEXT_BOLD,
    TEXT_ITALIC,
    TEXT_UNDERLINE,
    TEXT_VERBATIM,
    TEXT_CODE,
    TEXT_STRIKE_THROUGH,
    /// `[[target][description]]`
    REGULAR_LINK,
    /// `<https://example.com>`
    ANGLE_LINK,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token.
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::ERROR_TOKEN as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    /// Returns true for the six emphasis nodes.
    pub fn is_emphasis(self) -> bool {
        (Self::TEXT_BOLD as u16..=Self::TEXT_STRIKE_THROUGH as u16).contains(&(self as u16))
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrgLang {}

impl rowan::Language for OrgLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: bounds checked above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<OrgLang>;
pub type SyntaxToken = rowan::SyntaxToken<OrgLang>;
pub type SyntaxElement = rowan::SyntaxElement<OrgLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::STARS.is_token());
        assert!(SyntaxKind::ERROR_TOKEN.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::HEADING.is_node());
        assert!(SyntaxKind::ANGLE_LINK.is_node());
        assert!(SyntaxKind::ERROR.is_node());
    }

    #[test]
    fn trivia_detection() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::NEWLINE.is_trivia());
        assert!(!SyntaxKind::END_OF_LINE.is_trivia());
    }

    #[test]
    fn emphasis_range() {
        assert!(SyntaxKind::TEXT_BOLD.is_emphasis());
        assert!(SyntaxKind::TEXT_STRIKE_THROUGH.is_emphasis());
        assert!(!SyntaxKind::REGULAR_LINK.is_emphasis());
        assert!(!SyntaxKind::KEYWORD_COMMENT.is_emphasis());
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::PROPERTY_DRAWER;
        let raw: rowan::SyntaxKind = kind.into();
        assert_eq!(OrgLang::kind_from_raw(raw), kind);
    }
}
