//! The parse context carried on every parser stack.
//!
//! A [`ParseContext`] is an immutable value. Committing a token derives a new
//! one through [`ParseContext::shift`]; the old value is never touched, so a
//! GLR driver can keep one context per stack and fork them freely. Two
//! contexts are interchangeable exactly when their [`StructuralKey`]s are
//! equal, which is what stack merging compares.

use std::hash::{Hash, Hasher};

use crate::recognizers::{block, heading};
use crate::scanner::Cursor;
use crate::token::{Markup, TokenKind};

/// Constructs that may currently be open around the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentObject {
    Title,
    TextBold,
    TextItalic,
    TextUnderline,
    TextVerbatim,
    TextCode,
    TextStrikeThrough,
    RegularLink,
    AngleLink,
    Block,
    PropertyDrawer,
}

impl ParentObject {
    fn bit(self) -> u16 {
        1 << self as u16
    }

    pub fn markup(self) -> Option<Markup> {
        match self {
            ParentObject::TextBold => Some(Markup::Bold),
            ParentObject::TextItalic => Some(Markup::Italic),
            ParentObject::TextUnderline => Some(Markup::Underline),
            ParentObject::TextVerbatim => Some(Markup::Verbatim),
            ParentObject::TextCode => Some(Markup::Code),
            ParentObject::TextStrikeThrough => Some(Markup::StrikeThrough),
            _ => None,
        }
    }

    pub fn is_link(self) -> bool {
        matches!(self, ParentObject::RegularLink | ParentObject::AngleLink)
    }
}

/// Canonical encoding of everything a [`ParseContext`] holds.
///
/// Lengths prefix every variable part, so distinct contexts never share a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructuralKey(Box<[u32]>);

impl StructuralKey {
    fn of(
        levels: &[u32],
        pending: Option<u32>,
        parents: &[ParentObject],
        delimiter: Option<&str>,
    ) -> Self {
        let mut key = Vec::with_capacity(4 + levels.len() + parents.len());
        key.push(levels.len() as u32);
        key.extend_from_slice(levels);
        key.push(pending.map_or(0, |level| level + 1));
        key.push(parents.len() as u32);
        key.extend(parents.iter().map(|p| *p as u32));
        match delimiter {
            None => key.push(0),
            Some(d) => {
                key.push(1);
                key.push(d.len() as u32);
                key.extend(d.bytes().map(u32::from));
            }
        }
        Self(key.into_boxed_slice())
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Tokenizer state threaded through the parse.
#[derive(Debug, Clone)]
pub struct ParseContext {
    heading_levels: Vec<u32>,
    pending_heading_level: Option<u32>,
    parent_objects: Vec<ParentObject>,
    active_block_delimiter: Option<String>,
    open: u16,
    key: StructuralKey,
}

impl ParseContext {
    /// The context at the start of a document: nothing open, no headings.
    pub fn new() -> Self {
        Self::build(Vec::new(), None, Vec::new(), None)
    }

    fn build(
        heading_levels: Vec<u32>,
        pending_heading_level: Option<u32>,
        parent_objects: Vec<ParentObject>,
        active_block_delimiter: Option<String>,
    ) -> Self {
        debug_assert!(heading_levels.windows(2).all(|w| w[0] < w[1]));
        let open = parent_objects.iter().fold(0, |acc, p| acc | p.bit());
        let key = StructuralKey::of(
            &heading_levels,
            pending_heading_level,
            &parent_objects,
            active_block_delimiter.as_deref(),
        );
        Self {
            heading_levels,
            pending_heading_level,
            parent_objects,
            active_block_delimiter,
            open,
            key,
        }
    }

    /// Levels of the currently open headings, outermost first.
    pub fn heading_levels(&self) -> &[u32] {
        &self.heading_levels
    }

    pub fn current_heading_level(&self) -> Option<u32> {
        self.heading_levels.last().copied()
    }

    /// Level of a heading seen while closing the previous one, consumed by the
    /// next [`TokenKind::Indent`].
    pub fn pending_heading_level(&self) -> Option<u32> {
        self.pending_heading_level
    }

    pub fn parent_objects(&self) -> &[ParentObject] {
        &self.parent_objects
    }

    pub fn innermost(&self) -> Option<ParentObject> {
        self.parent_objects.last().copied()
    }

    pub fn is_innermost(&self, parent: ParentObject) -> bool {
        self.innermost() == Some(parent)
    }

    pub fn is_open(&self, parent: ParentObject) -> bool {
        self.open & parent.bit() != 0
    }

    /// The innermost object, if it is an emphasis span.
    pub fn innermost_markup(&self) -> Option<Markup> {
        self.innermost().and_then(ParentObject::markup)
    }

    /// Emphasis spans currently open, outermost first.
    pub fn open_markups(&self) -> impl Iterator<Item = Markup> + '_ {
        self.parent_objects.iter().filter_map(|p| p.markup())
    }

    /// Whether the innermost object is a verbatim or code span.
    pub fn in_opaque_markup(&self) -> bool {
        self.innermost_markup().is_some_and(Markup::is_opaque)
    }

    pub fn in_link(&self) -> bool {
        self.is_open(ParentObject::RegularLink) || self.is_open(ParentObject::AngleLink)
    }

    /// Upper-cased suffix of the open block's header, `_SRC` in `#+begin_src`.
    pub fn active_block_delimiter(&self) -> Option<&str> {
        self.active_block_delimiter.as_deref()
    }

    pub fn key(&self) -> &StructuralKey {
        &self.key
    }

    /// The context after committing a `kind` token that starts at `cur`.
    ///
    /// The cursor is only read: `Indent` and `Dedent` look at the heading
    /// stars ahead, `BlockHeader` reads its delimiter.
    pub fn shift(&self, kind: TokenKind, cur: &Cursor<'_>) -> ParseContext {
        let mut levels = self.heading_levels.clone();
        let mut pending = self.pending_heading_level;
        let mut parents = self.parent_objects.clone();
        let mut delimiter = self.active_block_delimiter.clone();

        match kind {
            TokenKind::Indent => {
                if let Some(level) = pending.take().or_else(|| heading::heading_level(cur, 0)) {
                    levels.push(level);
                }
            }
            TokenKind::Dedent => {
                levels.pop();
                pending = heading::heading_level(cur, 0);
            }
            TokenKind::Stars => parents.push(ParentObject::Title),
            TokenKind::EndOfLine => pop(&mut parents, ParentObject::Title),
            TokenKind::MarkupStart(m) => parents.push(m.parent()),
            TokenKind::MarkupEnd(m) => pop(&mut parents, m.parent()),
            TokenKind::RegularLinkStart => parents.push(ParentObject::RegularLink),
            TokenKind::RegularLinkEnd => pop(&mut parents, ParentObject::RegularLink),
            TokenKind::AngleLinkStart => parents.push(ParentObject::AngleLink),
            TokenKind::AngleLinkEnd => pop(&mut parents, ParentObject::AngleLink),
            TokenKind::BlockHeader => {
                parents.push(ParentObject::Block);
                delimiter = block::header_suffix(cur);
            }
            TokenKind::BlockFooter => {
                pop(&mut parents, ParentObject::Block);
                delimiter = None;
            }
            TokenKind::PropertyDrawerHeader => parents.push(ParentObject::PropertyDrawer),
            TokenKind::PropertyDrawerFooter => pop(&mut parents, ParentObject::PropertyDrawer),
            _ => return self.clone(),
        }

        Self::build(levels, pending, parents, delimiter)
    }
}

fn pop(parents: &mut Vec<ParentObject>, expected: ParentObject) {
    if parents.last() == Some(&expected) {
        parents.pop();
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ParseContext {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ParseContext {}

impl Hash for ParseContext {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
