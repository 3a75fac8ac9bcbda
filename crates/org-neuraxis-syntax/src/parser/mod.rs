//! # Parser - Driving the Recognizers
//!
//! This module is the reference driver for the [`Engine`]. It walks the
//! org grammar top-down and, at every step, asks the engine whether a
//! given token kind is acceptable at the current position:
//!
//! ```text
//! grammar wants Stars → engine.recognize(Stars, cursor, context) → Some(Token)
//!                     → context = context.shift(Stars, cursor)
//!                     → cursor advances by token.len
//! ```
//!
//! Committing a token is the only thing that moves the cursor or changes the
//! [`ParseContext`]. Zero-width tokens (`Indent`, `Dedent`, comment signals)
//! are committed like any other; they shape the tree but leave no tree token.
//!
//! ## Event-Based Tree Construction
//!
//! Tree structure is recorded as a flat list of [`Event`]s that the
//! [`Sink`] turns into a Rowan tree once parsing is done. Nodes are opened
//! with a [`Marker`] that **must** be completed or abandoned:
//!
//! ```ignore
//! let m = p.start();
//! p.eat(TokenKind::Stars);
//! m.complete(p, SyntaxKind::HEADING);
//! ```
//!
//! ## Public API
//!
//! - [`parse`] - parse with the default keywords, returning the tree
//! - [`parse_with`] - parse with a configured engine, returning a [`Parse`]
//!   with the tree, the committed tokens and the final context
//!
//! ```
//! use org_neuraxis_syntax::parse;
//!
//! let tree = parse("* TODO Write docs\n");
//! assert_eq!(tree.text().to_string(), "* TODO Write docs\n");
//! ```

pub mod event;
pub mod sink;

mod grammar;

use std::ops::Range;

use rowan::GreenNode;

use crate::context::ParseContext;
use crate::engine::Engine;
use crate::scanner::Cursor;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::timestamp;
use crate::token::{Token, TokenKind};
use event::Event;
use sink::Sink;

/// A committed token and the bytes it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedToken {
    pub kind: TokenKind,
    pub range: Range<usize>,
}

/// The result of a parse.
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    tokens: Vec<LexedToken>,
    context: ParseContext,
}

impl Parse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Every committed token in input order, zero-width signals included.
    pub fn tokens(&self) -> &[LexedToken] {
        &self.tokens
    }

    /// The context after the last token.
    pub fn context(&self) -> &ParseContext {
        &self.context
    }
}

/// The parser state machine.
///
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Ask the engine: `at()`, `peek_heading()`
/// - Commit tokens: `bump()`, `eat()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
pub struct Parser<'e, 'input> {
    engine: &'e Engine,
    cursor: Cursor<'input>,
    context: ParseContext,
    events: Vec<Event>,
    tokens: Vec<LexedToken>,
}

impl<'e, 'input> Parser<'e, 'input> {
    pub fn with_engine(engine: &'e Engine, source: &'input str) -> Self {
        Self {
            engine,
            cursor: Cursor::new(source),
            context: engine.initial_context(),
            events: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Parse the whole input.
    pub fn parse(mut self) -> Parse {
        grammar::root(&mut self);
        let green = Sink::new(self.cursor.text(), self.events).finish();
        Parse {
            green,
            tokens: self.tokens,
            context: self.context,
        }
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// The token `kind` would produce here, without committing it.
    pub fn at(&self, kind: TokenKind) -> Option<Token> {
        self.engine.recognize(kind, &self.cursor, &self.context)
    }

    /// The `Indent`/`Dedent` decision at the current position.
    pub fn peek_heading(&self) -> Option<Token> {
        self.engine.heading_lookahead(&self.cursor, &self.context)
    }

    /// Commit a `kind` token if the engine accepts one here.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        match self.at(kind) {
            Some(token) => {
                self.bump(token);
                true
            }
            None => false,
        }
    }

    /// Commit a token the engine returned at the current position.
    pub fn bump(&mut self, token: Token) {
        match token.kind.to_syntax_kind() {
            Some(kind) => self.bump_as(token, kind),
            None => self.commit(token),
        }
    }

    /// Commit a token, recording it in the tree as `kind`.
    pub fn bump_as(&mut self, token: Token, kind: SyntaxKind) {
        if token.len > 0 {
            self.events.push(Event::token(kind, token.len));
        }
        self.commit(token);
    }

    /// Commit a planning value, splitting it into timestamp tokens.
    pub fn bump_planning_value(&mut self, token: Token) {
        let text = self.cursor.slice(0, token.len);
        self.events.push(Event::start(SyntaxKind::PLANNING_VALUE));
        for (kind, len) in timestamp::lex(text) {
            self.events.push(Event::token(kind, len));
        }
        self.events.push(Event::Finish);
        self.commit(token);
    }

    /// Consume one character nothing accepted.
    pub fn bump_error(&mut self) {
        let len = self.cursor.char_len();
        log::debug!("no token accepted at byte {}", self.cursor.pos());
        self.events.push(Event::token(SyntaxKind::ERROR_TOKEN, len));
        self.cursor.advance_by(len);
    }

    fn commit(&mut self, token: Token) {
        let start = self.cursor.pos();
        log::trace!("shift {:?} at {}..{}", token.kind, start, start + token.len);
        self.context = self.context.shift(token.kind, &self.cursor);
        self.tokens.push(LexedToken {
            kind: token.kind,
            range: start..start + token.len,
        });
        self.cursor.advance_by(token.len);
    }

    pub fn at_end(&self) -> bool {
        self.cursor.eof()
    }

    /// Absolute byte position.
    pub fn position(&self) -> usize {
        self.cursor.pos()
    }

    pub fn at_line_start(&self) -> bool {
        self.cursor.is_line_start(0)
    }

    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    /// Length from the cursor to the end of the line, newline included.
    pub fn rest_of_line(&self) -> usize {
        self.cursor.line_len(0)
    }
}

/// A marker for a node being constructed.
///
/// `parser.start()` pushes a `Placeholder` event and hands out a `Marker`
/// pointing at it. Every marker must be either:
///
/// - **Completed** via `marker.complete(parser, KIND)`, turning the
///   placeholder into a `Start` and pushing a `Finish`
/// - **Abandoned** via `marker.abandon(parser)`, removing the placeholder
///   when nothing was pushed after it
///
/// Dropping a marker without doing either panics.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    pos: usize,
    completed: bool,
}

impl Marker {
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::start(kind);
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// Only removes the placeholder if it is the last event; otherwise the
    /// placeholder stays inert and the sink ignores it.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// Parse org source with the default keywords.
pub fn parse(source: &str) -> SyntaxNode {
    parse_with(&Engine::default(), source).syntax()
}

/// Parse org source with a configured engine.
pub fn parse_with(engine: &Engine, source: &str) -> Parse {
    Parser::with_engine(engine, source).parse()
}
