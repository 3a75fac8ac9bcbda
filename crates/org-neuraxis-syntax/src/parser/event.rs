//! # Parser Events
//!
//! The parser does not build the tree itself. It emits a **flat sequence**
//! of events that the [`Sink`](super::sink::Sink) later turns into a Rowan
//! tree:
//!
//! ```text
//! Start(HEADING)     ← Begin a HEADING node
//!   Token(STARS, 2)  ← Next 2 bytes of input as a STARS token
//!   Start(TITLE)
//!     Token(TEXT, 5)
//!   Finish
//!   Token(END_OF_LINE, 1)
//! Finish             ← End the HEADING node
//! ```
//!
//! Tokens carry their byte length; the sink slices the source text in order,
//! so the events alone decide how input bytes are grouped.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    Start { kind: SyntaxKind },

    /// The next `len` bytes of input become one token of `kind`.
    Token { kind: SyntaxKind, len: usize },

    /// Finish the current node. Paired with a preceding `Start`.
    Finish,

    /// A placeholder that will be replaced.
    ///
    /// `parser.start()` pushes one; `marker.complete()` turns it into a
    /// `Start`. An abandoned placeholder is skipped by the sink.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    pub fn token(kind: SyntaxKind, len: usize) -> Self {
        Event::Token { kind, len }
    }
}
