//! Sink for converting parser events into a Rowan green tree.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::parser::event::Event;
use crate::syntax_kind::SyntaxKind;

/// Converts parser events and the source text into a green tree.
pub struct Sink<'input> {
    builder: GreenNodeBuilder<'static>,
    text: &'input str,
    cursor: usize,
    events: Vec<Event>,
}

impl<'input> Sink<'input> {
    pub fn new(text: &'input str, events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            text,
            cursor: 0,
            events,
        }
    }

    /// Consume the sink and build the green tree.
    pub fn finish(mut self) -> GreenNode {
        for event in std::mem::take(&mut self.events) {
            match event {
                Event::Start { kind } => self.builder.start_node(kind.into()),
                Event::Token { kind, len } => self.token(kind, len),
                Event::Finish => self.builder.finish_node(),
                Event::Placeholder => {}
            }
        }
        debug_assert_eq!(self.cursor, self.text.len(), "events must cover the whole input");
        self.builder.finish()
    }

    fn token(&mut self, kind: SyntaxKind, len: usize) {
        let start = self.cursor;
        self.cursor += len;
        self.builder.token(kind.into(), &self.text[start..self.cursor]);
    }
}
