//! Planning lines: `SCHEDULED: <2024-01-01 Mon> DEADLINE: <2024-01-05 Fri>`.

use crate::context::ParseContext;
use crate::engine::Engine;
use crate::scanner::{Cursor, chars};
use crate::token::{Token, TokenKind};

pub(crate) const PLANNING_KEYWORDS: [&str; 3] = ["SCHEDULED:", "DEADLINE:", "CLOSED:"];

impl Engine {
    /// A planning keyword at the start of a line or after a planning value,
    /// leading spaces included.
    pub fn planning_keyword(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        if !chars::is_whitespace_or_eol(cur.peek(-1)) {
            return None;
        }
        let lead = cur.whitespace_len(0);
        let word = self.planning_words.find(cur, lead)?;
        Some(Token::new(TokenKind::PlanningKeyword, lead + word.len()))
    }

    /// Text after a planning keyword, up to the next whitespace-preceded
    /// keyword or through the end of the line.
    pub fn planning_value(&self, cur: &Cursor<'_>, _ctx: &ParseContext) -> Option<Token> {
        let mut end = 0;
        loop {
            match cur.ahead(end) {
                None => break,
                Some(b'\n') => return Some(Token::new(TokenKind::PlanningValue, end + 1)),
                Some(_) => {
                    if end > 0
                        && chars::is_whitespace(cur.ahead(end - 1))
                        && self.planning_words.find(cur, end).is_some()
                    {
                        break;
                    }
                    end += 1;
                }
            }
        }
        (end > 0).then(|| Token::new(TokenKind::PlanningValue, end))
    }
}
