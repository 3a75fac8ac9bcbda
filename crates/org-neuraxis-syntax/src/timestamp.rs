//! # Timestamps - Lexing Planning Values
//!
//! A planning value such as `<2024-03-01 Fri 09:00 +1w>` is recognized as a
//! single span by the context-sensitive tokenizer. Its inside is context
//! free, so a [Logos] lexer splits it into tree tokens:
//!
//! ```text
//! " <2024-03-01 Fri>\n" → [WHITESPACE, TIMESTAMP_ACTIVE, NEWLINE]
//! ```
//!
//! [Logos]: https://docs.rs/logos

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds inside a planning value.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampToken {
    /// `<2024-03-01 Fri 09:00>`
    #[regex(r"<[0-9]{4}-[0-9]{2}-[0-9]{2}[^<>\n]*>")]
    Active,

    /// `[2024-03-01 Fri]`
    #[regex(r"\[[0-9]{4}-[0-9]{2}-[0-9]{2}[^\[\]\n]*\]")]
    Inactive,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    /// Range separators and anything that is not a timestamp
    #[regex(r"[^ \t\n<\[]+")]
    #[token("<")]
    #[token("[")]
    Text,
}

impl TimestampToken {
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TimestampToken::Active => SyntaxKind::TIMESTAMP_ACTIVE,
            TimestampToken::Inactive => SyntaxKind::TIMESTAMP_INACTIVE,
            TimestampToken::Whitespace => SyntaxKind::WHITESPACE,
            TimestampToken::Newline => SyntaxKind::NEWLINE,
            TimestampToken::Text => SyntaxKind::TEXT,
        }
    }
}

/// Splits a planning value into `(kind, len)` pieces covering every byte.
/// Adjacent text pieces are merged.
pub fn lex(input: &str) -> Vec<(SyntaxKind, usize)> {
    let mut pieces: Vec<(SyntaxKind, usize)> = Vec::new();
    let mut lexer = TimestampToken::lexer(input);

    while let Some(result) = lexer.next() {
        let kind = result.map_or(SyntaxKind::TEXT, TimestampToken::to_syntax_kind);
        let len = lexer.span().len();
        match pieces.last_mut() {
            Some((SyntaxKind::TEXT, prev)) if kind == SyntaxKind::TEXT => *prev += len,
            _ => pieces.push((kind, len)),
        }
    }

    pieces
}

/// A parsed `<...>` or `[...]` timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub active: bool,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    /// Hour and minute of the start time, if given.
    pub time: Option<(u8, u8)>,
    /// Everything after the date: day name, times, repeaters, warnings.
    pub rest: String,
}

impl Timestamp {
    pub fn parse(text: &str) -> Option<Self> {
        let (active, inner) = if let Some(inner) = text.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            (true, inner)
        } else {
            let inner = text.strip_prefix('[')?.strip_suffix(']')?;
            (false, inner)
        };

        let date = inner.get(..10)?;
        let mut parts = date.split('-');
        let year = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;
        let day = parts.next()?.parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }

        let rest = inner[10..].trim().to_string();
        let time = rest.split_whitespace().find_map(parse_time);
        Some(Self {
            active,
            year,
            month,
            day,
            time,
            rest,
        })
    }

    /// `(year, month, day)`
    pub fn date(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }
}

/// `9:00`, `09:00` or the start of a `09:00-10:30` range.
fn parse_time(word: &str) -> Option<(u8, u8)> {
    let start = word.split('-').next()?;
    let (hour, minute) = start.split_once(':')?;
    let hour: u8 = hour.parse().ok()?;
    let minute: u8 = minute.parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}
