use super::chars;

/// A read-only position in the input text.
///
/// Recognizers receive a cursor and look around it with [`peek`](Self::peek)
/// and [`ahead`](Self::ahead); they never move it. Only the driver advances
/// a cursor, after it has committed a token. Offsets passed to the helper
/// methods are relative to the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// A cursor at byte `pos` of `text`, clamped to the end.
    pub fn with_pos(text: &'a str, pos: usize) -> Self {
        Self {
            text,
            pos: pos.min(text.len()),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Absolute byte position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Bytes left before the end of the text.
    pub fn remaining(&self) -> usize {
        self.text.len() - self.pos
    }

    /// The byte at a signed relative offset; `None` before the start or past the end.
    pub fn peek(&self, offset: isize) -> Option<u8> {
        let at = self.pos as isize + offset;
        if at < 0 {
            return None;
        }
        self.text.as_bytes().get(at as usize).copied()
    }

    /// The byte `offset` positions ahead (`ahead(0)` is the current byte).
    pub fn ahead(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn advance(&mut self) -> Option<u8> {
        let b = self.ahead(0)?;
        self.pos += 1;
        Some(b)
    }

    /// Advances by `n` bytes, stopping at the end of the text.
    pub fn advance_by(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.text.len());
    }

    /// A copy of this cursor moved `offset` bytes forward.
    pub fn fork(&self, offset: usize) -> Cursor<'a> {
        Self::with_pos(self.text, self.pos + offset)
    }

    pub fn starts_with(&self, offset: usize, pat: &[u8]) -> bool {
        self.rest(offset).starts_with(pat)
    }

    /// ASCII case-insensitive [`starts_with`](Self::starts_with).
    pub fn starts_with_ignore_case(&self, offset: usize, pat: &[u8]) -> bool {
        let rest = self.rest(offset);
        rest.len() >= pat.len() && rest[..pat.len()].eq_ignore_ascii_case(pat)
    }

    /// Bytes between two signed relative offsets, clamped to the text.
    pub fn bytes(&self, from: isize, to: isize) -> &'a [u8] {
        let len = self.text.len() as isize;
        let from = (self.pos as isize + from).clamp(0, len) as usize;
        let to = (self.pos as isize + to).clamp(0, len) as usize;
        &self.text.as_bytes()[from..to.max(from)]
    }

    /// Text between two relative offsets. Empty when the range does not fall
    /// on character boundaries.
    pub fn slice(&self, from: usize, to: usize) -> &'a str {
        let from = (self.pos + from).min(self.text.len());
        let to = (self.pos + to).clamp(from, self.text.len());
        self.text.get(from..to).unwrap_or("")
    }

    /// Whether `offset` sits at the start of a line.
    pub fn is_line_start(&self, offset: usize) -> bool {
        chars::is_end_of_line(self.peek(offset as isize - 1))
    }

    /// Offset of the `\n` (or end of text) terminating the line containing `offset`.
    pub fn line_end(&self, offset: usize) -> usize {
        let rest = self.rest(offset);
        offset + rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len())
    }

    /// Length from `offset` to the end of its line, newline included.
    pub fn line_len(&self, offset: usize) -> usize {
        let end = self.line_end(offset);
        end + usize::from(self.ahead(end).is_some()) - offset
    }

    /// Offset of the line following the one containing `offset`, if the
    /// current line ends with a newline.
    pub fn next_line(&self, offset: usize) -> Option<usize> {
        let end = self.line_end(offset);
        self.ahead(end).map(|_| end + 1)
    }

    /// Whether the line starting at `offset` holds nothing but whitespace.
    pub fn is_blank_line(&self, offset: usize) -> bool {
        let mut i = offset;
        while chars::is_whitespace(self.ahead(i)) {
            i += 1;
        }
        chars::is_end_of_line(self.ahead(i))
    }

    /// Run of whitespace starting at `offset`.
    pub fn whitespace_len(&self, offset: usize) -> usize {
        let mut i = offset;
        while chars::is_whitespace(self.ahead(i)) {
            i += 1;
        }
        i - offset
    }

    /// Width in bytes of the character under the cursor.
    pub fn char_len(&self) -> usize {
        self.text[self.pos..]
            .chars()
            .next()
            .map_or(0, char::len_utf8)
    }

    fn rest(&self, offset: usize) -> &'a [u8] {
        let at = (self.pos + offset).min(self.text.len());
        &self.text.as_bytes()[at..]
    }
}
