//! Character classes.
//!
//! Each predicate takes `Option<u8>` so it can be fed straight from
//! [`Cursor::peek`](super::Cursor::peek). `None` stands for "before the start
//! or past the end of the text" and counts as an end-of-line boundary.

use crate::token::Markup;

/// Space or tab. Newlines are not whitespace.
pub fn is_whitespace(c: Option<u8>) -> bool {
    matches!(c, Some(b' ' | b'\t'))
}

/// A line feed, or the start/end-of-text sentinel.
pub fn is_end_of_line(c: Option<u8>) -> bool {
    matches!(c, None | Some(b'\n'))
}

pub fn is_whitespace_or_eol(c: Option<u8>) -> bool {
    is_whitespace(c) || is_end_of_line(c)
}

pub fn is_alphanumeric(c: Option<u8>) -> bool {
    c.is_some_and(|c| c.is_ascii_alphanumeric())
}

/// Characters allowed in a tag run (`:` included).
pub fn is_tag_char(c: Option<u8>) -> bool {
    c.is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, b'_' | b'@' | b'#' | b'%' | b':'))
}

/// May precede an opening emphasis marker.
pub fn is_markup_pre(c: Option<u8>) -> bool {
    is_whitespace_or_eol(c) || matches!(c, Some(b'-' | b'(' | b'{' | b'\'' | b'"'))
}

/// May follow a closing emphasis marker.
pub fn is_markup_post(c: Option<u8>) -> bool {
    is_whitespace_or_eol(c)
        || matches!(
            c,
            Some(
                b'-' | b'.' | b',' | b';' | b':' | b'!' | b'?' | b')' | b'}' | b'[' | b'"'
                    | b'\''
                    | b'\\'
            )
        )
}

/// May precede a plain link. Emphasis markers qualify so that `*https://x*` links.
pub fn is_plain_link_pre(c: Option<u8>) -> bool {
    is_whitespace_or_eol(c)
        || matches!(c, Some(b'(' | b'{' | b'\'' | b'"' | b'-' | b':'))
        || c.and_then(Markup::from_marker).is_some()
}

/// Punctuation trimmed from the tail of a plain link.
pub fn is_plain_link_trailer(c: Option<u8>) -> bool {
    matches!(c, Some(b'.' | b',' | b';' | b':' | b'!' | b'?' | b'\'' | b'"'))
}
