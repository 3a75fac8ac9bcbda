//! Byte-level scanning primitives shared by the recognizers.
//!
//! Everything here works on bytes: org syntax markers are ASCII, so the
//! recognizers never need to decode UTF-8 to make a decision. Multi-byte
//! characters simply fall into the "anything else" class of every predicate.

pub mod chars;
mod cursor;
mod words;

pub use cursor::Cursor;
pub use words::WordMatcher;
