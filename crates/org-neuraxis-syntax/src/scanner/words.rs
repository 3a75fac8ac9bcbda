use super::Cursor;

/// Matches a fixed set of literal words at a cursor position.
///
/// The scan accumulates characters one at a time, up to the length of the
/// longest word, and reports words in the order their full text is reached.
/// `TODO` therefore comes before `TODONE` when both are configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatcher {
    words: Vec<String>,
    longest: usize,
    ignore_case: bool,
}

impl WordMatcher {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let longest = words.iter().map(String::len).max().unwrap_or(0);
        Self {
            words,
            longest,
            ignore_case: false,
        }
    }

    /// Compare ASCII letters case-insensitively.
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// First word matching at `offset`.
    pub fn find(&self, cur: &Cursor<'_>, offset: usize) -> Option<&str> {
        self.matches(cur, offset).next()
    }

    /// Every word matching at `offset`, shortest first.
    pub fn matches<'m>(&'m self, cur: &Cursor<'_>, offset: usize) -> impl Iterator<Item = &'m str> {
        let candidate = cur.bytes(offset as isize, (offset + self.longest) as isize);
        (1..=candidate.len()).flat_map(move |len| {
            let prefix = &candidate[..len];
            self.words
                .iter()
                .filter(move |w| self.same(w.as_bytes(), prefix))
                .map(String::as_str)
        })
    }

    fn same(&self, word: &[u8], candidate: &[u8]) -> bool {
        if self.ignore_case {
            word.eq_ignore_ascii_case(candidate)
        } else {
            word == candidate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_word_at_offset() {
        let m = WordMatcher::new(["TODO", "DONE"]);
        let cur = Cursor::new("* DONE thing");
        assert_eq!(m.find(&cur, 2), Some("DONE"));
        assert_eq!(m.find(&cur, 0), None);
    }

    #[test]
    fn shorter_word_is_reported_first() {
        let m = WordMatcher::new(["TODONE", "TODO"]);
        let cur = Cursor::new("TODONE");
        let found: Vec<_> = m.matches(&cur, 0).collect();
        assert_eq!(found, vec!["TODO", "TODONE"]);
    }

    #[test]
    fn case_sensitivity() {
        let cur = Cursor::new(":end:");
        assert_eq!(WordMatcher::new([":END:"]).find(&cur, 0), None);
        assert_eq!(
            WordMatcher::new([":END:"]).ignore_case().find(&cur, 0),
            Some(":END:")
        );
    }

    #[test]
    fn word_cut_off_by_end_of_text() {
        let m = WordMatcher::new(["SCHEDULED:"]);
        assert_eq!(m.find(&Cursor::new("SCHED"), 0), None);
    }

    #[test]
    fn empty_matcher_never_matches() {
        let m = WordMatcher::new(Vec::<String>::new());
        assert_eq!(m.find(&Cursor::new("anything"), 0), None);
    }
}
