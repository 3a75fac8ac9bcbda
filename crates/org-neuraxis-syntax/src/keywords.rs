//! Todo keyword and link type configuration for an [`Engine`](crate::Engine).

use thiserror::Error;

/// Link types recognized when nothing else is configured.
pub const DEFAULT_LINK_TYPES: &[&str] = &[
    "http",
    "https",
    "file",
    "mailto",
    "id",
    "doi",
    "ftp",
    "news",
    "shell",
    "elisp",
    "info",
    "help",
    "attachment",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeywordError {
    #[error("keyword lists must not contain empty keywords")]
    EmptyKeyword,
    #[error("keyword {0:?} contains whitespace")]
    Whitespace(String),
    #[error("keyword {0:?} is configured as both a todo and a done keyword")]
    TodoAndDone(String),
    #[error("link type {0:?} must be non-empty and alphanumeric")]
    InvalidLinkType(String),
}

/// Validated keyword lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    todo: Vec<String>,
    done: Vec<String>,
    link_types: Vec<String>,
}

impl Keywords {
    pub fn new<T, D, L>(todo: T, done: D, link_types: L) -> Result<Self, KeywordError>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        let todo: Vec<String> = todo.into_iter().map(Into::into).collect();
        let done: Vec<String> = done.into_iter().map(Into::into).collect();
        let link_types: Vec<String> = link_types.into_iter().map(Into::into).collect();

        for word in todo.iter().chain(&done) {
            if word.is_empty() {
                return Err(KeywordError::EmptyKeyword);
            }
            if word.chars().any(char::is_whitespace) {
                return Err(KeywordError::Whitespace(word.clone()));
            }
        }
        if let Some(word) = todo.iter().find(|w| done.contains(w)) {
            return Err(KeywordError::TodoAndDone(word.clone()));
        }
        if let Some(bad) = link_types
            .iter()
            .find(|t| t.is_empty() || !t.bytes().all(|b| b.is_ascii_alphanumeric()))
        {
            return Err(KeywordError::InvalidLinkType(bad.clone()));
        }

        Ok(Self {
            todo,
            done,
            link_types,
        })
    }

    pub fn todo(&self) -> &[String] {
        &self.todo
    }

    pub fn done(&self) -> &[String] {
        &self.done
    }

    pub fn link_types(&self) -> &[String] {
        &self.link_types
    }

    /// Todo keywords followed by done keywords.
    pub fn all_keywords(&self) -> impl Iterator<Item = &str> {
        self.todo.iter().chain(&self.done).map(String::as_str)
    }

    pub fn is_keyword(&self, word: &[u8]) -> bool {
        self.all_keywords().any(|k| k.as_bytes() == word)
    }

    pub fn is_done(&self, word: &str) -> bool {
        self.done.iter().any(|d| d == word)
    }

    pub fn is_link_type(&self, word: &[u8]) -> bool {
        self.link_types.iter().any(|t| t.as_bytes() == word)
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            todo: vec!["TODO".to_string()],
            done: vec!["DONE".to_string()],
            link_types: DEFAULT_LINK_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn default_keywords() {
        let k = Keywords::default();
        assert_eq!(k.todo(), ["TODO"]);
        assert_eq!(k.done(), ["DONE"]);
        assert!(k.is_link_type(b"https"));
        assert!(!k.is_link_type(b"gopher"));
        assert!(k.is_done("DONE"));
        assert!(!k.is_done("TODO"));
    }

    #[test]
    fn custom_keywords() {
        let k = Keywords::new(["TODO", "WAIT"], ["DONE", "CANCELLED"], ["https"]).unwrap();
        let all: Vec<_> = k.all_keywords().collect();
        assert_eq!(all, vec!["TODO", "WAIT", "DONE", "CANCELLED"]);
        assert!(k.is_keyword(b"WAIT"));
        assert!(!k.is_keyword(b"WAITING"));
    }

    #[rstest]
    #[case(vec![""], vec!["DONE"], KeywordError::EmptyKeyword)]
    #[case(vec!["IN PROGRESS"], vec!["DONE"], KeywordError::Whitespace("IN PROGRESS".into()))]
    #[case(vec!["DONE"], vec!["DONE"], KeywordError::TodoAndDone("DONE".into()))]
    fn rejects_bad_keywords(
        #[case] todo: Vec<&str>,
        #[case] done: Vec<&str>,
        #[case] expected: KeywordError,
    ) {
        assert_eq!(Keywords::new(todo, done, ["https"]), Err(expected));
    }

    #[test]
    fn rejects_bad_link_type() {
        assert_eq!(
            Keywords::new(["TODO"], ["DONE"], ["https:"]),
            Err(KeywordError::InvalidLinkType("https:".into()))
        );
    }
}
