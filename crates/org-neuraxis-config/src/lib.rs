use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use org_neuraxis_syntax::keywords::DEFAULT_LINK_TYPES;
use org_neuraxis_syntax::{Engine, KeywordError, Keywords};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid keywords in config file at {config_path}: {source}")]
    InvalidKeywords {
        config_path: PathBuf,
        source: KeywordError,
    },
}

/// Keyword lists handed to the tokenizer.
///
/// ```toml
/// todo_keywords = ["TODO", "NEXT", "WAIT"]
/// done_keywords = ["DONE", "CANCELLED"]
/// link_types = ["https", "file", "id"]
/// ```
///
/// Any list left out of the file keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub todo_keywords: Vec<String>,
    pub done_keywords: Vec<String>,
    pub link_types: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            todo_keywords: vec!["TODO".to_string()],
            done_keywords: vec!["DONE".to_string()],
            link_types: DEFAULT_LINK_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config
            .keywords()
            .map_err(|source| ConfigError::InvalidKeywords {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/org-neuraxis");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn keywords(&self) -> Result<Keywords, KeywordError> {
        Keywords::new(
            self.todo_keywords.iter().cloned(),
            self.done_keywords.iter().cloned(),
            self.link_types.iter().cloned(),
        )
    }

    pub fn engine(&self) -> Result<Engine, KeywordError> {
        self.keywords().map(Engine::new)
    }

    /// This config with the keyword lines of `text` applied on top.
    pub fn with_in_buffer(&self, text: &str) -> Self {
        let found = InBufferKeywords::scan(text);
        if found.is_empty() {
            return self.clone();
        }
        log::debug!(
            "in-buffer keywords: todo {:?}, done {:?}",
            found.todo,
            found.done
        );
        Self {
            todo_keywords: found.todo,
            done_keywords: found.done,
            link_types: self.link_types.clone(),
        }
    }
}

static TODO_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^#\+(?:SEQ_|TYP_)?TODO:[ \t]*(.*)$").unwrap_or_else(|e| {
        unreachable!("keyword line pattern is valid: {e}")
    })
});

static FAST_ACCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^)]*\)$").unwrap_or_else(|e| unreachable!("annotation pattern is valid: {e}"))
});

/// Keywords declared by `#+TODO:`, `#+SEQ_TODO:` and `#+TYP_TODO:` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InBufferKeywords {
    pub todo: Vec<String>,
    pub done: Vec<String>,
}

impl InBufferKeywords {
    /// Collects the keywords of every keyword line in `text`.
    ///
    /// Words after `|` are done keywords; without a `|` the last word is.
    /// Fast-access annotations like `(t)` or `(w@/!)` are dropped. A word
    /// keeps the role of its first declaration.
    pub fn scan(text: &str) -> Self {
        let mut found = Self::default();
        for captures in TODO_LINE.captures_iter(text) {
            let Some(words) = captures.get(1) else {
                continue;
            };
            let words: Vec<String> = words
                .as_str()
                .split_whitespace()
                .map(|w| FAST_ACCESS.replace(w, "").into_owned())
                .filter(|w| !w.is_empty())
                .collect();
            found.add_line(words);
        }
        found
    }

    fn add_line(&mut self, words: Vec<String>) {
        let (todo, done) = match words.iter().position(|w| w == "|") {
            Some(bar) => (&words[..bar], &words[bar + 1..]),
            None => match words.split_last() {
                Some((last, rest)) => (rest, std::slice::from_ref(last)),
                None => return,
            },
        };
        for word in todo {
            if !self.contains(word) {
                self.todo.push(word.clone());
            }
        }
        for word in done.iter().filter(|w| *w != "|") {
            if !self.contains(word) {
                self.done.push(word.clone());
            }
        }
    }

    /// Whether `word` is already declared, as a todo or a done keyword.
    fn contains(&self, word: &str) -> bool {
        self.todo.iter().chain(&self.done).any(|w| w == word)
    }

    pub fn is_empty(&self) -> bool {
        self.todo.is_empty() && self.done.is_empty()
    }
}
