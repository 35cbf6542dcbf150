//! Tokenizer: normalizes free text into the lowercase word tokens the comparator works on.
//!
//! Pipeline: lowercase → replace everything outside `[a-z0-9]` and whitespace with a space
//!           → split on whitespace → drop short tokens → drop stop words

use std::collections::HashSet;
use std::sync::OnceLock;

/// Pronouns, articles and common connectives that carry no signal for keyword coverage.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "with", "a", "an", "to", "of", "in", "on", "for", "at", "by", "is",
    "this", "that", "these", "those", "are", "be", "as", "it", "from", "you", "your", "yours",
];

/// Tokens shorter than this many characters are dropped.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

/// Stop-word set and length threshold applied by [`TokenizerConfig::tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    stop_words: HashSet<String>,
    min_token_len: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().copied(), DEFAULT_MIN_TOKEN_LEN)
    }
}

impl TokenizerConfig {
    /// Builds a config from an arbitrary stop-word list.
    ///
    /// Stop words are trimmed and lowercased so they compare against normalized tokens.
    /// A `min_token_len` of zero is treated as one: empty fragments are never tokens.
    pub fn new<I, S>(stop_words: I, min_token_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = stop_words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            stop_words,
            min_token_len: min_token_len.max(1),
        }
    }

    /// Returns a copy of this config with extra stop words added.
    pub fn with_stop_words<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    pub fn min_token_len(&self) -> usize {
        self.min_token_len
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    #[inline]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Tokenizes `text` in input order. Duplicates are kept.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        // Only ASCII survives normalization, so byte length equals character count.
        normalized
            .split_whitespace()
            .filter(|w| w.len() >= self.min_token_len)
            .filter(|w| !self.is_stop_word(w))
            .map(str::to_owned)
            .collect()
    }

    /// Tokenizes and deduplicates, keeping first-occurrence order.
    pub fn tokenize_unique(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tokenize(text)
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }
}

pub(crate) fn default_config() -> &'static TokenizerConfig {
    static DEFAULT: OnceLock<TokenizerConfig> = OnceLock::new();
    DEFAULT.get_or_init(TokenizerConfig::default)
}

/// Tokenizes with the default stop words and length threshold.
pub fn tokenize(text: &str) -> Vec<String> {
    default_config().tokenize(text)
}
