//! Lyric text normalization.
//!
//! Normalization keeps ASCII letters and whitespace, lowercases, tokenizes,
//! drops stopwords, and rejoins the remaining tokens with single spaces.
//! Punctuation is stripped before tokenizing, so "don't" becomes "dont".
//!
//! The tokenizer strategy is chosen once by [`Normalizer::probe`]: the
//! regex word tokenizer when its pattern compiles, whitespace splitting
//! otherwise. Normalizing never fails.

pub mod stopwords;
pub mod tokenizer;

use std::path::Path;

pub use stopwords::Stopwords;
pub use tokenizer::{Tokenizer, WhitespaceTokenizer, WordTokenizer};

use crate::config::{Config, DEFAULT_TOKEN_PATTERN};

/// Turns raw lyric text into the cleaned form fed to the vectorizer.
#[derive(Debug)]
pub struct Normalizer {
    tokenizer: Box<dyn Tokenizer>,
    stopwords: Stopwords,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::probe(DEFAULT_TOKEN_PATTERN, None)
    }
}

impl Normalizer {
    /// Build a normalizer with an explicit strategy.
    pub fn new(tokenizer: Box<dyn Tokenizer>, stopwords: Stopwords) -> Self {
        Self {
            tokenizer,
            stopwords,
        }
    }

    /// Select the tokenizer strategy and stopword list available at startup.
    ///
    /// A `token_pattern` that does not compile selects whitespace splitting;
    /// an unreadable `stopwords_path` selects the built-in English list.
    /// Both degrade with a warning.
    pub fn probe(token_pattern: &str, stopwords_path: Option<&Path>) -> Self {
        let tokenizer: Box<dyn Tokenizer> = match WordTokenizer::new(token_pattern) {
            Ok(tokenizer) => Box::new(tokenizer),
            Err(e) => {
                log::warn!(
                    "Word tokenizer unavailable (pattern {:?}: {}); falling back to whitespace splitting",
                    token_pattern,
                    e
                );
                Box::new(WhitespaceTokenizer)
            }
        };
        let stopwords = Stopwords::load_or_english(stopwords_path);

        log::debug!(
            "Normalizer using {} tokenizer with {} stopwords",
            tokenizer.name(),
            stopwords.len()
        );
        Self::new(tokenizer, stopwords)
    }

    /// Probe using the tokenizer and stopword settings from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::probe(&config.token_pattern, config.stopwords_path.as_deref())
    }

    /// Name of the selected tokenizer strategy.
    pub fn strategy(&self) -> &'static str {
        self.tokenizer.name()
    }

    /// Normalize lyric text. Missing text yields an empty string.
    pub fn normalize(&self, text: Option<&str>) -> String {
        let Some(text) = text else {
            return String::new();
        };

        let stripped: String = text
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        self.tokenizer
            .tokenize(&stripped)
            .into_iter()
            .filter(|token| !self.stopwords.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_digits_and_punctuation() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize(Some("Hello World!! 123")), "hello world");
    }

    #[test]
    fn test_normalize_none_is_empty() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize(None), "");
    }

    #[test]
    fn test_normalize_removes_stopwords() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize(Some("And I will always love you")),
            "always love"
        );
    }

    #[test]
    fn test_normalize_strips_apostrophes_before_filtering() {
        let normalizer = Normalizer::default();
        // "don't" becomes "dont", which is not a listed stopword.
        assert_eq!(normalizer.normalize(Some("Don't stop me now")), "dont stop");
    }

    #[test]
    fn test_normalize_drops_non_ascii_letters() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize(Some("Café au lait")), "caf au lait");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize(Some("  sweet\n\n\tcaroline  ")),
            "sweet caroline"
        );
    }

    #[test]
    fn test_normalize_is_stable_on_clean_text() {
        let normalizer = Normalizer::default();
        let once = normalizer.normalize(Some("Yesterday, all my troubles seemed so far away!"));
        let twice = normalizer.normalize(Some(&once));
        assert_eq!(once, "yesterday troubles seemed far away");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_probe_falls_back_on_bad_pattern() {
        let normalizer = Normalizer::probe("[unclosed", None);
        assert_eq!(normalizer.strategy(), "whitespace");
        // Stopwords still apply on the fallback path.
        assert_eq!(
            normalizer.normalize(Some("The long and winding road")),
            "long winding road"
        );
    }

    #[test]
    fn test_probe_selects_word_tokenizer() {
        let normalizer = Normalizer::probe(DEFAULT_TOKEN_PATTERN, None);
        assert_eq!(normalizer.strategy(), "word");
    }

    #[test]
    fn test_custom_stopwords() {
        let normalizer = Normalizer::new(
            Box::new(WhitespaceTokenizer),
            Stopwords::from_words(["la", "ooh"]),
        );
        assert_eq!(
            normalizer.normalize(Some("La la la, ooh the night")),
            "the night"
        );
    }
}
