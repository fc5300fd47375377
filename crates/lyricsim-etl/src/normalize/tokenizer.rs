//! Tokenizer strategies used by the normalizer.

use std::fmt;

use regex::Regex;

/// Splits already-stripped, lowercased text into tokens.
pub trait Tokenizer: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Primary strategy: every match of a word pattern is a token.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    pattern: Regex,
}

impl WordTokenizer {
    /// Compile the word pattern.
    ///
    /// # Errors
    /// Returns the regex error if `pattern` does not compile.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Tokenizer for WordTokenizer {
    fn name(&self) -> &'static str {
        "word"
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| !token.is_empty())
            .collect()
    }
}

/// Fallback strategy: split on whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }
}
