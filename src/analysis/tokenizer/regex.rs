//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{LucernaError, Result};

/// Runs of Unicode letters and digits. Everything else separates tokens.
pub const DEFAULT_PATTERN: &str = r"[\p{L}\p{N}]+";

/// A tokenizer that emits every match of a regular expression as a token.
///
/// With the default pattern this splits on anything that is not a letter or
/// a digit, which is what the simple analyzer builds on.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with [`DEFAULT_PATTERN`].
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| LucernaError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>> {
        let tokens = self
            .pattern
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .enumerate()
            .map(|(position, m)| Token::with_offsets(m.as_str(), position, m.start(), m.end()));

        Ok(Box::new(tokens))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
