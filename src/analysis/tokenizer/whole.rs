//! Tokenizer that keeps the whole input as one token.

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that emits the entire text, unchanged, as a single token.
///
/// Empty input produces no token at all.
#[derive(Clone, Debug, Default)]
pub struct WholeTokenizer;

impl WholeTokenizer {
    /// Create a new whole tokenizer.
    pub fn new() -> Self {
        WholeTokenizer
    }
}

impl Tokenizer for WholeTokenizer {
    fn tokenize<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>> {
        if text.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        Ok(Box::new(std::iter::once(Token::with_offsets(
            text,
            0,
            0,
            text.len(),
        ))))
    }

    fn name(&self) -> &'static str {
        "whole"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_tokenizer() {
        let tokenizer = WholeTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("Den Haag").unwrap().collect();

        assert_eq!(tokens, vec![Token::with_offsets("Den Haag", 0, 0, 8)]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(WholeTokenizer::new().tokenize("").unwrap().count(), 0);
    }
}
