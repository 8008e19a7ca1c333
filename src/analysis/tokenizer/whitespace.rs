//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on Unicode whitespace, keeping case and
/// punctuation untouched.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>> {
        Ok(Box::new(WhitespaceTokens {
            text,
            offset: 0,
            position: 0,
        }))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Lazy iterator over the whitespace-separated words of a string.
struct WhitespaceTokens<'a> {
    text: &'a str,
    offset: usize,
    position: usize,
}

impl Iterator for WhitespaceTokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = &self.text[self.offset..];
        let start = self.offset + rest.find(|c: char| !c.is_whitespace())?;
        let end = self.text[start..]
            .find(char::is_whitespace)
            .map_or(self.text.len(), |len| start + len);

        let token = Token::with_offsets(&self.text[start..end], self.position, start, end);
        self.offset = end;
        self.position += 1;
        Some(token)
    }
}
