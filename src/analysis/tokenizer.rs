//! Tokenizer implementations for text analysis.
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`regex::RegexTokenizer`] - Emits regex matches (letters and digits by default)
//! - [`whole::WholeTokenizer`] - Treats the entire text as a single token
//!
//! # Examples
//!
//! ```
//! use lucerna::analysis::tokenizer::Tokenizer;
//! use lucerna::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The returned stream is lazy and may borrow both the tokenizer and the
/// text; calling `tokenize` again restarts from the beginning.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod whitespace;
pub mod whole;

pub use regex::RegexTokenizer;
pub use whitespace::WhitespaceTokenizer;
pub use whole::WholeTokenizer;
