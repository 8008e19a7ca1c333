//! Token filters that rewrite a token stream.
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// A filter wraps the incoming stream and returns a new one; it should stay
/// lazy so analysis of long fields never buffers every token.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter<'a>(&'a self, tokens: TokenStream<'a>) -> Result<TokenStream<'a>>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;

pub use lowercase::LowercaseFilter;
