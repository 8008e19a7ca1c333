//! Core analyzer trait definition.
//!
//! # Examples
//!
//! ```
//! use lucerna::analysis::analyzer::analyzer::Analyzer;
//! use lucerna::analysis::analyzer::simple::SimpleAnalyzer;
//!
//! let analyzer = SimpleAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Hello, World").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! ```

use std::fmt::Debug;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The writer runs every tokenized field value through one, and so does the
/// query parser for every query token, so both sides agree on term text.
pub trait Analyzer: Send + Sync + Debug {
    /// Analyze the given text and return a lazy stream of tokens.
    fn analyze<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Provide access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Analyze `text` and collect only the token texts.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
