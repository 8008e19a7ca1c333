//! Text analysis: turning field values and query text into terms.
//!
//! A [`Tokenizer`](tokenizer::Tokenizer) splits text into a lazy
//! [`TokenStream`](token::TokenStream), [`Filter`](token_filter::Filter)s
//! rewrite that stream, and an [`Analyzer`](analyzer::analyzer::Analyzer)
//! bundles the two.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{
    Analyzer, AnalyzerKind, KeywordAnalyzer, PipelineAnalyzer, SimpleAnalyzer, WhitespaceAnalyzer,
};
pub use token::{Token, TokenStream};
pub use token_filter::{Filter, LowercaseFilter};
pub use tokenizer::{RegexTokenizer, Tokenizer, WhitespaceTokenizer, WholeTokenizer};
