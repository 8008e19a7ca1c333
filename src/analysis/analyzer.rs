//! Analyzers that combine a tokenizer with filters.
//!
//! - [`whitespace::WhitespaceAnalyzer`] - Splits on whitespace, keeps case
//! - [`simple::SimpleAnalyzer`] - Splits on non-alphanumerics and lowercases
//! - [`keyword::KeywordAnalyzer`] - Treats entire input as one token
//! - [`pipeline::PipelineAnalyzer`] - Custom tokenizer + filter chains
//!
//! [`kind::AnalyzerKind`] names the built-ins so they can be chosen from
//! configuration.

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod keyword;
pub mod kind;
pub mod pipeline;
pub mod simple;
pub mod whitespace;

pub use analyzer::Analyzer;
pub use keyword::KeywordAnalyzer;
pub use kind::AnalyzerKind;
pub use pipeline::PipelineAnalyzer;
pub use simple::SimpleAnalyzer;
pub use whitespace::WhitespaceAnalyzer;
