//! Simple analyzer implementation.

use super::analyzer::Analyzer;
use super::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// An analyzer that splits on anything but letters and digits, then
/// lowercases.
///
/// This is the analyzer most text fields want: `"JUnit in Action, 2nd ed."`
/// becomes `junit in action 2nd ed`.
#[derive(Debug)]
pub struct SimpleAnalyzer {
    inner: PipelineAnalyzer,
}

impl SimpleAnalyzer {
    /// Create a new simple analyzer.
    pub fn new() -> Result<Self> {
        let inner = PipelineAnalyzer::new(RegexTokenizer::new()?)
            .add_filter(LowercaseFilter::new())
            .with_name("simple");
        Ok(SimpleAnalyzer { inner })
    }
}

impl Analyzer for SimpleAnalyzer {
    fn analyze<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "simple"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
