//! Whitespace analyzer implementation.

use super::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// An analyzer that splits on whitespace and leaves tokens untouched.
///
/// Case and punctuation survive, so `"Amsterdam"` and `"amsterdam"` are
/// different terms.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceAnalyzer {
    tokenizer: WhitespaceTokenizer,
}

impl WhitespaceAnalyzer {
    /// Create a new whitespace analyzer.
    pub fn new() -> Self {
        WhitespaceAnalyzer {
            tokenizer: WhitespaceTokenizer::new(),
        }
    }
}

impl Analyzer for WhitespaceAnalyzer {
    fn analyze<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>> {
        self.tokenizer.tokenize(text)
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_analyzer_keeps_case() {
        let analyzer = WhitespaceAnalyzer::new();
        assert_eq!(
            analyzer.terms("Venice has lots of canals").unwrap(),
            vec!["Venice", "has", "lots", "of", "canals"]
        );
        assert_eq!(analyzer.name(), "whitespace");
    }
}
