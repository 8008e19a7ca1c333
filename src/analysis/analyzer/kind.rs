//! Serializable selector for the built-in analyzers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::analyzer::Analyzer;
use super::keyword::KeywordAnalyzer;
use super::simple::SimpleAnalyzer;
use super::whitespace::WhitespaceAnalyzer;
use crate::error::{LucernaError, Result};

/// Which built-in analyzer an index uses for tokenized fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    /// [`WhitespaceAnalyzer`].
    Whitespace,
    /// [`SimpleAnalyzer`].
    #[default]
    Simple,
    /// [`KeywordAnalyzer`].
    Keyword,
}

impl AnalyzerKind {
    /// Instantiate the analyzer.
    pub fn build(self) -> Result<Arc<dyn Analyzer>> {
        let analyzer: Arc<dyn Analyzer> = match self {
            AnalyzerKind::Whitespace => Arc::new(WhitespaceAnalyzer::new()),
            AnalyzerKind::Simple => Arc::new(SimpleAnalyzer::new()?),
            AnalyzerKind::Keyword => Arc::new(KeywordAnalyzer::new()),
        };
        Ok(analyzer)
    }

    /// The analyzer name, as reported by [`Analyzer::name`].
    pub fn as_str(self) -> &'static str {
        match self {
            AnalyzerKind::Whitespace => "whitespace",
            AnalyzerKind::Simple => "simple",
            AnalyzerKind::Keyword => "keyword",
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyzerKind {
    type Err = LucernaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "whitespace" => Ok(AnalyzerKind::Whitespace),
            "simple" => Ok(AnalyzerKind::Simple),
            "keyword" => Ok(AnalyzerKind::Keyword),
            other => Err(LucernaError::analysis(format!("Unknown analyzer: {other}"))),
        }
    }
}
