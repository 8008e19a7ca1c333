//! Query parser using pest.
//!
//! The accepted language is a whitespace-separated list of words, each
//! optionally prefixed with `+` (required) or `-` (excluded):
//!
//! ```
//! use std::sync::Arc;
//!
//! use lucerna::analysis::SimpleAnalyzer;
//! use lucerna::index::Term;
//! use lucerna::query::QueryParser;
//!
//! let parser = QueryParser::new("contents", Arc::new(SimpleAnalyzer::new().unwrap()));
//! let parsed = parser.parse("+JUNIT +ANT -MOCK").unwrap();
//!
//! assert_eq!(parsed.required, vec![Term::new("contents", "junit"), Term::new("contents", "ant")]);
//! assert_eq!(parsed.excluded, vec![Term::new("contents", "mock")]);
//! assert!(parsed.optional.is_empty());
//! ```

use std::sync::Arc;

use pest::Parser;
use pest_derive::Parser;

use crate::analysis::Analyzer;
use crate::error::{LucernaError, Result};
use crate::index::Term;
use crate::query::{BooleanQuery, Occur, TermQuery};

#[derive(Parser)]
#[grammar = "query/parser.pest"]
struct QueryStringParser;

/// The terms of a parsed query, grouped by occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub required: Vec<Term>,
    pub excluded: Vec<Term>,
    pub optional: Vec<Term>,
}

impl ParsedQuery {
    fn push(&mut self, term: Term, occur: Occur) {
        match occur {
            Occur::Must => self.required.push(term),
            Occur::MustNot => self.excluded.push(term),
            Occur::Should => self.optional.push(term),
        }
    }

    /// Total number of terms.
    pub fn len(&self) -> usize {
        self.required.len() + self.excluded.len() + self.optional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A [`BooleanQuery`] with one term clause per term.
    pub fn to_query(&self) -> BooleanQuery {
        let mut query = BooleanQuery::new();
        for (terms, occur) in [
            (&self.required, Occur::Must),
            (&self.excluded, Occur::MustNot),
            (&self.optional, Occur::Should),
        ] {
            for term in terms {
                query.add_clause(Box::new(TermQuery::from_term(term.clone())), occur);
            }
        }
        query
    }
}

/// Parses `+required -excluded optional` expressions against a default
/// field.
///
/// Each word is lowercased and then run through the analyzer, the same one
/// the index uses, so query terms line up with indexed terms. A word the
/// analyzer splits into several terms contributes all of them with the
/// word's occurrence.
#[derive(Clone)]
pub struct QueryParser {
    default_field: String,
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for QueryParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryParser")
            .field("default_field", &self.default_field)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl QueryParser {
    pub fn new<S: Into<String>>(default_field: S, analyzer: Arc<dyn Analyzer>) -> Self {
        QueryParser {
            default_field: default_field.into(),
            analyzer,
        }
    }

    pub fn default_field(&self) -> &str {
        &self.default_field
    }

    /// Parse an expression into its terms.
    ///
    /// Fails with [`LucernaError::Parse`] on blank input, on a `+` or `-`
    /// not directly followed by a word, and when no word yields a term.
    pub fn parse(&self, expr: &str) -> Result<ParsedQuery> {
        if expr.trim().is_empty() {
            return Err(LucernaError::parse("empty query"));
        }

        let pairs = QueryStringParser::parse(Rule::query, expr)
            .map_err(|e| LucernaError::parse(format!("invalid query {expr:?}: {e}")))?;

        let mut parsed = ParsedQuery::default();
        for pair in pairs.flatten() {
            let occur = match pair.as_rule() {
                Rule::required => Occur::Must,
                Rule::excluded => Occur::MustNot,
                Rule::optional => Occur::Should,
                _ => continue,
            };
            let Some(word) = pair.into_inner().find(|p| p.as_rule() == Rule::word) else {
                continue;
            };

            let lowered = word.as_str().to_lowercase();
            for text in self.analyzer.terms(&lowered)? {
                parsed.push(Term::new(self.default_field.as_str(), text), occur);
            }
        }

        if parsed.is_empty() {
            return Err(LucernaError::parse(format!(
                "query {expr:?} produced no terms"
            )));
        }
        Ok(parsed)
    }

    /// Parse straight into a [`BooleanQuery`].
    pub fn parse_query(&self, expr: &str) -> Result<BooleanQuery> {
        Ok(self.parse(expr)?.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{KeywordAnalyzer, SimpleAnalyzer, WhitespaceAnalyzer};
    use crate::query::Query;

    fn simple() -> QueryParser {
        QueryParser::new("contents", Arc::new(SimpleAnalyzer::new().unwrap()))
    }

    fn t(text: &str) -> Term {
        Term::new("contents", text)
    }

    #[test]
    fn test_prefixes() {
        let parsed = simple().parse("+JUNIT +ANT -MOCK lucene").unwrap();

        assert_eq!(parsed.required, vec![t("junit"), t("ant")]);
        assert_eq!(parsed.excluded, vec![t("mock")]);
        assert_eq!(parsed.optional, vec![t("lucene")]);
        assert_eq!(parsed.len(), 4);
    }

    #[test]
    fn test_surrounding_and_repeated_whitespace() {
        let parsed = simple().parse("  +ant \t  -mock\n").unwrap();
        assert_eq!(parsed.required, vec![t("ant")]);
        assert_eq!(parsed.excluded, vec![t("mock")]);
    }

    #[test]
    fn test_word_split_by_analyzer_keeps_occurrence() {
        let parsed = simple().parse("+mock-objects").unwrap();
        assert_eq!(parsed.required, vec![t("mock"), t("objects")]);
    }

    #[test]
    fn test_parse_errors() {
        let parser = simple();
        for expr in ["", "   ", "+", "-", "+ ant", "ant - mock", "+ -"] {
            let err = parser.parse(expr).unwrap_err();
            assert!(matches!(err, LucernaError::Parse(_)), "{expr:?} gave {err}");
        }
    }

    #[test]
    fn test_no_terms_is_an_error() {
        let err = simple().parse("+!! -,,").unwrap_err();
        assert!(matches!(err, LucernaError::Parse(_)));
    }

    #[test]
    fn test_lowercases_before_analysis() {
        let parser = QueryParser::new("city", Arc::new(WhitespaceAnalyzer::new()));
        assert_eq!(parser.parse("Amsterdam").unwrap().optional, vec![Term::new("city", "amsterdam")]);

        let parser = QueryParser::new("city", Arc::new(KeywordAnalyzer::new()));
        assert_eq!(parser.parse("+Venice").unwrap().required, vec![Term::new("city", "venice")]);
    }

    #[test]
    fn test_to_query() {
        let query = simple().parse_query("+JUNIT -MOCK ant").unwrap();
        assert_eq!(query.clauses().len(), 3);
        assert_eq!(query.description(), "+contents:junit -contents:mock contents:ant");
    }
}
