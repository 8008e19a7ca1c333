//! Term query implementation for exact term matching.

use std::any::Any;

use crate::error::Result;
use crate::index::{IndexReader, Term};
use crate::query::{DocSet, Query};

/// A query that matches documents containing a specific term.
///
/// The text is matched exactly and is not analyzed; use the
/// [`QueryParser`](crate::query::QueryParser) to normalize user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    term: Term,
}

impl TermQuery {
    /// Create a new term query.
    pub fn new<F: Into<String>, T: Into<String>>(field: F, text: T) -> Self {
        TermQuery {
            term: Term::new(field, text),
        }
    }

    pub fn from_term(term: Term) -> Self {
        TermQuery { term }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn field(&self) -> &str {
        self.term.field()
    }
}

impl Query for TermQuery {
    fn execute(&self, reader: &IndexReader) -> Result<DocSet> {
        Ok(reader.live_postings(self.term.field(), self.term.text()))
    }

    fn description(&self) -> String {
        self.term.to_string()
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
