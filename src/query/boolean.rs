//! Boolean query implementation for combining multiple queries.

use std::any::Any;
use std::fmt;

use crate::error::Result;
use crate::index::IndexReader;
use crate::query::{DocSet, Query};

/// Occurrence requirements for boolean clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occur {
    /// The clause must match (`+term`).
    Must,
    /// The clause may match (`term`).
    Should,
    /// The clause must not match (`-term`).
    MustNot,
}

impl Occur {
    fn prefix(self) -> &'static str {
        match self {
            Occur::Must => "+",
            Occur::Should => "",
            Occur::MustNot => "-",
        }
    }
}

/// A sub-query with its occurrence.
#[derive(Debug, Clone)]
pub struct BooleanClause {
    pub query: Box<dyn Query>,
    pub occur: Occur,
}

impl BooleanClause {
    pub fn new(query: Box<dyn Query>, occur: Occur) -> Self {
        BooleanClause { query, occur }
    }

    pub fn must(query: Box<dyn Query>) -> Self {
        Self::new(query, Occur::Must)
    }

    pub fn should(query: Box<dyn Query>) -> Self {
        Self::new(query, Occur::Should)
    }

    pub fn must_not(query: Box<dyn Query>) -> Self {
        Self::new(query, Occur::MustNot)
    }
}

impl fmt::Display for BooleanClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.occur.prefix(), self.query.description())
    }
}

/// Matches the intersection of its `Must` clauses minus the union of its
/// `MustNot` clauses.
///
/// `Should` clauses only matter when there is no `Must` clause; then the
/// query matches their union. A query with only `MustNot` clauses, or no
/// clauses at all, matches nothing.
#[derive(Debug, Clone, Default)]
pub struct BooleanQuery {
    clauses: Vec<BooleanClause>,
}

impl BooleanQuery {
    pub fn new() -> Self {
        BooleanQuery {
            clauses: Vec::new(),
        }
    }

    pub fn add_clause(&mut self, query: Box<dyn Query>, occur: Occur) {
        self.clauses.push(BooleanClause::new(query, occur));
    }

    pub fn add_must(&mut self, query: Box<dyn Query>) {
        self.add_clause(query, Occur::Must);
    }

    pub fn add_should(&mut self, query: Box<dyn Query>) {
        self.add_clause(query, Occur::Should);
    }

    pub fn add_must_not(&mut self, query: Box<dyn Query>) {
        self.add_clause(query, Occur::MustNot);
    }

    pub fn clauses(&self) -> &[BooleanClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Clauses with the given occurrence, in insertion order.
    pub fn clauses_by_occur(&self, occur: Occur) -> impl Iterator<Item = &BooleanClause> + '_ {
        self.clauses.iter().filter(move |c| c.occur == occur)
    }

    fn execute_all(&self, reader: &IndexReader, occur: Occur) -> Result<Vec<DocSet>> {
        self.clauses_by_occur(occur)
            .map(|clause| clause.query.execute(reader))
            .collect()
    }
}

impl Query for BooleanQuery {
    fn execute(&self, reader: &IndexReader) -> Result<DocSet> {
        let required = self.execute_all(reader, Occur::Must)?;
        let matches = if required.is_empty() {
            DocSet::union_all(self.execute_all(reader, Occur::Should)?)
        } else {
            DocSet::intersect_all(required)
        };
        if matches.is_empty() {
            return Ok(matches);
        }

        let excluded = DocSet::union_all(self.execute_all(reader, Occur::MustNot)?);
        Ok(matches.difference(&excluded))
    }

    fn description(&self) -> String {
        self.clauses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builder for [`BooleanQuery`].
#[derive(Debug, Default)]
pub struct BooleanQueryBuilder {
    query: BooleanQuery,
}

impl BooleanQueryBuilder {
    pub fn new() -> Self {
        BooleanQueryBuilder {
            query: BooleanQuery::new(),
        }
    }

    pub fn must(mut self, query: Box<dyn Query>) -> Self {
        self.query.add_must(query);
        self
    }

    pub fn should(mut self, query: Box<dyn Query>) -> Self {
        self.query.add_should(query);
        self
    }

    pub fn must_not(mut self, query: Box<dyn Query>) -> Self {
        self.query.add_must_not(query);
        self
    }

    pub fn build(self) -> BooleanQuery {
        self.query
    }
}
