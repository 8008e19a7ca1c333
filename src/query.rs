//! Queries and the query parser.
//!
//! A [`Query`] turns an [`IndexReader`] into the [`DocSet`] of live
//! documents it matches. Results are unscored and come out in ascending id
//! order.

pub mod boolean;
pub mod doc_set;
pub mod parser;
pub mod term;

use std::any::Any;
use std::fmt::Debug;

use crate::error::Result;
use crate::index::IndexReader;

pub use boolean::{BooleanClause, BooleanQuery, BooleanQueryBuilder, Occur};
pub use doc_set::DocSet;
pub use parser::{ParsedQuery, QueryParser};
pub use term::TermQuery;

/// Trait for all query types.
pub trait Query: Send + Sync + Debug {
    /// The live documents matching this query in `reader`'s snapshot.
    fn execute(&self, reader: &IndexReader) -> Result<DocSet>;

    /// Get a human-readable description of this query.
    fn description(&self) -> String;

    /// Clone this query.
    fn clone_box(&self) -> Box<dyn Query>;

    /// Get this query as Any for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Query> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
