//! Read-only views over a committed snapshot.
//!
//! An [`IndexReader`] is bound to the snapshot that was current when it was
//! opened. Later commits never change what it sees; open a new reader to
//! observe them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::{FieldValue, StoredDocument};
use crate::error::{LucernaError, Result};
use crate::index::commit;
use crate::index::snapshot::Snapshot;
use crate::index::term::Term;
use crate::query::{DocSet, Query};
use crate::storage::Storage;

/// The first hits of a search plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopDocs {
    pub total_hits: u64,
    pub doc_ids: Vec<u64>,
}

/// Summary numbers for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub generation: u64,
    pub num_docs: u64,
    pub max_doc: u64,
    pub deleted_docs: u64,
    pub term_count: u64,
}

/// A term together with the number of live documents containing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermInfo {
    pub term: Term,
    pub doc_freq: u64,
}

/// Searches and retrieves documents from one immutable snapshot.
#[derive(Debug, Clone)]
pub struct IndexReader {
    snapshot: Arc<Snapshot>,
}

impl IndexReader {
    /// Bind a reader to an already loaded snapshot.
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        IndexReader { snapshot }
    }

    /// Load the latest commit from `storage`.
    ///
    /// Returns [`LucernaError::NotFound`] if the storage holds no index.
    pub fn open(storage: &dyn Storage) -> Result<Self> {
        let snapshot = commit::read_latest(storage)?
            .ok_or_else(|| LucernaError::not_found("no committed index in storage"))?;
        Ok(IndexReader::new(Arc::new(snapshot)))
    }

    /// Live documents whose `field` contains `text` exactly.
    pub fn term_query(&self, field: &str, text: &str) -> Vec<u64> {
        self.live_postings(field, text).into_vec()
    }

    /// Live documents containing every `required` term, none of the
    /// `excluded` terms and, when nothing is required, any `optional` term.
    pub fn boolean_query(&self, required: &[Term], excluded: &[Term], optional: &[Term]) -> Vec<u64> {
        let postings = |terms: &[Term]| {
            terms
                .iter()
                .map(|term| self.live_postings(term.field(), term.text()))
                .collect::<Vec<_>>()
        };

        let matches = if required.is_empty() {
            DocSet::union_all(postings(optional))
        } else {
            DocSet::intersect_all(postings(required))
        };
        matches
            .difference(&DocSet::union_all(postings(excluded)))
            .into_vec()
    }

    /// All live matches of `query`, ascending by id.
    pub fn search(&self, query: &dyn Query) -> Result<Vec<u64>> {
        Ok(query.execute(self)?.into_vec())
    }

    /// The first `limit` live matches of `query`, ascending by id, and the
    /// total number of matches.
    pub fn search_top(&self, query: &dyn Query, limit: usize) -> Result<TopDocs> {
        let hits = query.execute(self)?;
        Ok(TopDocs {
            total_hits: hits.len() as u64,
            doc_ids: hits.iter().take(limit).collect(),
        })
    }

    /// The stored fields of a live document.
    pub fn document(&self, doc_id: u64) -> Result<StoredDocument> {
        if !self.snapshot.is_live(doc_id) {
            return Err(LucernaError::not_found(format!("document {doc_id}")));
        }
        self.snapshot
            .store()
            .document(doc_id)
            .cloned()
            .ok_or_else(|| LucernaError::not_found(format!("document {doc_id}")))
    }

    /// The first stored value of `field` in a live document.
    pub fn stored_value(&self, doc_id: u64, field: &str) -> Option<&FieldValue> {
        if !self.snapshot.is_live(doc_id) {
            return None;
        }
        self.snapshot.store().get(doc_id, field)
    }

    /// Every distinct term with at least one live document, in term order.
    ///
    /// The enumeration is lazy; call again to start over.
    pub fn terms(&self) -> TermsEnum<'_> {
        TermsEnum {
            snapshot: &self.snapshot,
            inner: Box::new(self.snapshot.postings().iter()),
        }
    }

    /// Number of live documents containing `term`.
    pub fn doc_freq(&self, term: &Term) -> u64 {
        self.live_count(self.snapshot.postings().postings(term))
    }

    pub fn num_docs(&self) -> u64 {
        self.snapshot.num_docs()
    }

    pub fn max_doc(&self) -> u64 {
        self.snapshot.max_doc()
    }

    pub fn has_deletions(&self) -> bool {
        self.snapshot.has_deletions()
    }

    /// Commit generation this reader is bound to.
    pub fn generation(&self) -> u64 {
        self.snapshot.generation()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            generation: self.generation(),
            num_docs: self.num_docs(),
            max_doc: self.max_doc(),
            deleted_docs: self.snapshot.deletions().deleted_count(),
            term_count: self.terms().count() as u64,
        }
    }

    /// The posting list of a term with tombstoned ids removed.
    pub(crate) fn live_postings(&self, field: &str, text: &str) -> DocSet {
        let postings = self.snapshot.postings().lookup(field, text);
        if !self.snapshot.has_deletions() {
            return DocSet::from_sorted(postings.to_vec());
        }
        let deletions = self.snapshot.deletions();
        DocSet::from_sorted(
            postings
                .iter()
                .copied()
                .filter(|&doc_id| !deletions.is_deleted(doc_id))
                .collect(),
        )
    }

    fn live_count(&self, postings: &[u64]) -> u64 {
        let deletions = self.snapshot.deletions();
        postings
            .iter()
            .filter(|&&doc_id| !deletions.is_deleted(doc_id))
            .count() as u64
    }
}

/// Lazy, ordered enumeration of the live terms of a reader.
pub struct TermsEnum<'a> {
    snapshot: &'a Snapshot,
    inner: Box<dyn Iterator<Item = (&'a str, &'a str, &'a [u64])> + 'a>,
}

impl Iterator for TermsEnum<'_> {
    type Item = TermInfo;

    fn next(&mut self) -> Option<TermInfo> {
        let deletions = self.snapshot.deletions();
        for (field, text, postings) in self.inner.by_ref() {
            let doc_freq = postings
                .iter()
                .filter(|&&doc_id| !deletions.is_deleted(doc_id))
                .count() as u64;
            if doc_freq > 0 {
                return Some(TermInfo {
                    term: Term::new(field, text),
                    doc_freq,
                });
            }
        }
        None
    }
}
