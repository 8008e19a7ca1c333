//! The single index writer.
//!
//! An [`IndexWriter`] owns the index's write lock for its whole lifetime.
//! It works on a private copy of the last committed [`Snapshot`]; nothing it
//! does is visible to readers until [`commit`](IndexWriter::commit)
//! publishes a new generation.

use std::sync::Arc;

use log::{debug, error, info};
use parking_lot::RwLock;

use crate::analysis::Analyzer;
use crate::config::IndexConfig;
use crate::document::Document;
use crate::error::{LucernaError, Result};
use crate::index::commit;
use crate::index::snapshot::Snapshot;
use crate::index::term::Term;
use crate::storage::{Storage, StorageLock};

/// A document whose fields were validated and analyzed, ready to insert.
#[derive(Debug)]
struct PreparedDocument {
    doc: Document,
    terms: Vec<(String, Vec<String>)>,
}

/// Adds, deletes, updates and compacts documents, then commits.
///
/// Dropping a writer closes it, which commits pending changes unless
/// [`IndexConfig::commit_on_close`] is off.
pub struct IndexWriter {
    storage: Arc<dyn Storage>,
    analyzer: Arc<dyn Analyzer>,
    config: IndexConfig,
    published: Arc<RwLock<Arc<Snapshot>>>,
    committed: Arc<Snapshot>,
    working: Arc<Snapshot>,
    dirty: bool,
    lock: Option<Box<dyn StorageLock>>,
    closed: bool,
}

impl std::fmt::Debug for IndexWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexWriter")
            .field("generation", &self.committed.generation())
            .field("max_doc", &self.working.max_doc())
            .field("num_docs", &self.working.num_docs())
            .field("dirty", &self.dirty)
            .field("closed", &self.closed)
            .finish()
    }
}

impl IndexWriter {
    pub(crate) fn new(
        storage: Arc<dyn Storage>,
        analyzer: Arc<dyn Analyzer>,
        config: IndexConfig,
        published: Arc<RwLock<Arc<Snapshot>>>,
        lock: Box<dyn StorageLock>,
    ) -> Self {
        let committed = Arc::clone(&published.read());
        IndexWriter {
            storage,
            analyzer,
            config,
            published,
            working: Arc::clone(&committed),
            committed,
            dirty: false,
            lock: Some(lock),
            closed: false,
        }
    }

    /// Add a document and return its id.
    ///
    /// Fails with [`LucernaError::InvalidField`] if any field is neither
    /// stored nor indexed, or is an indexed binary value. A failed add
    /// leaves the writer unchanged.
    pub fn add_document(&mut self, doc: Document) -> Result<u64> {
        self.check_closed()?;
        let prepared = self.prepare(doc)?;
        self.insert(prepared)
    }

    /// Tombstone every live document containing `term`.
    ///
    /// Returns how many documents were newly deleted.
    pub fn delete_documents(&mut self, term: &Term) -> Result<u64> {
        self.check_closed()?;

        let matches: Vec<u64> = self
            .working
            .postings()
            .postings(term)
            .iter()
            .copied()
            .filter(|&doc_id| !self.working.deletions().is_deleted(doc_id))
            .collect();
        if matches.is_empty() {
            return Ok(0);
        }

        let state = Arc::make_mut(&mut self.working);
        for &doc_id in &matches {
            state.deletions.delete_document(doc_id);
        }
        self.dirty = true;

        debug!("deleted {} documents matching {term}", matches.len());
        Ok(matches.len() as u64)
    }

    /// Replace the documents containing `term` with `doc`.
    ///
    /// `doc` is validated before anything is deleted, so a rejected
    /// document leaves the old ones in place. Returns the new document's id.
    pub fn update_document(&mut self, term: &Term, doc: Document) -> Result<u64> {
        self.check_closed()?;
        let prepared = self.prepare(doc)?;
        self.delete_documents(term)?;
        self.insert(prepared)
    }

    /// Persist pending changes as a new generation and publish it to new
    /// readers. Returns the committed generation.
    ///
    /// Committing with nothing pending is a no-op.
    pub fn commit(&mut self) -> Result<u64> {
        self.check_closed()?;
        if !self.dirty {
            return Ok(self.committed.generation());
        }

        let generation = self.committed.generation() + 1;
        Arc::make_mut(&mut self.working).generation = generation;
        commit::write_commit(
            self.storage.as_ref(),
            &self.working,
            self.config.sync_on_commit,
        )?;

        *self.published.write() = Arc::clone(&self.working);
        self.committed = Arc::clone(&self.working);
        self.dirty = false;

        info!(
            "committed generation {generation}: {} docs, {} slots",
            self.committed.num_docs(),
            self.committed.max_doc()
        );
        Ok(generation)
    }

    /// Discard everything since the last commit.
    pub fn rollback(&mut self) -> Result<()> {
        self.check_closed()?;
        if self.dirty {
            debug!(
                "rolling back to generation {}",
                self.committed.generation()
            );
        }
        let next_doc_id = self.working.next_doc_id();
        self.working = Arc::clone(&self.committed);
        if next_doc_id > self.working.next_doc_id() {
            // Ids handed out since the commit stay spent.
            Arc::make_mut(&mut self.working).next_doc_id = next_doc_id;
        }
        self.dirty = false;
        Ok(())
    }

    /// Purge tombstoned documents from the store and the postings.
    ///
    /// Live documents keep their ids. Idempotent.
    pub fn optimize(&mut self) -> Result<()> {
        self.check_closed()?;
        if !self.working.has_deletions() {
            return Ok(());
        }

        let state = Arc::make_mut(&mut self.working);
        let Snapshot {
            store,
            postings,
            deletions,
            ..
        } = state;

        let purged = deletions.deleted_docs();
        for &doc_id in &purged {
            store.remove(doc_id);
        }
        postings.retain_docs(|doc_id| !deletions.is_deleted(doc_id));
        deletions.clear();
        self.dirty = true;

        info!("optimize purged {} deleted documents", purged.len());
        Ok(())
    }

    /// Live documents, including uncommitted changes.
    pub fn num_docs(&self) -> u64 {
        self.working.num_docs()
    }

    /// Document slots, live or deleted, including uncommitted changes.
    pub fn max_doc(&self) -> u64 {
        self.working.max_doc()
    }

    pub fn has_deletions(&self) -> bool {
        self.working.has_deletions()
    }

    /// Whether there are mutations not yet committed.
    pub fn has_uncommitted_changes(&self) -> bool {
        self.dirty
    }

    /// Generation of the last commit made or seen by this writer.
    pub fn generation(&self) -> u64 {
        self.committed.generation()
    }

    /// Commit pending changes (per [`IndexConfig::commit_on_close`]) and
    /// release the write lock.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        if self.dirty {
            if self.config.commit_on_close {
                self.commit()?;
            } else {
                self.rollback()?;
            }
        }

        if let Some(mut lock) = self.lock.take() {
            lock.release()?;
        }
        self.closed = true;
        debug!("writer closed at generation {}", self.committed.generation());
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_closed(&self) -> Result<()> {
        if self.closed {
            Err(LucernaError::index("Writer is closed"))
        } else {
            Ok(())
        }
    }

    fn prepare(&self, doc: Document) -> Result<PreparedDocument> {
        doc.validate()?;

        let mut terms = Vec::new();
        for field in doc.fields().iter().filter(|f| f.options.indexed) {
            let Some(text) = field.value.index_text() else {
                continue;
            };
            let field_terms = if field.options.tokenized {
                self.analyzer.terms(&text)?
            } else if text.is_empty() {
                Vec::new()
            } else {
                vec![text.into_owned()]
            };
            terms.push((field.name.clone(), field_terms));
        }

        Ok(PreparedDocument { doc, terms })
    }

    fn insert(&mut self, prepared: PreparedDocument) -> Result<u64> {
        let state = Arc::make_mut(&mut self.working);
        let doc_id = state.next_doc_id;

        state.store.put(doc_id, &prepared.doc)?;
        for (field, terms) in &prepared.terms {
            state.postings.add_postings(doc_id, field, terms);
        }
        state.next_doc_id += 1;
        self.dirty = true;

        Ok(doc_id)
    }
}

impl Drop for IndexWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!("failed to close index writer: {e}");
        }
    }
}
