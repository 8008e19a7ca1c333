//! The index handle and its components.
//!
//! [`Index`] ties a [`Storage`] to the latest committed [`Snapshot`]. It
//! hands out any number of [`IndexReader`]s and at most one
//! [`IndexWriter`] at a time.
//!
//! ```
//! use lucerna::document::Document;
//! use lucerna::index::Index;
//!
//! let index = Index::in_memory().unwrap();
//! let mut writer = index.writer().unwrap();
//! writer.add_document(Document::builder().add_text("city", "Amsterdam").build()).unwrap();
//! writer.commit().unwrap();
//!
//! assert_eq!(index.reader().unwrap().term_query("city", "amsterdam"), vec![0]);
//! ```

pub mod commit;
pub mod deletion;
pub mod posting;
pub mod reader;
pub mod snapshot;
pub mod store;
pub mod term;
pub mod writer;

use std::sync::Arc;

use log::{debug, info};
use parking_lot::RwLock;

use crate::analysis::Analyzer;
use crate::config::IndexConfig;
use crate::error::{LucernaError, Result};
use crate::query::QueryParser;
use crate::storage::{MemoryStorage, Storage, StorageLock};

pub use reader::{IndexReader, IndexStats, TermInfo, TermsEnum, TopDocs};
pub use snapshot::Snapshot;
pub use term::Term;
pub use writer::IndexWriter;

/// Name of the lock held by the active writer.
pub const WRITE_LOCK: &str = "write";

/// A handle on one index.
///
/// Cloning the handle is cheap; clones share the published snapshot and
/// the write lock.
#[derive(Debug, Clone)]
pub struct Index {
    storage: Arc<dyn Storage>,
    config: IndexConfig,
    analyzer: Arc<dyn Analyzer>,
    published: Arc<RwLock<Arc<Snapshot>>>,
}

impl Index {
    /// Start a fresh, empty index in `storage`, discarding any index that
    /// was there.
    ///
    /// Fails with [`LucernaError::ConcurrentModification`] while a writer
    /// holds the storage.
    pub fn create(storage: Arc<dyn Storage>, config: IndexConfig) -> Result<Self> {
        let analyzer = config.analyzer.build()?;

        let mut lock = acquire_write_lock(storage.as_ref())?;
        commit::clear(storage.as_ref())?;
        let snapshot = Snapshot::empty();
        commit::write_commit(storage.as_ref(), &snapshot, config.sync_on_commit)?;
        lock.release()?;

        info!("created empty index");
        Ok(Index {
            storage,
            config,
            analyzer,
            published: Arc::new(RwLock::new(Arc::new(snapshot))),
        })
    }

    /// Open the index in `storage`, creating it if the storage holds none.
    pub fn open(storage: Arc<dyn Storage>, config: IndexConfig) -> Result<Self> {
        let Some(snapshot) = commit::read_latest(storage.as_ref())? else {
            return Self::create(storage, config);
        };

        info!(
            "opened index at generation {} with {} docs",
            snapshot.generation(),
            snapshot.num_docs()
        );
        Ok(Index {
            storage,
            analyzer: config.analyzer.build()?,
            config,
            published: Arc::new(RwLock::new(Arc::new(snapshot))),
        })
    }

    /// A fresh index held in memory, with default configuration.
    pub fn in_memory() -> Result<Self> {
        Self::create(
            Arc::new(MemoryStorage::new_default()),
            IndexConfig::default(),
        )
    }

    /// Take the single writer of this index.
    ///
    /// Fails with [`LucernaError::ConcurrentModification`] while another
    /// writer (in this process or, with file storage, another one) is open.
    pub fn writer(&self) -> Result<IndexWriter> {
        let lock = acquire_write_lock(self.storage.as_ref())?;
        self.refresh()?;

        Ok(IndexWriter::new(
            Arc::clone(&self.storage),
            Arc::clone(&self.analyzer),
            self.config.clone(),
            Arc::clone(&self.published),
            lock,
        ))
    }

    /// A reader over the latest commit on storage, including commits made
    /// through other handles or processes.
    pub fn reader(&self) -> Result<IndexReader> {
        self.refresh()?;
        Ok(IndexReader::new(Arc::clone(&self.published.read())))
    }

    /// Pick up a commit made through another handle on the same storage.
    ///
    /// Returns whether a different generation was loaded.
    pub fn refresh(&self) -> Result<bool> {
        loop {
            let current = self.published.read().generation();
            let Some(generation) = commit::read_generation(self.storage.as_ref())? else {
                return Ok(false);
            };
            if generation == current {
                return Ok(false);
            }

            let snapshot = match commit::read_latest(self.storage.as_ref()) {
                Ok(Some(snapshot)) => snapshot,
                Ok(None) => return Ok(false),
                // A newer commit replaced the snapshot between the two reads.
                Err(e) if commit::read_generation(self.storage.as_ref())? != Some(generation) => {
                    debug!("commit moved past generation {generation} during refresh: {e}");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut published = self.published.write();
            if published.generation() != current {
                return Ok(false);
            }
            debug!(
                "refreshed from generation {current} to {}",
                snapshot.generation()
            );
            *published = Arc::new(snapshot);
            return Ok(true);
        }
    }

    /// A query parser using this index's analyzer.
    pub fn query_parser(&self, default_field: &str) -> QueryParser {
        QueryParser::new(default_field, Arc::clone(&self.analyzer))
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Generation of the latest published commit.
    pub fn generation(&self) -> u64 {
        self.published.read().generation()
    }
}

fn acquire_write_lock(storage: &dyn Storage) -> Result<Box<dyn StorageLock>> {
    storage
        .lock_manager()
        .try_acquire_lock(WRITE_LOCK)?
        .ok_or_else(|| LucernaError::concurrent_modification("index is locked by another writer"))
}
