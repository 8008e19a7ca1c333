//! Error types for the Lucerna library.
//!
//! All fallible operations return [`Result<T>`], whose error side is the
//! [`LucernaError`] enum.
//!
//! # Examples
//!
//! ```
//! use lucerna::error::{LucernaError, Result};
//!
//! fn lookup() -> Result<()> {
//!     Err(LucernaError::not_found("document 42"))
//! }
//!
//! let err = lookup().unwrap_err();
//! assert!(err.is_not_found());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Lucerna operations.
#[derive(Error, Debug)]
pub enum LucernaError {
    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A field was declared neither stored nor indexed, or cannot be indexed.
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// A document id is tombstoned or was never allocated.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A second writer tried to mutate an index that already has one.
    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    /// Malformed query expression.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Index-related errors (closed writer, inconsistent state).
    #[error("Index error: {0}")]
    Index(String),

    /// Analysis-related errors (bad tokenizer pattern, etc.).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Storage-related errors (missing files, corrupt commits).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A named storage lock is already held.
    #[error("Failed to acquire lock: {0}")]
    LockFailed(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LucernaError.
pub type Result<T> = std::result::Result<T, LucernaError>;

impl LucernaError {
    /// Create a new invalid field error.
    pub fn invalid_field<S: Into<String>>(msg: S) -> Self {
        LucernaError::InvalidField(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        LucernaError::NotFound(msg.into())
    }

    /// Create a new concurrent modification error.
    pub fn concurrent_modification<S: Into<String>>(msg: S) -> Self {
        LucernaError::ConcurrentModification(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        LucernaError::Parse(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        LucernaError::Index(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LucernaError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        LucernaError::Storage(msg.into())
    }

    /// Create a new lock failure for the lock `name`.
    pub fn lock_failed<S: Into<String>>(name: S) -> Self {
        LucernaError::LockFailed(name.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LucernaError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LucernaError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error means "absent" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LucernaError::NotFound(_))
    }

    /// Whether a storage lock was already held by someone else.
    pub fn is_lock_failed(&self) -> bool {
        matches!(self, LucernaError::LockFailed(_))
    }

    /// Whether the caller may retry once the current writer goes away.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LucernaError::ConcurrentModification(_))
    }
}
