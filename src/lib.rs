//! # Lucerna
//!
//! A small, durable inverted-index search library for Rust.
//!
//! ## Features
//!
//! - Documents made of named fields, each stored, indexed or both
//! - Pluggable analysis: whitespace, simple (letters and digits, lowercased) and keyword analyzers
//! - Term and boolean queries, plus a `+required -excluded optional` query parser
//! - Soft deletion with tombstones, update-by-term and optimize
//! - A single writer per index, snapshot-isolated readers
//! - Checksummed commits on in-memory or directory storage
//!
//! ## Example
//!
//! ```
//! use lucerna::document::Document;
//! use lucerna::index::Index;
//!
//! let index = Index::in_memory().unwrap();
//! let mut writer = index.writer().unwrap();
//! writer
//!     .add_document(
//!         Document::builder()
//!             .add_text("title", "Ant in Action")
//!             .add_unstored("contents", "JUnit and Ant together")
//!             .build(),
//!     )
//!     .unwrap();
//! writer.commit().unwrap();
//!
//! let query = index.query_parser("contents").parse_query("+junit +ant").unwrap();
//! let hits = index.reader().unwrap().search(&query).unwrap();
//! assert_eq!(hits, vec![0]);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod storage;
pub mod util;

pub use crate::error::{LucernaError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
