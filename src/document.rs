//! Documents and their fields.
//!
//! A [`Document`](document::Document) is an ordered list of
//! [`Field`](field::Field)s. Each field carries a
//! [`FieldValue`](field_value::FieldValue) and [`FieldOptions`](field::FieldOptions)
//! saying whether the value is stored, indexed, and tokenized. What the index
//! gives back for a hit is a [`StoredDocument`](stored::StoredDocument): just
//! the stored values, in insertion order.

#[allow(clippy::module_inception)]
pub mod document;
pub mod field;
pub mod field_value;
pub mod stored;

pub use document::{Document, DocumentBuilder};
pub use field::{Field, FieldOptions};
pub use field_value::FieldValue;
pub use stored::StoredDocument;
