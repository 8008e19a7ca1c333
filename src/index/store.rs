//! Stored field values per document.

use ahash::AHashMap;

use crate::document::{Document, FieldValue, StoredDocument};
use crate::error::Result;

/// Holds the stored fields of every document slot, live or tombstoned.
///
/// A document with no stored fields still gets an (empty) entry, so
/// [`len`](Self::len) is the number of slots the index holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStore {
    docs: AHashMap<u64, StoredDocument>,
}

impl DocumentStore {
    pub fn new() -> Self {
        DocumentStore {
            docs: AHashMap::new(),
        }
    }

    /// Validate `doc` and keep its stored values under `doc_id`.
    ///
    /// Nothing is stored when any field is invalid.
    pub fn put(&mut self, doc_id: u64, doc: &Document) -> Result<()> {
        doc.validate()?;
        self.docs.insert(doc_id, StoredDocument::from_document(doc));
        Ok(())
    }

    /// Install an already stored document. Used when decoding a snapshot.
    pub(crate) fn insert(&mut self, doc_id: u64, stored: StoredDocument) {
        self.docs.insert(doc_id, stored);
    }

    /// The first stored value of `field` in `doc_id`.
    pub fn get(&self, doc_id: u64, field: &str) -> Option<&FieldValue> {
        self.docs.get(&doc_id).and_then(|doc| doc.get(field))
    }

    /// All stored values of `doc_id`.
    pub fn document(&self, doc_id: u64) -> Option<&StoredDocument> {
        self.docs.get(&doc_id)
    }

    pub fn contains(&self, doc_id: u64) -> bool {
        self.docs.contains_key(&doc_id)
    }

    /// Drop a document slot entirely.
    pub fn remove(&mut self, doc_id: u64) -> Option<StoredDocument> {
        self.docs.remove(&doc_id)
    }

    /// Number of document slots.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Slot ids in ascending order.
    pub fn doc_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.docs.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldOptions;
    use crate::error::LucernaError;

    #[test]
    fn test_put_and_get() {
        let mut store = DocumentStore::new();
        let doc = Document::builder()
            .add_keyword("id", "1")
            .add_unstored("contents", "Amsterdam has lots of bridges")
            .add_text("city", "Amsterdam")
            .build();

        store.put(0, &doc).unwrap();

        assert_eq!(store.get(0, "city"), Some(&FieldValue::from("Amsterdam")));
        assert!(store.get(0, "contents").is_none());
        assert!(store.get(1, "city").is_none());
        assert_eq!(store.document(0).unwrap().len(), 2);
    }

    #[test]
    fn test_unstored_only_document_still_occupies_a_slot() {
        let mut store = DocumentStore::new();
        store
            .put(3, &Document::builder().add_unstored("body", "x").build())
            .unwrap();

        assert!(store.contains(3));
        assert_eq!(store.len(), 1);
        assert!(store.document(3).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_document_is_not_stored() {
        let mut store = DocumentStore::new();
        let doc = Document::builder()
            .add_text("title", "fine")
            .add_field("blob", vec![0u8], FieldOptions::KEYWORD)
            .build();

        let result = store.put(0, &doc);
        assert!(matches!(result, Err(LucernaError::InvalidField(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_and_ids() {
        let mut store = DocumentStore::new();
        for id in [4, 1, 9] {
            store.put(id, &Document::builder().add_keyword("id", id.to_string()).build()).unwrap();
        }

        assert_eq!(store.doc_ids(), vec![1, 4, 9]);
        assert!(store.remove(4).is_some());
        assert!(store.remove(4).is_none());
        assert_eq!(store.doc_ids(), vec![1, 9]);
    }
}
