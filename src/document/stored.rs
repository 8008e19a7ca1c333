//! Stored field values returned for a document.

use serde::{Deserialize, Serialize};

use crate::document::document::Document;
use crate::document::field_value::FieldValue;

/// The stored fields of one indexed document, in insertion order.
///
/// Fields that were indexed but not stored are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    fields: Vec<(String, FieldValue)>,
}

impl StoredDocument {
    pub fn new() -> Self {
        StoredDocument { fields: Vec::new() }
    }

    /// Keep only the stored fields of `doc`.
    pub fn from_document(doc: &Document) -> Self {
        doc.fields()
            .iter()
            .filter(|f| f.options.stored)
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    pub fn push<S: Into<String>>(&mut self, name: S, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    /// The first stored value of a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// The first stored value of a field, if it is text.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Every stored value of a field.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldValue> + 'a {
        self.fields
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for StoredDocument {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        StoredDocument {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_document_drops_unstored() {
        let doc = Document::builder()
            .add_keyword("id", "1")
            .add_unstored("contents", "Amsterdam has lots of bridges")
            .add_text("city", "Amsterdam")
            .add_stored("year", 1275i64)
            .build();

        let stored = StoredDocument::from_document(&doc);
        assert_eq!(stored.len(), 3);
        assert_eq!(stored.get_text("city"), Some("Amsterdam"));
        assert!(stored.get("contents").is_none());
        assert_eq!(stored.get("year"), Some(&FieldValue::Integer(1275)));
        assert_eq!(stored.fields()[0].0, "id");
    }

    #[test]
    fn test_multi_valued() {
        let mut stored = StoredDocument::new();
        stored.push("tag", FieldValue::from("a"));
        stored.push("tag", FieldValue::from("b"));

        assert_eq!(stored.get_text("tag"), Some("a"));
        assert_eq!(stored.get_all("tag").count(), 2);
    }
}
