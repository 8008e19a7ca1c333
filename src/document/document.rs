//! Document structure and builder.
//!
//! ```
//! use lucerna::document::Document;
//!
//! let doc = Document::builder()
//!     .add_keyword("id", "1")
//!     .add_text("title", "JUnit in Action")
//!     .add_unstored("contents", "unit testing with mock objects")
//!     .build();
//!
//! assert_eq!(doc.len(), 3);
//! assert_eq!(doc.get_field("title").unwrap().value.as_text(), Some("JUnit in Action"));
//! ```

use serde::{Deserialize, Serialize};

use crate::document::field::{Field, FieldOptions};
use crate::document::field_value::FieldValue;
use crate::error::Result;

/// A document to be indexed: an ordered list of fields.
///
/// Field names may repeat; every occurrence is indexed and stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    fields: Vec<Field>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Document { fields: Vec::new() }
    }

    /// Append a field.
    pub fn add(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// The first field with the given name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Every field with the given name, in insertion order.
    pub fn get_fields<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |f| f.name == name)
    }

    /// Whether any field has this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    /// All fields in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of fields, counting repeated names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate every field. Stops at the first invalid one.
    pub fn validate(&self) -> Result<()> {
        self.fields.iter().try_for_each(Field::validate)
    }

    /// Start building a document.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }
}

impl FromIterator<Field> for Document {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Document {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Builder for [`Document`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder {
            document: Document::new(),
        }
    }

    /// Add a stored, analyzed text field.
    pub fn add_text<S: Into<String>, T: Into<String>>(mut self, name: S, value: T) -> Self {
        self.document.add(Field::text(name, value));
        self
    }

    /// Add a stored field indexed verbatim.
    pub fn add_keyword<S: Into<String>, T: Into<String>>(mut self, name: S, value: T) -> Self {
        self.document.add(Field::keyword(name, value));
        self
    }

    /// Add an analyzed field that is not stored.
    pub fn add_unstored<S: Into<String>, T: Into<String>>(mut self, name: S, value: T) -> Self {
        self.document.add(Field::unstored(name, value));
        self
    }

    /// Add a stored, unindexed field.
    pub fn add_stored<S: Into<String>, V: Into<FieldValue>>(mut self, name: S, value: V) -> Self {
        self.document.add(Field::stored(name, value));
        self
    }

    /// Add an integer field, stored and indexed as one term.
    pub fn add_integer<S: Into<String>>(mut self, name: S, value: i64) -> Self {
        self.document.add(Field::integer(name, value));
        self
    }

    /// Add a field with explicit options.
    pub fn add_field<S: Into<String>, V: Into<FieldValue>>(
        mut self,
        name: S,
        value: V,
        options: FieldOptions,
    ) -> Self {
        self.document.add(Field::new(name, value, options));
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}
