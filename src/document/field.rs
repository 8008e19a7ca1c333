//! Fields and their indexing options.

use serde::{Deserialize, Serialize};

use crate::document::field_value::FieldValue;
use crate::error::{LucernaError, Result};

/// How a field is treated by the index.
///
/// `tokenized` only matters when `indexed` is set: tokenized values go
/// through the index's analyzer, untokenized values become exactly one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Keep the value so it can be returned with hits.
    pub stored: bool,
    /// Make the value searchable.
    pub indexed: bool,
    /// Run the value through the analyzer before indexing.
    pub tokenized: bool,
}

impl FieldOptions {
    /// Stored, indexed and analyzed. The default for text.
    pub const TEXT: FieldOptions = FieldOptions {
        stored: true,
        indexed: true,
        tokenized: true,
    };

    /// Stored and indexed verbatim as one term.
    pub const KEYWORD: FieldOptions = FieldOptions {
        stored: true,
        indexed: true,
        tokenized: false,
    };

    /// Indexed and analyzed, but not kept.
    pub const UNSTORED: FieldOptions = FieldOptions {
        stored: false,
        indexed: true,
        tokenized: true,
    };

    /// Kept for retrieval only.
    pub const STORED_ONLY: FieldOptions = FieldOptions {
        stored: true,
        indexed: false,
        tokenized: false,
    };
}

impl Default for FieldOptions {
    fn default() -> Self {
        FieldOptions::TEXT
    }
}

/// A named value with indexing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
    #[serde(default)]
    pub options: FieldOptions,
}

impl Field {
    /// Create a field with explicit options.
    pub fn new<S: Into<String>, V: Into<FieldValue>>(
        name: S,
        value: V,
        options: FieldOptions,
    ) -> Self {
        Field {
            name: name.into(),
            value: value.into(),
            options,
        }
    }

    /// A stored, analyzed text field.
    pub fn text<S: Into<String>, T: Into<String>>(name: S, text: T) -> Self {
        Self::new(name, FieldValue::Text(text.into()), FieldOptions::TEXT)
    }

    /// A stored field indexed verbatim, e.g. an id or a city name.
    pub fn keyword<S: Into<String>, T: Into<String>>(name: S, text: T) -> Self {
        Self::new(name, FieldValue::Text(text.into()), FieldOptions::KEYWORD)
    }

    /// An analyzed field whose value is not kept.
    pub fn unstored<S: Into<String>, T: Into<String>>(name: S, text: T) -> Self {
        Self::new(name, FieldValue::Text(text.into()), FieldOptions::UNSTORED)
    }

    /// A field kept for retrieval but not searchable.
    pub fn stored<S: Into<String>, V: Into<FieldValue>>(name: S, value: V) -> Self {
        Self::new(name, value, FieldOptions::STORED_ONLY)
    }

    /// A stored integer, indexed as its decimal string.
    pub fn integer<S: Into<String>>(name: S, value: i64) -> Self {
        Self::new(name, FieldValue::Integer(value), FieldOptions::KEYWORD)
    }

    /// Check that the field can be accepted by the index.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(LucernaError::invalid_field("field name must not be empty"));
        }
        if !self.options.stored && !self.options.indexed {
            return Err(LucernaError::invalid_field(format!(
                "field '{}' is neither stored nor indexed",
                self.name
            )));
        }
        if self.options.indexed && self.value.index_text().is_none() {
            return Err(LucernaError::invalid_field(format!(
                "field '{}' has a {} value, which cannot be indexed",
                self.name,
                self.value.type_name()
            )));
        }
        Ok(())
    }
}
