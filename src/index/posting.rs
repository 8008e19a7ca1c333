//! The inverted index: term text to ascending document ids, per field.

use std::collections::BTreeMap;

use crate::index::term::Term;

/// Maps each field's terms to their posting lists.
///
/// Posting lists are ascending and duplicate-free. Fields and terms are kept
/// in sorted maps so enumeration comes out in term order for free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    fields: BTreeMap<String, BTreeMap<String, Vec<u64>>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            fields: BTreeMap::new(),
        }
    }

    /// Record that `doc_id` contains each of `terms` in `field`.
    ///
    /// Repeated terms are recorded once. Ids must be added in ascending
    /// order, which the writer guarantees by allocating them sequentially.
    pub fn add_postings<I, S>(&mut self, doc_id: u64, field: &str, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let field_terms = match self.fields.get_mut(field) {
            Some(field_terms) => field_terms,
            None => self.fields.entry(field.to_string()).or_default(),
        };

        for term in terms {
            let term = term.as_ref();
            let postings = match field_terms.get_mut(term) {
                Some(postings) => postings,
                None => field_terms.entry(term.to_string()).or_default(),
            };
            insert_sorted(postings, doc_id);
        }
    }

    /// Remove `doc_id` from every posting list, dropping lists that become
    /// empty.
    pub fn remove_postings(&mut self, doc_id: u64) {
        self.retain_docs(|id| id != doc_id);
    }

    /// Keep only the ids for which `keep` returns true.
    pub fn retain_docs<F: Fn(u64) -> bool>(&mut self, keep: F) {
        for field_terms in self.fields.values_mut() {
            for postings in field_terms.values_mut() {
                postings.retain(|&id| keep(id));
            }
            field_terms.retain(|_, postings| !postings.is_empty());
        }
        self.fields.retain(|_, field_terms| !field_terms.is_empty());
    }

    /// The posting list of a term, or an empty slice.
    pub fn lookup(&self, field: &str, text: &str) -> &[u64] {
        self.fields
            .get(field)
            .and_then(|field_terms| field_terms.get(text))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The posting list of a [`Term`].
    pub fn postings(&self, term: &Term) -> &[u64] {
        self.lookup(term.field(), term.text())
    }

    /// Every term with its posting list, in term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[u64])> + '_ {
        self.fields.iter().flat_map(|(field, field_terms)| {
            field_terms
                .iter()
                .map(move |(text, postings)| (field.as_str(), text.as_str(), postings.as_slice()))
        })
    }

    /// Every term, in order.
    pub fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.iter().map(|(field, text, _)| Term::new(field, text))
    }

    /// Field names that have at least one term.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    /// Number of distinct terms across all fields.
    pub fn term_count(&self) -> usize {
        self.fields.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Install a complete posting list. Used when decoding a snapshot.
    pub(crate) fn insert_postings(&mut self, field: &str, text: String, postings: Vec<u64>) {
        if postings.is_empty() {
            return;
        }
        self.fields
            .entry(field.to_string())
            .or_default()
            .insert(text, postings);
    }
}

fn insert_sorted(postings: &mut Vec<u64>, doc_id: u64) {
    match postings.last() {
        Some(&last) if last == doc_id => {}
        Some(&last) if last > doc_id => {
            if let Err(pos) = postings.binary_search(&doc_id) {
                postings.insert(pos, doc_id);
            }
        }
        _ => postings.push(doc_id),
    }
}
