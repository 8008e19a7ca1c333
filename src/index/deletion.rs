//! Tombstones for deleted documents.

use bit_vec::BitVec;

/// A bitmap of deleted document ids (bit set = deleted).
///
/// The bitmap grows on demand, so it needs no upfront document count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionBitmap {
    deleted_docs: BitVec,
    deleted_count: u64,
}

impl DeletionBitmap {
    /// Create an empty bitmap.
    pub fn new() -> Self {
        DeletionBitmap {
            deleted_docs: BitVec::new(),
            deleted_count: 0,
        }
    }

    /// Rebuild a bitmap from its byte form and bit length.
    pub fn from_bytes(bytes: &[u8], bit_len: usize) -> Self {
        let mut deleted_docs = BitVec::from_bytes(bytes);
        deleted_docs.truncate(bit_len);
        let deleted_count = deleted_docs.iter().filter(|&bit| bit).count() as u64;

        DeletionBitmap {
            deleted_docs,
            deleted_count,
        }
    }

    /// Mark a document as deleted. Returns false if it already was.
    pub fn delete_document(&mut self, doc_id: u64) -> bool {
        let idx = doc_id as usize;
        if idx >= self.deleted_docs.len() {
            self.deleted_docs.grow(idx + 1 - self.deleted_docs.len(), false);
        }

        if self.deleted_docs.get(idx).unwrap_or(false) {
            return false;
        }
        self.deleted_docs.set(idx, true);
        self.deleted_count += 1;
        true
    }

    /// Check if a document is deleted.
    pub fn is_deleted(&self, doc_id: u64) -> bool {
        self.deleted_docs.get(doc_id as usize).unwrap_or(false)
    }

    /// Number of deleted documents.
    pub fn deleted_count(&self) -> u64 {
        self.deleted_count
    }

    pub fn has_deletions(&self) -> bool {
        self.deleted_count > 0
    }

    /// All deleted document ids, ascending.
    pub fn deleted_docs(&self) -> Vec<u64> {
        self.deleted_docs
            .iter()
            .enumerate()
            .filter(|&(_, bit)| bit)
            .map(|(i, _)| i as u64)
            .collect()
    }

    /// Forget every tombstone.
    pub fn clear(&mut self) {
        self.deleted_docs = BitVec::new();
        self.deleted_count = 0;
    }

    /// Length of the bitmap in bits.
    pub fn bit_len(&self) -> usize {
        self.deleted_docs.len()
    }

    /// The bitmap packed into bytes, most significant bit first.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.deleted_docs.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_document() {
        let mut bitmap = DeletionBitmap::new();
        assert!(!bitmap.has_deletions());

        assert!(bitmap.delete_document(5));
        assert!(!bitmap.delete_document(5));
        assert!(bitmap.delete_document(0));

        assert!(bitmap.is_deleted(5));
        assert!(bitmap.is_deleted(0));
        assert!(!bitmap.is_deleted(3));
        assert!(!bitmap.is_deleted(1000));
        assert_eq!(bitmap.deleted_count(), 2);
        assert_eq!(bitmap.deleted_docs(), vec![0, 5]);
    }

    #[test]
    fn test_bytes_round_trip_keeps_length() {
        let mut bitmap = DeletionBitmap::new();
        bitmap.delete_document(1);
        bitmap.delete_document(10);

        let restored = DeletionBitmap::from_bytes(&bitmap.to_bytes(), bitmap.bit_len());
        assert_eq!(restored, bitmap);
        assert_eq!(restored.bit_len(), 11);
    }

    #[test]
    fn test_clear() {
        let mut bitmap = DeletionBitmap::new();
        bitmap.delete_document(2);
        bitmap.clear();

        assert!(!bitmap.has_deletions());
        assert!(!bitmap.is_deleted(2));
        assert_eq!(bitmap.bit_len(), 0);
    }
}
