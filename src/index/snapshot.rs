//! Immutable point-in-time index state and its binary encoding.
//!
//! A snapshot file is a single [`StructWriter`] stream:
//!
//! ```text
//! magic "LUCS" | version | generation | next_doc_id
//! doc_count  { doc_id  field_count { name  tag  value } }
//! field_count { name  term_count { text  posting_len  delta-encoded ids } }
//! tombstone_bits  tombstone_bytes
//! crc32
//! ```

use crate::document::{FieldValue, StoredDocument};
use crate::error::{LucernaError, Result};
use crate::index::deletion::DeletionBitmap;
use crate::index::posting::InvertedIndex;
use crate::index::store::DocumentStore;
use crate::storage::{StorageInput, StorageOutput, StructReader, StructWriter};

pub(crate) const SNAPSHOT_MAGIC: u32 = u32::from_le_bytes(*b"LUCS");
pub(crate) const SNAPSHOT_VERSION: u32 = 1;

const TAG_TEXT: u8 = 0;
const TAG_INTEGER: u8 = 1;
const TAG_BINARY: u8 = 2;

/// Everything a reader needs: stored documents, postings, tombstones, the
/// id counter and the commit generation.
///
/// Published snapshots are shared as `Arc<Snapshot>` and never mutated; the
/// writer works on its own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub(crate) generation: u64,
    pub(crate) next_doc_id: u64,
    pub(crate) store: DocumentStore,
    pub(crate) postings: InvertedIndex,
    pub(crate) deletions: DeletionBitmap,
}

impl Snapshot {
    /// An empty generation-0 snapshot.
    pub fn empty() -> Self {
        Snapshot::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The id the next added document will get.
    pub fn next_doc_id(&self) -> u64 {
        self.next_doc_id
    }

    /// Number of document slots, including tombstoned ones.
    pub fn max_doc(&self) -> u64 {
        self.store.len() as u64
    }

    /// Number of live documents.
    pub fn num_docs(&self) -> u64 {
        self.max_doc() - self.deletions.deleted_count()
    }

    pub fn has_deletions(&self) -> bool {
        self.deletions.has_deletions()
    }

    /// Whether `doc_id` names a document that is present and not deleted.
    pub fn is_live(&self, doc_id: u64) -> bool {
        self.store.contains(doc_id) && !self.deletions.is_deleted(doc_id)
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn postings(&self) -> &InvertedIndex {
        &self.postings
    }

    pub fn deletions(&self) -> &DeletionBitmap {
        &self.deletions
    }

    /// Write the snapshot. The writer is closed, appending the checksum.
    pub fn encode<W: StorageOutput>(&self, mut writer: StructWriter<W>) -> Result<()> {
        writer.write_u32(SNAPSHOT_MAGIC)?;
        writer.write_u32(SNAPSHOT_VERSION)?;
        writer.write_u64(self.generation)?;
        writer.write_u64(self.next_doc_id)?;

        let doc_ids = self.store.doc_ids();
        writer.write_varint(doc_ids.len() as u64)?;
        for doc_id in doc_ids {
            writer.write_varint(doc_id)?;
            let fields = self
                .store
                .document(doc_id)
                .map(StoredDocument::fields)
                .unwrap_or_default();
            writer.write_varint(fields.len() as u64)?;
            for (name, value) in fields {
                writer.write_string(name)?;
                write_value(&mut writer, value)?;
            }
        }

        let field_names: Vec<&str> = self.postings.field_names().collect();
        writer.write_varint(field_names.len() as u64)?;
        for field in field_names {
            writer.write_string(field)?;
            let terms: Vec<(&str, &[u64])> = self
                .postings
                .iter()
                .filter(|(f, _, _)| *f == field)
                .map(|(_, text, postings)| (text, postings))
                .collect();
            writer.write_varint(terms.len() as u64)?;
            for (text, postings) in terms {
                writer.write_string(text)?;
                writer.write_varint(postings.len() as u64)?;
                let mut previous = 0;
                for &doc_id in postings {
                    writer.write_varint(doc_id - previous)?;
                    previous = doc_id;
                }
            }
        }

        writer.write_varint(self.deletions.bit_len() as u64)?;
        writer.write_bytes(&self.deletions.to_bytes())?;

        writer.close()
    }

    /// Read and verify a snapshot.
    pub fn decode<R: StorageInput>(mut reader: StructReader<R>) -> Result<Self> {
        let magic = reader.read_u32()?;
        if magic != SNAPSHOT_MAGIC {
            return Err(LucernaError::storage(format!(
                "Invalid snapshot magic: {magic:#010x}"
            )));
        }
        let version = reader.read_u32()?;
        if version != SNAPSHOT_VERSION {
            return Err(LucernaError::storage(format!(
                "Unsupported snapshot version: {version}"
            )));
        }

        let generation = reader.read_u64()?;
        let next_doc_id = reader.read_u64()?;

        let mut store = DocumentStore::new();
        let doc_count = reader.read_varint()?;
        for _ in 0..doc_count {
            let doc_id = reader.read_varint()?;
            if doc_id >= next_doc_id {
                return Err(corrupt(format!(
                    "document id {doc_id} beyond id counter {next_doc_id}"
                )));
            }
            let field_count = reader.read_varint()?;
            let mut stored = StoredDocument::new();
            for _ in 0..field_count {
                let name = reader.read_string()?;
                let value = read_value(&mut reader)?;
                stored.push(name, value);
            }
            store.insert(doc_id, stored);
        }

        let mut postings = InvertedIndex::new();
        let field_count = reader.read_varint()?;
        for _ in 0..field_count {
            let field = reader.read_string()?;
            let term_count = reader.read_varint()?;
            for _ in 0..term_count {
                let text = reader.read_string()?;
                let len = reader.read_varint()?;
                let mut ids = Vec::new();
                let mut previous = 0u64;
                for i in 0..len {
                    let delta = reader.read_varint()?;
                    if i > 0 && delta == 0 {
                        return Err(corrupt(format!("duplicate posting in {field}:{text}")));
                    }
                    let doc_id = previous
                        .checked_add(delta)
                        .filter(|id| store.contains(*id))
                        .ok_or_else(|| corrupt(format!("dangling posting in {field}:{text}")))?;
                    ids.push(doc_id);
                    previous = doc_id;
                }
                postings.insert_postings(&field, text, ids);
            }
        }

        let bit_len = reader.read_varint()?;
        let bytes = reader.read_bytes()?;
        if (bytes.len() as u64) < bit_len.div_ceil(8) {
            return Err(corrupt("tombstone bitmap shorter than its bit length"));
        }
        let deletions = DeletionBitmap::from_bytes(&bytes, bit_len as usize);
        if let Some(doc_id) = deletions
            .deleted_docs()
            .into_iter()
            .find(|id| !store.contains(*id))
        {
            return Err(corrupt(format!("tombstone for unknown document {doc_id}")));
        }

        reader.verify_checksum()?;

        Ok(Snapshot {
            generation,
            next_doc_id,
            store,
            postings,
            deletions,
        })
    }
}

fn corrupt<S: Into<String>>(msg: S) -> LucernaError {
    LucernaError::storage(format!("Corrupt snapshot: {}", msg.into()))
}

fn write_value<W: StorageOutput>(writer: &mut StructWriter<W>, value: &FieldValue) -> Result<()> {
    match value {
        FieldValue::Text(text) => {
            writer.write_u8(TAG_TEXT)?;
            writer.write_string(text)
        }
        FieldValue::Integer(i) => {
            writer.write_u8(TAG_INTEGER)?;
            writer.write_u64(*i as u64)
        }
        FieldValue::Binary(bytes) => {
            writer.write_u8(TAG_BINARY)?;
            writer.write_bytes(bytes)
        }
    }
}

fn read_value<R: StorageInput>(reader: &mut StructReader<R>) -> Result<FieldValue> {
    match reader.read_u8()? {
        TAG_TEXT => Ok(FieldValue::Text(reader.read_string()?)),
        TAG_INTEGER => Ok(FieldValue::Integer(reader.read_u64()? as i64)),
        TAG_BINARY => Ok(FieldValue::Binary(reader.read_bytes()?)),
        tag => Err(corrupt(format!("unknown field value tag {tag}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::storage::{MemoryStorage, Storage};

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot::empty();
        snapshot.generation = 3;

        let docs = [
            Document::builder()
                .add_keyword("id", "1")
                .add_text("city", "Amsterdam")
                .add_stored("cover", vec![0u8, 159, 255])
                .build(),
            Document::builder()
                .add_keyword("id", "2")
                .add_integer("year", -12)
                .add_unstored("contents", "canals")
                .build(),
        ];
        for (doc_id, doc) in docs.iter().enumerate() {
            let doc_id = doc_id as u64;
            snapshot.store.put(doc_id, doc).unwrap();
            snapshot.postings.add_postings(doc_id, "id", [(doc_id + 1).to_string()]);
            snapshot.postings.add_postings(doc_id, "contents", ["has"]);
        }
        snapshot.next_doc_id = 2;
        snapshot.deletions.delete_document(1);
        snapshot
    }

    fn write(storage: &MemoryStorage, snapshot: &Snapshot) {
        let output = storage.create_output("snap").unwrap();
        snapshot.encode(StructWriter::new(output)).unwrap();
    }

    fn read(storage: &MemoryStorage) -> Result<Snapshot> {
        let input = storage.open_input("snap")?;
        Snapshot::decode(StructReader::new(input)?)
    }

    #[test]
    fn test_encode_decode() {
        let storage = MemoryStorage::new_default();
        let snapshot = sample();
        write(&storage, &snapshot);

        let decoded = read(&storage).unwrap();
        assert_eq!(decoded, snapshot);
        assert_eq!(decoded.max_doc(), 2);
        assert_eq!(decoded.num_docs(), 1);
        assert_eq!(decoded.postings.lookup("contents", "has"), &[0, 1]);
        assert_eq!(decoded.store.get(1, "year"), Some(&FieldValue::Integer(-12)));
    }

    #[test]
    fn test_empty_snapshot() {
        let storage = MemoryStorage::new_default();
        write(&storage, &Snapshot::empty());

        let decoded = read(&storage).unwrap();
        assert_eq!(decoded.generation(), 0);
        assert_eq!(decoded.max_doc(), 0);
        assert!(!decoded.has_deletions());
    }

    #[test]
    fn test_flipped_byte_is_rejected() {
        let storage = MemoryStorage::new_default();
        write(&storage, &sample());

        let mut raw = storage.get_raw("snap").unwrap();
        let middle = raw.len() / 2;
        raw[middle] ^= 0x01;
        storage.put_raw("snap", raw);

        assert!(matches!(read(&storage), Err(LucernaError::Storage(_))));
    }

    #[test]
    fn test_wrong_magic_is_rejected() {
        let storage = MemoryStorage::new_default();
        write(&storage, &sample());

        let mut raw = storage.get_raw("snap").unwrap();
        raw[..4].copy_from_slice(b"NOPE");
        storage.put_raw("snap", raw);

        let err = read(&storage).unwrap_err();
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn test_tombstone_without_document_is_rejected() {
        let storage = MemoryStorage::new_default();
        let mut snapshot = sample();
        snapshot.next_doc_id = 100;
        snapshot.deletions.delete_document(99);
        write(&storage, &snapshot);

        let err = read(&storage).unwrap_err();
        assert!(matches!(err, LucernaError::Storage(_)));
        assert!(err.to_string().contains("tombstone for unknown document 99"));
    }

    #[test]
    fn test_liveness() {
        let snapshot = sample();
        assert!(snapshot.is_live(0));
        assert!(!snapshot.is_live(1));
        assert!(!snapshot.is_live(7));
    }
}
