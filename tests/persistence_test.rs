use std::sync::Arc;

use tempfile::TempDir;

use lucerna::config::IndexConfig;
use lucerna::document::{Document, FieldValue};
use lucerna::index::commit::{GENERATION_FILE, snapshot_file_name};
use lucerna::index::{Index, IndexReader, Term};
use lucerna::storage::{FileStorage, Storage, StorageConfig};

fn file_storage(dir: &TempDir) -> Arc<dyn Storage> {
    Arc::new(FileStorage::new(dir.path(), StorageConfig::default()).unwrap())
}

fn add_books(index: &Index) {
    let mut writer = index.writer().unwrap();
    for (isbn, title, year) in [
        ("1", "Ant in Action", 2007),
        ("2", "JUnit in Action", 2003),
        ("3", "Lucene in Action", 2004),
    ] {
        writer
            .add_document(
                Document::builder()
                    .add_keyword("isbn", isbn)
                    .add_text("title", title)
                    .add_integer("year", year)
                    .add_stored("cover", FieldValue::Binary(vec![0xca, 0xfe]))
                    .build(),
            )
            .unwrap();
    }
    writer.commit().unwrap();
    writer.close().unwrap();
}

#[test]
fn test_reopen_sees_committed_documents() {
    let dir = TempDir::new().unwrap();
    {
        let index = Index::open(file_storage(&dir), IndexConfig::default()).unwrap();
        add_books(&index);
    }

    let index = Index::open(file_storage(&dir), IndexConfig::default()).unwrap();
    let reader = index.reader().unwrap();
    assert_eq!(reader.generation(), 1);
    assert_eq!(reader.num_docs(), 3);
    assert_eq!(reader.term_query("year", "2004"), vec![2]);
    assert_eq!(reader.term_query("title", "junit"), vec![1]);

    let doc = reader.document(0).unwrap();
    assert_eq!(doc.get_text("title"), Some("Ant in Action"));
    assert_eq!(doc.get("year"), Some(&FieldValue::Integer(2007)));
    assert_eq!(doc.get("cover"), Some(&FieldValue::Binary(vec![0xca, 0xfe])));
}

#[test]
fn test_deletions_and_ids_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let index = Index::open(file_storage(&dir), IndexConfig::default()).unwrap();
        add_books(&index);
        let mut writer = index.writer().unwrap();
        writer.delete_documents(&Term::new("isbn", "2")).unwrap();
        writer.commit().unwrap();
    }

    let index = Index::open(file_storage(&dir), IndexConfig::default()).unwrap();
    let reader = index.reader().unwrap();
    assert!(reader.has_deletions());
    assert_eq!(reader.num_docs(), 2);
    assert_eq!(reader.max_doc(), 3);
    assert!(reader.document(1).unwrap_err().is_not_found());

    let mut writer = index.writer().unwrap();
    let doc_id = writer
        .add_document(Document::builder().add_keyword("isbn", "4").build())
        .unwrap();
    assert_eq!(doc_id, 3);
}

#[test]
fn test_only_latest_snapshot_is_kept() {
    let dir = TempDir::new().unwrap();
    let storage = file_storage(&dir);
    let index = Index::open(Arc::clone(&storage), IndexConfig::default()).unwrap();
    add_books(&index);
    add_books(&index);

    let generation = index.generation();
    assert_eq!(generation, 2);
    assert_eq!(
        storage.list_files().unwrap(),
        vec![GENERATION_FILE.to_string(), snapshot_file_name(generation)]
    );
}

#[test]
fn test_reader_open_on_storage() {
    let dir = TempDir::new().unwrap();
    let storage = file_storage(&dir);
    assert!(IndexReader::open(storage.as_ref()).unwrap_err().is_not_found());

    let index = Index::open(Arc::clone(&storage), IndexConfig::default()).unwrap();
    add_books(&index);

    let reader = IndexReader::open(storage.as_ref()).unwrap();
    assert_eq!(reader.num_docs(), 3);
}

#[test]
fn test_corrupted_snapshot_fails_to_open() {
    let dir = TempDir::new().unwrap();
    {
        let index = Index::open(file_storage(&dir), IndexConfig::default()).unwrap();
        add_books(&index);
    }

    let path = dir.path().join(snapshot_file_name(1));
    let mut bytes = std::fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xff;
    std::fs::write(&path, bytes).unwrap();

    assert!(Index::open(file_storage(&dir), IndexConfig::default()).is_err());
}

#[test]
fn test_missing_snapshot_fails_to_open() {
    let dir = TempDir::new().unwrap();
    {
        let index = Index::open(file_storage(&dir), IndexConfig::default()).unwrap();
        add_books(&index);
    }
    std::fs::remove_file(dir.path().join(snapshot_file_name(1))).unwrap();

    assert!(Index::open(file_storage(&dir), IndexConfig::default()).is_err());
}

#[test]
fn test_create_discards_existing_index() {
    let dir = TempDir::new().unwrap();
    {
        let index = Index::open(file_storage(&dir), IndexConfig::default()).unwrap();
        add_books(&index);
    }

    let index = Index::create(file_storage(&dir), IndexConfig::default()).unwrap();
    assert_eq!(index.generation(), 0);
    assert_eq!(index.reader().unwrap().num_docs(), 0);
}

#[test]
fn test_config_disables_commit_on_close() {
    let dir = TempDir::new().unwrap();
    let config = IndexConfig::from_json_str(r#"{"commit_on_close": false}"#).unwrap();
    let index = Index::open(file_storage(&dir), config.clone()).unwrap();
    {
        let mut writer = index.writer().unwrap();
        writer
            .add_document(Document::builder().add_keyword("isbn", "1").build())
            .unwrap();
        writer.close().unwrap();
    }

    let reopened = Index::open(file_storage(&dir), config).unwrap();
    assert_eq!(reopened.reader().unwrap().num_docs(), 0);
}
