use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

use lucerna::config::IndexConfig;
use lucerna::document::Document;
use lucerna::error::LucernaError;
use lucerna::index::{Index, Term};
use lucerna::storage::{FileStorage, Storage, StorageConfig};

fn doc(id: u64) -> Document {
    Document::builder()
        .add_keyword("id", id.to_string())
        .add_unstored("contents", if id % 2 == 0 { "even" } else { "odd" })
        .build()
}

#[test]
fn test_second_writer_is_rejected() {
    let index = Index::in_memory().unwrap();
    let clone = index.clone();

    let _writer = index.writer().unwrap();
    let err = clone.writer().unwrap_err();

    assert!(matches!(err, LucernaError::ConcurrentModification(_)));
}

#[test]
fn test_second_writer_on_same_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    let open = || {
        let storage: Arc<dyn Storage> =
            Arc::new(FileStorage::new(dir.path(), StorageConfig::default()).unwrap());
        Index::open(storage, IndexConfig::default()).unwrap()
    };
    let first = open();
    let second = open();

    let mut writer = first.writer().unwrap();
    assert!(second.writer().unwrap_err().is_retryable());

    writer.add_document(doc(0)).unwrap();
    writer.close().unwrap();

    let writer = second.writer().unwrap();
    assert_eq!(writer.num_docs(), 1);
    assert_eq!(second.reader().unwrap().num_docs(), 1);
}

#[test]
fn test_reader_keeps_its_snapshot() {
    let index = Index::in_memory().unwrap();
    let mut writer = index.writer().unwrap();
    writer.add_document(doc(0)).unwrap();
    writer.add_document(doc(1)).unwrap();
    writer.commit().unwrap();

    let before = index.reader().unwrap();

    writer.delete_documents(&Term::new("id", "0")).unwrap();
    writer.add_document(doc(2)).unwrap();
    assert_eq!(index.reader().unwrap().num_docs(), 2);

    writer.commit().unwrap();
    writer.optimize().unwrap();
    writer.commit().unwrap();

    assert_eq!(before.num_docs(), 2);
    assert_eq!(before.max_doc(), 2);
    assert_eq!(before.term_query("id", "0"), vec![0]);
    assert!(before.document(0).is_ok());

    let after = index.reader().unwrap();
    assert_eq!(after.num_docs(), 2);
    assert_eq!(after.max_doc(), 2);
    assert!(after.term_query("id", "0").is_empty());
    assert_eq!(after.term_query("contents", "even"), vec![2]);
}

#[test]
fn test_readers_on_threads_while_writing() {
    let index = Index::in_memory().unwrap();
    let mut writer = index.writer().unwrap();
    for id in 0..10 {
        writer.add_document(doc(id)).unwrap();
    }
    writer.commit().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = index.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let reader = index.reader().unwrap();
                    let even = reader.term_query("contents", "even").len() as u64;
                    let odd = reader.term_query("contents", "odd").len() as u64;
                    assert_eq!(even + odd, reader.num_docs());
                }
            })
        })
        .collect();

    for id in 10..30 {
        writer.add_document(doc(id)).unwrap();
        writer.commit().unwrap();
    }
    writer
        .delete_documents(&Term::new("contents", "odd"))
        .unwrap();
    writer.commit().unwrap();

    for handle in handles {
        handle.join().unwrap();
    }

    let reader = index.reader().unwrap();
    assert_eq!(reader.num_docs(), 15);
    assert_eq!(reader.max_doc(), 30);
}

#[test]
fn test_writer_can_move_to_another_thread() {
    let index = Index::in_memory().unwrap();
    let mut writer = index.writer().unwrap();

    let handle = thread::spawn(move || {
        writer.add_document(doc(0)).unwrap();
        writer.commit().unwrap()
    });

    assert_eq!(handle.join().unwrap(), 1);
    assert_eq!(index.reader().unwrap().num_docs(), 1);
}
