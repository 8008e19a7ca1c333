use std::sync::Arc;

use lucerna::analysis::{Analyzer, AnalyzerKind, SimpleAnalyzer, WhitespaceAnalyzer};
use lucerna::config::IndexConfig;
use lucerna::document::Document;
use lucerna::index::{Index, Term};
use lucerna::query::{BooleanQuery, Occur, QueryParser, TermQuery};
use lucerna::storage::MemoryStorage;

const BOOKS: &[(&str, &str, &str, &str)] = &[
    (
        "9781933988320",
        "Ant in Action",
        "Steve Loughran",
        "Ant build tool with JUnit testing, Java projects and continuous integration",
    ),
    (
        "9780596007430",
        "JUnit in Action",
        "Vincent Massol",
        "JUnit unit testing with mock objects, Ant integration and test driven design",
    ),
    (
        "9781933988177",
        "Lucene in Action",
        "Erik Hatcher",
        "Lucene search engine library: indexing, analysis and queries",
    ),
];

fn book_index() -> Index {
    let index = Index::in_memory().unwrap();
    let mut writer = index.writer().unwrap();
    for &(isbn, title, author, contents) in BOOKS {
        writer
            .add_document(
                Document::builder()
                    .add_keyword("isbn", isbn)
                    .add_text("title", title)
                    .add_stored("author", author)
                    .add_unstored("contents", contents)
                    .build(),
            )
            .unwrap();
    }
    writer.commit().unwrap();
    index
}

fn titles(index: &Index, doc_ids: &[u64]) -> Vec<String> {
    let reader = index.reader().unwrap();
    doc_ids
        .iter()
        .map(|&doc_id| {
            reader
                .document(doc_id)
                .unwrap()
                .get_text("title")
                .unwrap()
                .to_string()
        })
        .collect()
}

#[test]
fn test_term_query() {
    let index = book_index();
    let reader = index.reader().unwrap();

    let hits = reader.search(&TermQuery::new("isbn", "9780596007430")).unwrap();
    assert_eq!(titles(&index, &hits), vec!["JUnit in Action"]);

    assert!(reader.search(&TermQuery::new("isbn", "0000")).unwrap().is_empty());
    assert_eq!(reader.term_query("title", "action"), vec![0, 1, 2]);
}

#[test]
fn test_stored_only_field_is_not_searchable() {
    let index = book_index();
    let reader = index.reader().unwrap();

    assert!(reader.term_query("author", "Erik Hatcher").is_empty());
    assert!(reader.term_query("author", "erik").is_empty());
    assert_eq!(
        reader.document(2).unwrap().get_text("author"),
        Some("Erik Hatcher")
    );
}

#[test]
fn test_boolean_query() {
    let index = book_index();
    let reader = index.reader().unwrap();

    let hits = reader.boolean_query(
        &[Term::new("contents", "junit"), Term::new("contents", "ant")],
        &[Term::new("contents", "mock")],
        &[],
    );
    assert_eq!(titles(&index, &hits), vec!["Ant in Action"]);

    let mut query = BooleanQuery::new();
    query.add_clause(Box::new(TermQuery::new("contents", "junit")), Occur::Must);
    query.add_clause(Box::new(TermQuery::new("contents", "ant")), Occur::Must);
    query.add_clause(Box::new(TermQuery::new("contents", "mock")), Occur::MustNot);
    assert_eq!(reader.search(&query).unwrap(), hits);
}

#[test]
fn test_query_parser() {
    let index = book_index();
    let reader = index.reader().unwrap();

    let parser = QueryParser::new("contents", Arc::new(SimpleAnalyzer::new().unwrap()));
    let query = parser.parse_query("+JUNIT +ANT -MOCK").unwrap();
    let hits = reader.search(&query).unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(titles(&index, &hits), vec!["Ant in Action"]);

    let query = index.query_parser("contents").parse_query("mock lucene").unwrap();
    assert_eq!(
        titles(&index, &reader.search(&query).unwrap()),
        vec!["JUnit in Action", "Lucene in Action"]
    );
}

#[test]
fn test_query_parser_rejects_malformed_input() {
    let parser = book_index().query_parser("contents");

    for expr in ["", "   ", "+", "ant -", "+ ant", "!!!"] {
        let err = parser.parse(expr).unwrap_err();
        assert!(
            matches!(err, lucerna::error::LucernaError::Parse(_)),
            "{expr:?} gave {err}"
        );
    }
}

#[test]
fn test_only_excluded_terms_match_nothing() {
    let index = book_index();
    let query = index.query_parser("contents").parse_query("-mock").unwrap();

    assert!(index.reader().unwrap().search(&query).unwrap().is_empty());
}

#[test]
fn test_search_top() {
    let index = book_index();
    let query = index.query_parser("title").parse_query("action").unwrap();
    let top = index.reader().unwrap().search_top(&query, 2).unwrap();

    assert_eq!(top.total_hits, 3);
    assert_eq!(top.doc_ids, vec![0, 1]);
}

#[test]
fn test_deleted_documents_are_not_found() {
    let index = book_index();
    let mut writer = index.writer().unwrap();
    writer
        .delete_documents(&Term::new("isbn", "9781933988320"))
        .unwrap();
    writer.commit().unwrap();

    let reader = index.reader().unwrap();
    let query = index.query_parser("contents").parse_query("+ant").unwrap();
    assert_eq!(titles(&index, &reader.search(&query).unwrap()), vec!["JUnit in Action"]);
    assert_eq!(reader.doc_freq(&Term::new("contents", "ant")), 1);
    assert!(
        !reader
            .terms()
            .any(|info| info.term == Term::new("contents", "continuous"))
    );
}

#[test]
fn test_whitespace_analyzer_keeps_case() {
    let config = IndexConfig {
        analyzer: AnalyzerKind::Whitespace,
        ..IndexConfig::default()
    };
    let index = Index::create(Arc::new(MemoryStorage::new_default()), config).unwrap();
    let mut writer = index.writer().unwrap();
    writer
        .add_document(
            Document::builder()
                .add_text("city", "Den Haag")
                .build(),
        )
        .unwrap();
    writer.commit().unwrap();

    let reader = index.reader().unwrap();
    assert_eq!(reader.term_query("city", "Haag"), vec![0]);
    assert!(reader.term_query("city", "haag").is_empty());

    let terms = WhitespaceAnalyzer::new().terms("Den  Haag\tcentraal").unwrap();
    assert_eq!(terms, vec!["Den", "Haag", "centraal"]);
}
