//! Command implementations for the Lucerna CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use serde_json::Value;

use crate::cli::args::{Command, GetArgs, IndexArgs, LucernaArgs, SearchArgs, TermArgs, TermsArgs};
use crate::cli::output::{
    DeletionResult, DocumentResult, Hit, IndexingResult, OptimizationResult, SearchResults,
    StatsResult, TermEntry, TermList, output_result,
};
use crate::config::IndexConfig;
use crate::document::{Document, Field};
use crate::error::{LucernaError, Result};
use crate::index::{Index, IndexReader, Term};
use crate::query::TermQuery;
use crate::storage::{FileStorage, Storage, StorageConfig};

/// Execute a CLI command based on the parsed arguments.
pub fn execute_command(args: LucernaArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => IndexConfig::from_json_file(path)?,
        None => IndexConfig::default(),
    };
    let storage: Arc<dyn Storage> =
        Arc::new(FileStorage::new(&args.index_dir, StorageConfig::default())?);
    debug!("using index directory {}", args.index_dir.display());

    match &args.command {
        Command::Index(index_args) => index_documents(index_args, storage, config, &args),
        Command::Search(search_args) => search(search_args, &Index::open(storage, config)?, &args),
        Command::Term(term_args) => term(term_args, &Index::open(storage, config)?, &args),
        Command::Delete(term_args) => delete(term_args, &Index::open(storage, config)?, &args),
        Command::Optimize => optimize(&Index::open(storage, config)?, &args),
        Command::Terms(terms_args) => list_terms(terms_args, &Index::open(storage, config)?, &args),
        Command::Stats => output_result(&StatsResult(Index::open(storage, config)?.reader()?.stats()), &args),
        Command::Get(get_args) => get(get_args, &Index::open(storage, config)?, &args),
    }
}

fn index_documents(
    index_args: &IndexArgs,
    storage: Arc<dyn Storage>,
    config: IndexConfig,
    args: &LucernaArgs,
) -> Result<()> {
    let start = Instant::now();
    let index = if index_args.recreate {
        Index::create(storage, config)?
    } else {
        Index::open(storage, config)?
    };

    let documents = read_documents(&index_args.file)?;
    let mut writer = index.writer()?;
    let mut first_doc_id = None;
    let mut documents_added = 0;
    for doc in documents {
        match writer.add_document(doc) {
            Ok(doc_id) => {
                first_doc_id.get_or_insert(doc_id);
                documents_added += 1;
            }
            Err(e) => {
                // All or nothing: the import must not commit on close.
                warn!("rejected document {}, discarding import", documents_added + 1);
                writer.rollback()?;
                return Err(e);
            }
        }
    }
    let generation = writer.commit()?;
    writer.close()?;

    info!("indexed {documents_added} documents from {}", index_args.file.display());
    output_result(
        &IndexingResult {
            documents_added,
            first_doc_id,
            generation,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        args,
    )
}

fn search(search_args: &SearchArgs, index: &Index, args: &LucernaArgs) -> Result<()> {
    let query = index.query_parser(&search_args.field).parse_query(&search_args.query)?;
    let reader = index.reader()?;
    let top = reader.search_top(&query, search_args.limit)?;

    output_result(
        &SearchResults {
            query: search_args.query.clone(),
            total_hits: top.total_hits,
            hits: hits(&reader, &top.doc_ids)?,
        },
        args,
    )
}

fn term(term_args: &TermArgs, index: &Index, args: &LucernaArgs) -> Result<()> {
    let query = TermQuery::new(term_args.field.as_str(), term_args.text.as_str());
    let reader = index.reader()?;
    let doc_ids = reader.search(&query)?;

    output_result(
        &SearchResults {
            query: query.term().to_string(),
            total_hits: doc_ids.len() as u64,
            hits: hits(&reader, &doc_ids)?,
        },
        args,
    )
}

fn delete(term_args: &TermArgs, index: &Index, args: &LucernaArgs) -> Result<()> {
    let term = Term::new(term_args.field.as_str(), term_args.text.as_str());
    let mut writer = index.writer()?;
    let deleted = writer.delete_documents(&term)?;
    let generation = writer.commit()?;
    writer.close()?;

    output_result(
        &DeletionResult {
            term: term.to_string(),
            deleted,
            generation,
        },
        args,
    )
}

fn optimize(index: &Index, args: &LucernaArgs) -> Result<()> {
    let mut writer = index.writer()?;
    let max_doc_before = writer.max_doc();
    writer.optimize()?;
    let max_doc_after = writer.max_doc();
    let generation = writer.commit()?;
    writer.close()?;

    output_result(
        &OptimizationResult {
            max_doc_before,
            max_doc_after,
            generation,
        },
        args,
    )
}

fn list_terms(terms_args: &TermsArgs, index: &Index, args: &LucernaArgs) -> Result<()> {
    let reader = index.reader()?;
    let terms = reader
        .terms()
        .filter(|info| {
            terms_args
                .field
                .as_deref()
                .is_none_or(|field| info.term.field() == field)
        })
        .map(|info| TermEntry {
            field: info.term.field().to_string(),
            text: info.term.text().to_string(),
            doc_freq: info.doc_freq,
        })
        .collect();

    output_result(&TermList { terms }, args)
}

fn get(get_args: &GetArgs, index: &Index, args: &LucernaArgs) -> Result<()> {
    let document = index.reader()?.document(get_args.doc_id)?;
    output_result(
        &DocumentResult {
            doc_id: get_args.doc_id,
            document,
        },
        args,
    )
}

fn hits(reader: &IndexReader, doc_ids: &[u64]) -> Result<Vec<Hit>> {
    doc_ids
        .iter()
        .map(|&doc_id| {
            Ok(Hit {
                doc_id,
                fields: reader.document(doc_id)?.fields().to_vec(),
            })
        })
        .collect()
}

/// Read a JSON Lines file of documents. Blank lines are skipped.
fn read_documents(path: &Path) -> Result<Vec<Document>> {
    let reader = BufReader::new(File::open(path)?);
    let mut documents = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc = parse_document_line(&line).map_err(|e| {
            LucernaError::invalid_argument(format!("{}:{}: {e}", path.display(), line_no + 1))
        })?;
        documents.push(doc);
    }
    Ok(documents)
}

/// Parse one document.
///
/// Either the full form `{"fields": [{"name", "value", "options"}]}` or a
/// flat object whose strings become text fields and whose integers become
/// integer fields.
pub fn parse_document_line(line: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(line)?;
    let Value::Object(map) = value else {
        return Err(LucernaError::invalid_argument("document must be a JSON object"));
    };

    if matches!(map.get("fields"), Some(Value::Array(_))) {
        return Ok(serde_json::from_value(Value::Object(map))?);
    }

    map.into_iter()
        .map(|(name, value)| match value {
            Value::String(text) => Ok(Field::text(name, text)),
            Value::Number(n) => n.as_i64().map(|i| Field::integer(name.as_str(), i)).ok_or_else(|| {
                LucernaError::invalid_field(format!("field '{name}' is not a 64-bit integer"))
            }),
            other => Err(LucernaError::invalid_field(format!(
                "field '{name}' has unsupported value {other}"
            ))),
        })
        .collect()
}
