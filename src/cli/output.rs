//! Output formatting for CLI commands.

use std::fmt;

use serde::Serialize;

use crate::cli::args::{LucernaArgs, OutputFormat};
use crate::document::{FieldValue, StoredDocument};
use crate::error::Result;
use crate::index::IndexStats;

/// Result of an `index` run.
#[derive(Debug, Serialize)]
pub struct IndexingResult {
    pub documents_added: u64,
    pub first_doc_id: Option<u64>,
    pub generation: u64,
    pub duration_ms: u64,
}

/// One search or term hit.
#[derive(Debug, Serialize)]
pub struct Hit {
    pub doc_id: u64,
    pub fields: Vec<(String, FieldValue)>,
}

/// Result of a `search` or `term` command.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub total_hits: u64,
    pub hits: Vec<Hit>,
}

/// Result of a `delete` command.
#[derive(Debug, Serialize)]
pub struct DeletionResult {
    pub term: String,
    pub deleted: u64,
    pub generation: u64,
}

/// Result of an `optimize` command.
#[derive(Debug, Serialize)]
pub struct OptimizationResult {
    pub max_doc_before: u64,
    pub max_doc_after: u64,
    pub generation: u64,
}

/// One line of `terms` output.
#[derive(Debug, Serialize)]
pub struct TermEntry {
    pub field: String,
    pub text: String,
    pub doc_freq: u64,
}

/// Result of a `terms` command.
#[derive(Debug, Serialize)]
pub struct TermList {
    pub terms: Vec<TermEntry>,
}

/// Result of a `get` command.
#[derive(Debug, Serialize)]
pub struct DocumentResult {
    pub doc_id: u64,
    pub document: StoredDocument,
}

/// Print a result in the format selected on the command line.
pub fn output_result<T: Serialize + fmt::Display>(result: &T, args: &LucernaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{result}");
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &LucernaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[(String, FieldValue)]) -> fmt::Result {
    for (name, value) in fields {
        writeln!(f, "    {name}: {value}")?;
    }
    Ok(())
}

impl fmt::Display for IndexingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Indexed {} documents", self.documents_added)?;
        if let Some(first) = self.first_doc_id {
            write!(f, " (ids {first}..)")?;
        }
        writeln!(
            f,
            " in {} ms, generation {}",
            self.duration_ms, self.generation
        )
    }
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} hits for {}", self.total_hits, self.query)?;
        for hit in &self.hits {
            writeln!(f, "  [{}]", hit.doc_id)?;
            write_fields(f, &hit.fields)?;
        }
        Ok(())
    }
}

impl fmt::Display for DeletionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted {} documents matching {}, generation {}",
            self.deleted, self.term, self.generation
        )
    }
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Optimized: {} -> {} document slots, generation {}",
            self.max_doc_before, self.max_doc_after, self.generation
        )
    }
}

impl fmt::Display for TermList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.terms {
            writeln!(f, "{}:{}\t{}", entry.field, entry.text, entry.doc_freq)?;
        }
        Ok(())
    }
}

impl fmt::Display for DocumentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Document {}", self.doc_id)?;
        write_fields(f, self.document.fields())
    }
}

/// Statistics wrapper so [`IndexStats`] prints as a table.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct StatsResult(pub IndexStats);

impl fmt::Display for StatsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.0;
        writeln!(f, "generation:   {}", stats.generation)?;
        writeln!(f, "num_docs:     {}", stats.num_docs)?;
        writeln!(f, "max_doc:      {}", stats.max_doc)?;
        writeln!(f, "deleted_docs: {}", stats.deleted_docs)?;
        writeln!(f, "terms:        {}", stats.term_count)
    }
}
