//! Command line argument parsing for the Lucerna CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Lucerna - a small durable inverted-index search engine
#[derive(Parser, Debug, Clone)]
#[command(name = "lucerna")]
#[command(about = "Index JSON documents and run term and boolean queries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct LucernaArgs {
    /// Index directory (created if missing)
    #[arg(value_name = "INDEX_DIR")]
    pub index_dir: PathBuf,

    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only, overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Index configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "LUCERNA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LucernaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose + 1
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add documents from a JSON Lines file
    Index(IndexArgs),

    /// Run a `+required -excluded optional` query
    Search(SearchArgs),

    /// List documents containing an exact term
    Term(TermArgs),

    /// Delete documents containing an exact term
    Delete(TermArgs),

    /// Purge deleted documents
    Optimize,

    /// List every term with its document frequency
    Terms(TermsArgs),

    /// Show index statistics
    Stats,

    /// Print the stored fields of a document
    Get(GetArgs),
}

/// Arguments for indexing documents
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Document file, one JSON document per line
    #[arg(value_name = "JSONL_FILE")]
    pub file: PathBuf,

    /// Discard the existing index first
    #[arg(long)]
    pub recreate: bool,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query expression
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Field searched by the query's terms
    #[arg(long, default_value = "contents")]
    pub field: String,

    /// Maximum number of hits to print
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// A field and an exact term text
#[derive(Parser, Debug, Clone)]
pub struct TermArgs {
    #[arg(value_name = "FIELD")]
    pub field: String,

    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for listing terms
#[derive(Parser, Debug, Clone)]
pub struct TermsArgs {
    /// Only list terms of this field
    #[arg(long)]
    pub field: Option<String>,
}

/// Arguments for fetching a document
#[derive(Parser, Debug, Clone)]
pub struct GetArgs {
    #[arg(value_name = "DOC_ID")]
    pub doc_id: u64,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines
    Human,
    /// JSON
    Json,
}
