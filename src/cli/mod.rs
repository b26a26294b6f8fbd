//! CLI support for btriev
//!
//! Provides programmatic access to btriev CLI functionality for
//! embedding in other tools.

mod dataset;

pub use dataset::{load_dataset, Dataset};

use std::io;

use crate::errors::ParseError;
use crate::evaluator::evaluate;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::store::DataId;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Parse error (carries the query it was raised against, for
    /// caret-style rendering)
    Parse { query: String, error: ParseError },
    /// JSON parsing error
    Json(serde_json::Error),
    /// Malformed dataset structure
    InvalidDataset(String),
    /// IO error
    Io(io::Error),
    /// No dataset provided
    NoDataset,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse { query, error } => {
                write!(f, "{}", render_parse_error(query, error))
            }
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::InvalidDataset(msg) => write!(f, "Invalid dataset: {}", msg),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoDataset => {
                write!(f, "No dataset provided. Use --dataset or pipe JSON to stdin.")
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse { error, .. } => Some(error),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Render a parse error as a caret diagnostic:
///
/// ```text
/// Tag name 'tgo1' does not exist
///   tgo1 and tag2
///   ^~~~
/// ```
pub fn render_parse_error(query: &str, error: &ParseError) -> String {
    let span = error.location();
    let width = span.end().saturating_sub(span.start()) + 1;

    let mut underline = String::new();
    underline.push_str(&" ".repeat(span.start()));
    underline.push('^');
    underline.push_str(&"~".repeat(width.saturating_sub(1)));

    format!("{}\n  {}\n  {}", error, query, underline)
}

/// Evaluate a query against a JSON dataset, returning the matching
/// data ids.
pub fn execute_query(query: &str, dataset_json: &str) -> Result<Vec<DataId>, CliError> {
    let dataset = load_dataset(dataset_json)?;
    evaluate(query, &dataset.store, &dataset.hierarchy).map_err(|error| CliError::Parse {
        query: query.to_string(),
        error,
    })
}

/// Validate a query's syntax without a hierarchy or dataset.
pub fn check_syntax(query: &str) -> Result<(), CliError> {
    let tokens = Lexer::new().tokenize(query);
    Parser::new(None)
        .parse(tokens)
        .map(|_| ())
        .map_err(|error| CliError::Parse {
            query: query.to_string(),
            error,
        })
}
