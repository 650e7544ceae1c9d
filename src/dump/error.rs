//! Dump error types

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a dump or extracting facts from it.
///
/// Every variant is fatal: a dump that deviates from the expected shape is
/// reported, never partially summarized.
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("Failed to open dump file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read dump file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed line {line_no}: expected `key: value`, got {line:?}")]
    MalformedLine { line_no: usize, line: String },

    #[error("Line {line_no} appears before any block was opened: {line:?}")]
    OrphanField { line_no: usize, line: String },

    #[error("Block #{block} has no {key:?} entry")]
    MissingKey { block: usize, key: String },

    #[error("Value {value:?} for {key:?} is not an integer: {source}")]
    InvalidNumber {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("No {what} found in dump")]
    NotFound { what: String },
}
