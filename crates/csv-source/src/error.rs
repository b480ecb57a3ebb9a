//! Error types for CSV loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a CSV file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The input file could not be opened.
    #[error("Failed to open CSV file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV or a read failure while parsing.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A record's width differs from the header's.
    #[error("Column count mismatch on line {line}: expected {expected} columns, but found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A field is not valid text in the configured encoding.
    #[error("Invalid UTF-8 on line {line}, field {field}")]
    Encoding { line: u64, field: usize },
}
