//! Error types for JSON output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while storing the JSON file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The output file could not be created or truncated.
    #[error("Failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the serialized bytes failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
