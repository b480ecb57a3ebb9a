//! JSON file writer.

use crate::error::StoreError;
use crate::format::{AsciiFormatter, JsonStyle, OutputEncoding, SpacedFormatter};
use row_core::Row;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for JSON output
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteConfig {
    /// Text encoding of the output (default: ASCII with `\uXXXX` escapes)
    pub encoding: OutputEncoding,

    /// Whitespace layout (default: spaced single line)
    pub style: JsonStyle,
}

/// Result of a [`create_json`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The file was written.
    Written {
        /// Destination path.
        path: PathBuf,
        /// Number of rows serialized.
        rows: usize,
        /// Size of the file in bytes.
        bytes: u64,
    },
    /// There was no data, so nothing was written.
    Skipped,
}

/// Serialize rows as a JSON array of objects.
///
/// Every cell is written as a JSON string; an empty slice yields `[]`.
pub fn to_json_bytes(rows: &[Row], config: &WriteConfig) -> Result<Vec<u8>, StoreError> {
    match config.style {
        JsonStyle::Spaced => serialize_with(rows, SpacedFormatter, config.encoding),
        JsonStyle::Compact => serialize_with(rows, CompactFormatter, config.encoding),
        JsonStyle::Pretty => serialize_with(rows, PrettyFormatter::new(), config.encoding),
    }
}

fn serialize_with<F: Formatter>(
    rows: &[Row],
    formatter: F,
    encoding: OutputEncoding,
) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    match encoding {
        OutputEncoding::Ascii => {
            let mut ser =
                serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter::new(formatter));
            rows.serialize(&mut ser)?;
        }
        OutputEncoding::Utf8 => {
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            rows.serialize(&mut ser)?;
        }
    }
    Ok(buf)
}

/// Write rows to a JSON file.
///
/// When `data` is `None` (no rows were loaded) nothing is touched on disk
/// and [`StoreOutcome::Skipped`] is returned.
///
/// The rows are serialized in memory before the destination is opened, so a
/// serialization failure leaves any existing file untouched. The file is
/// created or truncated and then written in one pass.
///
/// # Arguments
///
/// * `data` - Rows to write, or `None` if loading produced no data
/// * `path` - Destination file; its parent directory must exist
/// * `config` - Output encoding and layout
pub fn create_json(
    data: Option<&[Row]>,
    path: &Path,
    config: &WriteConfig,
) -> Result<StoreOutcome, StoreError> {
    let Some(rows) = data else {
        debug!("No data to transform, skipping {}", path.display());
        return Ok(StoreOutcome::Skipped);
    };

    let bytes = to_json_bytes(rows, config)?;

    let mut file = File::create(path).map_err(|source| StoreError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(&bytes)
        .and_then(|()| file.flush())
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        "JSON generation complete: {} rows, {} bytes written to {}",
        rows.len(),
        bytes.len(),
        path.display()
    );

    Ok(StoreOutcome::Written {
        path: path.to_path_buf(),
        rows: rows.len(),
        bytes: bytes.len() as u64,
    })
}
