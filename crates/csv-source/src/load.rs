//! CSV loading implementation
//!
//! This module handles reading a CSV source fully into memory as a sequence of rows.

use crate::error::LoadError;
use csv::ByteRecord;
use row_core::{Row, RowSequence};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding of the CSV input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputEncoding {
    /// Fields must be valid UTF-8.
    #[default]
    Utf8,
    /// Every byte is one character (ISO-8859-1); any input decodes.
    Latin1,
}

/// What to do with a record whose width differs from the header's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldCountPolicy {
    /// Fail the load with [`LoadError::FieldCount`].
    #[default]
    Strict,
    /// Pad short records with empty values and drop extra fields.
    Pad,
}

/// Configuration for CSV loading
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Whether the CSV has headers (default: true)
    pub has_headers: bool,

    /// Optional column names when has_headers is false
    /// When absent, columns are named column_0, column_1, ...
    pub column_names: Option<Vec<String>>,

    /// CSV delimiter character (default: ',')
    pub delimiter: u8,

    /// Input text encoding (default: UTF-8)
    pub encoding: InputEncoding,

    /// Handling of records with the wrong number of fields (default: strict)
    pub field_count: FieldCountPolicy,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            has_headers: true,
            column_names: None,
            delimiter: b',',
            encoding: InputEncoding::default(),
            field_count: FieldCountPolicy::default(),
        }
    }
}

/// Load a CSV file into a row sequence.
///
/// The file is read to completion before returning; the handle is closed on
/// every exit path.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `config` - Parsing options
///
/// # Returns
/// One [`Row`] per data record in file order, or a [`LoadError`] if the file
/// cannot be opened or parsed.
pub fn load_data(path: &Path, config: &LoadConfig) -> Result<RowSequence, LoadError> {
    info!("Processing CSV from: {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    load_rows(file, config)
}

/// Load CSV data from any reader into a row sequence.
pub fn load_rows<R: Read>(reader: R, config: &LoadConfig) -> Result<RowSequence, LoadError> {
    // Width checks are done here so the policy decides, not the CSV reader
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter)
        .flexible(true)
        .from_reader(reader);

    let mut headers = if config.has_headers {
        let raw = csv_reader.byte_headers()?.clone();
        Some(decode_headers(&raw, config.encoding)?)
    } else {
        config.column_names.clone()
    };

    if let Some(ref headers) = headers {
        debug!("CSV headers/columns: {headers:?}");
    }

    let mut layout: Option<ColumnLayout> = None;
    let mut rows = RowSequence::new();
    let mut padded = 0usize;

    for result in csv_reader.byte_records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        // Without headers or names, the first record fixes the width
        let layout = layout.get_or_insert_with(|| {
            let headers = headers.take().unwrap_or_else(|| {
                let generated: Vec<String> =
                    (0..record.len()).map(|i| format!("column_{i}")).collect();
                debug!("Generated column names: {generated:?}");
                generated
            });
            ColumnLayout::new(headers)
        });

        if record.len() != layout.width() {
            match config.field_count {
                FieldCountPolicy::Strict => {
                    return Err(LoadError::FieldCount {
                        line,
                        expected: layout.width(),
                        found: record.len(),
                    });
                }
                FieldCountPolicy::Pad => padded += 1,
            }
        }

        let mut values = vec![String::new(); layout.columns.len()];
        for (i, &slot) in layout.slots.iter().enumerate() {
            values[slot] = match record.get(i) {
                Some(bytes) => decode_field(bytes, config.encoding, line, i + 1)?,
                None => String::new(),
            };
        }

        rows.push(layout.row(values));
    }

    if padded > 0 {
        warn!("Adjusted {padded} records whose column count differed from the header");
    }

    info!("Processed {} records", rows.len());

    Ok(rows)
}

/// Header names resolved to the slots of each row.
///
/// A name that repeats keeps the slot of its first occurrence, and since
/// fields are assigned in header order the last value for it wins.
struct ColumnLayout {
    /// Distinct column names in slot order
    columns: Vec<String>,
    /// Slot for each header position
    slots: Vec<usize>,
}

impl ColumnLayout {
    fn new(headers: Vec<String>) -> Self {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(headers.len());
        let mut columns = Vec::with_capacity(headers.len());
        let mut slots = Vec::with_capacity(headers.len());

        for name in headers {
            let slot = match index.get(&name) {
                Some(&slot) => slot,
                None => {
                    let slot = columns.len();
                    index.insert(name.clone(), slot);
                    columns.push(name);
                    slot
                }
            };
            slots.push(slot);
        }

        if columns.len() < slots.len() {
            debug!(
                "{} repeated header names collapsed into earlier columns",
                slots.len() - columns.len()
            );
        }

        Self { columns, slots }
    }

    /// Number of fields a record is expected to have.
    fn width(&self) -> usize {
        self.slots.len()
    }

    fn row(&self, values: Vec<String>) -> Row {
        Row::from_distinct_pairs(self.columns.iter().cloned().zip(values).collect())
    }
}

fn decode_headers(raw: &ByteRecord, encoding: InputEncoding) -> Result<Vec<String>, LoadError> {
    raw.iter()
        .enumerate()
        .map(|(i, bytes)| {
            let bytes = match (i, encoding) {
                (0, InputEncoding::Utf8) => bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes),
                _ => bytes,
            };
            decode_field(bytes, encoding, 1, i + 1)
        })
        .collect()
}

fn decode_field(
    bytes: &[u8],
    encoding: InputEncoding,
    line: u64,
    field: usize,
) -> Result<String, LoadError> {
    match encoding {
        InputEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| LoadError::Encoding { line, field }),
        InputEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}
