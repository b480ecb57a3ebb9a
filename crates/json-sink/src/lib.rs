//! JSON file writer for csv-to-json.
//!
//! This crate serializes a row sequence as a single JSON array of objects,
//! one object per row, with every cell written as a JSON string.
//!
//! # Example
//!
//! ```ignore
//! use json_sink::{create_json, StoreOutcome, WriteConfig};
//!
//! let outcome = create_json(Some(&rows), Path::new("out.json"), &WriteConfig::default())?;
//! if let StoreOutcome::Written { rows, bytes, .. } = outcome {
//!     println!("Wrote {rows} rows ({bytes} bytes)");
//! }
//! ```

pub mod error;
pub mod format;
pub mod writer;

pub use error::StoreError;
pub use format::{AsciiFormatter, JsonStyle, OutputEncoding, SpacedFormatter};
pub use writer::{create_json, to_json_bytes, StoreOutcome, WriteConfig};
