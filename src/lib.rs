//! csv-to-json Library
//!
//! Converts a CSV file into a JSON file holding one array of objects, one
//! object per CSV row, keyed by the header's column names. Cell values are
//! kept as text, so every JSON value is a string.
//!
//! # Pipeline
//!
//! - Loader ([`csv::load_data`]): reads the whole CSV into a [`RowSequence`]
//! - Writer ([`json::create_json`]): serializes the rows and writes the file
//! - [`run`]: wires the two together with paths resolved against
//!   [`Config::base_dir`], printing the same diagnostics whatever the outcome
//!
//! # CLI Usage
//!
//! ```bash
//! # Convert data/all_rounds_merged.csv into http/data/data.json
//! csv-to-json
//!
//! # Same conversion rooted at another directory
//! csv-to-json --base-dir /srv/survey
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

// Re-export the loader and writer crates for convenience
pub use csv_to_json_csv_source as csv;
pub use json_sink as json;

pub use row_core::{Row, RowSequence};

use crate::csv::{LoadConfig, LoadError};
use crate::json::{StoreError, StoreOutcome, WriteConfig};

/// Default CSV input, relative to the base directory.
pub const DEFAULT_INPUT: &str = "data/all_rounds_merged.csv";

/// Default JSON output, relative to the base directory.
pub const DEFAULT_OUTPUT: &str = "http/data/data.json";

/// The repository root, used as the base directory unless overridden.
///
/// This is the package directory recorded when the crate was compiled, so it
/// only points at the data files while the binary runs from its own checkout.
pub fn default_base_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory that `input` and `output` are resolved against
    pub base_dir: PathBuf,

    /// CSV file to read
    pub input: PathBuf,

    /// JSON file to write
    pub output: PathBuf,

    /// CSV parsing options
    pub load: LoadConfig,

    /// JSON output options
    pub write: WriteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            load: LoadConfig::default(),
            write: WriteConfig::default(),
        }
    }
}

impl Config {
    /// Resolve a path against the base directory.
    ///
    /// An absolute path is returned unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}

/// How a conversion run ended.
#[derive(Debug)]
pub enum Outcome {
    /// The writer ran on the loaded rows.
    Stored(StoreOutcome),
    /// The CSV could not be loaded, so nothing was written.
    LoadFailed(LoadError),
    /// The CSV was loaded but the JSON file could not be stored.
    StoreFailed(StoreError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Stored(StoreOutcome::Written { .. }))
    }
}

/// Run the conversion, printing diagnostics to stdout.
///
/// Load and store failures are reported and returned as an [`Outcome`], never
/// as an `Err`; the only error is failing to print the diagnostics.
pub fn run(config: &Config) -> std::io::Result<Outcome> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(config, &mut out)
}

/// Run the conversion, printing diagnostics to `out`.
pub fn run_with_output<W: Write>(config: &Config, out: &mut W) -> std::io::Result<Outcome> {
    let input = config.resolve(&config.input);
    let output = config.resolve(&config.output);

    let loaded = csv::load_data(&input, &config.load);
    if let Err(e) = &loaded {
        tracing::warn!("Failed to load {}: {e}", input.display());
        writeln!(out, "Could not load CSV.")?;
        writeln!(out, "{e}")?;
    }

    let stored = json::create_json(loaded.as_deref().ok(), &output, &config.write);

    match (loaded, stored) {
        (Err(e), _) => Ok(Outcome::LoadFailed(e)),
        (Ok(_), Ok(stored)) => {
            if let StoreOutcome::Written { .. } = stored {
                writeln!(out, "JSON file stored successfully.")?;
                writeln!(out, "JSON PATH: {}", config.output.display())?;
            }
            Ok(Outcome::Stored(stored))
        }
        (Ok(_), Err(e)) => {
            tracing::warn!("Failed to store {}: {e}", output.display());
            writeln!(out, "Could not store JSON file.")?;
            writeln!(out, "{e}")?;
            Ok(Outcome::StoreFailed(e))
        }
    }
}
