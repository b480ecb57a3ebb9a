//! Command-line interface for csv-to-json
//!
//! # Usage Examples
//!
//! ```bash
//! # Convert data/all_rounds_merged.csv into http/data/data.json under the repository root
//! csv-to-json
//!
//! # Convert another file, relative to another directory
//! csv-to-json --base-dir /srv/survey --input raw/round1.csv --output out/round1.json
//!
//! # Semicolon-separated legacy export with irregular rows
//! csv-to-json --delimiter ';' --input-encoding latin1 --field-count pad
//! ```
//!
//! Load and store failures are printed and the process still exits with
//! status zero; only invalid arguments produce a non-zero exit.

use anyhow::ensure;
use clap::{Parser, ValueEnum};
use csv_to_json::csv::{FieldCountPolicy, InputEncoding, LoadConfig};
use csv_to_json::json::{JsonStyle, OutputEncoding, WriteConfig};
use csv_to_json::{Config, DEFAULT_INPUT, DEFAULT_OUTPUT};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csv-to-json")]
#[command(about = "Convert a CSV file into a JSON array of objects")]
#[command(long_about = None)]
struct Cli {
    /// Directory that input and output paths are resolved against. Defaults to the
    /// source checkout this binary was built from (recorded at build time), so an
    /// installed or relocated binary needs --base-dir or CSV_TO_JSON_BASE_DIR
    #[arg(long, env = "CSV_TO_JSON_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// CSV file to read
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// JSON file to write
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// CSV delimiter character
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Treat the first line as data instead of a header
    #[arg(long)]
    no_headers: bool,

    /// Column names to use with --no-headers (comma-separated)
    #[arg(long, value_delimiter = ',', requires = "no_headers")]
    column_names: Option<Vec<String>>,

    /// Text encoding of the CSV input. Files that are not valid UTF-8 fail to load
    /// under the default; latin1 reads any byte sequence, as the legacy converter did
    #[arg(long, value_enum, default_value_t = InputEncodingArg::Utf8)]
    input_encoding: InputEncodingArg,

    /// Handling of rows whose column count differs from the header
    #[arg(long, value_enum, default_value_t = FieldCountArg::Strict)]
    field_count: FieldCountArg,

    /// Text encoding of the JSON output
    #[arg(long, value_enum, default_value_t = OutputEncodingArg::Ascii)]
    output_encoding: OutputEncodingArg,

    /// Whitespace layout of the JSON output
    #[arg(long, value_enum, default_value_t = StyleArg::Spaced)]
    style: StyleArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputEncodingArg {
    /// Reject bytes that are not valid UTF-8
    Utf8,
    /// One character per byte (ISO-8859-1)
    Latin1,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldCountArg {
    /// Fail on rows with the wrong number of fields
    Strict,
    /// Pad short rows with empty values and drop extra fields
    Pad,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputEncodingArg {
    /// Escape non-ASCII characters
    Ascii,
    Utf8,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Spaced,
    Compact,
    Pretty,
}

impl From<InputEncodingArg> for InputEncoding {
    fn from(arg: InputEncodingArg) -> Self {
        match arg {
            InputEncodingArg::Utf8 => InputEncoding::Utf8,
            InputEncodingArg::Latin1 => InputEncoding::Latin1,
        }
    }
}

impl From<FieldCountArg> for FieldCountPolicy {
    fn from(arg: FieldCountArg) -> Self {
        match arg {
            FieldCountArg::Strict => FieldCountPolicy::Strict,
            FieldCountArg::Pad => FieldCountPolicy::Pad,
        }
    }
}

impl From<OutputEncodingArg> for OutputEncoding {
    fn from(arg: OutputEncodingArg) -> Self {
        match arg {
            OutputEncodingArg::Ascii => OutputEncoding::Ascii,
            OutputEncodingArg::Utf8 => OutputEncoding::Utf8,
        }
    }
}

impl From<StyleArg> for JsonStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Spaced => JsonStyle::Spaced,
            StyleArg::Compact => JsonStyle::Compact,
            StyleArg::Pretty => JsonStyle::Pretty,
        }
    }
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        ensure!(
            self.delimiter.is_ascii(),
            "Delimiter must be a single ASCII character, got '{}'",
            self.delimiter
        );

        let defaults = Config::default();
        Ok(Config {
            base_dir: self.base_dir.unwrap_or(defaults.base_dir),
            input: self.input,
            output: self.output,
            load: LoadConfig {
                has_headers: !self.no_headers,
                column_names: self.column_names,
                delimiter: self.delimiter as u8,
                encoding: self.input_encoding.into(),
                field_count: self.field_count.into(),
            },
            write: WriteConfig {
                encoding: self.output_encoding.into(),
                style: self.style.into(),
            },
        })
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the conversion messages
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config()?;

    tracing::info!("Starting CSV to JSON conversion");
    tracing::info!("Base directory: {}", config.base_dir.display());

    let outcome = csv_to_json::run(&config)?;
    tracing::debug!("Conversion outcome: {outcome:?}");

    Ok(())
}
