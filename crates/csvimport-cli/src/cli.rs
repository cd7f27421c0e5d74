//! CLI argument definitions for the CSV import engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "csvimport",
    version,
    about = "Headless CSV import engine - parse, map, validate, and import",
    long_about = "Parse CSV text, map its headers onto a declared schema, validate the \
                  mapped rows against locale-aware rules, and assemble an import result.\n\n\
                  Each subcommand is a thin adapter over one engine operation, so results \
                  are identical to calling the engine crates directly."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Tokenize a CSV file and print its parsed matrix.
    Parse(ParseArgs),

    /// Map a CSV file's headers onto a schema's columns.
    Map(MapArgs),

    /// Validate a CSV file's rows against a schema.
    Validate(ValidateArgs),

    /// Run the full parse -> map -> apply -> validate pipeline.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct CsvSourceArgs {
    /// Path to the CSV file to read.
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Field delimiter.
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Quote character.
    #[arg(long, default_value = "\"")]
    pub quote: char,

    /// The first row is a header row.
    #[arg(long, default_value_t = true)]
    pub header: bool,

    /// Drop blank lines before width normalization.
    #[arg(long = "skip-empty-lines", default_value_t = false)]
    pub skip_empty_lines: bool,
}

#[derive(Parser)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: CsvSourceArgs,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Path to a JSON schema file (see the `map`/`validate` docs for the shape).
    #[arg(long = "schema", value_name = "SCHEMA_FILE")]
    pub schema_file: PathBuf,
}

#[derive(Parser)]
pub struct MapArgs {
    #[command(flatten)]
    pub source: CsvSourceArgs,

    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Minimum similarity score accepted for a fuzzy header match.
    #[arg(long = "fuzzy-threshold", default_value_t = csvimport_map::DEFAULT_FUZZY_THRESHOLD)]
    pub fuzzy_threshold: f64,
}

#[derive(Parser)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: CsvSourceArgs,

    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Minimum similarity score accepted for a fuzzy header match.
    #[arg(long = "fuzzy-threshold", default_value_t = csvimport_map::DEFAULT_FUZZY_THRESHOLD)]
    pub fuzzy_threshold: f64,
}

#[derive(Parser)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: CsvSourceArgs,

    #[command(flatten)]
    pub schema: SchemaArgs,

    #[arg(long = "fuzzy-threshold", default_value_t = csvimport_map::DEFAULT_FUZZY_THRESHOLD)]
    pub fuzzy_threshold: f64,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
