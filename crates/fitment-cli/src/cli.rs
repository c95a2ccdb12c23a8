//! CLI argument definitions for the `fitment` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fitment",
    version,
    about = "Expand and validate automotive part applications",
    long_about = "Expand free-form part application strings such as\n\
                  \"2005-2010 Honda Accord (Front Left)\" into individual fitments\n\
                  and validate each one against a vehicle and position catalog."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Expand and validate a single application string.
    Process(ProcessArgs),

    /// Expand and validate every application in a file (one per line).
    Batch(BatchArgs),

    /// List the model mapping patterns the engine would use.
    Mappings(CatalogArgs),
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Catalog directory containing catalog.toml.
    #[arg(long = "catalog", value_name = "DIR")]
    pub catalog: PathBuf,

    /// Model mapping JSON file (overrides the catalog's model_mappings file).
    #[arg(long = "mappings", value_name = "FILE")]
    pub mappings: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Application text, e.g. "2005-2010 Honda Accord (Front Left)".
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Part terminology id the positions are validated against.
    #[arg(long = "terminology", value_name = "ID")]
    pub terminology: u32,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct BatchArgs {
    /// File with one application per line; blank lines and `#` comments are skipped.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[arg(long = "terminology", value_name = "ID")]
    pub terminology: u32,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Save non-error fitments under this product id (requires --output).
    #[arg(long = "product", value_name = "ID", requires = "output")]
    pub product: Option<String>,

    /// Directory where saved fitments are written.
    #[arg(long = "output", value_name = "DIR", requires = "product")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
