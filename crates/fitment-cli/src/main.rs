//! Fitment mapping CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use fitment_cli::logging::{LogConfig, LogFormat, init_logging};
use serde_json::json;
use tracing::error;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg};
use crate::commands::{run_batch, run_mappings, run_process};
use crate::summary::{print_batch, print_mappings, print_results};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let exit_code = match run(cli.command).await {
        Ok(code) => code,
        Err(error) => {
            error!(%error, "command failed");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Runs a command and returns the process exit code: 1 when any fitment
/// failed validation.
async fn run(command: Command) -> anyhow::Result<i32> {
    match command {
        Command::Process(args) => {
            let results = run_process(&args).await?;
            match args.format {
                OutputFormatArg::Table => print_results(&args.text, &results),
                OutputFormatArg::Json => println!("{}", serde_json::to_string_pretty(&results)?),
            }
            Ok(exit_code(results.iter().any(|result| result.is_error())))
        }
        Command::Batch(args) => {
            let outcome = run_batch(&args).await?;
            match args.format {
                OutputFormatArg::Table => print_batch(&outcome),
                OutputFormatArg::Json => {
                    let saved = outcome.saved.as_ref().map(|saved| {
                        json!({
                            "product_id": saved.product_id,
                            "output_dir": saved.output_dir,
                            "records": saved.records,
                        })
                    });
                    let document = json!({
                        "results": outcome.results,
                        "summary": outcome.summary,
                        "saved": saved,
                    });
                    println!("{}", serde_json::to_string_pretty(&document)?);
                }
            }
            Ok(exit_code(outcome.summary.has_errors()))
        }
        Command::Mappings(args) => {
            let table = run_mappings(&args).await?;
            print_mappings(&table);
            Ok(0)
        }
    }
}

fn exit_code(has_errors: bool) -> i32 {
    if has_errors { 1 } else { 0 }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level_filter(cli.verbosity.tracing_level_filter())
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config = config.with_format(match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    });
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
