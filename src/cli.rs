// src/cli.rs

//! CLI argument parsing using `clap`.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

/// Command-line arguments for `plandag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "plandag",
    version,
    about = "Propagate planned dates through a project task dependency graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plan file (TOML).
    #[arg(long, value_name = "PATH", default_value = "Plan.toml")]
    pub plan: String,

    /// Apply one edit before scheduling: task id, field, value.
    ///
    /// e.g. `--edit T001 complexity Complex`. An empty value clears the field.
    #[arg(long, num_args = 3, value_names = ["ID", "FIELD", "VALUE"])]
    pub edit: Option<Vec<String>>,

    /// Date used to decide which tasks are delayed (default: today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Save the resulting plan back to the plan file.
    #[arg(long)]
    pub write: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PLANDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate, print the graph and processing order, change nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
