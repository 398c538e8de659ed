//! Command-line interface for sheetdiff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetdiff")]
#[command(about = "Compare two spreadsheet workbooks: sheets, columns, rows and cells")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare a reference workbook with a comparison workbook
    Compare {
        /// Reference (baseline) workbook
        reference: PathBuf,

        /// Comparison (candidate) workbook
        comparison: PathBuf,

        /// Pair sheets by position instead of by name
        #[arg(long)]
        positional: bool,

        /// Match column headers case-insensitively
        #[arg(long)]
        ignore_header_case: bool,

        /// Column whose values identify rows across both files
        #[arg(long)]
        primary_key: Option<String>,

        /// JSON file with comparison settings (flags take precedence)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Also write the JSON report to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Quiet output (machine-readable)
        #[arg(long)]
        quiet: bool,
    },

    /// Show the sheets, headers and row counts of a workbook
    Inspect {
        /// Workbook file
        file: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

/// Logger at Info, or Debug with `--verbose`, then refined by `RUST_LOG`-style filters
pub fn logger_builder(verbose: bool, env_filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }
    builder
}

/// Parse output format string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}
