//! Unit tests for CLI argument parsing and validation

use clap::Parser;
use sheetdiff::cli::{Cli, Commands, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_cli_compare_command() {
    let cli = Cli::try_parse_from(["sheetdiff", "compare", "old.xlsx", "new.xlsx"]).unwrap();
    match cli.command {
        Commands::Compare {
            reference,
            comparison,
            positional,
            ignore_header_case,
            primary_key,
            config,
            format,
            output,
            quiet,
        } => {
            assert_eq!(reference, PathBuf::from("old.xlsx"));
            assert_eq!(comparison, PathBuf::from("new.xlsx"));
            assert!(!positional);
            assert!(!ignore_header_case);
            assert!(primary_key.is_none());
            assert!(config.is_none());
            assert_eq!(format, "pretty");
            assert!(output.is_none());
            assert!(!quiet);
        }
        _ => panic!("Expected Compare command"),
    }
}

#[test]
fn test_cli_compare_command_with_options() {
    let cli = Cli::try_parse_from([
        "sheetdiff",
        "compare",
        "old.xlsx",
        "new.xlsx",
        "--positional",
        "--ignore-header-case",
        "--primary-key",
        "ID",
        "--format",
        "json",
        "--output",
        "report.json",
    ])
    .unwrap();

    match cli.command {
        Commands::Compare {
            positional,
            ignore_header_case,
            primary_key,
            format,
            output,
            ..
        } => {
            assert!(positional);
            assert!(ignore_header_case);
            assert_eq!(primary_key.as_deref(), Some("ID"));
            assert_eq!(format, "json");
            assert_eq!(output, Some(PathBuf::from("report.json")));
        }
        _ => panic!("Expected Compare command"),
    }
}

#[test]
fn test_cli_inspect_command() {
    let cli = Cli::try_parse_from(["sheetdiff", "inspect", "book.xlsx", "--format", "json"]).unwrap();
    match cli.command {
        Commands::Inspect { file, format } => {
            assert_eq!(file, PathBuf::from("book.xlsx"));
            assert_eq!(format, "json");
        }
        _ => panic!("Expected Inspect command"),
    }
}

#[test]
fn test_cli_global_verbose_flag() {
    let cli = Cli::try_parse_from(["sheetdiff", "compare", "a.xlsx", "b.xlsx", "--verbose"]).unwrap();
    assert!(cli.verbose);

    let cli = Cli::try_parse_from(["sheetdiff", "-v", "inspect", "a.xlsx"]).unwrap();
    assert!(cli.verbose);
}

#[test]
fn test_cli_compare_requires_two_files() {
    assert!(Cli::try_parse_from(["sheetdiff", "compare", "only.xlsx"]).is_err());
    assert!(Cli::try_parse_from(["sheetdiff", "compare"]).is_err());
}

#[test]
fn test_cli_unknown_command() {
    assert!(Cli::try_parse_from(["sheetdiff", "merge", "a.xlsx"]).is_err());
}

#[test]
fn test_output_format_parsing() {
    assert_eq!(OutputFormat::parse("pretty").unwrap(), OutputFormat::Pretty);
    assert_eq!(OutputFormat::parse("Json").unwrap(), OutputFormat::Json);

    let err = OutputFormat::parse("csv").unwrap_err();
    assert!(err.contains("csv"));
}
