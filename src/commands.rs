//! Command implementations for sheetdiff CLI

use crate::cli::{Commands, OutputFormat};
use crate::compare::compare;
use crate::config::ComparisonConfig;
use crate::error::{Result, SheetdiffError, WorkbookSide};
use crate::loader::load_workbook;
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::progress::ProgressReporter;
use crate::workbook::Workbook;
use std::path::Path;

/// Execute a command
pub fn execute_command(command: Commands) -> Result<()> {
    match command {
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
            let settings = resolve_config(
                config.as_deref(),
                positional,
                ignore_header_case,
                primary_key,
            )?;
            compare_command(&reference, &comparison, &settings, &format, output.as_deref(), quiet)
        }
        Commands::Inspect { file, format } => inspect_command(&file, &format),
    }
}

/// Merge settings from an optional config file with command-line flags
pub fn resolve_config(
    config_path: Option<&Path>,
    positional: bool,
    ignore_header_case: bool,
    primary_key: Option<String>,
) -> Result<ComparisonConfig> {
    let mut config = match config_path {
        Some(path) => ComparisonConfig::from_file(path)?,
        None => ComparisonConfig::default(),
    };

    if positional {
        config.compare_positionally = true;
    }
    if ignore_header_case {
        config.case_insensitive_headers = true;
    }
    if primary_key.is_some() {
        config.primary_key_column = primary_key;
    }

    log::debug!("Comparison settings: {:?}", config);
    Ok(config)
}

/// Compare two workbook files
fn compare_command(
    reference_path: &Path,
    comparison_path: &Path,
    config: &ComparisonConfig,
    format: &str,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let format = OutputFormat::parse(format).map_err(SheetdiffError::invalid_input)?;

    let mut progress = if format == OutputFormat::Pretty && !quiet {
        ProgressReporter::new_for_compare()
    } else {
        ProgressReporter::new_minimal()
    };

    // Both files must load before any comparison starts
    progress.update_load(&format!("Loading {}...", reference_path.display()));
    let reference = load_side(reference_path, WorkbookSide::Reference)?;
    progress.update_load(&format!("Loading {}...", comparison_path.display()));
    let comparison = load_side(comparison_path, WorkbookSide::Comparison)?;
    progress.finish_load("Workbooks loaded");

    let report = compare(&reference, &comparison, config)?;
    progress.finish_compare("Comparison complete");
    drop(progress);

    if let Some(output_path) = output {
        std::fs::write(output_path, JsonFormatter::format(&report)?)?;
        log::info!("Wrote report to {}", output_path.display());
    }

    if quiet {
        PrettyPrinter::print_quiet(&report);
        return Ok(());
    }

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_report(
            &report,
            &reference_path.display().to_string(),
            &comparison_path.display().to_string(),
        ),
        OutputFormat::Json => println!("{}", JsonFormatter::format(&report)?),
    }

    Ok(())
}

/// Show sheets and headers of one workbook
fn inspect_command(path: &Path, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format).map_err(SheetdiffError::invalid_input)?;
    let workbook = load_side(path, WorkbookSide::Reference)?;

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_workbook_overview(&workbook, &path.display().to_string()),
        OutputFormat::Json => println!("{}", JsonFormatter::format_workbook_overview(&workbook)?),
    }

    Ok(())
}

fn load_side(path: &Path, side: WorkbookSide) -> Result<Workbook> {
    load_workbook(path).map_err(|e| SheetdiffError::load_failure(side, e))
}
