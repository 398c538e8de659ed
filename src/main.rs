//! Main entry point for sheetdiff CLI

use clap::Parser;
use sheetdiff::cli::{logger_builder, Cli};
use sheetdiff::commands::execute_command;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let env_filters = std::env::var("RUST_LOG").ok();
    logger_builder(cli.verbose, env_filters.as_deref()).init();

    // Execute the command
    if let Err(e) = execute_command(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
