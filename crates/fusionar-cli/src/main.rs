//! Fusionador CLI: merge V8 coverage reports
//!
//! ## Usage
//!
//! ```bash
//! fusionador merge coverage/ --output merged.json   # Merge a directory
//! fusionador merge a.json b.json --pretty           # Merge files to stdout
//! fusionador validate coverage/                     # Check reports
//! ```

use clap::Parser;
use fusionador::{execute_merge, execute_validate, Cli, CliResult, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Merge(args) => execute_merge(args, cli.quiet),
        Commands::Validate(args) => execute_validate(args, cli.quiet),
    }
}
