//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fusionador: merge V8 coverage reports from the command line
#[derive(Parser, Debug)]
#[command(name = "fusionador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge coverage reports into a single normalized report
    Merge(MergeArgs),

    /// Check coverage reports for structural problems
    Validate(ValidateArgs),
}

/// Arguments for the merge command
#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Input JSON files, or directories of per-process JSON files
    /// (for example a NODE_V8_COVERAGE directory)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file (stdout when omitted or `-`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the merged JSON
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Input JSON files, or directories of per-process JSON files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}
