//! Fusionador: command-line front-end for fusionar
//!
//! Walks directories of per-process V8 coverage JSON files (the
//! `NODE_V8_COVERAGE` layout), merges them with
//! [`fusionar::merge_processes`], and writes the merged report.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod commands;
mod error;

/// Command handlers and input-collection helpers.
pub mod handlers;

pub use commands::{Cli, Commands, MergeArgs, ValidateArgs};
pub use error::{CliError, CliResult};
pub use handlers::{collect_report_paths, execute_merge, execute_validate, load_process_cov};
