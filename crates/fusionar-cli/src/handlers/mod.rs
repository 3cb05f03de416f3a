//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod merge;
pub mod validate;

pub use merge::execute_merge;
pub use validate::execute_validate;

use crate::error::{CliError, CliResult};
use fusionar::ProcessCov;
use std::path::{Path, PathBuf};

/// Expand files and directories into a sorted list of JSON report paths.
///
/// Directories are scanned one level deep for `*.json` entries, matching the
/// flat layout V8 writes under `NODE_V8_COVERAGE`.
///
/// # Errors
///
/// Fails when an input does not exist or a directory holds no JSON reports.
pub fn collect_report_paths(inputs: &[PathBuf]) -> CliResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries = Vec::new();
            for entry in std::fs::read_dir(input)? {
                let path = entry?.path();
                if is_json_file(&path) {
                    entries.push(path);
                }
            }
            entries.sort();
            if entries.is_empty() {
                return Err(CliError::input(format!(
                    "no JSON reports found in {}",
                    input.display()
                )));
            }
            paths.append(&mut entries);
        } else if input.is_file() {
            paths.push(input.clone());
        } else {
            return Err(CliError::input(format!(
                "{} is neither a file nor a directory",
                input.display()
            )));
        }
    }
    Ok(paths)
}

fn is_json_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read and deserialize one process coverage report.
///
/// # Errors
///
/// Fails with the path in the message when the file cannot be read or does
/// not hold a V8 coverage payload.
pub fn load_process_cov(path: &Path) -> CliResult<ProcessCov> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::input(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::input(format!("invalid coverage JSON in {}: {e}", path.display())))
}
