//! Validate command handler

use super::{collect_report_paths, load_process_cov};
use crate::commands::ValidateArgs;
use crate::error::{CliError, CliResult};
use console::style;
use fusionar::validate_process_cov;

/// Execute the validate command
///
/// # Errors
///
/// Fails when inputs cannot be collected, or with
/// [`CliError::ValidationFailed`] when any report is malformed.
pub fn execute_validate(args: &ValidateArgs, quiet: bool) -> CliResult<()> {
    let paths = collect_report_paths(&args.inputs)?;
    let total = paths.len();
    let mut failed = 0usize;

    for path in &paths {
        let problem = match load_process_cov(path) {
            Ok(process) => validate_process_cov(&process)
                .err()
                .map(|e| e.to_string()),
            Err(e) => Some(e.to_string()),
        };
        match problem {
            None => {
                if !quiet {
                    println!("{} {}", style("✓").green(), path.display());
                }
            }
            Some(message) => {
                failed += 1;
                eprintln!("{} {}: {message}", style("✗").red(), path.display());
            }
        }
    }

    if failed > 0 {
        return Err(CliError::ValidationFailed { failed, total });
    }
    if !quiet {
        println!("{} {total} reports OK", style("✓").green());
    }
    Ok(())
}
