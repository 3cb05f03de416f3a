//! Merge command handler

use super::{collect_report_paths, load_process_cov};
use crate::commands::MergeArgs;
use crate::error::{CliError, CliResult};
use console::style;
use fusionar::{merge_processes, ProcessCov};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Execute the merge command
///
/// # Errors
///
/// Fails when inputs cannot be read or the output cannot be written.
pub fn execute_merge(args: &MergeArgs, quiet: bool) -> CliResult<()> {
    let paths = collect_report_paths(&args.inputs)?;

    let progress = if quiet || paths.len() < 2 {
        None
    } else {
        let bar = ProgressBar::new(paths.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar.set_message("loading reports");
        Some(bar)
    };

    let mut reports: Vec<ProcessCov> = Vec::with_capacity(paths.len());
    for path in &paths {
        reports.push(load_process_cov(path)?);
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let report_count = reports.len();
    let merged = merge_processes(reports);

    let json = if args.pretty {
        serde_json::to_string_pretty(&merged)?
    } else {
        serde_json::to_string(&merged)?
    };

    match args.output.as_deref() {
        Some(output) if !is_stdout_path(output) => {
            std::fs::write(output, json).map_err(|e| {
                CliError::output(format!("failed to write {}: {e}", output.display()))
            })?;
            if !quiet {
                println!(
                    "{} Merged {report_count} reports ({} scripts) into {}",
                    style("✓").green(),
                    merged.script_count(),
                    output.display()
                );
            }
        }
        _ => println!("{json}"),
    }

    Ok(())
}

/// Check whether an output path selects stdout (the `-` sentinel).
fn is_stdout_path(path: &Path) -> bool {
    path.as_os_str() == "-"
}
