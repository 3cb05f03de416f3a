//! Fusionar: Merge V8 Coverage Reports
//!
//! Fusionar (Spanish: "to merge/fuse") combines any number of V8 precise
//! coverage reports for the same scripts into a single normalized report.
//! Coverage is a forest of half-open byte ranges with execution counts; the
//! merged report's count at every byte offset is the sum of the inputs'
//! counts at that offset.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    FUSIONAR Architecture                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ProcessCov ──► group by url ──► group by root range           │
//! │                                        │                         │
//! │                                        ▼                         │
//! │              RangeTree per input ──► sweep merge ──► normalize  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The merge runs in time proportional to the number of range boundaries,
//! never to script length: input trees are split on the fly where their
//! structure disagrees and recombined slot by slot in one left-to-right
//! sweep.
//!
//! # Usage
//!
//! ```
//! use fusionar::{merge_processes, ProcessCov};
//!
//! let reports: Vec<ProcessCov> = vec![/* one per process */];
//! let merged = merge_processes(reports);
//! assert!(merged.result.is_empty());
//! ```
//!
//! Inputs are consumed by the merge; outputs own their memory. All
//! operations are synchronous and single-threaded.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod coverage;
mod merge;
mod normalize;
mod range_tree;
mod validate;

pub use coverage::{FunctionCov, ProcessCov, RangeCov, ScriptCov};
pub use merge::{merge_functions, merge_processes, merge_scripts};
pub use normalize::{
    deep_normalize_process_cov, deep_normalize_script_cov, normalize_function_cov,
    normalize_process_cov, normalize_script_cov,
};
pub use validate::{
    validate_function_cov, validate_process_cov, validate_script_cov, CoverageError,
};
