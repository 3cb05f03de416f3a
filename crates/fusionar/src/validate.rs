//! Optional validation pre-pass.
//!
//! The merge driver assumes well-formed inputs and never validates. Callers
//! receiving coverage from untrusted producers can run these checks up
//! front and get a precise rejection instead of undefined merge output.

use crate::coverage::{FunctionCov, ProcessCov, RangeCov, ScriptCov};
use thiserror::Error;

/// Errors reported by the validation pre-pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoverageError {
    /// A function has no ranges at all
    #[error("function {function_name:?} has no root range")]
    MissingRootRange {
        /// Name of the offending function
        function_name: String,
    },

    /// A range is empty or inverted
    #[error("range [{start_offset}, {end_offset}) in function {function_name:?} is empty or inverted")]
    InvalidRange {
        /// Name of the offending function
        function_name: String,
        /// Start offset of the offending range
        start_offset: u32,
        /// End offset of the offending range
        end_offset: u32,
    },

    /// Ranges are not in pre-order (start ascending, end descending)
    #[error("ranges of function {function_name:?} are not sorted at index {index}")]
    UnsortedRanges {
        /// Name of the offending function
        function_name: String,
        /// Index of the first out-of-order range
        index: usize,
    },

    /// A range falls outside the function's root range
    #[error("range [{start_offset}, {end_offset}) escapes the root range of function {function_name:?}")]
    RangeOutsideRoot {
        /// Name of the offending function
        function_name: String,
        /// Start offset of the offending range
        start_offset: u32,
        /// End offset of the offending range
        end_offset: u32,
    },

    /// A range partially overlaps an enclosing range
    #[error("range [{start_offset}, {end_offset}) in function {function_name:?} partially overlaps an enclosing range")]
    PartialOverlap {
        /// Name of the offending function
        function_name: String,
        /// Start offset of the offending range
        start_offset: u32,
        /// End offset of the offending range
        end_offset: u32,
    },
}

/// Validate a whole process report.
///
/// # Errors
///
/// Returns the first [`CoverageError`] found in any script.
pub fn validate_process_cov(process_cov: &ProcessCov) -> Result<(), CoverageError> {
    for script_cov in &process_cov.result {
        validate_script_cov(script_cov)?;
    }
    Ok(())
}

/// Validate a single script report.
///
/// # Errors
///
/// Returns the first [`CoverageError`] found in any function.
pub fn validate_script_cov(script_cov: &ScriptCov) -> Result<(), CoverageError> {
    for func_cov in &script_cov.functions {
        validate_function_cov(func_cov)?;
    }
    Ok(())
}

/// Validate a single function report: non-empty ranges, each range
/// non-empty, pre-order sorting, and proper nesting under the root.
///
/// # Errors
///
/// Returns the first [`CoverageError`] found.
pub fn validate_function_cov(func_cov: &FunctionCov) -> Result<(), CoverageError> {
    let name = &func_cov.function_name;
    let root = match func_cov.ranges.first() {
        Some(root) => root,
        None => {
            return Err(CoverageError::MissingRootRange {
                function_name: name.clone(),
            });
        }
    };

    for (index, range) in func_cov.ranges.iter().enumerate() {
        if range.start_offset >= range.end_offset {
            return Err(invalid_range(name, range));
        }
        if index > 0 && !pre_order(&func_cov.ranges[index - 1], range) {
            return Err(CoverageError::UnsortedRanges {
                function_name: name.clone(),
                index,
            });
        }
    }

    // Walk the implied tree: a stack of open end offsets.
    let mut open_ends: Vec<u32> = vec![root.end_offset];
    for range in func_cov.ranges.iter().skip(1) {
        while matches!(open_ends.last(), Some(&end) if range.start_offset >= end) {
            open_ends.pop();
        }
        let enclosing_end = match open_ends.last() {
            Some(&end) => end,
            None => {
                return Err(CoverageError::RangeOutsideRoot {
                    function_name: name.clone(),
                    start_offset: range.start_offset,
                    end_offset: range.end_offset,
                });
            }
        };
        if range.end_offset > enclosing_end {
            return Err(CoverageError::PartialOverlap {
                function_name: name.clone(),
                start_offset: range.start_offset,
                end_offset: range.end_offset,
            });
        }
        open_ends.push(range.end_offset);
    }

    Ok(())
}

fn invalid_range(name: &str, range: &RangeCov) -> CoverageError {
    CoverageError::InvalidRange {
        function_name: name.to_string(),
        start_offset: range.start_offset,
        end_offset: range.end_offset,
    }
}

fn pre_order(previous: &RangeCov, current: &RangeCov) -> bool {
    previous.start_offset < current.start_offset
        || (previous.start_offset == current.start_offset
            && previous.end_offset > current.end_offset)
}
