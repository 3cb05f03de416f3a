//! Normalization of coverage values into canonical form.
//!
//! Ranges are ordered by `(start_offset ascending, end_offset descending)`,
//! functions by their root range, scripts by `url`. The deep variants also
//! rebuild each function's range tree so that even untouched reports come
//! out in the canonical minimal shape.

use crate::coverage::{FunctionCov, ProcessCov, RangeCov, ScriptCov};
use crate::range_tree::RangeTree;
use std::cmp::Ordering;

/// Sort scripts by `url` and reassign `script_id` sequentially.
///
/// Reassigning ids is what keeps [`crate::merge_processes`] deterministic
/// under permutation of its inputs.
pub fn normalize_process_cov(process_cov: &mut ProcessCov) {
    process_cov.result.sort_by(|a, b| a.url.cmp(&b.url));
    for (index, script_cov) in process_cov.result.iter_mut().enumerate() {
        script_cov.script_id = index.to_string();
    }
}

/// Normalize every script in place, then the report itself.
pub fn deep_normalize_process_cov(process_cov: &mut ProcessCov) {
    for script_cov in &mut process_cov.result {
        deep_normalize_script_cov(script_cov);
    }
    normalize_process_cov(process_cov);
}

/// Sort a script's functions by their root range.
pub fn normalize_script_cov(script_cov: &mut ScriptCov) {
    script_cov.functions.sort_by(compare_function_covs);
}

/// Normalize every function in place, then the script itself.
pub fn deep_normalize_script_cov(script_cov: &mut ScriptCov) {
    for func_cov in &mut script_cov.functions {
        normalize_function_cov(func_cov);
    }
    normalize_script_cov(script_cov);
}

/// Sort a function's ranges and rewrite them through a normalized range
/// tree, collapsing redundant structure.
pub fn normalize_function_cov(func_cov: &mut FunctionCov) {
    func_cov.ranges.sort_by(compare_range_covs);
    if let Some(mut tree) = RangeTree::from_sorted_ranges(&func_cov.ranges) {
        tree.normalize();
        func_cov.ranges = tree.to_ranges();
    }
}

/// Pre-order total order on ranges: `start` ascending, then `end`
/// descending so that enclosing ranges come first.
fn compare_range_covs(a: &RangeCov, b: &RangeCov) -> Ordering {
    a.start_offset
        .cmp(&b.start_offset)
        .then_with(|| b.end_offset.cmp(&a.end_offset))
}

fn compare_function_covs(a: &FunctionCov, b: &FunctionCov) -> Ordering {
    match (a.root(), b.root()) {
        (Some(a_root), Some(b_root)) => compare_range_covs(a_root, b_root),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
