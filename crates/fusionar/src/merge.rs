//! Merging of coverage reports.
//!
//! Three layered entry points: [`merge_processes`] groups scripts by URL,
//! [`merge_scripts`] groups functions by root range, and [`merge_functions`]
//! merges the range trees of functions sharing a root. The tree merge is a
//! left-to-right sweep over the children of all inputs: an output slot stays
//! open while input children keep arriving inside it, children reaching past
//! the slot are split at its end, and the right fragments are re-queued at
//! the split offset. Closing a slot merges the per-input contributions
//! recursively.
//!
//! Inputs are consumed: the merger splits trees in place and reuses the
//! input vectors. Outputs own their memory exclusively.

#[cfg(test)]
use crate::coverage::RangeCov;
use crate::coverage::{FunctionCov, ProcessCov, ScriptCov};
use crate::normalize::{
    deep_normalize_script_cov, normalize_function_cov, normalize_process_cov, normalize_script_cov,
};
use crate::range_tree::RangeTree;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, VecDeque};

/// Merge process reports into a single normalized report.
///
/// Scripts are bucketed by `url` across all inputs and each bucket is merged
/// with [`merge_scripts`]. An empty input yields an empty report.
///
/// # Examples
///
/// ```
/// use fusionar::{merge_processes, FunctionCov, ProcessCov, RangeCov, ScriptCov};
///
/// let run = |count| ProcessCov {
///     result: vec![ScriptCov {
///         script_id: "1".to_string(),
///         url: "file:///demo.js".to_string(),
///         functions: vec![FunctionCov {
///             function_name: "main".to_string(),
///             ranges: vec![RangeCov { start_offset: 0, end_offset: 100, count }],
///             is_block_coverage: true,
///         }],
///     }],
/// };
/// let merged = merge_processes(vec![run(1), run(2)]);
/// assert_eq!(merged.result[0].functions[0].ranges[0].count, 3);
/// ```
#[must_use]
pub fn merge_processes(processes: Vec<ProcessCov>) -> ProcessCov {
    let mut url_to_scripts: BTreeMap<String, Vec<ScriptCov>> = BTreeMap::new();
    for process in processes {
        for script in process.result {
            url_to_scripts
                .entry(script.url.clone())
                .or_default()
                .push(script);
        }
    }

    let mut result = Vec::with_capacity(url_to_scripts.len());
    for (_, scripts) in url_to_scripts {
        if let Some(merged) = merge_scripts(scripts) {
            result.push(merged);
        }
    }

    let mut merged = ProcessCov { result };
    normalize_process_cov(&mut merged);
    merged
}

/// Merge script reports that share a `url` into one normalized script.
///
/// Functions are bucketed by their root range span. Within a bucket,
/// block-level coverage wins over whole-function coverage. Returns `None`
/// on empty input; `script_id` and `url` are taken from the first input.
#[must_use]
pub fn merge_scripts(mut scripts: Vec<ScriptCov>) -> Option<ScriptCov> {
    if scripts.len() <= 1 {
        let mut script = scripts.pop()?;
        deep_normalize_script_cov(&mut script);
        return Some(script);
    }

    let script_id = scripts[0].script_id.clone();
    let url = scripts[0].url.clone();

    let mut range_to_funcs: BTreeMap<(u32, u32), FunctionBucket> = BTreeMap::new();
    for script in scripts {
        for func in script.functions {
            let root_range = match func.root() {
                Some(root) => (root.start_offset, root.end_offset),
                None => continue,
            };
            match range_to_funcs.entry(root_range) {
                Entry::Vacant(vacant) => {
                    vacant.insert(FunctionBucket::new(func));
                }
                Entry::Occupied(mut occupied) => occupied.get_mut().insert(func),
            }
        }
    }

    let mut functions = Vec::with_capacity(range_to_funcs.len());
    for (_, bucket) in range_to_funcs {
        if let Some(merged) = merge_functions(bucket.functions) {
            functions.push(merged);
        }
    }

    let mut merged = ScriptCov {
        script_id,
        url,
        functions,
    };
    normalize_script_cov(&mut merged);
    Some(merged)
}

/// Merge function reports that share a root range span.
///
/// Builds one range tree per input, merges the trees, normalizes, and
/// flattens back to ranges. Returns `None` on empty input. The merged
/// report is whole-function granularity only when it reduces to a single
/// never-executed range.
#[must_use]
pub fn merge_functions(mut functions: Vec<FunctionCov>) -> Option<FunctionCov> {
    if functions.len() <= 1 {
        let mut func = functions.pop()?;
        normalize_function_cov(&mut func);
        return Some(func);
    }

    let function_name = functions[0].function_name.clone();
    let mut trees = Vec::with_capacity(functions.len());
    for func in &functions {
        if let Some(tree) = RangeTree::from_sorted_ranges(&func.ranges) {
            trees.push(tree);
        }
    }

    let mut merged_tree = merge_range_trees(trees)?;
    merged_tree.normalize();
    let ranges = merged_tree.to_ranges();
    let is_block_coverage = !(ranges.len() == 1 && ranges[0].count == 0);

    Some(FunctionCov {
        function_name,
        ranges,
        is_block_coverage,
    })
}

/// Bucket of functions sharing a root range span. Tracks whether the bucket
/// currently holds block-level entries: block-level and whole-function
/// entries never mix, block-level wins.
struct FunctionBucket {
    is_block_coverage: bool,
    functions: Vec<FunctionCov>,
}

impl FunctionBucket {
    fn new(func: FunctionCov) -> Self {
        Self {
            is_block_coverage: func.is_block_coverage,
            functions: vec![func],
        }
    }

    fn insert(&mut self, func: FunctionCov) {
        if self.is_block_coverage && !func.is_block_coverage {
            return;
        }
        if !self.is_block_coverage && func.is_block_coverage {
            self.functions.clear();
            self.is_block_coverage = true;
        }
        self.functions.push(func);
    }
}

/// Merge trees covering the same span: deltas add, children go through the
/// sweep.
fn merge_range_trees(mut trees: Vec<RangeTree>) -> Option<RangeTree> {
    if trees.len() <= 1 {
        return trees.pop();
    }
    let start = trees[0].start;
    let end = trees[0].end;
    let delta = trees.iter().map(|tree| tree.delta).sum();
    let children = merge_range_tree_children(trees);
    Some(RangeTree::new(start, end, delta, children))
}

/// A child tree tagged with the index of the input forest it came from.
struct RangeTreeWithParent {
    parent_index: usize,
    tree: RangeTree,
}

/// An event of the sweep: all tagged trees starting at `offset`.
struct StartEvent {
    offset: u32,
    trees: Vec<RangeTreeWithParent>,
}

/// Queue of start events ordered by offset, with a one-slot buffer for
/// fragments produced by mid-sweep splits. Pending fragments all start at
/// `pending_offset` (the end of the currently open slot) and are emitted at
/// that offset, spliced into a coincident scheduled event if one exists.
struct StartEventQueue {
    queue: VecDeque<StartEvent>,
    pending_offset: u32,
    pending_trees: Option<Vec<RangeTreeWithParent>>,
}

impl StartEventQueue {
    fn from_parent_trees(parent_trees: Vec<RangeTree>) -> Self {
        let mut start_to_trees: BTreeMap<u32, Vec<RangeTreeWithParent>> = BTreeMap::new();
        for (parent_index, parent_tree) in parent_trees.into_iter().enumerate() {
            for child in parent_tree.children {
                start_to_trees
                    .entry(child.start)
                    .or_default()
                    .push(RangeTreeWithParent {
                        parent_index,
                        tree: child,
                    });
            }
        }
        let queue = start_to_trees
            .into_iter()
            .map(|(offset, trees)| StartEvent { offset, trees })
            .collect();
        Self {
            queue,
            pending_offset: 0,
            pending_trees: None,
        }
    }

    fn set_pending_offset(&mut self, offset: u32) {
        self.pending_offset = offset;
    }

    fn push_pending_tree(&mut self, tree: RangeTreeWithParent) {
        self.pending_trees.get_or_insert_with(Vec::new).push(tree);
    }

    fn next(&mut self) -> Option<StartEvent> {
        let pending_trees = match self.pending_trees.take() {
            None => return self.queue.pop_front(),
            Some(pending_trees) => pending_trees,
        };
        let next_offset = match self.queue.front() {
            None => {
                return Some(StartEvent {
                    offset: self.pending_offset,
                    trees: pending_trees,
                });
            }
            Some(event) => event.offset,
        };
        if self.pending_offset < next_offset {
            return Some(StartEvent {
                offset: self.pending_offset,
                trees: pending_trees,
            });
        }
        let mut event = self.queue.pop_front()?;
        if self.pending_offset == next_offset {
            event.trees.extend(pending_trees);
        } else {
            self.pending_trees = Some(pending_trees);
        }
        Some(event)
    }
}

/// Sweep the children of all parent trees left to right, carving them into
/// aligned sibling slots and merging each slot recursively.
fn merge_range_tree_children(parent_trees: Vec<RangeTree>) -> Vec<RangeTree> {
    let parent_count = parent_trees.len();
    let mut queue = StartEventQueue::from_parent_trees(parent_trees);
    let mut parent_to_nested: Vec<Vec<RangeTree>> = Vec::new();
    parent_to_nested.resize_with(parent_count, Vec::new);
    let mut result: Vec<RangeTree> = Vec::new();
    let mut open_range: Option<(u32, u32)> = None;

    while let Some(event) = queue.next() {
        if let Some((open_start, open_end)) = open_range {
            if open_end <= event.offset {
                result.push(next_child(open_start, open_end, &mut parent_to_nested));
                open_range = None;
            }
        }

        match open_range {
            None => {
                let mut open_end = event.offset + 1;
                for tagged in event.trees {
                    open_end = open_end.max(tagged.tree.end);
                    parent_to_nested[tagged.parent_index].push(tagged.tree);
                }
                queue.set_pending_offset(open_end);
                open_range = Some((event.offset, open_end));
            }
            Some((_, open_end)) => {
                for mut tagged in event.trees {
                    if tagged.tree.end > open_end {
                        let right = tagged.tree.split(open_end);
                        queue.push_pending_tree(RangeTreeWithParent {
                            parent_index: tagged.parent_index,
                            tree: right,
                        });
                    }
                    parent_to_nested[tagged.parent_index].push(tagged.tree);
                }
            }
        }
    }

    if let Some((open_start, open_end)) = open_range {
        result.push(next_child(open_start, open_end, &mut parent_to_nested));
    }

    result
}

/// Close the open slot `[start, end)`: collect each input's contribution
/// (taken directly when it is a single tree spanning the slot exactly,
/// wrapped in a zero-delta node otherwise) and merge the contributions.
fn next_child(start: u32, end: u32, parent_to_nested: &mut [Vec<RangeTree>]) -> RangeTree {
    let mut matching_trees: Vec<RangeTree> = Vec::new();
    for nested in parent_to_nested.iter_mut() {
        if nested.is_empty() {
            continue;
        }
        let mut nested = std::mem::take(nested);
        if nested.len() == 1 && nested[0].start == start && nested[0].end == end {
            if let Some(only) = nested.pop() {
                matching_trees.push(only);
            }
        } else {
            matching_trees.push(RangeTree::new(start, end, 0, nested));
        }
    }
    merge_range_trees(matching_trees).unwrap_or_else(|| RangeTree::new(start, end, 0, Vec::new()))
}
