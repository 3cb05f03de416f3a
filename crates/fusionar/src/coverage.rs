//! V8 coverage value types.
//!
//! These mirror the payload of the Chrome DevTools Protocol
//! `Profiler.takePreciseCoverage` response: a process report holds script
//! reports, a script report holds function reports, and a function report
//! holds half-open byte ranges with execution counts. Field names
//! round-trip through JSON in the protocol's camelCase spelling.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start_offset, end_offset)` with an execution count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeCov {
    /// Start offset (byte position, inclusive)
    pub start_offset: u32,
    /// End offset (byte position, exclusive)
    pub end_offset: u32,
    /// Number of times this range was executed
    pub count: u32,
}

/// Coverage data for a single function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCov {
    /// Function name (may be empty for anonymous functions)
    pub function_name: String,
    /// Ranges within this function, pre-ordered; `ranges[0]` is the root
    pub ranges: Vec<RangeCov>,
    /// Block-level granularity when `true`, whole-function when `false`
    pub is_block_coverage: bool,
}

impl FunctionCov {
    /// The function's root range, which encloses every other range.
    #[must_use]
    pub fn root(&self) -> Option<&RangeCov> {
        self.ranges.first()
    }

    /// Check if the function was executed at least once.
    #[must_use]
    pub fn was_executed(&self) -> bool {
        self.ranges.iter().any(|r| r.count > 0)
    }
}

/// Coverage data for a single script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptCov {
    /// Script ID assigned by the inspector
    pub script_id: String,
    /// Script URL
    pub url: String,
    /// Functions in this script
    pub functions: Vec<FunctionCov>,
}

impl ScriptCov {
    /// Count functions that were executed.
    #[must_use]
    pub fn functions_executed(&self) -> usize {
        self.functions.iter().filter(|f| f.was_executed()).count()
    }

    /// Count total functions.
    #[must_use]
    pub fn functions_total(&self) -> usize {
        self.functions.len()
    }

    /// Calculate function coverage percentage.
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        if self.functions.is_empty() {
            return 100.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let percent = (self.functions_executed() as f64 / self.functions_total() as f64) * 100.0;
        percent
    }
}

/// Coverage report for a whole process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCov {
    /// Coverage data per script
    pub result: Vec<ScriptCov>,
}

impl ProcessCov {
    /// Number of scripts in the report.
    #[must_use]
    pub fn script_count(&self) -> usize {
        self.result.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_function_root() {
        let func = FunctionCov {
            function_name: "f".to_string(),
            ranges: vec![
                RangeCov {
                    start_offset: 0,
                    end_offset: 100,
                    count: 1,
                },
                RangeCov {
                    start_offset: 10,
                    end_offset: 20,
                    count: 3,
                },
            ],
            is_block_coverage: true,
        };
        assert_eq!(func.root().unwrap().end_offset, 100);
    }

    #[test]
    fn test_function_root_empty() {
        let func = FunctionCov {
            function_name: "empty".to_string(),
            ranges: vec![],
            is_block_coverage: false,
        };
        assert!(func.root().is_none());
    }

    #[test]
    fn test_function_was_executed() {
        let executed = FunctionCov {
            function_name: "hit".to_string(),
            ranges: vec![RangeCov {
                start_offset: 0,
                end_offset: 50,
                count: 3,
            }],
            is_block_coverage: false,
        };
        assert!(executed.was_executed());

        let skipped = FunctionCov {
            function_name: "miss".to_string(),
            ranges: vec![RangeCov {
                start_offset: 0,
                end_offset: 50,
                count: 0,
            }],
            is_block_coverage: false,
        };
        assert!(!skipped.was_executed());
    }

    #[test]
    fn test_script_counts() {
        let script = ScriptCov {
            script_id: "1".to_string(),
            url: "file:///app.js".to_string(),
            functions: vec![
                FunctionCov {
                    function_name: "covered".to_string(),
                    ranges: vec![RangeCov {
                        start_offset: 0,
                        end_offset: 50,
                        count: 1,
                    }],
                    is_block_coverage: false,
                },
                FunctionCov {
                    function_name: "uncovered".to_string(),
                    ranges: vec![RangeCov {
                        start_offset: 50,
                        end_offset: 100,
                        count: 0,
                    }],
                    is_block_coverage: false,
                },
            ],
        };
        assert_eq!(script.functions_executed(), 1);
        assert_eq!(script.functions_total(), 2);
        assert!((script.coverage_percent() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_script_coverage_percent_empty() {
        let script = ScriptCov {
            script_id: "1".to_string(),
            url: "file:///empty.js".to_string(),
            functions: vec![],
        };
        assert!((script.coverage_percent() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_process_script_count() {
        let process = ProcessCov {
            result: vec![ScriptCov {
                script_id: "0".to_string(),
                url: "file:///a.js".to_string(),
                functions: vec![],
            }],
        };
        assert_eq!(process.script_count(), 1);
    }

    #[test]
    fn test_wire_field_names() {
        let range = RangeCov {
            start_offset: 0,
            end_offset: 9,
            count: 2,
        };
        let json = serde_json::to_string(&range).unwrap();
        assert!(json.contains("startOffset"));
        assert!(json.contains("endOffset"));

        let func = FunctionCov {
            function_name: "f".to_string(),
            ranges: vec![range],
            is_block_coverage: true,
        };
        let json = serde_json::to_string(&func).unwrap();
        assert!(json.contains("functionName"));
        assert!(json.contains("isBlockCoverage"));
    }

    #[test]
    fn test_process_round_trip() {
        let json = r#"{
            "result": [
                {
                    "scriptId": "37",
                    "url": "file:///demo.js",
                    "functions": [
                        {
                            "functionName": "main",
                            "ranges": [
                                {"startOffset": 0, "endOffset": 120, "count": 1},
                                {"startOffset": 30, "endOffset": 60, "count": 4}
                            ],
                            "isBlockCoverage": true
                        }
                    ]
                }
            ]
        }"#;
        let process: ProcessCov = serde_json::from_str(json).unwrap();
        assert_eq!(process.script_count(), 1);
        assert_eq!(process.result[0].script_id, "37");
        assert_eq!(process.result[0].functions[0].ranges.len(), 2);

        let back = serde_json::to_string(&process).unwrap();
        let again: ProcessCov = serde_json::from_str(&back).unwrap();
        assert_eq!(process, again);
    }
}
