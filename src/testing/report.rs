//! Testcase outcomes and suite reports

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::common::Error;

/// Why a testcase failed
#[derive(Debug)]
pub enum FailReason {
    /// The description could not be loaded or decoded
    Description(Error),
    /// The executable could not be run to completion
    Execution(Error),
    ReturnCode { expected: i32, actual: i32 },
    Stdout { expected: String, actual: String },
    Stderr { expected: String, actual: String },
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::Description(e) => write!(f, "{}", e),
            FailReason::Execution(e) => write!(f, "{}", e),
            FailReason::ReturnCode { expected, actual } => {
                write!(f, "return code {} is not the expected {}", actual, expected)
            }
            FailReason::Stdout { .. } => f.write_str("stdout is not as expected"),
            FailReason::Stderr { .. } => f.write_str("stderr is not as expected"),
        }
    }
}

/// Result of running one testcase
#[derive(Debug)]
pub enum Outcome {
    Pass,
    Fail(FailReason),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn reason(&self) -> Option<&FailReason> {
        match self {
            Outcome::Pass => None,
            Outcome::Fail(reason) => Some(reason),
        }
    }
}

/// Ordered outcomes of one suite run
#[derive(Debug, Default)]
pub struct SuiteReport {
    entries: Vec<(PathBuf, Outcome)>,
}

#[derive(Serialize)]
struct JsonEntry {
    path: String,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Serialize)]
struct JsonReport {
    passed: usize,
    failed: usize,
    results: Vec<JsonEntry>,
}

impl SuiteReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>, outcome: Outcome) {
        self.entries.push((path.into(), outcome));
    }

    pub fn entries(&self) -> &[(PathBuf, Outcome)] {
        &self.entries
    }

    pub fn outcome(&self, path: &Path) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, outcome)| outcome)
    }

    /// Paths of the failed testcases, in run order
    pub fn failed(&self) -> Vec<&Path> {
        self.entries
            .iter()
            .filter(|(_, outcome)| !outcome.passed())
            .map(|(path, _)| path.as_path())
            .collect()
    }

    pub fn passed_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.passed_count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Machine-readable form of the report
    pub fn to_json(&self) -> serde_json::Result<String> {
        let report = JsonReport {
            passed: self.passed_count(),
            failed: self.failed_count(),
            results: self
                .entries
                .iter()
                .map(|(path, outcome)| JsonEntry {
                    path: path.display().to_string(),
                    passed: outcome.passed(),
                    reason: outcome.reason().map(|r| r.to_string()),
                })
                .collect(),
        };
        serde_json::to_string_pretty(&report)
    }
}
