//! Input document types
//!
//! Defines the data structures for deserializing the test results JSON file.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use crate::common::{Error, Result};

/// Outcome of one test case, as named by the Azure DevOps API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Unspecified,
    None,
    Passed,
    Failed,
    Inconclusive,
    Timeout,
    Aborted,
    Blocked,
    NotExecuted,
    Warning,
    Error,
    NotApplicable,
    Paused,
    InProgress,
    NotImpacted,
}

impl Outcome {
    pub fn is_passed(self) -> bool {
        self == Outcome::Passed
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The complete test results file
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TestResultsDocument {
    /// Name of the test plan to publish into
    pub test_plan_name: String,
    /// Name of the suite within the plan
    pub test_suite_name: String,
    /// Local results keyed by test case id
    pub test_results: HashMap<String, LocalResult>,
}

/// A single locally recorded test result
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalResult {
    pub outcome: Outcome,
    pub priority: Option<i64>,
    pub failure_type: Option<String>,
    pub comment: Option<String>,
    pub error_message: Option<String>,
    pub stack_trace: Option<String>,
    pub duration_in_ms: Option<f64>,
    /// Keys the result record has no field for; they are not submitted
    #[serde(flatten)]
    pub ignored: BTreeMap<String, serde_json::Value>,
}

impl LocalResult {
    /// A bare result carrying only an outcome
    pub fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            priority: None,
            failure_type: None,
            comment: None,
            error_message: None,
            stack_trace: None,
            duration_in_ms: None,
            ignored: BTreeMap::new(),
        }
    }
}

impl TestResultsDocument {
    /// Load and validate the results file
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::InputNotFound { path: display.clone() }
            } else {
                Error::invalid_input(&display, e)
            }
        })?;

        let document =
            Self::parse(&content).map_err(|reason| Error::invalid_input(&display, reason))?;

        for (case_id, key) in document.ignored_fields() {
            tracing::warn!("Ignoring unsupported field '{}' on test case {}", key, case_id);
        }

        Ok(document)
    }

    /// `(test case id, key)` for every input key that won't be submitted
    pub fn ignored_fields(&self) -> Vec<(&str, &str)> {
        let mut fields: Vec<(&str, &str)> = self
            .test_results
            .iter()
            .flat_map(|(case_id, result)| {
                result
                    .ignored
                    .keys()
                    .map(move |key| (case_id.as_str(), key.as_str()))
            })
            .collect();
        fields.sort_unstable();
        fields
    }

    /// Parse the document from JSON text
    ///
    /// Missing required keys surface as serde's "missing field `...`" message.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
