//! Merging local results into the server's placeholder records

use serde::Serialize;
use std::collections::HashMap;

use crate::ado::types::PlaceholderResult;
use crate::common::config::ResultsConfig;

use super::document::{LocalResult, Outcome};

/// State stamped on every submitted result
pub const COMPLETED_STATE: &str = "Completed";

/// One result record as submitted to the run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: i64,
    pub outcome: Outcome,
    pub state: String,
    pub priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_ms: Option<f64>,
}

/// Merged records plus whether any of them is not a pass
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub records: Vec<ResultRecord>,
    pub failure_observed: bool,
}

impl MergeOutcome {
    /// Number of records whose outcome is not `Passed`
    pub fn failures(&self) -> usize {
        self.records.iter().filter(|r| !r.outcome.is_passed()).count()
    }
}

/// Defaults filled into records that don't carry a value
#[derive(Debug, Clone)]
pub struct RecordDefaults {
    pub priority: i64,
    pub failure_type: String,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        ResultsConfig::default().into()
    }
}

impl From<ResultsConfig> for RecordDefaults {
    fn from(config: ResultsConfig) -> Self {
        Self {
            priority: config.default_priority,
            failure_type: config.default_failure_type,
        }
    }
}

/// Build one record per placeholder, in server order
///
/// Placeholders without a local result become `NotExecuted`. Local results
/// whose test case has no placeholder are dropped.
pub fn merge(
    placeholders: &[PlaceholderResult],
    local: &HashMap<String, LocalResult>,
    defaults: &RecordDefaults,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for placeholder in placeholders {
        let local_result = local
            .get(&placeholder.test_case.id)
            .cloned()
            .unwrap_or_else(|| LocalResult::with_outcome(Outcome::NotExecuted));

        let mut record = ResultRecord {
            id: placeholder.id,
            outcome: local_result.outcome,
            state: COMPLETED_STATE.to_string(),
            priority: local_result.priority.unwrap_or(defaults.priority),
            failure_type: local_result.failure_type,
            comment: local_result.comment,
            error_message: local_result.error_message,
            stack_trace: local_result.stack_trace,
            duration_in_ms: local_result.duration_in_ms,
        };

        if !record.outcome.is_passed() {
            record
                .failure_type
                .get_or_insert_with(|| defaults.failure_type.clone());
            outcome.failure_observed = true;
        }

        outcome.records.push(record);
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        for case_id in local.keys() {
            if !placeholders.iter().any(|p| &p.test_case.id == case_id) {
                tracing::debug!("No test point for test case {}, result dropped", case_id);
            }
        }
    }

    outcome
}
