//! Azure DevOps Test Plans wire types
//!
//! Only the fields this tool reads or writes are modelled; the service
//! returns many more and serde ignores them.
//! See: https://learn.microsoft.com/rest/api/azure/devops/test

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// === Responses ===

/// Envelope of every list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub value: Vec<T>,
}

/// A test plan or test suite
#[derive(Debug, Clone, Deserialize)]
pub struct NamedEntity {
    pub id: i64,
    pub name: String,
}

/// A test point within a suite
#[derive(Debug, Clone, Deserialize)]
pub struct TestPoint {
    pub id: i64,
}

/// A test run as returned by create
#[derive(Debug, Clone, Deserialize)]
pub struct TestRun {
    pub id: i64,
}

/// A result record the service pre-creates for each point of a new run
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderResult {
    pub id: i64,
    pub test_case: TestCaseRef,
}

/// Reference to a work-item test case
#[derive(Debug, Clone, Deserialize)]
pub struct TestCaseRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

/// Test case ids come back as strings from the results endpoint and as
/// numbers from some others; normalize to a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

// === Requests ===

/// Reference to a plan by id
#[derive(Debug, Clone, Serialize)]
pub struct PlanRef {
    pub id: i64,
}

/// Body of the create-run request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRunRequest {
    pub name: String,
    pub plan: PlanRef,
    pub point_ids: Vec<i64>,
    pub automated: bool,
    pub comment: String,
}

/// Final state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Completed,
    NeedsInvestigation,
}

impl RunState {
    pub fn from_failure(failure_observed: bool) -> Self {
        if failure_observed {
            RunState::NeedsInvestigation
        } else {
            RunState::Completed
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Completed => write!(f, "Completed"),
            RunState::NeedsInvestigation => write!(f, "NeedsInvestigation"),
        }
    }
}

/// Body of the run-completion request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRunRequest {
    pub state: RunState,
    pub completed_date: String,
}
