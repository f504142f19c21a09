//! Local test results and how they map onto a test run

pub mod document;
pub mod merge;

pub use document::{LocalResult, Outcome, TestResultsDocument};
pub use merge::{merge, MergeOutcome, RecordDefaults, ResultRecord};
