//! Publish automated test results to Azure DevOps Test Plans
//!
//! Resolves a plan and suite by name, creates a run over the suite's test
//! points, merges local outcomes into the run's results and closes the run.

pub mod ado;
pub mod cli;
pub mod commands;
pub mod common;
pub mod results;

// Re-export commonly used types for tests
pub use ado::{AdoClient, RunState};
pub use common::{Config, Error, Result};
pub use results::{Outcome, TestResultsDocument};
