//! Azure DevOps Test Plans client
//!
//! Talks to the service's REST API to look up plans, suites and points,
//! and to create, populate and close test runs.

pub mod client;
pub mod types;

pub use client::AdoClient;
pub use types::RunState;
