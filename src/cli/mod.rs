//! CLI command handling
//!
//! Loads the results file, drives the publish pipeline against Azure DevOps
//! and prints a summary.

use colored::Colorize;

use crate::ado::{AdoClient, RunState};
use crate::commands::PublishArgs;
use crate::common::{Config, Result};
use crate::results::TestResultsDocument;

/// What a successful publish produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: i64,
    pub state: RunState,
    pub records_posted: usize,
    pub failures: usize,
}

/// Run the publish command with configuration from the default location
pub async fn run(args: PublishArgs) -> Result<()> {
    let config = Config::load()
        .inspect_err(|e| tracing::error!("Failed to load configuration: {}", e))?;
    let summary = run_with_config(args, &config).await?;
    print_summary(&summary);
    Ok(())
}

/// Run the publish command with explicit configuration
pub async fn run_with_config(args: PublishArgs, config: &Config) -> Result<RunSummary> {
    let document = TestResultsDocument::load(&args.test_result_json)
        .inspect_err(|e| tracing::error!("{}", e))?;

    let client = AdoClient::new(&args.org_url, &args.project, &args.token, config)
        .inspect_err(|e| tracing::error!("Failed to set up Azure DevOps client: {}", e))?;

    publish(&client, &document)
        .await
        .inspect_err(|e| tracing::error!("Error posting test results to Azure DevOps: {}", e))
}

/// Publish one results document as a new test run
///
/// Steps run strictly in order; the first failure aborts the rest and a run
/// that was already created is left as-is on the server.
pub async fn publish(client: &AdoClient, document: &TestResultsDocument) -> Result<RunSummary> {
    let plan_id = client.resolve_plan(&document.test_plan_name).await?;
    tracing::debug!("Resolved plan '{}' to {}", document.test_plan_name, plan_id);

    let suite_id = client
        .resolve_suite(plan_id, &document.test_suite_name)
        .await?;
    tracing::debug!("Resolved suite '{}' to {}", document.test_suite_name, suite_id);

    let point_ids = client.list_test_points(plan_id, suite_id).await?;
    tracing::debug!("Suite {} has {} test points", suite_id, point_ids.len());

    let run_id = client
        .create_run(
            &document.test_plan_name,
            &document.test_suite_name,
            plan_id,
            &point_ids,
        )
        .await?;

    let merged = client.merge_results(run_id, &document.test_results).await?;
    client.submit_results(run_id, &merged.records).await?;
    let state = client.complete_run(run_id, merged.failure_observed).await?;

    Ok(RunSummary {
        run_id,
        state,
        records_posted: merged.records.len(),
        failures: merged.failures(),
    })
}

fn print_summary(summary: &RunSummary) {
    let state = match summary.state {
        RunState::Completed => summary.state.to_string().green().bold(),
        RunState::NeedsInvestigation => summary.state.to_string().yellow().bold(),
    };
    println!(
        "{} Posted {} results to run {} ({} not passed), run marked {}",
        "✓".green(),
        summary.records_posted,
        summary.run_id,
        summary.failures,
        state
    );
}
