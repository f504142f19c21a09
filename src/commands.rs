//! CLI argument definitions

use clap::Args;
use std::path::PathBuf;

/// Where to publish and what to publish
#[derive(Args, Debug, Clone)]
pub struct PublishArgs {
    /// Azure DevOps Personal Access Token
    #[arg(long, env = "AZURE_DEVOPS_EXT_PAT", hide_env_values = true)]
    pub token: String,

    /// Azure DevOps organization URL (e.g., https://dev.azure.com/org)
    #[arg(long)]
    pub org_url: String,

    /// Azure DevOps project name
    #[arg(long)]
    pub project: String,

    /// Path to test results JSON file
    #[arg(long)]
    pub test_result_json: PathBuf,
}
