//! ado-results - publish automated test results to Azure DevOps Test Plans
//!
//! Creates a test run for a named plan and suite, posts the outcomes from a
//! JSON results file and marks the run completed or needing investigation.

use ado_results::{cli, commands::PublishArgs, common::logging};
use clap::Parser;

#[derive(Parser)]
#[command(name = "ado-results", about = "Post test results to Azure DevOps Test Plans")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: PublishArgs,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli.args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
