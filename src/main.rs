use anyhow::Result;
use clap::Parser;

use repo_warden::config::WardenConfig;
use repo_warden::github::GitHubClient;
use repo_warden::provision::{run_workflow, WorkflowOutcome};
use repo_warden::telemetry::init_telemetry;

#[derive(Parser)]
#[command(name = "repo-warden")]
#[command(about = "Provision repository governance state on GitHub")]
#[command(long_about = "Repo Warden provisions GitHub repository governance in one pass: \
                       it creates a team, enrolls a member, grants the team a permission \
                       level on a repository, installs branch protection, and sets the \
                       repository's default branch. The run is fail-fast: the first failing \
                       step aborts the remainder, and a re-run reissues the same steps.")]
struct Cli {
    /// Verbose tracing of every underlying API call
    #[arg(long, help = "Enable verbose tracing of every underlying API call")]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_telemetry(cli.debug)?;
    WardenConfig::load_env_file()?;

    let config = WardenConfig::load()?;
    config.provision.validate()?;

    let client = GitHubClient::new(&config.github)?;

    let outcome = tokio::runtime::Runtime::new()?
        .block_on(async { run_workflow(&client, &config.provision).await });

    match outcome {
        WorkflowOutcome::Completed => Ok(()),
        // The failing step already logged its cause at ERROR level.
        WorkflowOutcome::AbortedAt { .. } => std::process::exit(1),
    }
}
