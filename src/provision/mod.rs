//! The provisioning workflow: a fixed ordered sequence of remote mutations
//! executed fail-fast against a single GitHub client.

pub mod runner;
pub mod steps;

use thiserror::Error;
use tracing::info;

use crate::config::RunConfiguration;
use runner::StepRunner;

/// The only error kind the workflow produces: a specific step failed, with
/// the verbatim cause from the remote boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProvisionError {
    #[error("step '{step}' failed: {cause}")]
    Remote { step: &'static str, cause: String },
}

/// Outcome of a single step, consumed immediately by the orchestrator.
pub type StepResult = Result<(), ProvisionError>;

/// Externally observable result of a full run; maps to the process exit
/// status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Completed,
    AbortedAt { step: &'static str, cause: String },
}

/// Execute the five provisioning steps in order, advancing only while each
/// step succeeds. The first failure halts the run and becomes the outcome;
/// there is no skip, no retry, and no rollback of steps already applied.
/// Partially applied state is accepted and safe to re-run.
pub async fn run_workflow<R>(runner: &R, config: &RunConfiguration) -> WorkflowOutcome
where
    R: StepRunner + ?Sized,
{
    for step in steps::provisioning_plan(config) {
        if let Err(ProvisionError::Remote { step: failed, cause }) = runner.run(&step).await {
            return WorkflowOutcome::AbortedAt { step: failed, cause };
        }
    }

    info!(
        org = %config.org,
        repository = %config.repository,
        "Repository governance provisioning completed"
    );
    WorkflowOutcome::Completed
}
