use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::Value;
use tracing::{debug, error, info};

use super::steps::{Method, Step};
use super::{ProvisionError, StepResult};
use crate::github::GitHubClient;

/// Boundary between the orchestrator and the remote API.
///
/// The production implementation issues real requests through octocrab;
/// tests substitute recording fakes to observe ordering and short-circuit
/// behavior without a network.
#[async_trait]
pub trait StepRunner {
    async fn run(&self, step: &Step) -> StepResult;
}

#[async_trait]
impl StepRunner for GitHubClient {
    async fn run(&self, step: &Step) -> StepResult {
        info!(step = step.name, "{}", step.description);
        debug!(
            step = step.name,
            method = ?step.method,
            route = %step.route,
            body = ?step.body,
            "Issuing request"
        );

        // No retries: a transient network error and a permanent refusal are
        // surfaced identically, carrying the verbatim cause.
        if let Err(err) = issue(self.octocrab(), step).await {
            let cause = describe(&err);
            error!(step = step.name, "{} failed: {cause}", step.description);
            return Err(ProvisionError::Remote {
                step: step.name,
                cause,
            });
        }

        Ok(())
    }
}

/// Render the underlying error with its detail intact. The `Display` of
/// `octocrab::Error::GitHub` is just "GitHub"; the remote's message and
/// status live in the source struct, and transport errors bury the detail
/// in their source chain.
fn describe(err: &octocrab::Error) -> String {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            format!("HTTP {}: {}", source.status_code, source.message)
        }
        other => {
            let mut detail = other.to_string();
            let mut source = std::error::Error::source(other);
            while let Some(inner) = source {
                detail.push_str(": ");
                detail.push_str(&inner.to_string());
                source = inner.source();
            }
            detail
        }
    }
}

async fn issue(octocrab: &Octocrab, step: &Step) -> Result<(), octocrab::Error> {
    let body: Option<&Value> = step.body.as_ref();
    let response = match step.method {
        Method::Post => octocrab._post(&step.route, body).await?,
        Method::Put => octocrab._put(&step.route, body).await?,
        Method::Patch => octocrab._patch(&step.route, body).await?,
    };

    // Raw route calls return the response as-is; map non-2xx statuses to
    // the same error surface the typed octocrab APIs use.
    octocrab::map_github_error(response).await?;
    Ok(())
}
