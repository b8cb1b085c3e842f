// Repo Warden Library - GitHub Repository Governance Provisioning
// This exposes the core components for testing and integration

pub mod config;
pub mod github;
pub mod provision;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{GitHubConfig, RunConfiguration, WardenConfig};
pub use github::{GitHubClient, GitHubError};
pub use provision::runner::StepRunner;
pub use provision::steps::{provisioning_plan, Method, Step};
pub use provision::{run_workflow, ProvisionError, StepResult, WorkflowOutcome};
pub use telemetry::init_telemetry;
