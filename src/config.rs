use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure for Repo Warden
#[derive(Debug, Clone, Deserialize)]
pub struct WardenConfig {
    /// GitHub client settings
    pub github: GitHubConfig,
    /// Parameters of the provisioning run
    pub provision: RunConfiguration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token (can be set via env var)
    pub token: Option<String>,
    /// Override for the API base URL (GitHub Enterprise, test servers)
    pub api_url: Option<String>,
}

/// Immutable parameter set consumed by every provisioning step.
///
/// Every field must be non-empty before the first step runs; the workflow
/// fills no defaults. Deletion and force-push prohibition are fixed policy
/// and deliberately absent from this surface.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfiguration {
    /// Organization that owns the team
    pub org: String,
    /// Name of the team to create
    pub team_name: String,
    /// Team description
    pub team_description: String,
    /// Team visibility policy ("closed" or "secret")
    pub team_privacy: String,
    /// Target repository in "owner/name" form
    pub repository: String,
    /// Username to enroll in the team
    pub username: String,
    /// Permission level granted to the team on the repository
    pub permission: String,
    /// Branch to protect and promote to default
    pub branch: String,
    /// Approving reviews required on the protected branch (0 allowed)
    pub required_approving_review_count: u32,
    /// Require branches to be up to date before merging
    pub strict_status_checks: bool,
    /// Teams allowed to push to the protected branch
    pub restriction_teams: Vec<String>,
}

impl WardenConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Configuration file (repo-warden.toml)
    /// 2. Environment variables (prefixed with REPO_WARDEN__)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if Path::new("repo-warden.toml").exists() {
            builder = builder.add_source(File::with_name("repo-warden"));
        }

        builder = builder.add_source(
            Environment::with_prefix("REPO_WARDEN")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut warden_config: WardenConfig = config.try_deserialize()?;

        // Special handling for the GitHub token - check multiple sources
        if warden_config.github.token.is_none() {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                warden_config.github.token = Some(token);
            } else if let Ok(token) = std::env::var("REPO_WARDEN_GITHUB_TOKEN") {
                warden_config.github.token = Some(token);
            }
        }

        Ok(warden_config)
    }

    /// Load configuration from a single file, skipping the environment layers.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

impl RunConfiguration {
    /// Reject any configuration that would let a step run with a blank
    /// parameter. The workflow itself never fills defaults.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("provision.org", &self.org),
            ("provision.team_name", &self.team_name),
            ("provision.team_description", &self.team_description),
            ("provision.team_privacy", &self.team_privacy),
            ("provision.repository", &self.repository),
            ("provision.username", &self.username),
            ("provision.permission", &self.permission),
            ("provision.branch", &self.branch),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                bail!("configuration field '{field}' must not be empty");
            }
        }

        if !self.repository.contains('/') {
            bail!("configuration field 'provision.repository' must be in 'owner/name' form");
        }

        if self.restriction_teams.is_empty()
            || self.restriction_teams.iter().any(|t| t.trim().is_empty())
        {
            bail!("configuration field 'provision.restriction_teams' must list at least one team");
        }

        Ok(())
    }
}
