use http::header::HeaderName;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;

use super::errors::GitHubError;
use crate::config::GitHubConfig;

/// Every request declares the API version it was written against.
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

/// Authenticated GitHub API client shared by all provisioning steps.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self, GitHubError> {
        let token = Self::read_token(config)?;

        // The workflow is fail-fast: each step issues exactly one request,
        // so the client-level retry middleware must stay off.
        let mut builder = Octocrab::builder()
            .personal_token(token)
            .add_retry_config(RetryConfig::None)
            .add_header(
                HeaderName::from_static(API_VERSION_HEADER),
                API_VERSION.to_string(),
            );

        if let Some(api_url) = &config.api_url {
            builder = builder.base_uri(api_url)?;
        }

        Ok(GitHubClient {
            octocrab: builder.build()?,
        })
    }

    fn read_token(config: &GitHubConfig) -> Result<String, GitHubError> {
        match &config.token {
            Some(token) if !token.is_empty() => Ok(token.clone()),
            _ => Err(GitHubError::TokenNotFound(
                "GitHub token not found. Set github.token in repo-warden.toml or export \
                 REPO_WARDEN_GITHUB_TOKEN / GITHUB_TOKEN."
                    .to_string(),
            )),
        }
    }

    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_reported() {
        let config = GitHubConfig {
            token: None,
            api_url: None,
        };
        match GitHubClient::new(&config) {
            Err(GitHubError::TokenNotFound(msg)) => assert!(msg.contains("GitHub token")),
            other => panic!("expected TokenNotFound, got {other:?}"),
        }
    }

    #[test]
    fn empty_token_is_reported() {
        let config = GitHubConfig {
            token: Some(String::new()),
            api_url: None,
        };
        assert!(matches!(
            GitHubClient::new(&config),
            Err(GitHubError::TokenNotFound(_))
        ));
    }

    #[tokio::test]
    async fn builds_with_custom_base_url() {
        let config = GitHubConfig {
            token: Some("test-token".to_string()),
            api_url: Some("http://127.0.0.1:9999".to_string()),
        };
        assert!(GitHubClient::new(&config).is_ok());
    }
}
