use octocrab::Error as OctocrabError;

#[derive(Debug)]
pub enum GitHubError {
    TokenNotFound(String),
    ApiError(OctocrabError),
}

impl From<OctocrabError> for GitHubError {
    fn from(err: OctocrabError) -> Self {
        GitHubError::ApiError(err)
    }
}

impl std::fmt::Display for GitHubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitHubError::TokenNotFound(msg) => {
                writeln!(f, "GitHub Authentication Error")?;
                writeln!(f, "──────────────────────────")?;
                write!(f, "🔑 {msg}\n\n")?;
                writeln!(f, "🔧 QUICK FIXES:")?;
                writeln!(
                    f,
                    "   → Set token directly: export REPO_WARDEN_GITHUB_TOKEN=your_token"
                )?;
                writeln!(f, "   → Or use an existing login: export GITHUB_TOKEN=\"$(gh auth token)\"")?;
                write!(
                    f,
                    "   → Create token at: https://github.com/settings/tokens (needs 'admin:org' and 'repo' scopes)"
                )
            }
            GitHubError::ApiError(octocrab_err) => {
                writeln!(f, "GitHub API Error")?;
                writeln!(f, "────────────────")?;
                write!(f, "🌐 {octocrab_err}\n\n")?;
                writeln!(f, "🔧 TROUBLESHOOTING:")?;
                writeln!(f, "   → Check authentication: gh auth status")?;
                writeln!(f, "   → Test connection: curl -I https://api.github.com")?;
                write!(f, "   → Verify organization access: gh org list")
            }
        }
    }
}

impl std::error::Error for GitHubError {}
