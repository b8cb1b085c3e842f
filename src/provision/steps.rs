// Step definitions for the provisioning workflow.
//
// Each step is a named request descriptor: method, API route, and a typed
// JSON body. The plan function returns the five steps in their fixed
// dependency order; the orchestrator never reorders or re-enters them.

use serde::Serialize;
use serde_json::Value;

use crate::config::RunConfiguration;

pub const CREATE_TEAM: &str = "create_team";
pub const ADD_USER_TO_TEAM: &str = "add_user_to_team";
pub const GRANT_REPO_PERMISSION: &str = "grant_repo_permission";
pub const SET_BRANCH_PROTECTION: &str = "set_branch_protection";
pub const SET_DEFAULT_BRANCH: &str = "set_default_branch";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Put,
    Patch,
}

/// One atomic remote mutation: a name, a request shape, and nothing else.
#[derive(Debug, Clone)]
pub struct Step {
    pub name: &'static str,
    pub description: String,
    pub method: Method,
    pub route: String,
    pub body: Option<Value>,
}

#[derive(Debug, Serialize)]
struct CreateTeamBody<'a> {
    name: &'a str,
    description: &'a str,
    privacy: &'a str,
}

#[derive(Debug, Serialize)]
struct GrantPermissionBody<'a> {
    permission: &'a str,
}

#[derive(Debug, Serialize)]
struct RequiredStatusChecks {
    strict: bool,
    contexts: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RequiredPullRequestReviews {
    required_approving_review_count: u32,
}

#[derive(Debug, Serialize)]
struct Restrictions<'a> {
    users: Vec<String>,
    teams: &'a [String],
    apps: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BranchProtectionBody<'a> {
    required_status_checks: RequiredStatusChecks,
    enforce_admins: bool,
    required_pull_request_reviews: RequiredPullRequestReviews,
    restrictions: Restrictions<'a>,
    allow_deletions: bool,
    allow_force_pushes: bool,
}

#[derive(Debug, Serialize)]
struct DefaultBranchBody<'a> {
    default_branch: &'a str,
}

fn body<T: Serialize>(payload: &T) -> Option<Value> {
    // These bodies are plain derived structs; serialization cannot fail.
    Some(serde_json::to_value(payload).expect("request body serializes"))
}

pub fn create_team(config: &RunConfiguration) -> Step {
    Step {
        name: CREATE_TEAM,
        description: format!(
            "Creating team '{}' in organization '{}'",
            config.team_name, config.org
        ),
        method: Method::Post,
        route: format!("/orgs/{}/teams", config.org),
        body: body(&CreateTeamBody {
            name: &config.team_name,
            description: &config.team_description,
            privacy: &config.team_privacy,
        }),
    }
}

pub fn add_user_to_team(config: &RunConfiguration) -> Step {
    Step {
        name: ADD_USER_TO_TEAM,
        description: format!(
            "Adding user '{}' to team '{}'",
            config.username, config.team_name
        ),
        method: Method::Put,
        route: format!(
            "/orgs/{}/teams/{}/memberships/{}",
            config.org, config.team_name, config.username
        ),
        body: None,
    }
}

pub fn grant_repo_permission(config: &RunConfiguration) -> Step {
    Step {
        name: GRANT_REPO_PERMISSION,
        description: format!(
            "Granting team '{}' permission '{}' on repository '{}'",
            config.team_name, config.permission, config.repository
        ),
        method: Method::Put,
        route: format!(
            "/orgs/{}/teams/{}/repos/{}",
            config.org, config.team_name, config.repository
        ),
        body: body(&GrantPermissionBody {
            permission: &config.permission,
        }),
    }
}

pub fn set_branch_protection(config: &RunConfiguration) -> Step {
    Step {
        name: SET_BRANCH_PROTECTION,
        description: format!(
            "Protecting branch '{}' on repository '{}'",
            config.branch, config.repository
        ),
        method: Method::Put,
        route: format!(
            "/repos/{}/branches/{}/protection",
            config.repository, config.branch
        ),
        body: body(&BranchProtectionBody {
            required_status_checks: RequiredStatusChecks {
                strict: config.strict_status_checks,
                contexts: Vec::new(),
            },
            enforce_admins: true,
            required_pull_request_reviews: RequiredPullRequestReviews {
                // Passed through unmodified; 0 stays 0.
                required_approving_review_count: config.required_approving_review_count,
            },
            restrictions: Restrictions {
                users: Vec::new(),
                teams: &config.restriction_teams,
                apps: Vec::new(),
            },
            // Fixed policy: deletions and force pushes are never allowed.
            allow_deletions: false,
            allow_force_pushes: false,
        }),
    }
}

pub fn set_default_branch(config: &RunConfiguration) -> Step {
    Step {
        name: SET_DEFAULT_BRANCH,
        description: format!(
            "Setting default branch of repository '{}' to '{}'",
            config.repository, config.branch
        ),
        method: Method::Patch,
        route: format!("/repos/{}", config.repository),
        body: body(&DefaultBranchBody {
            default_branch: &config.branch,
        }),
    }
}

/// The fixed ordered plan for one provisioning run.
pub fn provisioning_plan(config: &RunConfiguration) -> Vec<Step> {
    vec![
        create_team(config),
        add_user_to_team(config),
        grant_repo_permission(config),
        set_branch_protection(config),
        set_default_branch(config),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_config() -> RunConfiguration {
        RunConfiguration {
            org: "acme".to_string(),
            team_name: "web-team".to_string(),
            team_description: "Web platform maintainers".to_string(),
            team_privacy: "closed".to_string(),
            repository: "acme/site".to_string(),
            username: "alice".to_string(),
            permission: "maintain".to_string(),
            branch: "main".to_string(),
            required_approving_review_count: 1,
            strict_status_checks: true,
            restriction_teams: vec!["web-team".to_string()],
        }
    }

    #[test]
    fn plan_has_five_steps_in_fixed_order() {
        let plan = provisioning_plan(&sample_config());
        let names: Vec<&str> = plan.iter().map(|step| step.name).collect();
        assert_eq!(
            names,
            vec![
                CREATE_TEAM,
                ADD_USER_TO_TEAM,
                GRANT_REPO_PERMISSION,
                SET_BRANCH_PROTECTION,
                SET_DEFAULT_BRANCH,
            ]
        );
    }

    #[test]
    fn create_team_request_shape() {
        let step = create_team(&sample_config());
        assert_eq!(step.method, Method::Post);
        assert_eq!(step.route, "/orgs/acme/teams");
        assert_eq!(
            step.body.unwrap(),
            json!({
                "name": "web-team",
                "description": "Web platform maintainers",
                "privacy": "closed",
            })
        );
    }

    #[test]
    fn membership_request_has_no_body() {
        let step = add_user_to_team(&sample_config());
        assert_eq!(step.method, Method::Put);
        assert_eq!(step.route, "/orgs/acme/teams/web-team/memberships/alice");
        assert!(step.body.is_none());
    }

    #[test]
    fn permission_is_taken_from_configuration() {
        let mut config = sample_config();
        config.permission = "push".to_string();
        let step = grant_repo_permission(&config);
        assert_eq!(step.route, "/orgs/acme/teams/web-team/repos/acme/site");
        assert_eq!(step.body.unwrap(), json!({ "permission": "push" }));
    }

    #[test]
    fn branch_protection_request_shape() {
        let step = set_branch_protection(&sample_config());
        assert_eq!(step.method, Method::Put);
        assert_eq!(step.route, "/repos/acme/site/branches/main/protection");
        assert_eq!(
            step.body.unwrap(),
            json!({
                "required_status_checks": { "strict": true, "contexts": [] },
                "enforce_admins": true,
                "required_pull_request_reviews": { "required_approving_review_count": 1 },
                "restrictions": { "users": [], "teams": ["web-team"], "apps": [] },
                "allow_deletions": false,
                "allow_force_pushes": false,
            })
        );
    }

    #[test]
    fn zero_review_count_is_passed_through() {
        let mut config = sample_config();
        config.required_approving_review_count = 0;
        let body = set_branch_protection(&config).body.unwrap();
        assert_eq!(
            body["required_pull_request_reviews"]["required_approving_review_count"],
            json!(0)
        );
    }

    #[test]
    fn deletions_and_force_pushes_stay_disallowed() {
        // Fixed policy regardless of any configuration input.
        for strict in [true, false] {
            let mut config = sample_config();
            config.strict_status_checks = strict;
            config.required_approving_review_count = 3;
            let body = set_branch_protection(&config).body.unwrap();
            assert_eq!(body["allow_deletions"], json!(false));
            assert_eq!(body["allow_force_pushes"], json!(false));
        }
    }

    #[test]
    fn default_branch_request_shape() {
        let step = set_default_branch(&sample_config());
        assert_eq!(step.method, Method::Patch);
        assert_eq!(step.route, "/repos/acme/site");
        assert_eq!(step.body.unwrap(), json!({ "default_branch": "main" }));
    }
}
