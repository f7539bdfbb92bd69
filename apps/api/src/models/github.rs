use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public identity fields of a GitHub user, as returned by `GET /users/{username}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub html_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub message: String,
    /// Author timestamp. GitHub can return commits with no author block.
    pub authored_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub html_url: String,
    pub commits: Vec<CommitInfo>,
    /// Set when commit enumeration for this repository failed (empty repo,
    /// permission denial, API error). Never aborts the whole fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub fetch_error: Option<String>,
}

/// Aggregate of a user's identity and repository activity, with derived fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubProfile {
    pub user_info: GithubUser,
    pub repositories: Vec<RepositoryInfo>,
    pub total_repos: usize,
    pub total_commits: usize,
    /// min(account creation, earliest observed commit timestamp).
    pub active_since: Option<DateTime<Utc>>,
}

impl GithubProfile {
    /// Builds the aggregate and computes the derived fields.
    pub fn from_parts(user_info: GithubUser, repositories: Vec<RepositoryInfo>) -> Self {
        let total_repos = repositories.len();
        let total_commits = repositories.iter().map(|r| r.commits.len()).sum();

        let earliest_commit = repositories
            .iter()
            .flat_map(|r| r.commits.iter())
            .filter_map(|c| c.authored_at)
            .min();

        let active_since = match (user_info.created_at, earliest_commit) {
            (Some(created), Some(commit)) => Some(created.min(commit)),
            (Some(created), None) => Some(created),
            (None, earliest) => earliest,
        };

        Self {
            user_info,
            repositories,
            total_repos,
            total_commits,
            active_since,
        }
    }
}
