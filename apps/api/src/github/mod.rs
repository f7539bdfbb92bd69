/// GitHub client — the single point of entry for all GitHub REST calls.
///
/// The orchestrator consumes the `ProfileFetcher` trait, carried in
/// `AppState` as `Arc<dyn ProfileFetcher>`, so tests can swap in a mock.
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::github::{CommitInfo, GithubProfile, GithubUser, RepositoryInfo};

const GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: u32 = 100;
/// Bounded per-request timeout; a hung GitHub call must not stall the pipeline.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub user '{0}' not found")]
    NotFound(String),

    #[error("GitHub authentication failed (status {0})")]
    Auth(u16),

    #[error("GitHub API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("GitHub request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
}

/// Boundary consumed by the analysis pipeline.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch(&self, username: &str) -> Result<GithubProfile, GithubError>;
}

/// Raw repository row from `GET /users/{username}/repos`.
#[derive(Debug, Deserialize)]
struct ApiRepository {
    name: String,
    html_url: String,
}

/// Raw commit row from `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Deserialize)]
struct ApiCommit {
    commit: ApiCommitDetail,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetail {
    message: String,
    author: Option<ApiCommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct ApiCommitAuthor {
    date: Option<DateTime<Utc>>,
}

pub struct GithubClient {
    client: Client,
    base_url: String,
    token: String,
}

impl GithubClient {
    /// `hostname` switches to a GitHub Enterprise instance
    /// (`https://{hostname}/api/v3`); `None` targets public GitHub.
    pub fn new(token: String, hostname: Option<&str>) -> Self {
        let base_url = match hostname {
            Some(host) => format!("https://{host}/api/v3"),
            None => GITHUB_API_URL.to_string(),
        };

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .user_agent(concat!("verihire-api/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            token,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GithubError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header("accept", "application/vnd.github+json")
            .header("x-github-api-version", GITHUB_API_VERSION)
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GithubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(map_transport_error)
    }

    async fn fetch_user(&self, username: &str) -> Result<GithubUser, GithubError> {
        match self.get_json(&format!("/users/{username}"), &[]).await {
            Ok(user) => Ok(user),
            Err(GithubError::Api { status: 404, .. }) => {
                Err(GithubError::NotFound(username.to_string()))
            }
            Err(GithubError::Api { status, .. }) if status == 401 || status == 403 => {
                Err(GithubError::Auth(status))
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_repositories(&self, login: &str) -> Result<Vec<ApiRepository>, GithubError> {
        let mut repositories = Vec::new();
        let mut page = 1u32;
        loop {
            let batch: Vec<ApiRepository> = self
                .get_json(
                    &format!("/users/{login}/repos"),
                    &[
                        ("per_page", PAGE_SIZE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;
            let batch_len = batch.len();
            repositories.extend(batch);
            if batch_len < PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }
        Ok(repositories)
    }

    async fn fetch_commits(&self, login: &str, repo: &str) -> Result<Vec<CommitInfo>, GithubError> {
        let mut commits = Vec::new();
        let mut page = 1u32;
        loop {
            let batch: Vec<ApiCommit> = self
                .get_json(
                    &format!("/repos/{login}/{repo}/commits"),
                    &[
                        ("per_page", PAGE_SIZE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;
            let batch_len = batch.len();
            commits.extend(batch.into_iter().map(|c| CommitInfo {
                message: c.commit.message,
                authored_at: c.commit.author.and_then(|a| a.date),
            }));
            if batch_len < PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }
        Ok(commits)
    }
}

#[async_trait]
impl ProfileFetcher for GithubClient {
    /// Enumerates all repositories and their commit histories for a user.
    ///
    /// Per-repository commit failures (empty repo, permission denial, API
    /// error) are absorbed: the repository appears with an empty commit list
    /// and an error note. Only user-level failures abort the fetch.
    async fn fetch(&self, username: &str) -> Result<GithubProfile, GithubError> {
        let user = self.fetch_user(username).await?;
        debug!(login = %user.login, public_repos = user.public_repos, "GitHub user fetched");

        let repos = self.fetch_repositories(&user.login).await?;

        let mut repositories = Vec::with_capacity(repos.len());
        for repo in repos {
            let (commits, fetch_error) = match self.fetch_commits(&user.login, &repo.name).await {
                Ok(commits) => (commits, None),
                Err(e) => {
                    warn!(repo = %repo.name, "commit enumeration failed: {e}");
                    (Vec::new(), Some(e.to_string()))
                }
            };
            repositories.push(RepositoryInfo {
                name: repo.name,
                html_url: repo.html_url,
                commits,
                fetch_error,
            });
        }

        let profile = GithubProfile::from_parts(user, repositories);
        debug!(
            total_repos = profile.total_repos,
            total_commits = profile.total_commits,
            "GitHub profile assembled"
        );
        Ok(profile)
    }
}

fn map_transport_error(e: reqwest::Error) -> GithubError {
    if e.is_timeout() {
        GithubError::Timeout
    } else {
        GithubError::Http(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enterprise_hostname_builds_v3_base_url() {
        let client = GithubClient::new("token".to_string(), Some("github.example.com"));
        assert_eq!(client.base_url, "https://github.example.com/api/v3");
    }

    #[test]
    fn test_public_github_base_url_is_default() {
        let client = GithubClient::new("token".to_string(), None);
        assert_eq!(client.base_url, GITHUB_API_URL);
    }

    #[test]
    fn test_api_commit_deserializes_author_date() {
        let json = r#"{
            "sha": "abc123",
            "commit": {
                "message": "fix: handle empty repos",
                "author": {"name": "Octo", "email": "o@example.com", "date": "2021-04-06T15:12:03Z"}
            }
        }"#;
        let commit: ApiCommit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.commit.message, "fix: handle empty repos");
        assert!(commit.commit.author.unwrap().date.is_some());
    }

    #[test]
    fn test_api_commit_tolerates_missing_author() {
        let json = r#"{"commit": {"message": "initial import"}}"#;
        let commit: ApiCommit = serde_json::from_str(json).unwrap();
        assert!(commit.commit.author.is_none());
    }

    #[test]
    fn test_github_user_deserializes_from_api_shape() {
        let json = r#"{
            "login": "octocat",
            "id": 1,
            "name": "The Octocat",
            "bio": null,
            "location": "San Francisco",
            "public_repos": 8,
            "followers": 3938,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "html_url": "https://github.com/octocat"
        }"#;
        let user: GithubUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.public_repos, 8);
        assert!(user.bio.is_none());
        assert!(user.created_at.is_some());
    }
}
