//! Fork, commit and open a pull request through the GitHub REST API.
//!
//! [`PullRequestClient::create_pull_request`] runs these calls in order:
//!
//! 1. `POST /repos/{content}/forks` -- fork the content repository
//! 2. `GET  /repos/{content}/git/ref/heads/{base}` -- base branch head
//! 3. `POST /repos/{fork}/git/refs` -- new branch on the fork, retried
//!    while the fork is still being created
//! 4. `PUT  /repos/{fork}/contents/{path}` -- one commit per file
//! 5. `POST /repos/{content}/pulls` -- the pull request

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use oshub_core::submission::SubmittedFile;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::GitHubConfig;

const USER_AGENT: &str = concat!("oshub/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GitHub returned a non-2xx status code.
    #[error("GitHub API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The fork never became writable within the retry budget.
    #[error("Fork {0} was not ready after all retries")]
    ForkNotReady(String),
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RepoOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct Fork {
    full_name: String,
    owner: RepoOwner,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    html_url: String,
    number: u64,
}

/// The pull request opened for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    pub url: String,
    pub number: u64,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the content repository's pull request workflow.
pub struct PullRequestClient {
    client: reqwest::Client,
    config: GitHubConfig,
}

impl PullRequestClient {
    pub fn new(config: GitHubConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Open a pull request adding `files` for the `repo_owner/repo_name`
    /// listing, acting as the holder of `token`.
    pub async fn create_pull_request(
        &self,
        token: &str,
        files: &[SubmittedFile],
        repo_owner: &str,
        repo_name: &str,
    ) -> Result<CreatedPullRequest, GitHubError> {
        let upstream = format!("{}/{}", self.config.content_owner, self.config.content_repo);

        let fork: Fork = self
            .send(
                self.client
                    .post(self.url(&format!("/repos/{upstream}/forks")))
                    .json(&serde_json::json!({ "default_branch_only": true })),
                token,
            )
            .await?;
        tracing::debug!(fork = %fork.full_name, "Fork ready for listing");

        let base: GitRef = self
            .send(
                self.client.get(self.url(&format!(
                    "/repos/{upstream}/git/ref/heads/{}",
                    self.config.base_branch
                ))),
                token,
            )
            .await?;

        let branch = branch_name(repo_owner, repo_name, chrono::Utc::now().timestamp());
        self.create_branch(token, &fork.full_name, &branch, &base.object.sha)
            .await?;

        for file in files {
            let body = serde_json::json!({
                "message": format!("Add {}", file.path),
                "content": BASE64.encode(&file.content),
                "branch": branch,
            });
            let _: serde_json::Value = self
                .send(
                    self.client
                        .put(self.url(&format!(
                            "/repos/{}/contents/{}",
                            fork.full_name, file.path
                        )))
                        .json(&body),
                    token,
                )
                .await?;
        }

        let body = serde_json::json!({
            "title": format!("Add {repo_owner}/{repo_name}"),
            "head": format!("{}:{branch}", fork.owner.login),
            "base": self.config.base_branch,
            "body": format!(
                "This PR lists https://github.com/{repo_owner}/{repo_name} on Open Source Hub."
            ),
            "maintainer_can_modify": true,
        });
        let pr: PullRequestPayload = self
            .send(
                self.client
                    .post(self.url(&format!("/repos/{upstream}/pulls")))
                    .json(&body),
                token,
            )
            .await?;

        tracing::info!(
            pr_number = pr.number,
            pr_url = %pr.html_url,
            repo = %format!("{repo_owner}/{repo_name}"),
            "Pull request opened"
        );

        Ok(CreatedPullRequest {
            url: pr.html_url,
            number: pr.number,
        })
    }

    /// Create `branch` on the fork, waiting for GitHub to finish the fork.
    ///
    /// A new fork answers 404/409/422 until its git data is copied. A 422
    /// saying the reference already exists is a real conflict and is not
    /// retried.
    async fn create_branch(
        &self,
        token: &str,
        fork: &str,
        branch: &str,
        sha: &str,
    ) -> Result<(), GitHubError> {
        let body = serde_json::json!({
            "ref": format!("refs/heads/{branch}"),
            "sha": sha,
        });
        let url = self.url(&format!("/repos/{fork}/git/refs"));

        let mut delays = self.config.fork_ready_delays.iter();
        loop {
            let result: Result<serde_json::Value, GitHubError> = self
                .send(self.client.post(&url).json(&body), token)
                .await;

            match result {
                Ok(_) => return Ok(()),
                Err(GitHubError::Api { status, ref body }) if is_fork_pending(status, body) => {
                    let Some(delay) = delays.next() else {
                        tracing::error!(fork, "Fork not ready after all retries");
                        return Err(GitHubError::ForkNotReady(fork.to_string()));
                    };
                    tracing::warn!(fork, status, ?delay, "Fork not ready yet, retrying");
                    tokio::time::sleep(*delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        token: &str,
    ) -> Result<T, GitHubError> {
        let response = request
            .bearer_auth(token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

const REFERENCE_EXISTS: &str = "Reference already exists";

fn is_fork_pending(status: u16, body: &str) -> bool {
    match StatusCode::from_u16(status) {
        Ok(StatusCode::NOT_FOUND | StatusCode::CONFLICT) => true,
        Ok(StatusCode::UNPROCESSABLE_ENTITY) => !body.contains(REFERENCE_EXISTS),
        _ => false,
    }
}

/// Branch name for a listing: `list-<owner>-<name>-<unix time>`, lowercased,
/// with anything outside `[a-z0-9-]` replaced by `-`.
fn branch_name(repo_owner: &str, repo_name: &str, timestamp: i64) -> String {
    format!("list-{repo_owner}-{repo_name}-{timestamp}")
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}
