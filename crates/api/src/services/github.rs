use async_trait::async_trait;
use oshub_core::submission::SubmittedFile;
use oshub_github::{CreatedPullRequest, PullRequestClient};

use crate::error::AppResult;
use crate::middleware::session::CurrentUser;
use crate::services::PullRequestCreator;

/// Opens pull requests with the submitting user's GitHub token.
pub struct GitHubPullRequests {
    client: PullRequestClient,
}

impl GitHubPullRequests {
    pub fn new(client: PullRequestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PullRequestCreator for GitHubPullRequests {
    async fn create_pull_request(
        &self,
        user: &CurrentUser,
        files: &[SubmittedFile],
        repo_owner: &str,
        repo_name: &str,
    ) -> AppResult<CreatedPullRequest> {
        Ok(self
            .client
            .create_pull_request(&user.github_token, files, repo_owner, repo_name)
            .await?)
    }
}
