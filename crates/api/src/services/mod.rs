//! Collaborators the listing handlers depend on.
//!
//! Production implementations live in [`postgres`], [`github`] and
//! [`form`]; the integration tests provide in-memory fakes.

pub mod form;
pub mod github;
pub mod postgres;

use async_trait::async_trait;
use oshub_core::error::CoreError;
use oshub_core::submission::{ParseOutcome, RawSubmission, SubmittedFile};
use oshub_core::types::Timestamp;
use oshub_db::models::listed_project::ListedProject;
use oshub_github::CreatedPullRequest;

use crate::error::AppResult;
use crate::middleware::session::CurrentUser;

/// Resolves a session token to the signed-in user.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `Ok(None)` when the token is invalid, expired or names no active user.
    async fn resolve(&self, token: &str) -> AppResult<Option<CurrentUser>>;
}

/// Lookup of projects already listed on the site.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    async fn find_by_repo_url(&self, repo_url: &str) -> AppResult<Option<ListedProject>>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> bool;
}

/// Opens the pull request that adds a listing to the content repository.
#[async_trait]
pub trait PullRequestCreator: Send + Sync {
    async fn create_pull_request(
        &self,
        user: &CurrentUser,
        files: &[SubmittedFile],
        repo_owner: &str,
        repo_name: &str,
    ) -> AppResult<CreatedPullRequest>;
}

/// Validates a submission and builds the listing's content files.
pub trait SubmissionParser: Send + Sync {
    /// `maintainer` is the submitting user's GitHub login.
    fn parse(
        &self,
        raw: &RawSubmission,
        maintainer: &str,
        now: Timestamp,
    ) -> Result<ParseOutcome, CoreError>;
}
