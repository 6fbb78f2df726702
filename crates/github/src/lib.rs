//! GitHub client that turns a listing submission into a pull request
//! against the content repository.
//!
//! The submitting user's OAuth token is used throughout, so the fork, the
//! commits and the pull request all belong to them.

pub mod config;
pub mod pull_request;

pub use config::GitHubConfig;
pub use pull_request::{CreatedPullRequest, GitHubError, PullRequestClient};
