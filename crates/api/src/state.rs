use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{ProjectDirectory, PullRequestCreator, SessionResolver, SubmissionParser};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Collaborators sit behind trait objects so tests can substitute fakes.
/// Cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Turns a session token into the signed-in user.
    pub sessions: Arc<dyn SessionResolver>,
    /// Validates submissions and builds their content files.
    pub parser: Arc<dyn SubmissionParser>,
    /// Projects already listed on the site.
    pub projects: Arc<dyn ProjectDirectory>,
    /// Opens pull requests against the content repository.
    pub pull_requests: Arc<dyn PullRequestCreator>,
}
