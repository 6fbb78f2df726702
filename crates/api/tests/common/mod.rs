#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use oshub_api::auth::jwt::JwtConfig;
use oshub_api::config::ServerConfig;
use oshub_api::error::{AppError, AppResult};
use oshub_api::middleware::session::CurrentUser;
use oshub_api::router::build_app_router;
use oshub_api::services::form::ListProjectFormParser;
use oshub_api::services::{ProjectDirectory, PullRequestCreator, SessionResolver, SubmissionParser};
use oshub_api::state::AppState;
use oshub_core::error::CoreError;
use oshub_core::submission::{ParseOutcome, ParsedListing, RawSubmission, SubmittedFile};
use oshub_core::types::Timestamp;
use oshub_db::models::listed_project::ListedProject;
use oshub_github::{CreatedPullRequest, GitHubError};

pub const VALID_TOKEN: &str = "valid-session-token";
pub const PR_URL: &str = "https://github.com/Codesee-io/opensourcehub/pull/7";
pub const LISTED_REPO: &str = "https://github.com/tokio-rs/axum";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 2 * 1024 * 1024,
        session_cookie: "session".to_string(),
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
        },
    }
}

pub fn octocat() -> CurrentUser {
    CurrentUser {
        id: 1,
        login: "octocat".to_string(),
        name: Some("The Octocat".to_string()),
        github_token: "gho_octocat".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Fake collaborators
// ---------------------------------------------------------------------------

/// Sessions keyed by token.
#[derive(Default)]
pub struct FakeSessions {
    pub users: HashMap<String, CurrentUser>,
}

#[async_trait]
impl SessionResolver for FakeSessions {
    async fn resolve(&self, token: &str) -> AppResult<Option<CurrentUser>> {
        Ok(self.users.get(token).cloned())
    }
}

/// Directory holding a fixed set of listed repository URLs.
#[derive(Default)]
pub struct FakeDirectory {
    pub listed: Vec<String>,
    pub lookups: AtomicUsize,
}

impl FakeDirectory {
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectDirectory for FakeDirectory {
    async fn find_by_repo_url(&self, repo_url: &str) -> AppResult<Option<ListedProject>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .listed
            .iter()
            .position(|url| url.eq_ignore_ascii_case(repo_url))
            .map(|i| ListedProject {
                id: i as i64 + 1,
                name: "axum".to_string(),
                repo_url: self.listed[i].clone(),
                organization: "tokio-rs".to_string(),
                slug: "axum".to_string(),
                created_at: chrono::Utc::now(),
            }))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// One recorded `create_pull_request` call.
#[derive(Debug, Clone)]
pub struct PullRequestCall {
    pub login: String,
    pub github_token: String,
    pub paths: Vec<String>,
    pub repo_owner: String,
    pub repo_name: String,
}

/// Records pull request calls, optionally failing them.
#[derive(Default)]
pub struct RecordingPullRequests {
    pub calls: Mutex<Vec<PullRequestCall>>,
    pub fail: bool,
}

impl RecordingPullRequests {
    pub fn calls(&self) -> Vec<PullRequestCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PullRequestCreator for RecordingPullRequests {
    async fn create_pull_request(
        &self,
        user: &CurrentUser,
        files: &[SubmittedFile],
        repo_owner: &str,
        repo_name: &str,
    ) -> AppResult<CreatedPullRequest> {
        self.calls.lock().unwrap().push(PullRequestCall {
            login: user.login.clone(),
            github_token: user.github_token.clone(),
            paths: files.iter().map(|f| f.path.clone()).collect(),
            repo_owner: repo_owner.to_string(),
            repo_name: repo_name.to_string(),
        });

        if self.fail {
            return Err(AppError::GitHub(GitHubError::Api {
                status: 403,
                body: "Resource not accessible by integration".to_string(),
            }));
        }

        Ok(CreatedPullRequest {
            url: PR_URL.to_string(),
            number: 7,
        })
    }
}

/// Accepts every submission but loses the repository URL.
pub struct UrlLosingParser;

impl SubmissionParser for UrlLosingParser {
    fn parse(
        &self,
        _raw: &RawSubmission,
        _maintainer: &str,
        _now: Timestamp,
    ) -> Result<ParseOutcome, CoreError> {
        Ok(ParseOutcome::Parsed(ParsedListing {
            files: Vec::new(),
            repo_url: None,
        }))
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The router plus handles on its fakes for assertions.
pub struct TestApp {
    pub router: Router,
    pub directory: Arc<FakeDirectory>,
    pub pull_requests: Arc<RecordingPullRequests>,
}

/// Build the full application router with fake collaborators.
///
/// `VALID_TOKEN` resolves to [`octocat`]; [`LISTED_REPO`] is already listed.
pub fn build_test_app() -> TestApp {
    build_test_app_with(RecordingPullRequests::default())
}

pub fn build_test_app_with(pull_requests: RecordingPullRequests) -> TestApp {
    build_test_app_from(pull_requests, Arc::new(ListProjectFormParser))
}

pub fn build_test_app_from(
    pull_requests: RecordingPullRequests,
    parser: Arc<dyn SubmissionParser>,
) -> TestApp {
    let config = test_config();

    let mut sessions = FakeSessions::default();
    sessions.users.insert(VALID_TOKEN.to_string(), octocat());

    let directory = Arc::new(FakeDirectory {
        listed: vec![LISTED_REPO.to_string()],
        ..Default::default()
    });
    let pull_requests = Arc::new(pull_requests);

    let state = AppState {
        config: Arc::new(config.clone()),
        sessions: Arc::new(sessions),
        parser,
        projects: directory.clone(),
        pull_requests: pull_requests.clone(),
    };

    TestApp {
        router: build_app_router(state, &config),
        directory,
        pull_requests,
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub const BOUNDARY: &str = "oshub-test-boundary";

/// Build a `multipart/form-data` body from text fields and an optional avatar.
pub fn multipart_body(fields: &[(&str, &str)], avatar: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = avatar {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Fields of a complete, valid listing for a repository not yet listed.
pub fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Open Source Hub"),
        ("repoUrl", "https://github.com/Codesee-io/opensourcehub"),
        ("description", "Find projects to contribute to"),
        ("languages", "TypeScript,React"),
        ("currentlySeeking", "Frontend"),
        ("tags", "Developer tools"),
        ("overview", "An overview"),
        ("contributing", "Read CONTRIBUTING.md"),
    ]
}

/// Send a GET request, optionally with a bearer token.
pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// POST a multipart listing to `/list-project`, optionally with a bearer token.
pub async fn post_listing(app: Router, body: Vec<u8>, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/list-project")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
