use std::time::Duration;

/// Default delays between checks for a freshly created fork (1 s, 2 s, 4 s, 8 s).
const DEFAULT_FORK_READY_DELAYS_MS: [u64; 4] = [1_000, 2_000, 4_000, 8_000];

/// Where listings are submitted and how to reach GitHub.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// REST API base URL without trailing slash (default: `https://api.github.com`).
    pub api_url: String,
    /// Owner of the content repository receiving pull requests.
    pub content_owner: String,
    /// Name of the content repository.
    pub content_repo: String,
    /// Branch pull requests target (default: `main`).
    pub base_branch: String,
    /// Backoff schedule while waiting for a new fork to accept writes.
    pub fork_ready_delays: Vec<Duration>,
}

impl GitHubConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                  |
    /// |-----------------------|--------------------------|
    /// | `GITHUB_API_URL`      | `https://api.github.com` |
    /// | `CONTENT_REPO_OWNER`  | `Codesee-io`             |
    /// | `CONTENT_REPO_NAME`   | `opensourcehub`          |
    /// | `CONTENT_REPO_BRANCH` | `main`                   |
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.to_string())
        };

        Self {
            api_url: var("GITHUB_API_URL", "https://api.github.com")
                .trim_end_matches('/')
                .to_string(),
            content_owner: var("CONTENT_REPO_OWNER", "Codesee-io"),
            content_repo: var("CONTENT_REPO_NAME", "opensourcehub"),
            base_branch: var("CONTENT_REPO_BRANCH", "main"),
            fork_ready_delays: DEFAULT_FORK_READY_DELAYS_MS
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
        }
    }
}
