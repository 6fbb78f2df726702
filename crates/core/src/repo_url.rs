//! GitHub repository URL normalization and decomposition.

use url::Url;

use crate::error::CoreError;

const GITHUB_HOSTS: &[&str] = &["github.com", "www.github.com"];

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

/// Normalize a user-entered repository URL to `https://github.com/<owner>/<name>`.
///
/// Accepts `http`/`https`, an optional `www.` prefix, a trailing slash, a
/// `.git` suffix, and extra path segments (`/tree/main`), which are dropped.
/// Owner and name keep their original casing.
pub fn normalize_repo_url(input: &str) -> Result<String, CoreError> {
    let repo = parse(input)?;
    Ok(format!("https://github.com/{}/{}", repo.owner, repo.name))
}

/// Split a repository URL into owner and name.
pub fn repo_owner_and_name(repo_url: &str) -> Result<RepoRef, CoreError> {
    parse(repo_url)
}

fn parse(input: &str) -> Result<RepoRef, CoreError> {
    let url = Url::parse(input.trim())
        .map_err(|_| CoreError::Validation(format!("'{input}' is not a valid URL")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(CoreError::Validation(
            "Repository URL must use http or https".into(),
        ));
    }

    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if !GITHUB_HOSTS.contains(&host.as_str()) {
        return Err(CoreError::Validation(
            "Repository URL must point to github.com".into(),
        ));
    }

    let mut segments = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty());

    let owner = segments.next();
    let name = segments.next().map(|n| n.strip_suffix(".git").unwrap_or(n));

    let (Some(owner), Some(name)) = (owner, name) else {
        return Err(CoreError::Validation(
            "Repository URL must look like https://github.com/<owner>/<repository>".into(),
        ));
    };

    // Segments are still percent-encoded here, so `%` never passes.
    if !is_valid_owner(owner) || !is_valid_name(name) {
        return Err(CoreError::Validation(
            "Repository URL contains an invalid owner or repository name".into(),
        ));
    }

    Ok(RepoRef {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

/// GitHub user and organization names: ASCII letters, digits and `-`.
fn is_valid_owner(owner: &str) -> bool {
    !owner.is_empty() && owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Repository names: ASCII letters, digits, `.`, `_` and `-`, but not `.` or `..`.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
