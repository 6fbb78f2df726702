//! Server-side parsing and validation of a project listing submission.
//!
//! Turns the raw multipart fields into either field-level validation errors
//! or the files that make up the listing in the content repository:
//!
//! - `projects/<owner>/<name>/index.md` -- YAML frontmatter plus the
//!   Overview and Contributing sections
//! - `projects/<owner>/<name>/avatar.<ext>` -- when an avatar was uploaded

use std::collections::BTreeMap;

use image::ImageFormat;
use serde::Serialize;
use url::Url;

use crate::avatar::{oversized_message, ACCEPTED_AVATAR_EXTENSIONS, MAX_AVATAR_SIZE_BYTES};
use crate::error::CoreError;
use crate::form_data::{repeatable_field_values, FormValues};
use crate::formatting::maybe_string_to_array;
use crate::project::{FeaturedMap, MAX_REVIEW_MAP_URLS};
use crate::repo_url::{normalize_repo_url, repo_owner_and_name};
use crate::types::Timestamp;

/// Field name to human-readable error, ordered by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Error key for a missing overview.
pub const OVERVIEW_ERROR_KEY: &str = "content";

/// Directory in the content repository holding all listings.
pub const PROJECTS_DIR: &str = "projects";

/// A file part received with the form.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Everything the browser sent.
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    pub values: FormValues,
    pub avatar: Option<UploadedFile>,
}

/// A file to commit to the content repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedFile {
    pub path: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ParsedListing {
    pub files: Vec<SubmittedFile>,
    /// Normalized repository URL.
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Invalid(FieldErrors),
    Parsed(ParsedListing),
}

/// Validate a submission and build its content files.
///
/// `maintainer` is the submitting user's GitHub login. Errors are only
/// returned for failures that are not the user's fault.
pub fn parse_list_project_form(
    raw: &RawSubmission,
    maintainer: &str,
    now: Timestamp,
) -> Result<ParseOutcome, CoreError> {
    let values = &raw.values;
    let mut errors = FieldErrors::new();

    let name = required(values, "name", "Please enter a project name", &mut errors);
    let description = required(values, "description", "Please enter a description", &mut errors);
    let overview = required(values, "overview", "Please describe your project", &mut errors);
    let contributing = required(
        values,
        "contributing",
        "Please explain how new contributors can get started",
        &mut errors,
    );

    let repo_url = match values.get_non_empty("repoUrl") {
        None => {
            errors.insert(
                "repoUrl".into(),
                "Please enter the URL of the GitHub repository".into(),
            );
            None
        }
        Some(input) => match normalize_repo_url(input) {
            Ok(url) => Some(url),
            Err(CoreError::Validation(msg)) => {
                errors.insert("repoUrl".into(), msg);
                None
            }
            Err(other) => return Err(other),
        },
    };

    let languages = required_list(
        values,
        "languages",
        "Please select at least one technology",
        &mut errors,
    );
    let currently_seeking = required_list(
        values,
        "currentlySeeking",
        "Please select at least one contributor role",
        &mut errors,
    );
    let tags = required_list(values, "tags", "Please select at least one subject", &mut errors);

    let website_url = optional_url(values, "websiteUrl", &mut errors);
    let twitter_url = optional_url(values, "twitterUrl", &mut errors);
    let featured_map = optional_url(values, "featuredMapUrl", &mut errors)
        .map(|url| FeaturedMap::from_form(url, values));

    let review_map_urls = repeatable_field_values("reviewMapUrls", values);
    if review_map_urls.len() > MAX_REVIEW_MAP_URLS {
        errors.insert(
            "reviewMapUrls".into(),
            format!("You can add up to {MAX_REVIEW_MAP_URLS} Review Maps"),
        );
    } else if review_map_urls.iter().any(|url| !is_http_url(url)) {
        errors.insert("reviewMapUrls".into(), "Please enter valid Review Map URLs".into());
    }

    let avatar = match raw.avatar.as_ref().filter(|file| !file.bytes.is_empty()) {
        None => None,
        Some(file) => match validate_avatar(file) {
            Ok(ext) => Some((ext, file)),
            Err(msg) => {
                errors.insert("avatar".into(), msg);
                None
            }
        },
    };

    if !errors.is_empty() {
        return Ok(ParseOutcome::Invalid(errors));
    }

    let Some(repo_url) = repo_url else {
        return Ok(ParseOutcome::Parsed(ParsedListing {
            files: Vec::new(),
            repo_url: None,
        }));
    };
    let repo = repo_owner_and_name(&repo_url)?;
    let dir = format!("{PROJECTS_DIR}/{}/{}", repo.owner, repo.name);

    let avatar_name = avatar.map(|(ext, _)| format!("avatar.{ext}"));

    let frontmatter = Frontmatter {
        name: name.unwrap_or_default(),
        repo_url: &repo_url,
        description: description.unwrap_or_default(),
        website_url,
        twitter_url,
        avatar: avatar_name.as_deref(),
        languages,
        currently_seeking,
        tags,
        featured_map,
        review_map_urls,
        automated_dev_environment: values.get_non_empty("automatedDevEnvironment"),
        main_location: values.get_non_empty("mainLocation"),
        ideal_effort: values.get_non_empty("idealEffort"),
        is_mentorship_available: values.get("isMentorshipAvailable").is_some(),
        created: now.format("%Y-%m-%d").to_string(),
        maintainer,
    };

    let index = render_index(
        &frontmatter,
        overview.unwrap_or_default(),
        contributing.unwrap_or_default(),
    )?;

    let mut files = vec![SubmittedFile {
        path: format!("{dir}/index.md"),
        content: index.into_bytes(),
    }];
    if let (Some(file_name), Some((_, upload))) = (avatar_name, avatar) {
        files.push(SubmittedFile {
            path: format!("{dir}/{file_name}"),
            content: upload.bytes.clone(),
        });
    }

    Ok(ParseOutcome::Parsed(ParsedListing {
        files,
        repo_url: Some(repo_url),
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Frontmatter<'a> {
    name: &'a str,
    repo_url: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    twitter_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<&'a str>,
    languages: Vec<String>,
    currently_seeking: Vec<String>,
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    featured_map: Option<FeaturedMap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    review_map_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    automated_dev_environment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    main_location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ideal_effort: Option<&'a str>,
    is_mentorship_available: bool,
    created: String,
    maintainer: &'a str,
}

fn render_index(
    frontmatter: &Frontmatter<'_>,
    overview: &str,
    contributing: &str,
) -> Result<String, CoreError> {
    let yaml = serde_yaml::to_string(frontmatter)
        .map_err(|e| CoreError::Internal(format!("Failed to serialize frontmatter: {e}")))?;
    Ok(format!(
        "---\n{yaml}---\n\n## Overview\n\n{}\n\n## Contributing\n\n{}\n",
        overview.trim(),
        contributing.trim()
    ))
}

fn required<'a>(
    values: &'a FormValues,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    let value = values.get_non_empty(field);
    if value.is_none() {
        errors.insert(error_key(field).to_string(), message.to_string());
    }
    value
}

/// Key a field's error is reported under. The overview editor shows its
/// error from `content`.
fn error_key(field: &str) -> &str {
    match field {
        "overview" => OVERVIEW_ERROR_KEY,
        other => other,
    }
}

fn required_list(
    values: &FormValues,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Vec<String> {
    let list = maybe_string_to_array(values.get(field));
    if list.is_empty() {
        errors.insert(field.to_string(), message.to_string());
    }
    list
}

fn optional_url(values: &FormValues, field: &str, errors: &mut FieldErrors) -> Option<String> {
    let value = values.get_non_empty(field)?;
    if is_http_url(value) {
        Some(value.to_string())
    } else {
        errors.insert(field.to_string(), "Please enter a valid URL".to_string());
        None
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

/// Check an uploaded avatar and return the extension to store it under.
fn validate_avatar(file: &UploadedFile) -> Result<&'static str, String> {
    let type_error = || "Please upload a PNG or JPEG image".to_string();

    let extension = file
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or_else(type_error)?;
    if !ACCEPTED_AVATAR_EXTENSIONS.contains(&extension.as_str()) {
        return Err(type_error());
    }

    if file.bytes.len() as u64 > MAX_AVATAR_SIZE_BYTES {
        return Err(oversized_message());
    }

    match image::guess_format(&file.bytes) {
        Ok(ImageFormat::Png) => Ok("png"),
        Ok(ImageFormat::Jpeg) => Ok("jpg"),
        _ => Err(type_error()),
    }
}
