//! Response payloads shared by the listing handlers.

use oshub_core::submission::FieldErrors;
use oshub_core::tags::{self, TagCategory, TagOption};
use serde::Serialize;

/// `{ "validationErrors": { field: message } }` answer to a rejected submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorsResponse {
    pub validation_errors: FieldErrors,
}

/// Everything a client needs to render the listing form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectForm {
    pub languages: Vec<TagOption>,
    pub currently_seeking: Vec<TagOption>,
    pub tags: Vec<TagOption>,
    pub max_avatar_size_bytes: u64,
    pub accepted_avatar_extensions: &'static [&'static str],
    pub max_review_map_urls: usize,
}

impl ListProjectForm {
    pub fn new() -> Self {
        Self {
            languages: tags::options(TagCategory::Languages),
            currently_seeking: tags::options(TagCategory::CurrentlySeeking),
            tags: tags::options(TagCategory::Tags),
            max_avatar_size_bytes: oshub_core::avatar::MAX_AVATAR_SIZE_BYTES,
            accepted_avatar_extensions: oshub_core::avatar::ACCEPTED_AVATAR_EXTENSIONS,
            max_review_map_urls: oshub_core::project::MAX_REVIEW_MAP_URLS,
        }
    }
}

impl Default for ListProjectForm {
    fn default() -> Self {
        Self::new()
    }
}
