//! The project listing as displayed on the site.

use serde::{Deserialize, Serialize};

use crate::form_data::FormValues;

/// Maximum number of review map URLs a listing may carry.
pub const MAX_REVIEW_MAP_URLS: usize = 5;

/// A CodeSee map highlighted on the project page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedMap {
    pub url: String,
    pub description: String,
}

impl FeaturedMap {
    /// Pair `url` with the form's trimmed `featuredMapDescription`.
    pub fn from_form(url: impl Into<String>, values: &FormValues) -> Self {
        Self {
            url: url.into(),
            description: values
                .get_non_empty("featuredMapDescription")
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAttributes {
    pub name: String,
    pub repo_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub currently_seeking: Vec<String>,
    pub languages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_map: Option<FeaturedMap>,
    pub review_map_urls: Vec<String>,
    pub avatar: String,
    /// RFC 3339 creation time.
    pub created: String,
    pub maintainer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automated_dev_environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_effort: Option<String>,
    pub is_mentorship_available: bool,
}

/// Rendered body sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBody {
    pub overview: String,
    pub contributing: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub attributes: ProjectAttributes,
    pub body: ProjectBody,
    pub organization: String,
    pub slug: String,
}
