//! Builds a transient [`Project`] from uncommitted form values so the user
//! can see their listing before submitting it.

use crate::form_data::{repeatable_field_values, FormValues};
use crate::formatting::maybe_string_to_array;
use crate::markup::MarkupRenderer;
use crate::project::{FeaturedMap, Project, ProjectAttributes, ProjectBody};
use crate::types::Timestamp;

/// Placeholder used for organization and slug, which only exist once the
/// listing is merged.
pub const PREVIEW_PLACEHOLDER: &str = "preview";

/// Maintainer shown on previews; the real login is filled in server-side.
pub const PREVIEW_MAINTAINER: &str = "current user";

/// Assemble a preview project from raw form values.
///
/// Missing optional fields become blanks or empty lists. The form values are
/// only read.
pub fn build_preview(
    values: &FormValues,
    avatar_src: &str,
    renderer: &dyn MarkupRenderer,
    now: Timestamp,
) -> Project {
    let featured_map = values
        .get_non_empty("featuredMapUrl")
        .map(|url| FeaturedMap::from_form(url, values));

    let overview = renderer.render(values.get("overview").unwrap_or_default());
    let contributing = renderer.render(values.get("contributing").unwrap_or_default());

    let optional = |name: &str| values.get_non_empty(name).map(str::to_string);

    Project {
        attributes: ProjectAttributes {
            name: values.get("name").unwrap_or_default().to_string(),
            repo_url: values.get("repoUrl").unwrap_or_default().to_string(),
            description: values.get("description").map(str::to_string),
            tags: maybe_string_to_array(values.get("tags")),
            currently_seeking: maybe_string_to_array(values.get("currentlySeeking")),
            languages: maybe_string_to_array(values.get("languages")),
            featured_map,
            review_map_urls: repeatable_field_values("reviewMapUrls", values),
            avatar: avatar_src.to_string(),
            created: now.to_rfc3339(),
            maintainer: PREVIEW_MAINTAINER.to_string(),
            website_url: optional("websiteUrl"),
            twitter_url: optional("twitterUrl"),
            automated_dev_environment: optional("automatedDevEnvironment"),
            main_location: optional("mainLocation"),
            ideal_effort: optional("idealEffort"),
            is_mentorship_available: values.get("isMentorshipAvailable").is_some(),
        },
        body: ProjectBody {
            overview,
            contributing,
        },
        organization: PREVIEW_PLACEHOLDER.to_string(),
        slug: PREVIEW_PLACEHOLDER.to_string(),
    }
}
