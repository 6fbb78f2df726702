//! Projects already listed on the site.

use serde::Serialize;
use sqlx::FromRow;
use oshub_core::types::{DbId, Timestamp};

/// A row from the `listed_projects` table, one per merged listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListedProject {
    pub id: DbId,
    pub name: String,
    /// Normalized `https://github.com/<owner>/<name>` URL.
    pub repo_url: String,
    pub organization: String,
    pub slug: String,
    pub created_at: Timestamp,
}
