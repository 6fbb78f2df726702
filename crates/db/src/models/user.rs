//! Signed-in user model.

use sqlx::FromRow;
use oshub_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the GitHub OAuth token -- NEVER serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub github_login: String,
    pub name: Option<String>,
    pub github_token: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
