//! Repository for the `users` table.

use sqlx::PgPool;
use oshub_core::types::DbId;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, github_login, name, github_token, is_active, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Find an active user by internal ID.
    pub async fn find_active_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND is_active");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
