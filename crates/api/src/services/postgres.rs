use async_trait::async_trait;
use oshub_db::models::listed_project::ListedProject;
use oshub_db::repositories::{ListedProjectRepo, UserRepo};
use oshub_db::DbPool;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppResult;
use crate::middleware::session::CurrentUser;
use crate::services::{ProjectDirectory, SessionResolver};

/// Validates the session JWT, then loads the user it names.
pub struct JwtSessionResolver {
    pool: DbPool,
    jwt: JwtConfig,
}

impl JwtSessionResolver {
    pub fn new(pool: DbPool, jwt: JwtConfig) -> Self {
        Self { pool, jwt }
    }
}

#[async_trait]
impl SessionResolver for JwtSessionResolver {
    async fn resolve(&self, token: &str) -> AppResult<Option<CurrentUser>> {
        let claims = match validate_token(token, &self.jwt) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
                return Ok(None);
            }
        };

        let user = UserRepo::find_active_by_id(&self.pool, claims.sub).await?;
        Ok(user.map(|u| CurrentUser {
            id: u.id,
            login: u.github_login,
            name: u.name,
            github_token: u.github_token,
        }))
    }
}

/// Listed projects stored in Postgres.
pub struct PgProjectDirectory {
    pool: DbPool,
}

impl PgProjectDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectDirectory for PgProjectDirectory {
    async fn find_by_repo_url(&self, repo_url: &str) -> AppResult<Option<ListedProject>> {
        Ok(ListedProjectRepo::find_by_repo_url(&self.pool, repo_url).await?)
    }

    async fn health_check(&self) -> bool {
        oshub_db::health_check(&self.pool).await.is_ok()
    }
}
