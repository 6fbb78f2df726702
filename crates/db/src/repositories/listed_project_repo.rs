//! Repository for the `listed_projects` table.

use sqlx::PgPool;

use crate::models::listed_project::ListedProject;

const COLUMNS: &str = "id, name, repo_url, organization, slug, created_at";

pub struct ListedProjectRepo;

impl ListedProjectRepo {
    /// Find the listing for a repository URL, ignoring case.
    ///
    /// `repo_url` should already be normalized; GitHub owner and repository
    /// names are case-insensitive, so the comparison is too.
    pub async fn find_by_repo_url(
        pool: &PgPool,
        repo_url: &str,
    ) -> Result<Option<ListedProject>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM listed_projects WHERE lower(repo_url) = lower($1)");
        sqlx::query_as::<_, ListedProject>(&query)
            .bind(repo_url)
            .fetch_optional(pool)
            .await
    }
}
