//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod listed_project_repo;
pub mod user_repo;

pub use listed_project_repo::ListedProjectRepo;
pub use user_repo::UserRepo;
