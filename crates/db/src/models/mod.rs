//! Row models.

pub mod listed_project;
pub mod user;
