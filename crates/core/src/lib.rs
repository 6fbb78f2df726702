//! Domain logic for listing projects on Open Source Hub.
//!
//! Everything here is pure: no network, no database. The API crate wires
//! these pieces to HTTP, Postgres and GitHub.

pub mod avatar;
pub mod confirmation;
pub mod controller;
pub mod error;
pub mod form_data;
pub mod formatting;
pub mod markup;
pub mod preview;
pub mod project;
pub mod repo_url;
pub mod submission;
pub mod tags;
pub mod types;
