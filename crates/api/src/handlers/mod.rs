pub mod list_project;
