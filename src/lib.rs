//! CRUD API server for a small academic-journal workflow.
//!
//! Thin HTTP resource layer over a keyed store: people with journal roles,
//! text pages, and manuscript records, each with its own CRUD route family,
//! plus discovery (`/endpoints`), liveness (`/hello`), and journal metadata
//! (`/title`) endpoints.

pub mod api;
pub mod db;
pub mod forms;
pub mod models;
