//! Storage abstractions for the service layer
//!
//! Reusable file-backed map store for deployments where a database is not
//! available.

pub mod json_map_store;
