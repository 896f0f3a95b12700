//! Shared building blocks for the product API crates: logging setup and
//! small response types.

pub mod types;
pub mod utils;
