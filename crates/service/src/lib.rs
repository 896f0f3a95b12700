//! Service layer providing product CRUD on top of `models`.
//! - Separates business rules (validation, existence checks) from data access.
//! - Record stores sit behind the `ProductRepository` trait: Postgres via SeaORM,
//!   a JSON file, or process memory.

pub mod errors;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod product;

pub use product::{ProductRepository, ProductService};
