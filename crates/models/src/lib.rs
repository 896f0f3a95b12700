pub mod errors;
pub mod db;
pub mod product;
pub mod validation;

pub use product::{Product, ProductDraft, ValidProduct};
pub use validation::{validate_product, FieldViolation};

#[cfg(test)]
mod tests;
