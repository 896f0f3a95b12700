//! Field rules applied to every product write before it reaches a store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::{ProductDraft, ValidProduct};

pub const NAME_REQUIRED: &str = "name required";
pub const PRICE_NON_NEGATIVE: &str = "price must be non-negative";
pub const STOCK_NON_NEGATIVE: &str = "stock must be non-negative";
pub const NAME_TOO_LONG: &str = "name must be at most 255 characters";
pub const PRICE_SCALE_EXCEEDED: &str = "price must have at most 4 decimal places";
pub const PRICE_TOO_LARGE: &str = "price must be less than 1000000000000000";

/// Column limits of the `product` table: `VARCHAR(255)` and `NUMERIC(19, 4)`.
pub const NAME_MAX_CHARS: usize = 255;
pub const PRICE_MAX_SCALE: u32 = 4;
const PRICE_INTEGER_DIGITS: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: &str) -> Self {
        Self { field: field.to_string(), message: message.to_string() }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a candidate against the product field rules.
///
/// Collects every violation rather than stopping at the first one, at most
/// one per field. A blank name counts as missing; the name is otherwise kept
/// exactly as given. Accepted values fit every storage backend unchanged.
pub fn validate_product(draft: &ProductDraft) -> Result<ValidProduct, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let name = match draft.name.as_deref() {
        Some(n) if n.trim().is_empty() => Err(NAME_REQUIRED),
        Some(n) if n.chars().count() > NAME_MAX_CHARS => Err(NAME_TOO_LONG),
        Some(n) => Ok(n.to_string()),
        None => Err(NAME_REQUIRED),
    };
    let price = match draft.price {
        None => Err(PRICE_NON_NEGATIVE),
        Some(p) if p < Decimal::ZERO => Err(PRICE_NON_NEGATIVE),
        Some(p) if p.normalize().scale() > PRICE_MAX_SCALE => Err(PRICE_SCALE_EXCEEDED),
        Some(p) if p >= price_limit() => Err(PRICE_TOO_LARGE),
        Some(p) => Ok(p),
    };
    let stock = match draft.stock {
        Some(s) if s >= 0 => Ok(s),
        _ => Err(STOCK_NON_NEGATIVE),
    };

    let name = record("name", name, &mut violations);
    let price = record("price", price, &mut violations);
    let stock = record("stock", stock, &mut violations);

    match (name, price, stock) {
        (Some(name), Some(price), Some(stock)) => Ok(ValidProduct { name, price, stock }),
        _ => Err(violations),
    }
}

fn record<T>(field: &str, checked: Result<T, &str>, out: &mut Vec<FieldViolation>) -> Option<T> {
    match checked {
        Ok(value) => Some(value),
        Err(message) => {
            out.push(FieldViolation::new(field, message));
            None
        }
    }
}

fn price_limit() -> Decimal {
    Decimal::from(10i64.pow(PRICE_INTEGER_DIGITS))
}
