use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored product row. Serialized as `{id, name, price, stock}` with the
/// price rendered as an exact decimal string.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub type Product = Model;

/// Candidate fields as submitted by a client. Every field is optional so a
/// missing value surfaces as a field violation instead of a parse failure;
/// any `id` in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock: Option<i32>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal, stock: i32) -> Self {
        Self { name: Some(name.into()), price: Some(price), stock: Some(stock) }
    }
}

/// Product fields that passed validation. Only obtainable through
/// [`crate::validation::validate_product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProduct {
    pub(crate) name: String,
    pub(crate) price: Decimal,
    pub(crate) stock: i32,
}

impl ValidProduct {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock(&self) -> i32 {
        self.stock
    }

    /// Attach an identifier, producing the record to store.
    pub fn into_model(self, id: Uuid) -> Model {
        Model { id, name: self.name, price: self.price, stock: self.stock }
    }

    /// Active model with every column set, for inserts and full replacement.
    pub fn into_active_model(self, id: Uuid) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            name: Set(self.name),
            price: Set(self.price),
            stock: Set(self.stock),
        }
    }
}
