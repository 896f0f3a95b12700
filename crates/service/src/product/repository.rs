use async_trait::async_trait;
use models::{Product, ValidProduct};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Keyed record store for products.
///
/// Absence is reported as data (`None` / `false`) and turned into
/// `ServiceError::NotFound` by the service; `Err` means the store itself failed.
/// Each call must be atomic on its own; no cross-record transactions exist.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    /// Store under a freshly generated id and return the stored record.
    async fn create(&self, product: ValidProduct) -> Result<Product, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Product>, ServiceError>;
    /// Replace name, price and stock of an existing record; the id never changes.
    async fn update(&self, id: Uuid, product: ValidProduct) -> Result<Option<Product>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}
