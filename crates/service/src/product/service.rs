use std::sync::Arc;

use models::{validate_product, Product, ProductDraft, ValidProduct};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// Application service encapsulating product business rules.
/// Validates every write before the store sees it and turns absent ids into
/// `ServiceError::NotFound`.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Product, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| not_found(id))
    }

    /// Validate and store a new product; the store assigns its id.
    ///
    /// # Examples
    /// ```
    /// use service::product::{repo::InMemoryProductRepository, ProductService};
    /// use models::ProductDraft;
    /// use rust_decimal::Decimal;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::new()));
    /// let created = tokio_test::block_on(svc.create(ProductDraft::new("Widget", Decimal::new(999, 2), 5))).unwrap();
    /// let fetched = tokio_test::block_on(svc.get_by_id(created.id)).unwrap();
    /// assert_eq!(fetched, created);
    /// ```
    #[instrument(skip(self, candidate))]
    pub async fn create(&self, candidate: ProductDraft) -> Result<Product, ServiceError> {
        let valid = validated(&candidate)?;
        let created = self.repo.create(valid).await?;
        info!(id = %created.id, "product_created");
        Ok(created)
    }

    #[instrument(skip(self, candidate))]
    pub async fn update(&self, id: Uuid, candidate: ProductDraft) -> Result<Product, ServiceError> {
        let valid = validated(&candidate)?;
        let updated = self.repo.update(id, valid).await?.ok_or_else(|| not_found(id))?;
        info!(id = %updated.id, "product_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        info!(id = %id, "product_deleted");
        Ok(())
    }
}

fn validated(candidate: &ProductDraft) -> Result<ValidProduct, ServiceError> {
    validate_product(candidate).map_err(|violations| {
        debug!(violations = violations.len(), "product_rejected");
        ServiceError::Validation(violations)
    })
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::not_found(&format!("product {}", id))
}
