use std::collections::HashMap;

use async_trait::async_trait;
use models::{Product, ValidProduct};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn create(&self, product: ValidProduct) -> Result<Product, ServiceError> {
        let mut products = self.products.write().await;
        let mut id = Uuid::new_v4();
        while products.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let stored = product.into_model(id);
        products.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, product: ValidProduct) -> Result<Option<Product>, ServiceError> {
        let mut products = self.products.write().await;
        Ok(products.get_mut(&id).map(|slot| {
            *slot = product.into_model(id);
            slot.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}
