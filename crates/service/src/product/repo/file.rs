use std::path::PathBuf;

use async_trait::async_trait;
use models::{Product, ValidProduct};
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;
use crate::storage::json_map_store::JsonMapStore;

/// File store: the whole catalog persisted as one JSON object keyed by id.
pub struct JsonFileProductRepository {
    store: JsonMapStore<Uuid, Product>,
}

impl JsonFileProductRepository {
    /// Open (or create) the store file.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let path = path.into();
        let store = JsonMapStore::open(path.clone()).await?;
        info!(path = %path.display(), products = store.len().await, "file product store ready");
        Ok(Self { store })
    }
}

#[async_trait]
impl ProductRepository for JsonFileProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.store.values().await)
    }

    async fn create(&self, product: ValidProduct) -> Result<Product, ServiceError> {
        self.store
            .mutate(|m| {
                let mut id = Uuid::new_v4();
                while m.contains_key(&id) {
                    id = Uuid::new_v4();
                }
                let stored = product.into_model(id);
                m.insert(id, stored.clone());
                stored
            })
            .await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        Ok(self.store.get(&id).await)
    }

    async fn update(&self, id: Uuid, product: ValidProduct) -> Result<Option<Product>, ServiceError> {
        self.store
            .mutate(|m| {
                m.get_mut(&id).map(|slot| {
                    *slot = product.into_model(id);
                    slot.clone()
                })
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.store.mutate(|m| m.remove(&id).is_some()).await
    }
}
