use async_trait::async_trait;
use models::{product, Product, ValidProduct};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// SeaORM-backed repository over the `product` table.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::Name)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn create(&self, fields: ValidProduct) -> Result<Product, ServiceError> {
        let created = fields.into_active_model(Uuid::new_v4()).insert(&self.db).await?;
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        Ok(product::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update(&self, id: Uuid, fields: ValidProduct) -> Result<Option<Product>, ServiceError> {
        // Single UPDATE ... RETURNING; zero matched rows surfaces as RecordNotUpdated.
        match fields.into_active_model(id).update(&self.db).await {
            Ok(m) => Ok(Some(m)),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = product::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{validate_product, ProductDraft};
    use rust_decimal::Decimal;

    fn valid(name: &str, cents: i64, stock: i32) -> ValidProduct {
        validate_product(&ProductDraft::new(name, Decimal::new(cents, 2), stock)).unwrap()
    }

    #[tokio::test]
    async fn seaorm_repository_roundtrip() -> anyhow::Result<()> {
        let Some(db) = crate::test_support::get_db().await? else { return Ok(()) };
        let repo = SeaOrmProductRepository::new(db);

        let created = repo.create(valid("Widget", 999, 5)).await?;
        assert_eq!(repo.get(created.id).await?, Some(created.clone()));
        assert!(repo.list().await?.iter().any(|p| p.id == created.id));

        let updated = repo.update(created.id, valid("Widget", 1250, 3)).await?.expect("row exists");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.price, Decimal::new(1250, 2));
        assert_eq!(updated.stock, 3);

        assert!(repo.delete(created.id).await?);
        assert!(!repo.delete(created.id).await?);
        assert_eq!(repo.get(created.id).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_update_of_missing_row_is_none() -> anyhow::Result<()> {
        let Some(db) = crate::test_support::get_db().await? else { return Ok(()) };
        let repo = SeaOrmProductRepository::new(db);
        assert_eq!(repo.update(Uuid::new_v4(), valid("Ghost", 100, 1)).await?, None);
        Ok(())
    }
}
