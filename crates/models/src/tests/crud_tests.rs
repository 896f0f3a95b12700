use anyhow::Result;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::{product, validate_product, ProductDraft};

/// Insert, read back, replace and delete a product row.
#[tokio::test]
async fn test_product_crud() -> Result<()> {
    let Some(db) = super::test_db().await else { return Ok(()) };

    let id = Uuid::new_v4();
    let valid = validate_product(&ProductDraft::new("Widget", Decimal::new(999, 2), 5)).unwrap();
    let created = valid.into_active_model(id).insert(&db).await?;
    assert_eq!(created.id, id);
    assert_eq!(created.price, Decimal::new(999, 2));

    let found = product::Entity::find_by_id(id).one(&db).await?;
    assert_eq!(found.as_ref().map(|p| p.stock), Some(5));

    let replaced = validate_product(&ProductDraft::new("Widget", Decimal::new(1250, 2), 3)).unwrap();
    let updated = replaced.into_active_model(id).update(&db).await?;
    assert_eq!(updated.id, id);
    assert_eq!(updated.price, Decimal::new(1250, 2));
    assert_eq!(updated.stock, 3);

    let res = product::Entity::delete_by_id(id).exec(&db).await?;
    assert_eq!(res.rows_affected, 1);
    assert!(product::Entity::find_by_id(id).one(&db).await?.is_none());
    Ok(())
}

/// CHECK constraints reject rows that bypass validation.
#[tokio::test]
async fn test_negative_stock_rejected_by_schema() -> Result<()> {
    let Some(db) = super::test_db().await else { return Ok(()) };

    let row = product::ActiveModel {
        id: sea_orm::Set(Uuid::new_v4()),
        name: sea_orm::Set("Broken".into()),
        price: sea_orm::Set(Decimal::ONE),
        stock: sea_orm::Set(-1),
    };
    assert!(row.insert(&db).await.is_err());
    Ok(())
}
