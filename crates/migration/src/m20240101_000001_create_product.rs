//! Create `product` table.
//! CHECK constraints mirror the field rules enforced before every write.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(uuid(Product::Id).primary_key())
                    .col(string_len(Product::Name, 255).not_null())
                    .col(
                        decimal_len(Product::Price, 19, 4)
                            .not_null()
                            .check(Expr::col(Product::Price).gte(0)),
                    )
                    .col(
                        integer(Product::Stock)
                            .not_null()
                            .check(Expr::col(Product::Stock).gte(0)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_name")
                    .table(Product::Table)
                    .col(Product::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Name,
    Price,
    Stock,
}
