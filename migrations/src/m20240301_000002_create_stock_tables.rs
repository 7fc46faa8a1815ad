use sea_orm_migration::prelude::*;

use super::m20240301_000001_create_master_tables::{Products, Warehouses};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stocks::StockCode)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stocks::ProductCode).integer().not_null())
                    .col(ColumnDef::new(Stocks::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(Stocks::IsDelete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Stocks::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stocks_product")
                            .from(Stocks::Table, Stocks::ProductCode)
                            .to(Products::Table, Products::ProductCode),
                    )
                    .to_owned(),
            )
            .await?;

        // Storage rows are never hard-deleted; `is_delete` marks withdrawal.
        manager
            .create_table(
                Table::create()
                    .table(Storages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Storages::StorageCode)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Storages::InitialQuantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Storages::DestroyQuantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Storages::ActualQuantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Storages::IsDelete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Storages::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Storages::UpdatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Storages::StockCode).integer().not_null())
                    .col(ColumnDef::new(Storages::WarehouseCode).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_storages_stock")
                            .from(Storages::Table, Storages::StockCode)
                            .to(Stocks::Table, Stocks::StockCode),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_storages_warehouse")
                            .from(Storages::Table, Storages::WarehouseCode)
                            .to(Warehouses::Table, Warehouses::WarehouseCode),
                    )
                    .check(Expr::col(Storages::DestroyQuantity).gte(0))
                    .check(
                        Expr::col(Storages::DestroyQuantity)
                            .lte(Expr::col(Storages::InitialQuantity)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_storages_active_quantity")
                    .table(Storages::Table)
                    .col(Storages::IsDelete)
                    .col(Storages::ActualQuantity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Storages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stocks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Stocks {
    Table,
    StockCode,
    ProductCode,
    Quantity,
    IsDelete,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Storages {
    Table,
    StorageCode,
    InitialQuantity,
    DestroyQuantity,
    ActualQuantity,
    IsDelete,
    CreatedAt,
    UpdatedAt,
    StockCode,
    WarehouseCode,
}
