use sea_orm_migration::prelude::*;

use super::m20240301_000001_create_master_tables::{Employees, Products};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkOrders::WorkOrderCode)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkOrders::WorkOrderDate).date().not_null())
                    .col(ColumnDef::new(WorkOrders::WorkWrittenDate).date().not_null())
                    .col(
                        ColumnDef::new(WorkOrders::OrderedQuantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkOrders::CompletedStatus)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkOrders::ProductCode).integer().not_null())
                    .col(ColumnDef::new(WorkOrders::EmployeeCode).integer().not_null())
                    .col(ColumnDef::new(WorkOrders::LineCode).integer().null())
                    .col(ColumnDef::new(WorkOrders::LineName).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_orders_product")
                            .from(WorkOrders::Table, WorkOrders::ProductCode)
                            .to(Products::Table, Products::ProductCode),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_orders_employee")
                            .from(WorkOrders::Table, WorkOrders::EmployeeCode)
                            .to(Employees::Table, Employees::EmployeeCode),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkOrders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum WorkOrders {
    Table,
    WorkOrderCode,
    WorkOrderDate,
    WorkWrittenDate,
    OrderedQuantity,
    CompletedStatus,
    ProductCode,
    EmployeeCode,
    LineCode,
    LineName,
}
