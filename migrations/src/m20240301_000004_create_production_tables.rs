use sea_orm_migration::prelude::*;

use super::m20240301_000003_create_work_orders_table::WorkOrders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductionManagements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductionManagements::ProductionStatusCode)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductionManagements::StartAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductionManagements::CompletedAt)
                            .timestamp()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ProductionManagements::TotalProductionQuantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductionManagements::ProductionFile)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ProductionManagements::ProductionStatus)
                            .string_len(32)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductionDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductionDetails::ProductionDetailCode)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductionDetails::ProductionStatusCode)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductionDetails::WorkOrderCode)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductionDetails::ProductionQuantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductionDetails::DefectQuantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductionDetails::CompletelyQuantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductionDetails::InspectionDate)
                            .date()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ProductionDetails::InspectionStatus)
                            .string_len(32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ProductionDetails::ProductionMemo)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ProductionDetails::ProductionStatus)
                            .string_len(32)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_production_details_report")
                            .from(
                                ProductionDetails::Table,
                                ProductionDetails::ProductionStatusCode,
                            )
                            .to(
                                ProductionManagements::Table,
                                ProductionManagements::ProductionStatusCode,
                            ),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_production_details_work_order")
                            .from(ProductionDetails::Table, ProductionDetails::WorkOrderCode)
                            .to(WorkOrders::Table, WorkOrders::WorkOrderCode),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DefectDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DefectDetails::DefectCode)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DefectDetails::ProductionDetailCode)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DefectDetails::DefectReason).string().not_null())
                    .col(ColumnDef::new(DefectDetails::DefectStatus).string().not_null())
                    .col(ColumnDef::new(DefectDetails::DefectFile).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_defect_details_detail")
                            .from(DefectDetails::Table, DefectDetails::ProductionDetailCode)
                            .to(
                                ProductionDetails::Table,
                                ProductionDetails::ProductionDetailCode,
                            ),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_production_managements_status")
                    .table(ProductionManagements::Table)
                    .col(ProductionManagements::ProductionStatus)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DefectDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductionDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductionManagements::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductionManagements {
    Table,
    ProductionStatusCode,
    StartAt,
    CompletedAt,
    TotalProductionQuantity,
    ProductionFile,
    ProductionStatus,
}

#[derive(DeriveIden)]
enum ProductionDetails {
    Table,
    ProductionDetailCode,
    ProductionStatusCode,
    WorkOrderCode,
    ProductionQuantity,
    DefectQuantity,
    CompletelyQuantity,
    InspectionDate,
    InspectionStatus,
    ProductionMemo,
    ProductionStatus,
}

#[derive(DeriveIden)]
enum DefectDetails {
    Table,
    DefectCode,
    ProductionDetailCode,
    DefectReason,
    DefectStatus,
    DefectFile,
}
