use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::production_management::ProductionStatusType;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionStatusType {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "PASSED")]
    Passed,
    #[sea_orm(string_value = "FAILED")]
    Failed,
}

/// Output of one work order within a production report.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "production_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub production_detail_code: i32,
    pub production_status_code: i32,
    pub work_order_code: i32,
    pub production_quantity: i32,
    pub defect_quantity: i32,
    pub completely_quantity: i32,
    pub inspection_date: Option<NaiveDate>,
    pub inspection_status: Option<InspectionStatusType>,
    #[sea_orm(column_type = "Text", nullable)]
    pub production_memo: Option<String>,
    pub production_status: ProductionStatusType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::production_management::Entity",
        from = "Column::ProductionStatusCode",
        to = "super::production_management::Column::ProductionStatusCode"
    )]
    ProductionManagement,
    #[sea_orm(
        belongs_to = "super::work_order::Entity",
        from = "Column::WorkOrderCode",
        to = "super::work_order::Column::WorkOrderCode"
    )]
    WorkOrder,
    #[sea_orm(has_many = "super::defect_detail::Entity")]
    DefectDetails,
}

impl Related<super::production_management::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionManagement.def()
    }
}

impl Related<super::work_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrder.def()
    }
}

impl Related<super::defect_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefectDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
