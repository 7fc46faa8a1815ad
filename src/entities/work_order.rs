use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

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
pub enum WorkOrderStatusType {
    #[sea_orm(string_value = "ORDERED")]
    Ordered,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "DONE")]
    Done,
}

/// A scheduled unit of work for one product on one line, owned by an employee.
/// Production details point at work orders but never modify them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub work_order_code: i32,
    pub work_order_date: NaiveDate,
    pub work_written_date: NaiveDate,
    pub ordered_quantity: i32,
    pub completed_status: WorkOrderStatusType,
    pub product_code: i32,
    pub employee_code: i32,
    pub line_code: Option<i32>,
    pub line_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductCode",
        to = "super::product::Column::ProductCode"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeCode",
        to = "super::employee::Column::EmployeeCode"
    )]
    Employee,
    #[sea_orm(has_many = "super::production_detail::Entity")]
    ProductionDetails,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::production_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
