use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status shared by production reports and their detail lines.
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
pub enum ProductionStatusType {
    #[sea_orm(string_value = "REGISTER_PRODUCTION")]
    RegisterProduction,
    #[sea_orm(string_value = "PRODUCTION_IN_PROGRESS")]
    ProductionInProgress,
    #[sea_orm(string_value = "PRODUCTION_COMPLETED")]
    ProductionCompleted,
    #[sea_orm(string_value = "PRODUCTION_ON_HOLD")]
    ProductionOnHold,
}

/// One production run (a "production report"). Owns its detail lines.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "production_managements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub production_status_code: i32,
    pub start_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    pub total_production_quantity: i32,
    pub production_file: Option<String>,
    pub production_status: ProductionStatusType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::production_detail::Entity")]
    ProductionDetails,
}

impl Related<super::production_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
