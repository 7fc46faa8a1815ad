use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "defect_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub defect_code: i32,
    pub production_detail_code: i32,
    pub defect_reason: String,
    pub defect_status: String,
    pub defect_file: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::production_detail::Entity",
        from = "Column::ProductionDetailCode",
        to = "super::production_detail::Column::ProductionDetailCode"
    )]
    ProductionDetail,
}

impl Related<super::production_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
