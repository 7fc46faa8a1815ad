use chrono::{Local, NaiveDateTime};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait};
use serde::{Deserialize, Serialize};

/// Quantity of a stock item held in one warehouse.
///
/// `actual_quantity` is `initial_quantity - destroy_quantity` and is
/// recomputed in [`ActiveModelBehavior::before_save`] whenever either side
/// changes, so the search query can filter and sort on a plain column.
/// Rows are withdrawn by setting `is_delete`; they are never removed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub storage_code: i32,
    pub initial_quantity: i32,
    pub destroy_quantity: i32,
    pub actual_quantity: i32,
    pub is_delete: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub stock_code: i32,
    pub warehouse_code: i32,
}

impl Model {
    /// Whether `additional` more destroyed units would still fit in the
    /// initial quantity.
    pub fn can_destroy(&self, additional: i32) -> bool {
        self.destroy_quantity
            .checked_add(additional)
            .map_or(false, |total| total <= self.initial_quantity)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock::Entity",
        from = "Column::StockCode",
        to = "super::stock::Column::StockCode"
    )]
    Stock,
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseCode",
        to = "super::warehouse::Column::WarehouseCode"
    )]
    Warehouse,
}

impl Related<super::stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stock.def()
    }
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

fn current(value: &ActiveValue<i32>) -> Option<i32> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(*v),
        ActiveValue::NotSet => None,
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Local::now().naive_local();

        if insert {
            if let ActiveValue::NotSet = self.created_at {
                self.created_at = ActiveValue::Set(now);
            }
            if let ActiveValue::NotSet = self.destroy_quantity {
                self.destroy_quantity = ActiveValue::Set(0);
            }
            if let ActiveValue::NotSet = self.is_delete {
                self.is_delete = ActiveValue::Set(false);
            }
        }

        let changed = self.initial_quantity.is_set() || self.destroy_quantity.is_set();
        if changed {
            if let (Some(initial), Some(destroyed)) = (
                current(&self.initial_quantity),
                current(&self.destroy_quantity),
            ) {
                if destroyed > initial {
                    return Err(DbErr::Custom(format!(
                        "destroy quantity {} exceeds initial quantity {}",
                        destroyed, initial
                    )));
                }
                self.actual_quantity = ActiveValue::Set(initial - destroyed);
            }
        }

        self.updated_at = ActiveValue::Set(now);

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn storage(initial: i32, destroyed: i32) -> Model {
        let created = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Model {
            storage_code: 1,
            initial_quantity: initial,
            destroy_quantity: destroyed,
            actual_quantity: initial - destroyed,
            is_delete: false,
            created_at: created,
            updated_at: created,
            stock_code: 1,
            warehouse_code: 1,
        }
    }

    #[test]
    fn destroy_is_bounded_by_initial_quantity() {
        let row = storage(100, 40);
        assert!(row.can_destroy(60));
        assert!(!row.can_destroy(61));
        assert!(row.can_destroy(0));
    }

    #[test]
    fn destroy_overflow_is_rejected() {
        let row = storage(i32::MAX, 1);
        assert!(!row.can_destroy(i32::MAX));
    }
}
