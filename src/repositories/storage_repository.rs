use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{page_index, BaseRepository, Repository};
use crate::db::query_builder::{order_by_flag, SearchBuilder};
use crate::entities::{product, stock, storage, warehouse};
use crate::errors::AppError;

/// How the quantity and date sort keys combine when both are requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortComposition {
    /// Quantity key first, date key as secondary ordering.
    #[default]
    Compose,
    /// The date key replaces the quantity key.
    LastWins,
}

/// Optional criteria for the storage search. Every `None` is "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSearch {
    pub product_code: Option<i32>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    /// `Some(true)` ascending, `Some(false)` descending
    pub quantity_sort: Option<bool>,
    /// `Some(true)` ascending, `Some(false)` descending
    pub date_sort: Option<bool>,
}

impl StorageSearch {
    /// Conjunction of the supplied filters plus the soft-delete guards on
    /// both the storage row and its stock.
    pub fn condition(&self) -> Condition {
        SearchBuilder::new()
            .add_eq_opt(stock::Column::ProductCode, self.product_code)
            .add_gte_opt(storage::Column::ActualQuantity, self.min_quantity)
            .add_lte_opt(storage::Column::ActualQuantity, self.max_quantity)
            .add_eq(storage::Column::IsDelete, false)
            .add_eq(stock::Column::IsDelete, false)
            .build()
    }

    fn apply_sort<Q: QueryOrder>(&self, query: Q, composition: SortComposition) -> Q {
        let query = match composition {
            SortComposition::Compose => {
                let query = order_by_flag(query, storage::Column::ActualQuantity, self.quantity_sort);
                order_by_flag(query, storage::Column::CreatedAt, self.date_sort)
            }
            SortComposition::LastWins if self.date_sort.is_some() => {
                order_by_flag(query, storage::Column::CreatedAt, self.date_sort)
            }
            SortComposition::LastWins => {
                order_by_flag(query, storage::Column::ActualQuantity, self.quantity_sort)
            }
        };
        query.order_by_asc(storage::Column::StorageCode)
    }

    /// The full search statement, before projection into [`StorageRow`].
    pub fn select(&self, composition: SortComposition) -> Select<storage::Entity> {
        let query = storage::Entity::find()
            .select_only()
            .columns([
                storage::Column::StorageCode,
                storage::Column::InitialQuantity,
                storage::Column::DestroyQuantity,
                storage::Column::ActualQuantity,
                storage::Column::CreatedAt,
                storage::Column::UpdatedAt,
                storage::Column::StockCode,
                storage::Column::WarehouseCode,
            ])
            .column(warehouse::Column::WarehouseName)
            .column(stock::Column::ProductCode)
            .column(product::Column::ProductName)
            .join(JoinType::InnerJoin, storage::Relation::Stock.def())
            .join(JoinType::InnerJoin, stock::Relation::Product.def())
            .join(JoinType::InnerJoin, storage::Relation::Warehouse.def())
            .filter(self.condition());

        self.apply_sort(query, composition)
    }
}

/// One storage search hit, joined with its warehouse and product.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct StorageRow {
    pub storage_code: i32,
    pub initial_quantity: i32,
    pub destroy_quantity: i32,
    pub actual_quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub stock_code: i32,
    pub warehouse_code: i32,
    pub warehouse_name: String,
    pub product_code: i32,
    pub product_name: String,
}

#[derive(Debug, Clone)]
pub struct StorageRepository {
    base: BaseRepository,
}

impl StorageRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// One page of matching storage rows and the total number of matches.
    /// `page` is 1-based.
    pub async fn search(
        &self,
        search: &StorageSearch,
        composition: SortComposition,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<StorageRow>, u64), AppError> {
        let paginator = search
            .select(composition)
            .into_model::<StorageRow>()
            .paginate(self.base.get_db(), page_size);

        let total = paginator.num_items().await?;
        let Some(index) = page_index(page, page_size, total) else {
            return Ok((Vec::new(), total));
        };
        let rows = paginator.fetch_page(index).await?;

        Ok((rows, total))
    }

    /// Storage row locked until the surrounding transaction ends.
    pub fn storage_for_update(storage_code: i32) -> Select<storage::Entity> {
        storage::Entity::find_by_id(storage_code).lock_exclusive()
    }

    /// Stock row locked until the surrounding transaction ends. Receipts
    /// against the same stock serialize on it before the capacity check.
    pub fn stock_for_update(stock_code: i32) -> Select<stock::Entity> {
        stock::Entity::find_by_id(stock_code).lock_exclusive()
    }

    /// Sum of actual quantities over the stock's non-deleted storage rows.
    pub async fn active_quantity_for_stock<C>(db: &C, stock_code: i32) -> Result<i64, AppError>
    where
        C: sea_orm::ConnectionTrait,
    {
        let total = storage::Entity::find()
            .select_only()
            .column_as(storage::Column::ActualQuantity.sum(), "total")
            .filter(storage::Column::StockCode.eq(stock_code))
            .filter(storage::Column::IsDelete.eq(false))
            .into_tuple::<Option<i64>>()
            .one(db)
            .await?;

        Ok(total.flatten().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(search: &StorageSearch, composition: SortComposition) -> String {
        search
            .select(composition)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn write_paths_lock_their_rows() {
        let storage = StorageRepository::storage_for_update(7)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(storage.contains(r#""storages"."storage_code" = 7"#));
        assert!(storage.contains(" FOR UPDATE"));

        let stock = StorageRepository::stock_for_update(3)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(stock.contains(r#""stocks"."stock_code" = 3"#));
        assert!(stock.contains(" FOR UPDATE"));

        // SQLite has no row locks; the clause is left out.
        let sqlite = StorageRepository::stock_for_update(3)
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(!sqlite.contains("FOR UPDATE"));
    }

    #[test]
    fn soft_delete_guards_are_always_present() {
        let sql = sql(&StorageSearch::default(), SortComposition::Compose);
        assert!(sql.contains(r#""storages"."is_delete" = "#));
        assert!(sql.contains(r#""stocks"."is_delete" = "#));
        assert!(sql.contains(r#"INNER JOIN "warehouses""#));
        assert!(sql.contains(r#"INNER JOIN "products""#));
    }

    #[test]
    fn quantity_bounds_and_product_filter() {
        let search = StorageSearch {
            product_code: Some(4),
            min_quantity: Some(10),
            max_quantity: Some(50),
            ..Default::default()
        };
        let sql = sql(&search, SortComposition::Compose);
        assert!(sql.contains(r#""stocks"."product_code" = 4"#));
        assert!(sql.contains(r#""storages"."actual_quantity" >= 10"#));
        assert!(sql.contains(r#""storages"."actual_quantity" <= 50"#));
    }

    #[test]
    fn compose_orders_by_quantity_then_date() {
        let search = StorageSearch {
            quantity_sort: Some(true),
            date_sort: Some(false),
            ..Default::default()
        };
        let sql = sql(&search, SortComposition::Compose);
        assert!(sql.ends_with(
            r#"ORDER BY "storages"."actual_quantity" ASC, "storages"."created_at" DESC, "storages"."storage_code" ASC"#
        ));
    }

    #[test]
    fn last_wins_keeps_only_the_date_key() {
        let search = StorageSearch {
            quantity_sort: Some(true),
            date_sort: Some(false),
            ..Default::default()
        };
        let sql = sql(&search, SortComposition::LastWins);
        assert!(sql.ends_with(
            r#"ORDER BY "storages"."created_at" DESC, "storages"."storage_code" ASC"#
        ));
    }

    #[test]
    fn no_sort_keys_falls_back_to_storage_code() {
        let sql = sql(&StorageSearch::default(), SortComposition::Compose);
        assert!(sql.ends_with(r#"ORDER BY "storages"."storage_code" ASC"#));
    }
}
