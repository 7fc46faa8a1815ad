use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::entities::storage;
use crate::repositories::{StorageRow, StorageSearch};

/// Query string of the storage search.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StorageSearchQuery {
    /// 1-based page; missing or non-positive means the first page
    pub page: Option<i64>,
    pub product_code: Option<i32>,
    /// Inclusive lower bound on the actual quantity
    pub min_quantity: Option<i32>,
    /// Inclusive upper bound on the actual quantity
    pub max_quantity: Option<i32>,
    /// `true` ascending, `false` descending, absent unordered
    pub quantity_sort: Option<bool>,
    /// `true` oldest first, `false` newest first, absent unordered
    pub date_sort: Option<bool>,
}

impl StorageSearchQuery {
    pub fn search(&self) -> StorageSearch {
        StorageSearch {
            product_code: self.product_code,
            min_quantity: self.min_quantity,
            max_quantity: self.max_quantity,
            quantity_sort: self.quantity_sort,
            date_sort: self.date_sort,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StorageFilterResponse {
    pub storage_code: i32,
    pub initial_quantity: i32,
    pub destroy_quantity: i32,
    pub actual_quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Whether the record was created on the query date
    pub is_today: bool,
    pub stock_code: i32,
    pub product_code: i32,
    pub product_name: String,
    pub warehouse_code: i32,
    pub warehouse_name: String,
}

impl StorageFilterResponse {
    pub fn from_row(row: StorageRow, today: NaiveDate) -> Self {
        Self {
            is_today: row.created_at.date() == today,
            storage_code: row.storage_code,
            initial_quantity: row.initial_quantity,
            destroy_quantity: row.destroy_quantity,
            actual_quantity: row.actual_quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
            stock_code: row.stock_code,
            product_code: row.product_code,
            product_name: row.product_name,
            warehouse_code: row.warehouse_code,
            warehouse_name: row.warehouse_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct StorageCreateRequest {
    pub stock_code: i32,
    pub warehouse_code: i32,
    #[validate(range(min = 1))]
    pub initial_quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct StorageDestroyRequest {
    /// Additional destroyed units; added to the running total
    #[validate(range(min = 1))]
    pub destroy_quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StorageCreatedResponse {
    pub storage_code: i32,
}

/// Quantities of a storage record after a destroy.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StorageQuantityResponse {
    pub storage_code: i32,
    pub initial_quantity: i32,
    pub destroy_quantity: i32,
    pub actual_quantity: i32,
}

impl From<storage::Model> for StorageQuantityResponse {
    fn from(model: storage::Model) -> Self {
        Self {
            storage_code: model.storage_code,
            initial_quantity: model.initial_quantity,
            destroy_quantity: model.destroy_quantity,
            actual_quantity: model.actual_quantity,
        }
    }
}
