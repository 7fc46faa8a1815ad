use chrono::NaiveDate;
use metrics::counter;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    db::with_transaction,
    dto::storage::{
        StorageCreateRequest, StorageDestroyRequest, StorageFilterResponse,
        StorageQuantityResponse,
    },
    entities::{storage, warehouse},
    errors::{ErrorCode, ServiceError},
    repositories::{SortComposition, StorageRepository, StorageSearch},
    services::Page,
};

/// Storage records: how much of each stock item sits in which warehouse.
#[derive(Clone)]
pub struct StorageService {
    db: Arc<DatabaseConnection>,
    repository: StorageRepository,
    sort_composition: SortComposition,
    page_size: u64,
}

impl StorageService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        sort_composition: SortComposition,
        page_size: u64,
    ) -> Self {
        Self {
            repository: StorageRepository::new(db.clone()),
            db,
            sort_composition,
            page_size,
        }
    }

    /// Filtered, sorted page of active storage records. `today` drives the
    /// `is_today` flag.
    #[instrument(skip(self))]
    pub async fn search_storages(
        &self,
        page: u64,
        search: &StorageSearch,
        today: NaiveDate,
    ) -> Result<Page<StorageFilterResponse>, ServiceError> {
        let (rows, total) = self
            .repository
            .search(search, self.sort_composition, page, self.page_size)
            .await?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(|row| StorageFilterResponse::from_row(row, today))
                .collect(),
            total,
            page,
            page_size: self.page_size,
        })
    }

    /// Receives part of a stock item into a warehouse.
    #[instrument(skip(self))]
    pub async fn create_storage(&self, request: StorageCreateRequest) -> Result<i32, ServiceError> {
        request.validate()?;

        let storage_code = with_transaction::<_, _, ServiceError>(&self.db, move |txn| {
            Box::pin(async move {
                let stock = StorageRepository::stock_for_update(request.stock_code)
                    .one(txn)
                    .await?
                    .ok_or(ServiceError::NotFound(ErrorCode::NotFoundStockCode))?;
                if stock.is_delete {
                    return Err(ServiceError::BadRequest(ErrorCode::BadRequestDeletedStock));
                }

                warehouse::Entity::find_by_id(request.warehouse_code)
                    .one(txn)
                    .await?
                    .ok_or(ServiceError::NotFound(ErrorCode::NotFoundWarehouseCode))?;

                let stored = StorageRepository::active_quantity_for_stock(txn, stock.stock_code).await?;
                if stored + i64::from(request.initial_quantity) > i64::from(stock.quantity) {
                    return Err(ServiceError::BadRequest(ErrorCode::BadRequestMoreQuantity));
                }

                let created = storage::ActiveModel {
                    initial_quantity: Set(request.initial_quantity),
                    stock_code: Set(stock.stock_code),
                    warehouse_code: Set(request.warehouse_code),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                Ok(created.storage_code)
            })
        })
        .await?;

        counter!("plantfloor.storage.created", 1);
        info!(storage_code, "storage record created");
        Ok(storage_code)
    }

    /// Adds to the destroyed quantity of a storage record.
    #[instrument(skip(self))]
    pub async fn destroy_storage(
        &self,
        storage_code: i32,
        request: StorageDestroyRequest,
    ) -> Result<StorageQuantityResponse, ServiceError> {
        request.validate()?;
        let units = request.destroy_quantity;

        let updated = with_transaction::<_, _, ServiceError>(&self.db, move |txn| {
            Box::pin(async move {
                let current = StorageRepository::storage_for_update(storage_code)
                    .one(txn)
                    .await?
                    .ok_or(ServiceError::NotFound(ErrorCode::NotFoundStorageCode))?;
                if current.is_delete {
                    return Err(ServiceError::BadRequest(ErrorCode::BadRequestDeletedStock));
                }
                if !current.can_destroy(request.destroy_quantity) {
                    return Err(ServiceError::BadRequest(ErrorCode::BadRequestDestroyQuantity));
                }

                let destroyed = current.destroy_quantity + request.destroy_quantity;
                let mut active = current.into_active_model();
                active.destroy_quantity = Set(destroyed);
                Ok(active.update(txn).await?)
            })
        })
        .await?;

        counter!("plantfloor.storage.destroyed_units", units as u64);
        Ok(StorageQuantityResponse::from(updated))
    }

    /// Soft-deletes a storage record.
    #[instrument(skip(self))]
    pub async fn delete_storage(&self, storage_code: i32) -> Result<(), ServiceError> {
        with_transaction::<_, _, ServiceError>(&self.db, move |txn| {
            Box::pin(async move {
                let current = StorageRepository::storage_for_update(storage_code)
                    .one(txn)
                    .await?
                    .ok_or(ServiceError::NotFound(ErrorCode::NotFoundStorageCode))?;
                if current.is_delete {
                    return Err(ServiceError::BadRequest(ErrorCode::BadRequestDeletedStock));
                }

                let mut active = current.into_active_model();
                active.is_delete = Set(true);
                active.update(txn).await?;
                Ok(())
            })
        })
        .await?;

        counter!("plantfloor.storage.deleted", 1);
        info!(storage_code, "storage record deleted");
        Ok(())
    }
}
