pub mod common;
pub mod health;
pub mod production;
pub mod storages;
pub mod work_orders;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::services::{
    production::ProductionService, storages::StorageService, work_orders::WorkOrderService,
};

pub use crate::AppState;

/// Services used by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub production: Arc<ProductionService>,
    pub storages: Arc<StorageService>,
    pub work_orders: Arc<WorkOrderService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig) -> Self {
        Self {
            production: Arc::new(ProductionService::new(
                db_pool.clone(),
                config.report_filter_mode,
                config.report_page_size,
            )),
            storages: Arc::new(StorageService::new(
                db_pool.clone(),
                config.storage_sort_composition,
                config.storage_page_size,
            )),
            work_orders: Arc::new(WorkOrderService::new(db_pool)),
        }
    }
}
