use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use std::sync::Arc;
use tracing::instrument;

use crate::{
    dto::work_order::WorkOrderResponse,
    entities::{employee, product, work_order},
    errors::{ErrorCode, ServiceError},
};

#[derive(Clone)]
pub struct WorkOrderService {
    db: Arc<DatabaseConnection>,
}

impl WorkOrderService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Work order with the names of its product and responsible employee.
    #[instrument(skip(self))]
    pub async fn get_work_order(&self, work_order_code: i32) -> Result<WorkOrderResponse, ServiceError> {
        let db = &*self.db;

        let (order, product) = work_order::Entity::find_by_id(work_order_code)
            .find_also_related(product::Entity)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound(ErrorCode::NotFoundWorkOrder))?;
        let product = product.ok_or(ServiceError::NotFound(ErrorCode::NotFoundProductCode))?;

        let employee = order
            .find_related(employee::Entity)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound(ErrorCode::NotFoundEmployeeCode))?;

        Ok(WorkOrderResponse::new(order, &product, &employee))
    }
}
