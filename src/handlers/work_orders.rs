use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use super::common::success_response;
use crate::{
    dto::work_order::WorkOrderResponse,
    errors::{ErrorResponse, ServiceError},
    AppState,
};

/// Look up a work order
#[utoipa::path(
    get,
    path = "/api/v1/work-orders/{work_order_code}",
    params(("work_order_code" = i32, Path, description = "Work order id")),
    responses(
        (status = 200, description = "Work order with product and employee names", body = WorkOrderResponse),
        (status = 404, description = "Work order not found", body = ErrorResponse)
    ),
    tag = "work-orders"
)]
pub async fn get_work_order(
    State(state): State<AppState>,
    Path(work_order_code): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let work_order = state.services.work_orders.get_work_order(work_order_code).await?;
    Ok(success_response(work_order))
}
