use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{employee, product, work_order, work_order::WorkOrderStatusType};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkOrderResponse {
    pub work_order_code: i32,
    pub work_order_date: NaiveDate,
    pub work_written_date: NaiveDate,
    pub ordered_quantity: i32,
    pub completed_status: WorkOrderStatusType,
    pub product_name: String,
    pub employee_name: String,
    pub line_code: Option<i32>,
    pub line_name: Option<String>,
}

impl WorkOrderResponse {
    pub fn new(
        order: work_order::Model,
        product: &product::Model,
        employee: &employee::Model,
    ) -> Self {
        Self {
            work_order_code: order.work_order_code,
            work_order_date: order.work_order_date,
            work_written_date: order.work_written_date,
            ordered_quantity: order.ordered_quantity,
            completed_status: order.completed_status,
            product_name: product.product_name.clone(),
            employee_name: employee.employee_name.clone(),
            line_code: order.line_code,
            line_name: order.line_name,
        }
    }
}
