use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::entities::{
    defect_detail, production_detail,
    production_detail::InspectionStatusType,
    production_management::{self, ProductionStatusType},
};
use crate::repositories::ReportFilter;

/// Query string of the report list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportListQuery {
    /// 1-based page; missing or non-positive means the first page
    pub page: Option<i64>,
    /// Report identifier; only reports still in REGISTER_PRODUCTION match
    pub production_status_code: Option<i32>,
    pub production_status_type: Option<ProductionStatusType>,
    pub start_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
}

impl ReportListQuery {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            status_code: self.production_status_code,
            status_type: self.production_status_type,
            start_at: self.start_at,
            completed_at: self.completed_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ProductionManagementCreateRequest {
    pub start_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    #[validate(range(min = 0))]
    pub total_production_quantity: i32,
    pub production_file: Option<String>,
    pub production_status: ProductionStatusType,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ProductionDetailCreateRequest {
    pub work_order_code: i32,
    #[validate(range(min = 0))]
    pub production_quantity: i32,
    #[validate(range(min = 0))]
    pub defect_quantity: i32,
    #[validate(range(min = 0))]
    pub completely_quantity: i32,
    pub inspection_date: Option<NaiveDate>,
    pub inspection_status: Option<InspectionStatusType>,
    pub production_memo: Option<String>,
    pub production_status: ProductionStatusType,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct DefectDetailCreateRequest {
    /// Detail this defect belongs to. Matched against the identifier the
    /// detail receives when it is stored.
    pub production_detail_code: i32,
    #[validate(length(min = 1, max = 255))]
    pub defect_reason: String,
    #[validate(length(min = 1, max = 64))]
    pub defect_status: String,
    pub defect_file: Option<String>,
}

/// A production report together with its detail lines and defects.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ReportCreateRequest {
    #[validate]
    pub production_management: ProductionManagementCreateRequest,
    #[serde(default)]
    #[validate]
    pub production_details: Vec<ProductionDetailCreateRequest>,
    #[serde(default)]
    #[validate]
    pub defect_details: Vec<DefectDetailCreateRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductionReportResponse {
    pub production_status_code: i32,
    pub start_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    pub total_production_quantity: i32,
    pub production_file: Option<String>,
    pub production_status: ProductionStatusType,
}

impl From<production_management::Model> for ProductionReportResponse {
    fn from(model: production_management::Model) -> Self {
        Self {
            production_status_code: model.production_status_code,
            start_at: model.start_at,
            completed_at: model.completed_at,
            total_production_quantity: model.total_production_quantity,
            production_file: model.production_file,
            production_status: model.production_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductionDetailResponse {
    pub production_detail_code: i32,
    pub production_status_code: i32,
    pub work_order_code: i32,
    pub production_quantity: i32,
    pub defect_quantity: i32,
    pub completely_quantity: i32,
    pub inspection_date: Option<NaiveDate>,
    pub inspection_status: Option<InspectionStatusType>,
    pub production_memo: Option<String>,
    pub production_status: ProductionStatusType,
}

impl From<production_detail::Model> for ProductionDetailResponse {
    fn from(model: production_detail::Model) -> Self {
        Self {
            production_detail_code: model.production_detail_code,
            production_status_code: model.production_status_code,
            work_order_code: model.work_order_code,
            production_quantity: model.production_quantity,
            defect_quantity: model.defect_quantity,
            completely_quantity: model.completely_quantity,
            inspection_date: model.inspection_date,
            inspection_status: model.inspection_status,
            production_memo: model.production_memo,
            production_status: model.production_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DefectDetailResponse {
    pub defect_code: i32,
    pub production_detail_code: i32,
    pub defect_reason: String,
    pub defect_status: String,
    pub defect_file: Option<String>,
}

impl From<defect_detail::Model> for DefectDetailResponse {
    fn from(model: defect_detail::Model) -> Self {
        Self {
            defect_code: model.defect_code,
            production_detail_code: model.production_detail_code,
            defect_reason: model.defect_reason,
            defect_status: model.defect_status,
            defect_file: model.defect_file,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportCreatedResponse {
    pub production_status_code: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TotalProductionQuantityResponse {
    pub total_production_quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> ReportCreateRequest {
        serde_json::from_value(body).unwrap()
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "production_management": {
                "start_at": "2024-03-01T08:00:00",
                "completed_at": "2024-03-01T17:00:00",
                "total_production_quantity": 100,
                "production_file": null,
                "production_status": "PRODUCTION_COMPLETED"
            },
            "production_details": [{
                "work_order_code": 1,
                "production_quantity": 100,
                "defect_quantity": 3,
                "completely_quantity": 97,
                "inspection_date": "2024-03-02",
                "inspection_status": "PASSED",
                "production_memo": "line 2",
                "production_status": "PRODUCTION_COMPLETED"
            }],
            "defect_details": [{
                "production_detail_code": 1,
                "defect_reason": "scratch",
                "defect_status": "DISCARDED",
                "defect_file": null
            }]
        })
    }

    #[test]
    fn valid_request_passes_validation() {
        assert!(request(valid_body()).validate().is_ok());
    }

    #[test]
    fn negative_nested_quantity_fails_validation() {
        let mut body = valid_body();
        body["production_details"][0]["defect_quantity"] = json!(-1);
        let errors = request(body).validate().unwrap_err();
        assert!(errors.errors().contains_key("production_details"));
    }

    #[test]
    fn negative_total_fails_validation() {
        let mut body = valid_body();
        body["production_management"]["total_production_quantity"] = json!(-5);
        assert!(request(body).validate().is_err());
    }

    #[test]
    fn detail_and_defect_lists_default_to_empty() {
        let mut body = valid_body();
        let object = body.as_object_mut().unwrap();
        object.remove("production_details");
        object.remove("defect_details");

        let parsed = request(body);
        assert!(parsed.production_details.is_empty());
        assert!(parsed.defect_details.is_empty());
    }
}
