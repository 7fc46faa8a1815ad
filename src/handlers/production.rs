use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};

use super::common::{created_response, json_body, normalize_page, success_response, PagingResponse};
use crate::{
    dto::production::{
        DefectDetailResponse, ProductionDetailResponse, ProductionReportResponse,
        ReportCreateRequest, ReportCreatedResponse, ReportListQuery,
        TotalProductionQuantityResponse,
    },
    errors::{ErrorResponse, ServiceError},
    AppState,
};

/// List production reports
#[utoipa::path(
    get,
    path = "/api/v1/production/reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "One page of production reports", body = PagingResponse<ProductionReportResponse>),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    ),
    tag = "production"
)]
pub async fn get_production_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let page = normalize_page(query.page);
    let reports = state
        .services
        .production
        .get_production_report_records(page, &query.filter())
        .await?;

    Ok(success_response(PagingResponse::from(reports)))
}

/// Detail lines of a production report
#[utoipa::path(
    get,
    path = "/api/v1/production/reports/{code}/detail",
    params(("code" = i32, Path, description = "Production report id")),
    responses(
        (status = 200, description = "Details in insertion order", body = [ProductionDetailResponse]),
        (status = 404, description = "Report not found", body = ErrorResponse)
    ),
    tag = "production"
)]
pub async fn get_production_details(
    State(state): State<AppState>,
    Path(code): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let details = state.services.production.get_production_details(code).await?;
    Ok(success_response(details))
}

/// Defects recorded against a production detail
#[utoipa::path(
    get,
    path = "/api/v1/production/reports/{code}/defects",
    params(("code" = i32, Path, description = "Production detail id")),
    responses(
        (status = 200, description = "Defects in insertion order", body = [DefectDetailResponse]),
        (status = 404, description = "Detail not found", body = ErrorResponse)
    ),
    tag = "production"
)]
pub async fn get_defect_details(
    State(state): State<AppState>,
    Path(code): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let defects = state.services.production.get_defect_details(code).await?;
    Ok(success_response(defects))
}

/// Register a production report with its details and defects
#[utoipa::path(
    post,
    path = "/api/v1/production/reports",
    request_body = ReportCreateRequest,
    responses(
        (status = 201, description = "Report registered", body = ReportCreatedResponse),
        (status = 400, description = "Invalid request or unknown work order", body = ErrorResponse)
    ),
    tag = "production"
)]
pub async fn create_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportCreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = json_body(payload)?;
    // A dangling work order reference is a fault in the submitted body.
    let production_status_code = state
        .services
        .production
        .report_save(request)
        .await
        .map_err(|err| match err {
            ServiceError::NotFound(code) => ServiceError::BadRequest(code),
            other => other,
        })?;

    Ok(created_response(ReportCreatedResponse {
        production_status_code,
    }))
}

/// Sum of completed and defective quantities across all details
#[utoipa::path(
    get,
    path = "/api/v1/production/total-quantity",
    responses(
        (status = 200, description = "Total production quantity", body = TotalProductionQuantityResponse)
    ),
    tag = "production"
)]
pub async fn get_total_production_quantity(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let total_production_quantity = state
        .services
        .production
        .calculate_total_production_quantity()
        .await?;

    Ok(success_response(TotalProductionQuantityResponse {
        total_production_quantity,
    }))
}
