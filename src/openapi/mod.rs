use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Plant Floor API",
        version = "1.0.0",
        description = r#"
Stock storage, production reporting and work order lookup for the plant floor.

## Errors

Error responses carry a domain `code` next to the HTTP status:

```json
{
  "error": "Not Found",
  "code": 3900,
  "message": "No work order exists for the given work order code.",
  "request_id": "0b6c1e4e-3f7e-4d0c-9d43-2f1f6c9a8b11",
  "timestamp": "2024-03-01T10:30:00+00:00"
}
```

A 204 raised as an error has no body; its code is in the `x-error-code` header.

## Pagination

Listings take a 1-based `page` (missing or non-positive means 1) and answer
with `{ data, page_info }`, where `page_info` describes a block of ten page
buttons.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "storages", description = "Stock storage records"),
        (name = "production", description = "Production reports, details and defects"),
        (name = "work-orders", description = "Work order lookup"),
        (name = "health", description = "Liveness")
    ),
    paths(
        crate::handlers::storages::search_storages,
        crate::handlers::storages::create_storage,
        crate::handlers::storages::destroy_storage,
        crate::handlers::storages::delete_storage,
        crate::handlers::production::get_production_reports,
        crate::handlers::production::get_production_details,
        crate::handlers::production::get_defect_details,
        crate::handlers::production::create_report,
        crate::handlers::production::get_total_production_quantity,
        crate::handlers::work_orders::get_work_order,
        crate::handlers::health::health_check,
    ),
    components(
        schemas(
            crate::errors::ErrorResponse,
            crate::errors::ErrorCode,
            crate::handlers::common::PagingButtonInfo,
            crate::dto::storage::StorageFilterResponse,
            crate::dto::storage::StorageCreateRequest,
            crate::dto::storage::StorageCreatedResponse,
            crate::dto::storage::StorageDestroyRequest,
            crate::dto::storage::StorageQuantityResponse,
            crate::dto::production::ReportCreateRequest,
            crate::dto::production::ProductionManagementCreateRequest,
            crate::dto::production::ProductionDetailCreateRequest,
            crate::dto::production::DefectDetailCreateRequest,
            crate::dto::production::ReportCreatedResponse,
            crate::dto::production::ProductionReportResponse,
            crate::dto::production::ProductionDetailResponse,
            crate::dto::production::DefectDetailResponse,
            crate::dto::production::TotalProductionQuantityResponse,
            crate::dto::work_order::WorkOrderResponse,
            crate::entities::production_management::ProductionStatusType,
            crate::entities::production_detail::InspectionStatusType,
            crate::entities::work_order::WorkOrderStatusType,
            crate::handlers::health::HealthResponse,
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDocV1::openapi())
}
