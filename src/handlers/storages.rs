use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Local;

use super::common::{
    created_response, json_body, no_content_response, normalize_page, success_response,
    PagingResponse,
};
use crate::{
    dto::storage::{
        StorageCreateRequest, StorageCreatedResponse, StorageDestroyRequest,
        StorageFilterResponse, StorageQuantityResponse, StorageSearchQuery,
    },
    errors::{ErrorResponse, ServiceError},
    AppState,
};

/// Search active storage records
#[utoipa::path(
    get,
    path = "/api/v1/stocks/storages",
    params(StorageSearchQuery),
    responses(
        (status = 200, description = "One page of storage records", body = PagingResponse<StorageFilterResponse>),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    ),
    tag = "storages"
)]
pub async fn search_storages(
    State(state): State<AppState>,
    Query(query): Query<StorageSearchQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let page = normalize_page(query.page);
    let today = Local::now().date_naive();
    let storages = state
        .services
        .storages
        .search_storages(page, &query.search(), today)
        .await?;

    Ok(success_response(PagingResponse::from(storages)))
}

/// Receive stock into a warehouse
#[utoipa::path(
    post,
    path = "/api/v1/stocks/storages",
    request_body = StorageCreateRequest,
    responses(
        (status = 201, description = "Storage record created", body = StorageCreatedResponse),
        (status = 400, description = "Stock deleted or quantity exceeded", body = ErrorResponse),
        (status = 404, description = "Stock or warehouse not found", body = ErrorResponse)
    ),
    tag = "storages"
)]
pub async fn create_storage(
    State(state): State<AppState>,
    payload: Result<Json<StorageCreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = json_body(payload)?;
    let storage_code = state.services.storages.create_storage(request).await?;
    Ok(created_response(StorageCreatedResponse { storage_code }))
}

/// Record destroyed units of a storage record
#[utoipa::path(
    put,
    path = "/api/v1/stocks/storages/{storage_code}/destroy",
    params(("storage_code" = i32, Path, description = "Storage record id")),
    request_body = StorageDestroyRequest,
    responses(
        (status = 200, description = "Updated quantities", body = StorageQuantityResponse),
        (status = 400, description = "Record deleted or destroy quantity too large", body = ErrorResponse),
        (status = 404, description = "Storage record not found", body = ErrorResponse)
    ),
    tag = "storages"
)]
pub async fn destroy_storage(
    State(state): State<AppState>,
    Path(storage_code): Path<i32>,
    payload: Result<Json<StorageDestroyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = json_body(payload)?;
    let updated = state
        .services
        .storages
        .destroy_storage(storage_code, request)
        .await?;
    Ok(success_response(updated))
}

/// Withdraw a storage record
#[utoipa::path(
    delete,
    path = "/api/v1/stocks/storages/{storage_code}",
    params(("storage_code" = i32, Path, description = "Storage record id")),
    responses(
        (status = 204, description = "Storage record withdrawn"),
        (status = 400, description = "Already withdrawn", body = ErrorResponse),
        (status = 404, description = "Storage record not found", body = ErrorResponse)
    ),
    tag = "storages"
)]
pub async fn delete_storage(
    State(state): State<AppState>,
    Path(storage_code): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.storages.delete_storage(storage_code).await?;
    Ok(no_content_response())
}
