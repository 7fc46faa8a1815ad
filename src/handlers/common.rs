use crate::errors::ServiceError;
use crate::services::Page;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of page buttons shown per block.
pub const PAGE_BLOCK_SIZE: u64 = 10;

pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Missing or non-positive page numbers mean the first page.
pub fn normalize_page(page: Option<i64>) -> u64 {
    match page {
        Some(page) if page > 0 => page as u64,
        _ => 1,
    }
}

/// Unwraps a JSON body, turning malformed payloads into a 400.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ServiceError::ValidationError(rejection.body_text()))
}

/// Paging metadata for a block-style page navigator.
///
/// Pages are grouped in blocks of [`PAGE_BLOCK_SIZE`]; `start_page` and
/// `end_page` bound the block holding `current_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PagingButtonInfo {
    pub current_page: u64,
    pub start_page: u64,
    pub end_page: u64,
    /// Total number of pages
    pub max_page: u64,
    pub has_prev_block: bool,
    pub has_next_block: bool,
}

impl PagingButtonInfo {
    pub fn new(current_page: u64, page_size: u64, total: u64) -> Self {
        let current_page = current_page.max(1);
        let max_page = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        let start_page = ((current_page - 1) / PAGE_BLOCK_SIZE) * PAGE_BLOCK_SIZE + 1;
        let end_page = start_page.saturating_add(PAGE_BLOCK_SIZE - 1).min(max_page);

        Self {
            current_page,
            start_page,
            end_page,
            max_page,
            has_prev_block: start_page > 1,
            has_next_block: end_page < max_page,
        }
    }
}

/// `{ data, page_info }` envelope of every paged listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PagingResponse<T> {
    pub data: Vec<T>,
    pub page_info: PagingButtonInfo,
}

impl<T> From<Page<T>> for PagingResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            page_info: PagingButtonInfo::new(page.page, page.page_size, page.total),
            data: page.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 1)]
    #[case(Some(0), 1)]
    #[case(Some(-4), 1)]
    #[case(Some(3), 3)]
    fn page_defaulting(#[case] input: Option<i64>, #[case] expected: u64) {
        assert_eq!(normalize_page(input), expected);
    }

    #[test]
    fn first_block() {
        let info = PagingButtonInfo::new(3, 20, 45);
        assert_eq!(info.max_page, 3);
        assert_eq!(info.start_page, 1);
        assert_eq!(info.end_page, 3);
        assert!(!info.has_prev_block);
        assert!(!info.has_next_block);
    }

    #[test]
    fn middle_block() {
        let info = PagingButtonInfo::new(14, 20, 20 * 25);
        assert_eq!(info.max_page, 25);
        assert_eq!(info.start_page, 11);
        assert_eq!(info.end_page, 20);
        assert!(info.has_prev_block);
        assert!(info.has_next_block);
    }

    #[test]
    fn block_boundaries() {
        assert_eq!(PagingButtonInfo::new(10, 20, 1000).start_page, 1);
        assert_eq!(PagingButtonInfo::new(11, 20, 1000).start_page, 11);
    }

    #[test]
    fn empty_result() {
        let info = PagingButtonInfo::new(1, 20, 0);
        assert_eq!(info.max_page, 0);
        assert_eq!(info.end_page, 0);
        assert!(!info.has_next_block);
    }

    #[test]
    fn paging_response_shape() {
        let page = Page {
            items: vec![1, 2],
            total: 22,
            page: 2,
            page_size: 20,
        };
        let body = serde_json::to_value(PagingResponse::from(page)).unwrap();
        assert_eq!(body["data"], serde_json::json!([1, 2]));
        assert_eq!(body["page_info"]["max_page"], 2);
        assert_eq!(body["page_info"]["current_page"], 2);
    }
}
