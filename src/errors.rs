use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Header carrying the domain error code on bodiless (204) responses.
pub const ERROR_CODE_HEADER: &str = "x-error-code";

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Domain error codes. Each kind maps to a fixed numeric code and message.
///
/// The 3xxx range is "not found", 4xxx "no content", 6xxx "bad request" and
/// 7xxx "conflict". `NotFoundProductionDetail` keeps its historical 30000.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFoundProductCode,
    NotFoundClientCode,
    NotFoundEstimateCode,
    NotFoundEstimateProductCode,
    NotFoundOrderCode,
    NotFoundReturnCode,
    NotFoundCategoryCode,
    NotFoundStockCode,
    NotFoundMaterialName,
    NotFoundWarehouseCode,
    NotFoundSpecCode,
    NotFoundBomCode,
    NotFoundStorageCode,
    NotFoundProductionCode,
    NotFoundPlanCode,
    NotFoundEmployeeCode,
    NotFoundWorkOrder,
    NotFoundProductionDetail,

    NoContentsMaterialStock,
    NoContentsMOrders,
    NoContentsClientCode,

    BadRequestOrderExistClient,
    BadRequestOrderedEstimate,
    BadRequestDeadlinePassed,
    BadRequestNoOptions,
    BadRequestMoreQuantity,
    BadRequestDeletedStock,
    BadRequestDestroyQuantity,

    AlreadyExistProductionPlan,
}

impl ErrorCode {
    pub const fn code(self) -> i32 {
        match self {
            Self::NotFoundProductCode => 3000,
            Self::NotFoundClientCode => 3100,
            Self::NotFoundEstimateCode => 3200,
            Self::NotFoundEstimateProductCode => 3201,
            Self::NotFoundOrderCode => 3300,
            Self::NotFoundReturnCode => 3301,
            Self::NotFoundCategoryCode => 3400,
            Self::NotFoundStockCode => 3401,
            Self::NotFoundMaterialName => 3402,
            Self::NotFoundWarehouseCode => 3403,
            Self::NotFoundSpecCode => 3404,
            Self::NotFoundBomCode => 3501,
            Self::NotFoundStorageCode => 3502,
            Self::NotFoundProductionCode => 3600,
            Self::NotFoundPlanCode => 3700,
            Self::NotFoundEmployeeCode => 3800,
            Self::NotFoundWorkOrder => 3900,
            Self::NotFoundProductionDetail => 30000,

            Self::NoContentsMaterialStock => 4400,
            Self::NoContentsMOrders => 4401,
            Self::NoContentsClientCode => 4402,

            Self::BadRequestOrderExistClient => 6100,
            Self::BadRequestOrderedEstimate => 6200,
            Self::BadRequestDeadlinePassed => 6201,
            Self::BadRequestNoOptions => 6400,
            Self::BadRequestMoreQuantity => 6500,
            Self::BadRequestDeletedStock => 6501,
            Self::BadRequestDestroyQuantity => 6502,

            Self::AlreadyExistProductionPlan => 7700,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::NotFoundProductCode => "No product exists for the given product code.",
            Self::NotFoundClientCode => "No client exists for the given client code.",
            Self::NotFoundEstimateCode => "No estimate exists for the given estimate code.",
            Self::NotFoundEstimateProductCode => {
                "No estimate product exists for the given estimate product code."
            }
            Self::NotFoundOrderCode => "No order exists for the given order code.",
            Self::NotFoundReturnCode => "No return exists for the given return code.",
            Self::NotFoundCategoryCode => "No category exists for the given category code.",
            Self::NotFoundStockCode => "No stock exists for the given stock code.",
            Self::NotFoundMaterialName => "No stock exists for the given material name.",
            Self::NotFoundWarehouseCode => "No warehouse exists for the given warehouse code.",
            Self::NotFoundSpecCode => "No spec exists for the given spec code.",
            Self::NotFoundBomCode => "No BOM exists for the given BOM code.",
            Self::NotFoundStorageCode => "The storage history code does not exist.",
            Self::NotFoundProductionCode => "No production report exists for the given code.",
            Self::NotFoundPlanCode => "No plan exists for the given plan code.",
            Self::NotFoundEmployeeCode => "No employee exists for the given employee number.",
            Self::NotFoundWorkOrder => "No work order exists for the given work order code.",
            Self::NotFoundProductionDetail => "No defect data exists for this production detail.",

            Self::NoContentsMaterialStock => "No raw material stock matches the given conditions.",
            Self::NoContentsMOrders => "The requested raw material orders do not exist.",
            Self::NoContentsClientCode => "No client matches the given conditions.",

            Self::BadRequestOrderExistClient => "A client with existing orders cannot be deleted.",
            Self::BadRequestOrderedEstimate => "An estimate that has been ordered cannot be deleted.",
            Self::BadRequestDeadlinePassed => {
                "An estimate past its deadline cannot be converted into an order."
            }
            Self::BadRequestNoOptions => "The information required to delete the spec is missing.",
            Self::BadRequestMoreQuantity => "Stored quantity exceeds the stock quantity.",
            Self::BadRequestDeletedStock => "The stock record has been deleted.",
            Self::BadRequestDestroyQuantity => {
                "Destroyed quantity cannot exceed the initial quantity."
            }

            Self::AlreadyExistProductionPlan => {
                "The production plan period overlaps an existing production plan."
            }
        }
    }
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Not Found",
    "code": 3900,
    "message": "No work order exists for the given work order code.",
    "request_id": "req-abc123xyz",
    "timestamp": "2024-03-01T10:30:00+00:00"
}))]
pub struct ErrorResponse {
    /// HTTP status category
    #[schema(example = "Not Found")]
    pub error: String,
    /// Domain error code, absent for validation and internal failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {}", .0.message())]
    NotFound(ErrorCode),

    #[error("No content: {}", .0.message())]
    NoContent(ErrorCode),

    #[error("Bad request: {}", .0.message())]
    BadRequest(ErrorCode),

    #[error("Conflict: {}", .0.message())]
    Conflict(ErrorCode),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::NoContent(_) => StatusCode::NO_CONTENT,
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The domain code, when the error carries one.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::NotFound(code)
            | Self::NoContent(code)
            | Self::BadRequest(code)
            | Self::Conflict(code) => Some(*code),
            _ => None,
        }
    }

    /// Message suitable for HTTP responses. Internal failures return a
    /// generic message.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::NotFound(code)
            | Self::NoContent(code)
            | Self::BadRequest(code)
            | Self::Conflict(code) => code.message().to_string(),
            Self::ValidationError(_) => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        if let Self::NoContent(code) = self {
            let mut response = status.into_response();
            response.headers_mut().insert(
                HeaderName::from_static(ERROR_CODE_HEADER),
                HeaderValue::from(code.code()),
            );
            return response;
        }

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            code: self.error_code().map(ErrorCode::code),
            message: self.response_message(),
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

pub type AppError = ServiceError;
