//! # V1 API Response Envelope & Error Contract
//!
//! Defines the canonical wire format for all v1 API responses. Every endpoint
//! returns an [`ApiResponse<T>`] envelope with three optional top-level fields:
//!
//! ```json
//! {
//!   "data": { ... },       // present on success, absent on error
//!   "meta": { "nextCursor": "2", "total": 42 },  // optional pagination
//!   "error": { "code": "not_found", "message": "..." }  // present on error, absent on success
//! }
//! ```
//!
//! ## ID Formats
//!
//! - **profileId**: UUID v4 (e.g. `"550e8400-e29b-41d4-a716-446655440000"`)
//! - **llmCallId**: nanoid, 21 characters
//! - **weightsId**: nanoid, 21 characters
//!
//! ## Cursor Pagination
//!
//! Cursors are opaque strings. Clients must not parse or construct them. An
//! invalid cursor returns `400 invalid_request`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AttritionError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
/// Each variant maps to a fixed HTTP status code via [`ErrorCode::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request was malformed, had invalid parameters, or failed validation.
    /// HTTP 400.
    InvalidRequest,
    /// Authentication is required or the provided credentials are invalid.
    /// HTTP 401.
    Unauthorized,
    /// The caller is authenticated but not allowed to perform the action.
    /// HTTP 403.
    Forbidden,
    /// The requested resource does not exist. HTTP 404.
    NotFound,
    /// An unexpected server-side error occurred. Internal details are never
    /// leaked to the client. HTTP 500.
    InternalError,
}

impl ErrorCode {
    /// Returns the HTTP status code corresponding to this error code.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

/// Structured error payload within the API envelope.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Machine-readable error classification.
    pub code: ErrorCode,
    /// Human-readable description safe to display to end users.
    pub message: String,
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Opaque cursor to pass as `cursor` in the next request. `None` means
    /// there are no more results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Total number of matching items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Cursor-based pagination parameters accepted by list endpoints.
///
/// - `limit` defaults to 20 and is clamped to `1..=100`.
/// - `cursor` is an opaque string from a previous `ResponseMeta.nextCursor`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CursorPagination {
    /// Maximum number of items to return. Clamped to `1..=100`, defaults to 20.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Opaque pagination cursor from a previous response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

fn default_limit() -> u32 {
    20
}

impl Default for CursorPagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            cursor: None,
        }
    }
}

impl CursorPagination {
    /// Clamps `limit` to `1..=100`.
    pub fn validate(mut self) -> Self {
        self.limit = self.limit.clamp(1, 100);
        self
    }

    /// Row offset encoded by the cursor. Cursors encode a 1-based page number.
    pub fn offset(&self) -> Result<u32, AttritionError> {
        let page = match self.cursor.as_deref() {
            None | Some("") => 1,
            Some(cursor) => cursor
                .parse::<u32>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| AttritionError::Validation("Invalid cursor".to_string()))?,
        };
        Ok((page - 1).saturating_mul(self.limit))
    }

    /// Cursor for the page after `offset`, if more items remain.
    pub fn next_cursor(&self, offset: u32, total: u64) -> Option<String> {
        let seen = u64::from(offset) + u64::from(self.limit);
        (seen < total).then(|| (offset / self.limit.max(1) + 2).to_string())
    }
}

/// Canonical v1 API response envelope.
///
/// On success, `data` is present and `error` is absent. On error, `error` is
/// present and `data` is absent. `meta` is optionally present for paginated
/// responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// HTTP status to use in the response. Not serialized on the wire.
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with data (HTTP 200).
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Success response with data and pagination metadata (HTTP 200).
    pub fn success_with_meta(data: T, meta: ResponseMeta) -> Self {
        Self {
            data: Some(data),
            meta: Some(meta),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Resource created response (HTTP 201).
    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
            error: None,
            status: StatusCode::CREATED,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            meta: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(_) => {
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<AttritionError> for ApiResponse<T> {
    /// Convert an [`AttritionError`] into a v1 [`ApiResponse`].
    ///
    /// Internal error details are **never** leaked to the client. For
    /// `internal_error` responses, a generic message is returned and the
    /// real error is logged via `tracing::error!`.
    fn from(err: AttritionError) -> Self {
        match err {
            AttritionError::NotFound(ref msg) => ApiResponse::error(ErrorCode::NotFound, msg.clone()),

            AttritionError::Validation(ref msg) => {
                ApiResponse::error(ErrorCode::InvalidRequest, msg.clone())
            }

            AttritionError::Json(ref e) => {
                ApiResponse::error(ErrorCode::InvalidRequest, format!("Invalid JSON: {e}"))
            }

            AttritionError::Unauthorized(ref msg) => {
                ApiResponse::error(ErrorCode::Unauthorized, msg.clone())
            }

            AttritionError::Forbidden(ref msg) => {
                ApiResponse::error(ErrorCode::Forbidden, msg.clone())
            }

            ref internal @ (AttritionError::Database(_)
            | AttritionError::Http(_)
            | AttritionError::Io(_)
            | AttritionError::Persistence(_)
            | AttritionError::Internal(_)
            | AttritionError::Llm(_)
            | AttritionError::LlmUnavailable(_)
            | AttritionError::LlmRateLimit { .. }
            | AttritionError::LlmTimeout(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}
