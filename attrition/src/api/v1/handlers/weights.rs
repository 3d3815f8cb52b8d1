//! v1 weight configuration handlers.

use axum::extract::State;
use axum::Extension;
use axum_extra::extract::Query;
use chrono::Utc;
use validator::Validate;

use crate::api::extractors::AppJson;
use crate::api::v1::dto::{GetWeightsQuery, StoredWeightsResponse, UpdateWeightsRequest, WeightsResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::models::{CallerIdentity, StoredWeights, WeightVector};

const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// `GET /api/v1/weights`
#[utoipa::path(
    get,
    path = "/api/v1/weights",
    tag = "weights",
    operation_id = "weights.get",
    params(GetWeightsQuery),
    responses(
        (status = 200, description = "Active weight vector and recent history", body = WeightsResponse),
    )
)]
pub async fn get_weights(
    State(state): State<AppState>,
    Query(query): Query<GetWeightsQuery>,
) -> ApiResponse<WeightsResponse> {
    let resolved = state.scoring.resolver().resolve().await;
    let limit = query
        .history_limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, 100);

    let history = match state.db.list_weights(limit).await {
        Ok(history) => history,
        Err(e) => return e.into(),
    };

    ApiResponse::success(WeightsResponse {
        weights: resolved.weights,
        source: resolved.source,
        history: history.into_iter().map(StoredWeightsResponse::from).collect(),
    })
}

/// `PUT /api/v1/weights`
///
/// Appends a new vector; earlier vectors stay in the history. Only callers
/// listed in `ATTRITION_ADMIN_CALLERS` may do this.
#[utoipa::path(
    put,
    path = "/api/v1/weights",
    tag = "weights",
    operation_id = "weights.update",
    request_body = UpdateWeightsRequest,
    responses(
        (status = 201, description = "Weight vector stored", body = StoredWeightsResponse),
        (status = 400, description = "Negative or non-finite weight", body = ApiError),
        (status = 403, description = "Caller is not an admin", body = ApiError),
    )
)]
pub async fn update_weights(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    AppJson(req): AppJson<UpdateWeightsRequest>,
) -> ApiResponse<StoredWeightsResponse> {
    if !state.config.server.is_admin(caller.as_str()) {
        return ApiResponse::error(
            ErrorCode::Forbidden,
            "Only admin callers may change scoring weights",
        );
    }

    let weights = WeightVector::from(&req);
    if !weights.is_finite() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Weights must be finite numbers");
    }
    if let Err(errors) = req.validate() {
        return ApiResponse::error(
            ErrorCode::InvalidRequest,
            format!("Weights must not be negative: {errors}"),
        );
    }

    let stored = StoredWeights {
        id: nanoid::nanoid!(),
        weights,
        updated_by: caller.as_str().to_string(),
        updated_at: Utc::now(),
    };

    if let Err(e) = state.db.insert_weights(&stored).await {
        return e.into();
    }

    tracing::info!(
        weights_id = %stored.id,
        updated_by = %stored.updated_by,
        sum = stored.weights.sum(),
        "Scoring weights updated"
    );

    ApiResponse::created(StoredWeightsResponse::from(stored))
}
