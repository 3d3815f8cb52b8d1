//! v1 risk scoring handler.

use axum::extract::State;
use axum::Extension;

use crate::api::extractors::AppJson;
use crate::api::v1::dto::RiskScoreResponse;
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::models::{CallerIdentity, Profile};

/// `POST /api/v1/risk:score`
///
/// Unknown or malformed profile fields fall back to neutral defaults instead
/// of rejecting the request. A narrative failure never fails the request; the
/// recommendations then hold a generic placeholder.
#[utoipa::path(
    post,
    path = "/api/v1/risk:score",
    tag = "risk",
    operation_id = "risk.score",
    request_body = Profile,
    responses(
        (status = 200, description = "Profile scored and recorded", body = RiskScoreResponse),
        (status = 400, description = "Body is not a JSON object", body = ApiError),
        (status = 401, description = "Missing or invalid API key", body = ApiError),
        (status = 500, description = "Audit record could not be persisted", body = ApiError),
    )
)]
pub async fn score_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    AppJson(profile): AppJson<Profile>,
) -> ApiResponse<RiskScoreResponse> {
    match state.scoring.score(Some(&caller), profile).await {
        Ok(outcome) => ApiResponse::success(RiskScoreResponse::from(outcome)),
        Err(e) => e.into(),
    }
}
