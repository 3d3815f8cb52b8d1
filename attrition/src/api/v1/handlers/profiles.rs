//! v1 scoring history handlers.

use axum::extract::{Path, State};
use axum::Extension;
use axum_extra::extract::Query;

use crate::api::v1::dto::{ListProfilesResponse, ProfileRecordResponse, ProfileSummaryResponse};
use crate::api::v1::response::{ApiError, ApiResponse, CursorPagination, ErrorCode, ResponseMeta};
use crate::api::AppState;
use crate::models::CallerIdentity;

/// `GET /api/v1/profiles`
#[utoipa::path(
    get,
    path = "/api/v1/profiles",
    tag = "profiles",
    operation_id = "profiles.list",
    params(CursorPagination),
    responses(
        (status = 200, description = "Profiles scored by the caller, newest first", body = ListProfilesResponse),
        (status = 400, description = "Invalid cursor", body = ApiError),
    )
)]
pub async fn list_profiles(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Query(pagination): Query<CursorPagination>,
) -> ApiResponse<ListProfilesResponse> {
    let pagination = pagination.validate();
    let offset = match pagination.offset() {
        Ok(offset) => offset,
        Err(e) => return e.into(),
    };

    let (summaries, total) = match state
        .db
        .list_profile_records(caller.as_str(), pagination.limit, offset)
        .await
    {
        Ok(page) => page,
        Err(e) => return e.into(),
    };

    let meta = ResponseMeta {
        next_cursor: pagination.next_cursor(offset, total),
        total: Some(total),
    };

    ApiResponse::success_with_meta(
        ListProfilesResponse {
            profiles: summaries
                .into_iter()
                .map(ProfileSummaryResponse::from)
                .collect(),
        },
        meta,
    )
}

/// `GET /api/v1/profiles/{profileId}`
///
/// Records owned by another caller are reported as not found unless the
/// caller is an admin.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{profileId}",
    tag = "profiles",
    operation_id = "profiles.get",
    params(("profileId" = String, Path, description = "Profile record ID")),
    responses(
        (status = 200, description = "Profile record found", body = ProfileRecordResponse),
        (status = 404, description = "Profile record not found", body = ApiError),
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<String>,
) -> ApiResponse<ProfileRecordResponse> {
    let record = match state.db.get_profile_record(&id).await {
        Ok(Some(record))
            if record.caller_id == caller.as_str()
                || state.config.server.is_admin(caller.as_str()) =>
        {
            record
        }
        Ok(_) => {
            return ApiResponse::error(ErrorCode::NotFound, format!("Profile {id} not found"))
        }
        Err(e) => return e.into(),
    };

    let llm_call = match state.db.get_llm_call_for_profile(&record.id).await {
        Ok(call) => call,
        Err(e) => {
            tracing::warn!(error = %e, profile_id = %record.id, "Failed to load LLM call record");
            None
        }
    };

    ApiResponse::success(ProfileRecordResponse::new(record, llm_call))
}
