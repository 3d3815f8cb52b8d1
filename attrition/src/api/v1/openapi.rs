use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;
use crate::{models, scoring};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attrition API",
        version = "1.0.0",
        description = "Attrition risk scoring with LLM-written explanations and an append-only audit trail.",
    ),
    paths(
        handlers::health::health_check,
        handlers::risk::score_profile,
        handlers::profiles::list_profiles,
        handlers::profiles::get_profile,
        handlers::weights::get_weights,
        handlers::weights::update_weights,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        response::CursorPagination,
        // Domain
        models::Profile,
        models::FactorSet,
        models::Factor,
        models::WeightVector,
        models::WeightSource,
        models::Tier,
        scoring::ExplainabilityEntry,
        // Risk
        dto::risk::RiskScoreResponse,
        // Profiles
        dto::profiles::ProfileSummaryResponse,
        dto::profiles::ListProfilesResponse,
        dto::profiles::ProfileRecordResponse,
        dto::profiles::LlmCallResponse,
        // Weights
        dto::weights::UpdateWeightsRequest,
        dto::weights::GetWeightsQuery,
        dto::weights::StoredWeightsResponse,
        dto::weights::WeightsResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "risk", description = "Attrition risk scoring"),
        (name = "profiles", description = "Scoring history and audit records"),
        (name = "weights", description = "Scoring weight configuration"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
