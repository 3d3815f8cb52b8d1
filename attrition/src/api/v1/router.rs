use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::v1_auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let profiles = Router::new()
        .route("/", get(handlers::profiles::list_profiles))
        .route("/{profileId}", get(handlers::profiles::get_profile));

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .route("/risk:score", post(handlers::risk::score_profile))
        .route(
            "/weights",
            get(handlers::weights::get_weights).put(handlers::weights::update_weights),
        )
        .nest("/profiles", profiles)
        .route_layer(middleware::from_fn_with_state(state, v1_auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
