//! # V1 API Key Authentication Middleware
//!
//! Protects all v1 API routes (except explicitly public ones like `/health`)
//! with Bearer token authentication. Tokens are resolved to a caller id via
//! the `ATTRITION_API_KEYS` configuration and the resulting
//! [`CallerIdentity`] is attached to the request extensions for handlers.
//!
//! Errors are returned as the v1 `ApiResponse` JSON envelope so auth failures
//! conform to the v1 contract.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::models::CallerIdentity;

use super::response::{ApiResponse, ErrorCode};

/// Axum middleware that enforces Bearer token authentication for v1 API routes.
///
/// # Behavior
///
/// - If `ATTRITION_API_KEYS` is empty/unset → returns 401 with JSON error
///   envelope. The server still starts, but protected routes are locked down.
/// - If the `Authorization: Bearer <token>` header is missing or malformed → 401.
/// - If the token is not in the configured key list → 401.
/// - If the token is valid → inserts the caller's [`CallerIdentity`] and passes
///   the request through to the next handler.
pub async fn v1_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if state.config.server.api_keys.is_empty() {
        return ApiResponse::<()>::error(
            ErrorCode::Unauthorized,
            "API keys not configured. Set ATTRITION_API_KEYS to enable access.",
        )
        .into_response();
    }

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(token) => token.trim(),
            None => {
                return ApiResponse::<()>::error(
                    ErrorCode::Unauthorized,
                    "Invalid authorization header format. Expected: Bearer <token>",
                )
                .into_response();
            }
        },
        None => {
            return ApiResponse::<()>::error(
                ErrorCode::Unauthorized,
                "Missing authorization header",
            )
            .into_response();
        }
    };

    let Some(caller) = state.config.server.caller_for_token(token) else {
        return ApiResponse::<()>::error(ErrorCode::Unauthorized, "Invalid API key")
            .into_response();
    };

    let caller = CallerIdentity::new(caller);
    tracing::debug!(caller_id = %caller, "Authenticated request");
    request.extensions_mut().insert(caller);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::testing::{test_state, StaticGenerator};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    async fn build_test_app(keys: &[(&str, &str)]) -> (Router, tempfile::NamedTempFile) {
        let (state, file) = test_state(keys, &[], StaticGenerator(None)).await;

        async fn protected_handler(Extension(caller): Extension<CallerIdentity>) -> String {
            caller.to_string()
        }

        async fn health_handler() -> &'static str {
            "healthy"
        }

        let public_routes = Router::new().route("/health", get(health_handler));

        let protected_routes = Router::new()
            .route("/protected", get(protected_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                v1_auth_middleware,
            ));

        let app = Router::new()
            .merge(public_routes)
            .merge(protected_routes)
            .with_state(state);
        (app, file)
    }

    fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(auth) = auth {
            builder = builder.header("Authorization", auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    /// Parses JSON error envelope from response body.
    async fn parse_error_body(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_v1_auth_rejects_when_no_keys_configured() {
        let (app, _db) = build_test_app(&[]).await;

        let response = app.oneshot(get_request("/protected", None)).await.unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "unauthorized");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("API keys not configured"));
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_v1_auth_attaches_caller_identity() {
        let (app, _db) = build_test_app(&[("hr-portal", "test-key-v1")]).await;

        let response = app
            .oneshot(get_request("/protected", Some("Bearer test-key-v1")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"hr-portal");
    }

    #[tokio::test]
    async fn test_v1_auth_rejects_invalid_key() {
        let (app, _db) = build_test_app(&[("hr-portal", "test-key-v1")]).await;

        let response = app
            .oneshot(get_request("/protected", Some("Bearer wrong-key")))
            .await
            .unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "unauthorized");
        assert_eq!(json["error"]["message"], "Invalid API key");
    }

    #[tokio::test]
    async fn test_v1_auth_rejects_non_bearer_scheme() {
        let (app, _db) = build_test_app(&[("hr-portal", "test-key-v1")]).await;

        let response = app
            .oneshot(get_request("/protected", Some("Basic test-key-v1")))
            .await
            .unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Expected: Bearer <token>"));
    }

    #[tokio::test]
    async fn test_v1_auth_rejects_missing_header() {
        let (app, _db) = build_test_app(&[("hr-portal", "test-key-v1")]).await;

        let response = app.oneshot(get_request("/protected", None)).await.unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "unauthorized");
        assert_eq!(json["error"]["message"], "Missing authorization header");
    }

    #[tokio::test]
    async fn test_v1_health_bypasses_auth() {
        let (app, _db) = build_test_app(&[]).await;

        let response = app.oneshot(get_request("/health", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_v1_auth_error_response_is_json_envelope() {
        let (app, _db) = build_test_app(&[("svc", "key")]).await;

        let response = app
            .oneshot(get_request("/protected", Some("Bearer bad")))
            .await
            .unwrap();

        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.contains("application/json"));

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(json.get("data").is_none());
        assert!(json.get("meta").is_none());
        assert_eq!(json["error"]["code"], "unauthorized");
        assert!(json["error"]["message"].is_string());
    }
}
