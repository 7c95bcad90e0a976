//! Authentication routes: login, refresh rotation, logout and profile.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use rentdesk_core::auth::{Identity, LoginOutcome};
use rentdesk_shared::TokenPair;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};
use validator::Validate;

use crate::{AppState, error::ApiResult, extractors::ValidatedJson, middleware::AuthUser};

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Refresh request.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Raw refresh token from login or the previous refresh.
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// Auth routes that need a signed-in caller.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginOutcome>> {
    let outcome = state.sessions().login(&body.email, &body.password).await?;
    info!(user_id = %outcome.user.id, role = %outcome.user.role, "User logged in");
    Ok(Json(outcome))
}

/// POST /auth/refresh
async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RefreshRequest>,
) -> ApiResult<Json<TokenPair>> {
    match state.sessions().refresh(&body.refresh_token).await {
        Ok(pair) => {
            info!("Refresh token rotated");
            Ok(Json(pair))
        }
        Err(err) => {
            if !err.is_server_error() {
                warn!(reason = err.message(), "Refresh rejected");
            }
            Err(err.into())
        }
    }
}

/// POST /auth/logout
async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Value>> {
    state.sessions().logout(auth.identity.id).await?;
    info!(user_id = %auth.identity.id, "User logged out");
    Ok(Json(json!({ "success": true })))
}

/// GET /auth/me
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Identity>> {
    Ok(Json(state.sessions().get_identity(auth.identity.id).await?))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::{create_router, test_support};

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = create_router(test_support::state())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let (status, body) = send(
            Request::builder()
                .uri("/api/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_me_rejects_garbage_token() {
        let (status, body) = send(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_logout_requires_bearer_token() {
        let (status, _) = send(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_email_before_lookup() {
        let (status, body) = send(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email":"not-an-email","password":"secret1"}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert_eq!(body["message"], "email must be a valid address");
    }

    #[tokio::test]
    async fn test_refresh_requires_token_field() {
        let (status, body) = send(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }
}
