//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use rentdesk_core::auth::{Identity, Principal};
use rentdesk_shared::AppError;

use crate::{AppState, error::ApiError};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware.
///
/// Resolves the bearer token into the caller's current identity and
/// principal, and stores both as an [`AuthUser`] request extension. A user
/// deleted after the token was issued is rejected.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .map(ToOwned::to_owned);

    let Some(token) = token else {
        return ApiError(AppError::unauthorized(
            "Authorization header with Bearer token is required",
        ))
        .into_response();
    };

    match state.sessions().authenticate(&token).await {
        Ok((identity, principal)) => {
            request
                .extensions_mut()
                .insert(AuthUser { identity, principal });
            next.run(request).await
        }
        Err(err) => ApiError(err).into_response(),
    }
}

/// The authenticated caller.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     auth.principal.require(&[Role::Manager])?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Current profile.
    pub identity: Identity,
    /// Role and scope anchor.
    pub principal: Principal,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ApiError(AppError::unauthorized("Authentication required")))
    }
}
