//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod assignments;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod owners;
pub mod payouts;
pub mod properties;
pub mod stays;
pub mod transactions;
pub mod users;

/// Creates the API router. Everything except health, login and refresh
/// requires a bearer token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(users::routes())
        .merge(owners::routes())
        .merge(properties::routes())
        .merge(assignments::routes())
        .merge(stays::routes())
        .merge(transactions::routes())
        .merge(payouts::routes())
        .merge(dashboard::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use rstest::rstest;
    use tower::ServiceExt;

    use crate::{create_router, test_support};

    #[rstest]
    #[case("GET", "/api/owners")]
    #[case("GET", "/api/properties")]
    #[case("GET", "/api/stays")]
    #[case("GET", "/api/transactions")]
    #[case("GET", "/api/payouts")]
    #[case("GET", "/api/dashboard")]
    #[case("GET", "/api/users/managers")]
    #[case("GET", "/api/manager-properties")]
    #[case("POST", "/api/stays")]
    #[case("DELETE", "/api/payouts/0190f2d4-6f3e-7a10-8000-000000000001")]
    #[tokio::test]
    async fn test_protected_routes_reject_anonymous(#[case] method: &str, #[case] uri: &str) {
        let response = create_router(test_support::state())
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = create_router(test_support::state())
            .oneshot(
                Request::builder()
                    .uri("/api/nowhere")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
