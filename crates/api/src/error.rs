//! HTTP rendering of application errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rentdesk_shared::AppError;
use serde::Serialize;

/// Error body: `{"error": "<snake_code>", "message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An [`AppError`] on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and body for this error. Server-side details are hidden.
    #[must_use]
    pub fn parts(&self) -> (StatusCode, ErrorBody) {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = if self.0.is_server_error() {
            "An internal error occurred".to_string()
        } else {
            self.0.message().to_string()
        };
        (
            status,
            ErrorBody {
                error: self.0.error_code().to_lowercase(),
                message,
            },
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::unauthorized("no"), 401, "unauthorized")]
    #[case(AppError::forbidden("no"), 403, "forbidden")]
    #[case(AppError::not_found("no"), 404, "not_found")]
    #[case(AppError::conflict("no"), 409, "conflict")]
    #[case(AppError::bad_request("no"), 400, "bad_request")]
    #[case(AppError::Database("pool timed out".into()), 500, "database_error")]
    #[case(AppError::internal("boom"), 500, "internal_error")]
    fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
        let (actual, body) = ApiError(err).parts();
        assert_eq!(actual.as_u16(), status);
        assert_eq!(body.error, code);
    }

    #[test]
    fn test_client_errors_keep_message() {
        let (_, body) = ApiError(AppError::not_found("Property not found")).parts();
        assert_eq!(body.message, "Property not found");
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let (_, body) = ApiError(AppError::Database("relation users missing".into())).parts();
        assert!(!body.message.contains("users"));
    }
}
