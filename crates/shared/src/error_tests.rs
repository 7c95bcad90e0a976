use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::Unauthorized("test".into()), 401, "UNAUTHORIZED")]
#[case(AppError::Forbidden("test".into()), 403, "FORBIDDEN")]
#[case(AppError::NotFound("test".into()), 404, "NOT_FOUND")]
#[case(AppError::BadRequest("test".into()), 400, "BAD_REQUEST")]
#[case(AppError::Conflict("test".into()), 409, "CONFLICT")]
#[case(AppError::Database("test".into()), 500, "DATABASE_ERROR")]
#[case(AppError::Internal("test".into()), 500, "INTERNAL_ERROR")]
fn test_app_error_status_and_code(
    #[case] error: AppError,
    #[case] status: u16,
    #[case] code: &str,
) {
    assert_eq!(error.status_code(), status);
    assert_eq!(error.error_code(), code);
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        AppError::unauthorized("msg").to_string(),
        "Authentication failed: msg"
    );
    assert_eq!(AppError::forbidden("msg").to_string(), "Access denied: msg");
    assert_eq!(AppError::not_found("msg").to_string(), "Not found: msg");
    assert_eq!(AppError::bad_request("msg").to_string(), "Bad request: msg");
    assert_eq!(AppError::conflict("msg").to_string(), "Conflict: msg");
    assert_eq!(
        AppError::Database("msg".into()).to_string(),
        "Database error: msg"
    );
    assert_eq!(AppError::internal("msg").to_string(), "Internal error: msg");
}

#[test]
fn test_only_infrastructure_errors_are_server_errors() {
    assert!(AppError::Database(String::new()).is_server_error());
    assert!(AppError::Internal(String::new()).is_server_error());
    assert!(!AppError::NotFound(String::new()).is_server_error());
    assert!(!AppError::Conflict(String::new()).is_server_error());
}

#[test]
fn test_app_error_message_is_unprefixed() {
    assert_eq!(AppError::not_found("Owner not found").message(), "Owner not found");
    assert_eq!(AppError::Database("timeout".into()).message(), "timeout");
}
