//! Unit tests for JWT functionality.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::AppError;
use crate::jwt::{JwtConfig, JwtError, JwtService};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 17, hour, minute, 0).unwrap()
}

fn create_test_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_minutes: 15,
    })
}

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let expires_at = now + Duration::hours(1);

    let claims = Claims::new(user_id, "a@b.c", "ADMIN", now, expires_at);

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.email, "a@b.c");
    assert_eq!(claims.role, "ADMIN");
    assert_eq!(claims.iat, now.timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_generate_and_validate_token() {
    let service = create_test_service();
    let user_id = Uuid::new_v4();

    let token = service
        .generate_access_token(user_id, "owner@example.com", "OWNER", at(12, 0))
        .unwrap();
    let claims = service.validate_token(&token, at(12, 14)).unwrap();

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.email, "owner@example.com");
    assert_eq!(claims.role, "OWNER");
    assert_eq!(claims.exp - claims.iat, 15 * 60);
}

#[test]
fn test_expiry_follows_supplied_clock() {
    let service = create_test_service();
    let token = service
        .generate_access_token(Uuid::new_v4(), "x@example.com", "ADMIN", at(12, 0))
        .unwrap();

    assert!(service.validate_token(&token, at(12, 14)).is_ok());
    assert!(matches!(
        service.validate_token(&token, at(12, 15)),
        Err(JwtError::Expired)
    ));
    assert!(matches!(
        service.validate_token(&token, at(14, 0)),
        Err(JwtError::Expired)
    ));
}

#[test]
fn test_token_signed_with_other_secret_rejected() {
    let other = JwtService::new(JwtConfig {
        secret: "another-secret".to_string(),
        access_token_expires_minutes: 15,
    });
    let token = other
        .generate_access_token(Uuid::new_v4(), "x@example.com", "ADMIN", at(12, 0))
        .unwrap();

    let result = create_test_service().validate_token(&token, at(12, 1));
    assert!(matches!(result, Err(JwtError::DecodingError(_))));
}

#[test]
fn test_invalid_token() {
    let service = create_test_service();
    assert!(service.validate_token("invalid.token.here", at(12, 0)).is_err());
}

#[test]
fn test_jwt_errors_map_to_unauthorized() {
    let err: AppError = JwtError::Expired.into();
    assert_eq!(err.status_code(), 401);
    let err: AppError = JwtError::DecodingError("bad".into()).into();
    assert_eq!(err.status_code(), 401);
}

#[test]
fn test_debug_hides_secret() {
    let output = format!("{:?}", create_test_service());
    assert!(!output.contains("test-secret-key-for-testing"));
}
