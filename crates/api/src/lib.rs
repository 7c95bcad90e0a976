//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api`
//! - Bearer authentication resolving a `Principal`
//! - Request extractors
//! - Error rendering

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};
use rentdesk_core::{
    Clock,
    assignments::AssignmentService,
    auth::SessionManager,
    owners::OwnerService,
    payouts::PayoutService,
    properties::PropertyService,
    scope::ScopeResolver,
    stays::StayService,
    summary::SummaryService,
    transactions::TransactionService,
    users::UserService,
};
use rentdesk_db::{
    AssignmentRepository, LedgerRepository, OwnerRepository, PayoutRepository,
    PropertyRepository, SessionRepository, StayRepository, TransactionRepository, UserRepository,
};
use rentdesk_shared::JwtService;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Lifetime of refresh tokens in days.
    pub refresh_token_expiry_days: i64,
    /// Browser origin allowed by CORS.
    pub cors_origin: String,
}

impl AppState {
    fn conn(&self) -> DatabaseConnection {
        (*self.db).clone()
    }

    fn scopes(&self) -> ScopeResolver<AssignmentRepository> {
        ScopeResolver::new(Arc::new(AssignmentRepository::new(self.conn())))
    }

    /// Session manager backed by the database.
    #[must_use]
    pub fn sessions(&self) -> SessionManager<SessionRepository> {
        SessionManager::new(
            Arc::new(SessionRepository::new(self.conn())),
            Arc::clone(&self.jwt_service),
            Arc::clone(&self.clock),
            self.refresh_token_expiry_days,
        )
    }

    /// Account administration.
    #[must_use]
    pub fn users(&self) -> UserService<UserRepository> {
        UserService::new(
            Arc::new(UserRepository::new(self.conn())),
            Arc::clone(&self.clock),
        )
    }

    /// Manager assignments.
    #[must_use]
    pub fn assignments(&self) -> AssignmentService<AssignmentRepository> {
        AssignmentService::new(
            Arc::new(AssignmentRepository::new(self.conn())),
            Arc::clone(&self.clock),
        )
    }

    /// Owner directory.
    #[must_use]
    pub fn owners(&self) -> OwnerService<AssignmentRepository, OwnerRepository> {
        OwnerService::new(self.scopes(), Arc::new(OwnerRepository::new(self.conn())))
    }

    /// Properties.
    #[must_use]
    pub fn properties(&self) -> PropertyService<AssignmentRepository, PropertyRepository> {
        PropertyService::new(
            self.scopes(),
            Arc::new(PropertyRepository::new(self.conn())),
            Arc::clone(&self.clock),
        )
    }

    /// Stays.
    #[must_use]
    pub fn stays(&self) -> StayService<AssignmentRepository, StayRepository> {
        StayService::new(
            self.scopes(),
            Arc::new(StayRepository::new(self.conn())),
            Arc::clone(&self.clock),
        )
    }

    /// Ledger entries.
    #[must_use]
    pub fn transactions(&self) -> TransactionService<AssignmentRepository, TransactionRepository> {
        TransactionService::new(
            self.scopes(),
            Arc::new(TransactionRepository::new(self.conn())),
            Arc::clone(&self.clock),
        )
    }

    /// Payouts.
    #[must_use]
    pub fn payouts(&self) -> PayoutService<AssignmentRepository, PayoutRepository> {
        PayoutService::new(
            self.scopes(),
            Arc::new(PayoutRepository::new(self.conn())),
            Arc::clone(&self.clock),
        )
    }

    /// Owner financial summaries.
    #[must_use]
    pub fn summaries(&self) -> SummaryService<AssignmentRepository, LedgerRepository> {
        SummaryService::new(
            self.scopes(),
            Arc::new(LedgerRepository::new(self.conn())),
            Arc::clone(&self.clock),
        )
    }
}

/// CORS for a single browser origin with credentials.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!(origin, "ignoring invalid CORS origin");
            layer
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);
    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
        .layer(cors)
        .with_state(state)
}
