//! Owner financial summaries.

use axum::{Json, Router, extract::State, routing::get};
use rentdesk_core::{
    auth::Role,
    ledger::Period,
    summary::{OwnerSummary, SummaryRequest},
};
use rentdesk_shared::types::OwnerId;
use serde::Deserialize;

use crate::{
    AppState,
    error::ApiResult,
    extractors::{ApiPath, ApiQuery},
    middleware::AuthUser,
};

/// Query shared by both dashboard routes. Explicit `from`/`to` win over `period`.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// `month`, `quarter`, `year` or `all` (default).
    pub period: Option<Period>,
    /// Window start.
    pub from: Option<String>,
    /// Window end.
    pub to: Option<String>,
}

impl From<SummaryQuery> for SummaryRequest {
    fn from(query: SummaryQuery) -> Self {
        Self {
            period: query.period,
            from: query.from,
            to: query.to,
        }
    }
}

/// Creates the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(my_summary))
        .route("/dashboard/owners/{owner_id}", get(owner_summary))
}

/// GET /dashboard
///
/// Owners only; administrators and managers are forbidden.
async fn my_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<SummaryQuery>,
) -> ApiResult<Json<OwnerSummary>> {
    auth.principal.require_owner()?;
    let summary = state
        .summaries()
        .get_for_current_user(&auth.principal, &query.into())
        .await?;
    Ok(Json(summary))
}

/// GET /dashboard/owners/{owner_id}
async fn owner_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(owner_id): ApiPath<OwnerId>,
    ApiQuery(query): ApiQuery<SummaryQuery>,
) -> ApiResult<Json<OwnerSummary>> {
    auth.principal.require(&[Role::Manager])?;
    let summary = state
        .summaries()
        .get_owner_summary(&auth.principal, owner_id, &query.into())
        .await?;
    Ok(Json(summary))
}
