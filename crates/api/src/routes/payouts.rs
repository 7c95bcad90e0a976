//! Payout routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use rentdesk_core::{
    ledger::DateWindow,
    payouts::{CreatePayoutInput, PayoutDetail, PayoutFilter, PayoutRecord},
};
use rentdesk_shared::types::{OwnerId, PageRequest, PageResponse, PayoutId, PropertyId};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{
    AppState,
    error::ApiResult,
    extractors::{ApiPath, ApiQuery, ValidatedJson},
    middleware::AuthUser,
};

/// Query for `GET /payouts`. `from`/`to` bound `paid_at`.
#[derive(Debug, Default, Deserialize)]
pub struct PayoutListQuery {
    /// Only this property.
    pub property_id: Option<PropertyId>,
    /// Only payouts to this owner.
    pub owner_id: Option<OwnerId>,
    /// Earliest payment instant.
    pub from: Option<String>,
    /// Latest payment instant.
    pub to: Option<String>,
    /// 1-based page.
    pub page: Option<u64>,
    /// Page size.
    pub limit: Option<u64>,
}

/// New payout.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePayoutRequest {
    /// Property the money comes from.
    pub property_id: PropertyId,
    /// Positive amount; rounded to cents.
    pub amount: Decimal,
    /// Note; defaults to `Payout to owner {name}`.
    pub comment: Option<String>,
    /// When the money left; defaults to now.
    pub paid_at: Option<String>,
}

/// Creates the payouts router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payouts", get(list_payouts).post(create_payout))
        .route("/payouts/{id}", delete(delete_payout))
}

/// GET /payouts
async fn list_payouts(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<PayoutListQuery>,
) -> ApiResult<Json<PageResponse<PayoutRecord>>> {
    let filter = PayoutFilter {
        property_id: query.property_id,
        owner_id: query.owner_id,
        window: DateWindow::parse(query.from.as_deref(), query.to.as_deref())?,
    };
    let page = PageRequest::new(query.page, query.limit);
    Ok(Json(
        state.payouts().list(&auth.principal, &filter, page).await?,
    ))
}

/// POST /payouts
async fn create_payout(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreatePayoutRequest>,
) -> ApiResult<(StatusCode, Json<PayoutDetail>)> {
    let input = CreatePayoutInput {
        property_id: body.property_id,
        amount: body.amount,
        comment: body.comment,
        paid_at: body.paid_at,
    };
    let detail = state.payouts().create(&auth.principal, input).await?;
    info!(
        payout_id = %detail.payout.id,
        owner_id = %detail.payout.owner_id,
        amount = %detail.payout.amount,
        "Payout recorded"
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

/// DELETE /payouts/{id}
async fn delete_payout(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<PayoutId>,
) -> ApiResult<StatusCode> {
    state.payouts().delete(&auth.principal, id).await?;
    info!(payout_id = %id, deleted_by = %auth.identity.id, "Payout deleted");
    Ok(StatusCode::NO_CONTENT)
}
