//! Stay routes. Creating a stay books its income, commission and cleaning entries.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use rentdesk_core::{
    ledger::DateWindow,
    stays::{CreateStayInput, StayDetail, StayFilter, StayRecord},
};
use rentdesk_shared::types::{Listing, OwnerId, PropertyId, StayId};
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

/// Query for `GET /stays`.
#[derive(Debug, Default, Deserialize)]
pub struct StayListQuery {
    /// Only this property.
    pub property_id: Option<PropertyId>,
    /// Only properties currently owned by this owner.
    pub owner_id: Option<OwnerId>,
    /// Earliest check-in.
    pub from: Option<String>,
    /// Latest check-out.
    pub to: Option<String>,
    /// Case-insensitive substring of the guest name.
    pub guest_name: Option<String>,
}

/// New stay.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStayRequest {
    /// Property the guest stays at.
    pub property_id: PropertyId,
    /// Guest name.
    #[validate(length(min = 1, message = "guest_name is required"))]
    pub guest_name: String,
    /// Arrival, RFC 3339 or `YYYY-MM-DD`.
    pub check_in: String,
    /// Departure, after `check_in`.
    pub check_out: String,
    /// Amount paid by the guest.
    pub total_amount: Decimal,
    /// Commission as a percentage of `total_amount`.
    pub commission_percent: Option<Decimal>,
    /// Cleaning cost.
    pub cleaning_amount: Option<Decimal>,
    /// Overrides the default INCOME comment.
    pub income_comment: Option<String>,
    /// Overrides the default COMMISSION comment.
    pub commission_comment: Option<String>,
    /// Overrides the default CLEANING comment.
    pub cleaning_comment: Option<String>,
}

impl From<CreateStayRequest> for CreateStayInput {
    fn from(body: CreateStayRequest) -> Self {
        Self {
            property_id: body.property_id,
            guest_name: body.guest_name,
            check_in: body.check_in,
            check_out: body.check_out,
            total_amount: body.total_amount,
            commission_percent: body.commission_percent,
            cleaning_amount: body.cleaning_amount,
            income_comment: body.income_comment,
            commission_comment: body.commission_comment,
            cleaning_comment: body.cleaning_comment,
        }
    }
}

/// Creates the stays router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stays", get(list_stays).post(create_stay))
        .route("/stays/{id}", get(get_stay).delete(delete_stay))
}

/// GET /stays
async fn list_stays(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<StayListQuery>,
) -> ApiResult<Json<Listing<StayRecord>>> {
    let filter = StayFilter {
        property_id: query.property_id,
        owner_id: query.owner_id,
        window: DateWindow::parse(query.from.as_deref(), query.to.as_deref())?,
        guest_name: query.guest_name,
    };
    Ok(Json(state.stays().list(&auth.principal, &filter).await?))
}

/// GET /stays/{id}
async fn get_stay(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<StayId>,
) -> ApiResult<Json<StayDetail>> {
    Ok(Json(state.stays().get(&auth.principal, id).await?))
}

/// POST /stays
async fn create_stay(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateStayRequest>,
) -> ApiResult<(StatusCode, Json<StayDetail>)> {
    let detail = state.stays().create(&auth.principal, body.into()).await?;
    info!(
        stay_id = %detail.stay.id,
        property_id = %detail.stay.property_id,
        entries = detail.transactions.len(),
        created_by = %auth.identity.id,
        "Stay created"
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

/// DELETE /stays/{id}
async fn delete_stay(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<StayId>,
) -> ApiResult<StatusCode> {
    state.stays().delete(&auth.principal, id).await?;
    info!(stay_id = %id, deleted_by = %auth.identity.id, "Stay deleted");
    Ok(StatusCode::NO_CONTENT)
}
