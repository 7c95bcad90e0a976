//! Ledger routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use rentdesk_core::{
    ledger::{DateWindow, TransactionRecord, TransactionType},
    transactions::{CreateTransactionInput, TransactionFilter},
};
use rentdesk_shared::types::{OwnerId, PageRequest, PageResponse, PropertyId, TransactionId};
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

/// Query for `GET /transactions`.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionListQuery {
    /// Only this property.
    pub property_id: Option<PropertyId>,
    /// Only entries booked for this owner.
    pub owner_id: Option<OwnerId>,
    /// Only this type (`INCOME`, `COMMISSION`, ...).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Earliest creation instant.
    pub from: Option<String>,
    /// Latest creation instant.
    pub to: Option<String>,
    /// 1-based page.
    pub page: Option<u64>,
    /// Page size.
    pub limit: Option<u64>,
}

/// Manual ledger entry.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    /// Property the entry is booked on.
    pub property_id: PropertyId,
    /// Entry type.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Positive amount; rounded to cents.
    pub amount: Decimal,
    /// Free-text note.
    pub comment: Option<String>,
}

/// Creates the transactions router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
}

/// GET /transactions
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<TransactionListQuery>,
) -> ApiResult<Json<PageResponse<TransactionRecord>>> {
    let filter = TransactionFilter {
        property_id: query.property_id,
        owner_id: query.owner_id,
        kind: query.kind.as_deref().map(str::parse::<TransactionType>).transpose()?,
        window: DateWindow::parse(query.from.as_deref(), query.to.as_deref())?,
    };
    let page = PageRequest::new(query.page, query.limit);
    Ok(Json(
        state
            .transactions()
            .list(&auth.principal, &filter, page)
            .await?,
    ))
}

/// POST /transactions
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateTransactionRequest>,
) -> ApiResult<(StatusCode, Json<TransactionRecord>)> {
    let input = CreateTransactionInput {
        property_id: body.property_id,
        kind: body.kind,
        amount: body.amount,
        comment: body.comment,
    };
    let record = state.transactions().create(&auth.principal, input).await?;
    info!(
        transaction_id = %record.id,
        kind = %record.kind,
        amount = %record.amount,
        property_id = %record.property_id,
        "Transaction recorded"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /transactions/{id}
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<TransactionId>,
) -> ApiResult<StatusCode> {
    state.transactions().delete(&auth.principal, id).await?;
    info!(transaction_id = %id, deleted_by = %auth.identity.id, "Transaction deleted");
    Ok(StatusCode::NO_CONTENT)
}
