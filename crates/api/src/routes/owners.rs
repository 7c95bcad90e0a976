//! Owner directory routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use rentdesk_core::owners::{OwnerDetail, OwnerRecord, UpdateOwnerInput};
use rentdesk_shared::types::{Listing, OwnerId};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{
    AppState,
    error::ApiResult,
    extractors::{ApiPath, ApiQuery, ValidatedJson},
    middleware::AuthUser,
};

/// Query for `GET /owners`.
#[derive(Debug, Default, Deserialize)]
pub struct OwnerListQuery {
    /// Case-insensitive substring of the owner's name.
    pub search: Option<String>,
}

/// Contact-data update.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateOwnerRequest {
    /// New display name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
}

/// Creates the owners router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/owners", get(list_owners)).route(
        "/owners/{id}",
        get(get_owner).patch(update_owner).delete(delete_owner),
    )
}

/// GET /owners
async fn list_owners(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<OwnerListQuery>,
) -> ApiResult<Json<Listing<OwnerRecord>>> {
    let owners = state
        .owners()
        .list(&auth.principal, query.search.as_deref())
        .await?;
    Ok(Json(Listing::new(owners)))
}

/// GET /owners/{id}
async fn get_owner(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<OwnerId>,
) -> ApiResult<Json<OwnerDetail>> {
    Ok(Json(state.owners().get(&auth.principal, id).await?))
}

/// PATCH /owners/{id}
async fn update_owner(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<OwnerId>,
    ValidatedJson(body): ValidatedJson<UpdateOwnerRequest>,
) -> ApiResult<Json<OwnerRecord>> {
    let input = UpdateOwnerInput {
        name: body.name,
        phone: body.phone,
    };
    let owner = state.owners().update(&auth.principal, id, input).await?;
    info!(owner_id = %id, updated_by = %auth.identity.id, "Owner updated");
    Ok(Json(owner))
}

/// DELETE /owners/{id}
async fn delete_owner(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<OwnerId>,
) -> ApiResult<StatusCode> {
    state.owners().delete(&auth.principal, id).await?;
    info!(owner_id = %id, deleted_by = %auth.identity.id, "Owner deleted");
    Ok(StatusCode::NO_CONTENT)
}
