//! Property routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use rentdesk_core::properties::{
    CreatePropertyInput, PropertyFilter, PropertyRecord, UpdatePropertyInput,
};
use rentdesk_shared::types::{Listing, OwnerId, PropertyId};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{
    AppState,
    error::ApiResult,
    extractors::{ApiPath, ApiQuery, ValidatedJson},
    middleware::AuthUser,
};

/// Query for `GET /properties`.
#[derive(Debug, Default, Deserialize)]
pub struct PropertyListQuery {
    /// Only properties of this owner (intersected with the caller's scope).
    pub owner_id: Option<OwnerId>,
    /// Case-insensitive substring of title or address.
    pub search: Option<String>,
}

/// New property.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    /// Display title.
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    /// Street address.
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    /// Owning owner profile.
    pub owner_id: OwnerId,
}

/// Partial property update.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePropertyRequest {
    /// New title.
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    /// New address.
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: Option<String>,
    /// Moves the property to another owner. Past ledger entries stay with the old one.
    pub owner_id: Option<OwnerId>,
}

/// Creates the properties router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list_properties).post(create_property))
        .route(
            "/properties/{id}",
            get(get_property)
                .patch(update_property)
                .delete(delete_property),
        )
}

/// GET /properties
async fn list_properties(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<PropertyListQuery>,
) -> ApiResult<Json<Listing<PropertyRecord>>> {
    let filter = PropertyFilter {
        owner_id: query.owner_id,
        search: query.search,
    };
    let properties = state.properties().list(&auth.principal, &filter).await?;
    Ok(Json(Listing::new(properties)))
}

/// GET /properties/{id}
async fn get_property(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<PropertyId>,
) -> ApiResult<Json<PropertyRecord>> {
    Ok(Json(state.properties().get(&auth.principal, id).await?))
}

/// POST /properties
async fn create_property(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreatePropertyRequest>,
) -> ApiResult<(StatusCode, Json<PropertyRecord>)> {
    let input = CreatePropertyInput {
        title: body.title,
        address: body.address,
        owner_id: body.owner_id,
    };
    let property = state.properties().create(&auth.principal, input).await?;
    info!(
        property_id = %property.id,
        owner_id = %property.owner_id,
        created_by = %auth.identity.id,
        "Property created"
    );
    Ok((StatusCode::CREATED, Json(property)))
}

/// PATCH /properties/{id}
async fn update_property(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<PropertyId>,
    ValidatedJson(body): ValidatedJson<UpdatePropertyRequest>,
) -> ApiResult<Json<PropertyRecord>> {
    let input = UpdatePropertyInput {
        title: body.title,
        address: body.address,
        owner_id: body.owner_id,
    };
    let property = state.properties().update(&auth.principal, id, input).await?;
    info!(property_id = %id, owner_id = %property.owner_id, "Property updated");
    Ok(Json(property))
}

/// DELETE /properties/{id}
async fn delete_property(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<PropertyId>,
) -> ApiResult<StatusCode> {
    state.properties().delete(&auth.principal, id).await?;
    info!(property_id = %id, "Property deleted");
    Ok(StatusCode::NO_CONTENT)
}
