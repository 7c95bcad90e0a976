//! Account administration: owner accounts and managers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, patch, post},
};
use rentdesk_core::{
    auth::Identity,
    users::{CreateManagerInput, CreateOwnerAccountInput, ManagerPermissions, ManagerRecord},
};
use rentdesk_shared::types::{Listing, UserId};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{
    AppState,
    error::ApiResult,
    extractors::{ApiPath, ValidatedJson},
    middleware::AuthUser,
};

/// Request to create an owner account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOwnerRequest {
    /// Login email.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Request to create a manager account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateManagerRequest {
    /// Login email.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// May create owner accounts.
    #[serde(default)]
    pub can_create_owners: bool,
    /// May create properties.
    #[serde(default)]
    pub can_create_properties: bool,
}

/// Partial permission update; absent flags are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePermissionsRequest {
    /// New value for `can_create_owners`.
    pub can_create_owners: Option<bool>,
    /// New value for `can_create_properties`.
    pub can_create_properties: Option<bool>,
}

/// Creates the users router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/owners", post(create_owner))
        .route("/users/managers", post(create_manager).get(list_managers))
        .route("/users/managers/{id}", delete(delete_manager))
        .route("/users/managers/{id}/permissions", patch(update_permissions))
}

/// POST /users/owners
async fn create_owner(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateOwnerRequest>,
) -> ApiResult<(StatusCode, Json<Identity>)> {
    let input = CreateOwnerAccountInput {
        email: body.email,
        password: body.password,
        name: body.name,
        phone: body.phone,
    };
    let identity = state.users().create_owner(&auth.principal, input).await?;
    info!(
        user_id = %identity.id,
        created_by = %auth.identity.id,
        "Owner account created"
    );
    Ok((StatusCode::CREATED, Json(identity)))
}

/// POST /users/managers
async fn create_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateManagerRequest>,
) -> ApiResult<(StatusCode, Json<ManagerRecord>)> {
    let input = CreateManagerInput {
        email: body.email,
        password: body.password,
        name: body.name,
        can_create_owners: body.can_create_owners,
        can_create_properties: body.can_create_properties,
    };
    let manager = state.users().create_manager(&auth.principal, input).await?;
    info!(user_id = %manager.id, "Manager account created");
    Ok((StatusCode::CREATED, Json(manager)))
}

/// GET /users/managers
async fn list_managers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Listing<ManagerRecord>>> {
    let managers = state.users().list_managers(&auth.principal).await?;
    Ok(Json(Listing::new(managers)))
}

/// PATCH /users/managers/{id}/permissions
async fn update_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<UserId>,
    ValidatedJson(body): ValidatedJson<UpdatePermissionsRequest>,
) -> ApiResult<Json<ManagerRecord>> {
    let permissions = ManagerPermissions {
        can_create_owners: body.can_create_owners,
        can_create_properties: body.can_create_properties,
    };
    let manager = state
        .users()
        .update_manager_permissions(&auth.principal, id, permissions)
        .await?;
    info!(
        user_id = %id,
        can_create_owners = manager.can_create_owners,
        can_create_properties = manager.can_create_properties,
        "Manager permissions updated"
    );
    Ok(Json(manager))
}

/// DELETE /users/managers/{id}
async fn delete_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<UserId>,
) -> ApiResult<StatusCode> {
    state.users().delete_manager(&auth.principal, id).await?;
    info!(user_id = %id, "Manager deleted");
    Ok(StatusCode::NO_CONTENT)
}
