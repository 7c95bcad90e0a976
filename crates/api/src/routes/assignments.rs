//! Manager-to-property assignment routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use rentdesk_core::assignments::{AssignInput, AssignmentFilter, AssignmentRecord};
use rentdesk_shared::types::{AssignmentId, Listing, PropertyId, UserId};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{
    AppState,
    error::ApiResult,
    extractors::{ApiPath, ApiQuery, ValidatedJson},
    middleware::AuthUser,
};

/// Query for `GET /manager-properties`.
#[derive(Debug, Default, Deserialize)]
pub struct AssignmentListQuery {
    /// Only this manager.
    pub user_id: Option<UserId>,
    /// Only this property.
    pub property_id: Option<PropertyId>,
}

/// Assigns a property to a manager.
#[derive(Debug, Deserialize, Validate)]
pub struct AssignRequest {
    /// Manager user.
    pub user_id: UserId,
    /// Property.
    pub property_id: PropertyId,
}

/// Creates the manager-properties router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/manager-properties", get(list_assignments).post(assign))
        .route("/manager-properties/{id}", delete(unassign))
}

/// GET /manager-properties
async fn list_assignments(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<AssignmentListQuery>,
) -> ApiResult<Json<Listing<AssignmentRecord>>> {
    let filter = AssignmentFilter {
        user_id: query.user_id,
        property_id: query.property_id,
    };
    let items = state.assignments().list(&auth.principal, filter).await?;
    Ok(Json(Listing::new(items)))
}

/// POST /manager-properties
async fn assign(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<AssignRequest>,
) -> ApiResult<(StatusCode, Json<AssignmentRecord>)> {
    let input = AssignInput {
        user_id: body.user_id,
        property_id: body.property_id,
    };
    let assignment = state.assignments().assign(&auth.principal, input).await?;
    info!(
        assignment_id = %assignment.id,
        user_id = %assignment.user_id,
        property_id = %assignment.property_id,
        "Property assigned to manager"
    );
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// DELETE /manager-properties/{id}
async fn unassign(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<AssignmentId>,
) -> ApiResult<StatusCode> {
    state.assignments().unassign(&auth.principal, id).await?;
    info!(assignment_id = %id, "Assignment removed");
    Ok(StatusCode::NO_CONTENT)
}
