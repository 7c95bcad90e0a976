//! Assignment service.

use std::future::Future;
use std::sync::Arc;

use rentdesk_shared::{
    AppError, AppResult,
    types::{AssignmentId, PropertyId, UserId},
};

use super::types::{AssignInput, AssignmentFilter, AssignmentRecord, NewAssignment};
use crate::auth::{Principal, Role};
use crate::clock::Clock;
use crate::scope::AssignmentLookup;

/// Persistence for assignments.
pub trait AssignmentStore: AssignmentLookup {
    /// Whether `user` exists and has the MANAGER role.
    fn is_manager(&self, user: UserId) -> impl Future<Output = AppResult<bool>> + Send;

    /// Whether the property exists.
    fn property_exists(&self, property: PropertyId) -> impl Future<Output = AppResult<bool>> + Send;

    /// Whether the pair is already assigned.
    fn is_assigned(
        &self,
        user: UserId,
        property: PropertyId,
    ) -> impl Future<Output = AppResult<bool>> + Send;

    /// Inserts an assignment. A duplicate pair fails with `Conflict`.
    fn insert_assignment(
        &self,
        assignment: NewAssignment,
    ) -> impl Future<Output = AppResult<()>> + Send;

    /// Finds one assignment.
    fn find_assignment(
        &self,
        id: AssignmentId,
    ) -> impl Future<Output = AppResult<Option<AssignmentRecord>>> + Send;

    /// Lists assignments, newest first.
    fn list_assignments(
        &self,
        filter: AssignmentFilter,
    ) -> impl Future<Output = AppResult<Vec<AssignmentRecord>>> + Send;

    /// Deletes an assignment. Returns `false` if it did not exist.
    fn delete_assignment(&self, id: AssignmentId) -> impl Future<Output = AppResult<bool>> + Send;
}

/// Assignment service. Every operation is restricted to administrators.
pub struct AssignmentService<S: AssignmentStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: AssignmentStore> AssignmentService<S> {
    /// Creates a new assignment service.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Assigns a manager to a property.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user is not a manager or the property does not
    /// exist, `Conflict` if the pair is already assigned.
    pub async fn assign(
        &self,
        principal: &Principal,
        input: AssignInput,
    ) -> AppResult<AssignmentRecord> {
        principal.require(&[Role::Admin])?;

        if !self.store.is_manager(input.user_id).await? {
            return Err(AppError::not_found("Manager not found"));
        }
        if !self.store.property_exists(input.property_id).await? {
            return Err(AppError::not_found("Property not found"));
        }
        if self.store.is_assigned(input.user_id, input.property_id).await? {
            return Err(AppError::conflict(
                "Property is already assigned to this manager",
            ));
        }

        let assignment = NewAssignment {
            id: AssignmentId::new(),
            user_id: input.user_id,
            property_id: input.property_id,
            assigned_at: self.clock.now(),
        };
        let id = assignment.id;
        self.store.insert_assignment(assignment).await?;

        self.store
            .find_assignment(id)
            .await?
            .ok_or_else(|| AppError::internal("assignment vanished after insert"))
    }

    /// Removes an assignment.
    pub async fn unassign(&self, principal: &Principal, id: AssignmentId) -> AppResult<()> {
        principal.require(&[Role::Admin])?;
        if self.store.delete_assignment(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Assignment not found"))
        }
    }

    /// Lists assignments.
    pub async fn list(
        &self,
        principal: &Principal,
        filter: AssignmentFilter,
    ) -> AppResult<Vec<AssignmentRecord>> {
        principal.require(&[Role::Admin])?;
        self.store.list_assignments(filter).await
    }
}
