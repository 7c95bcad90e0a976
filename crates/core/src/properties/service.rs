//! Property service.

use std::future::Future;
use std::sync::Arc;

use rentdesk_shared::{
    AppError, AppResult,
    types::{AssignmentId, OwnerId, PropertyId},
};

use super::types::{
    CreatePropertyInput, NewProperty, PropertyFilter, PropertyRecord, UpdatePropertyInput,
};
use crate::assignments::NewAssignment;
use crate::auth::{Principal, Role};
use crate::clock::Clock;
use crate::scope::{AssignmentLookup, PropertyScope, ScopeResolver};
use crate::validate;

/// Scoped property lookup, shared by every service that writes ledger rows.
pub trait PropertyLookup: Send + Sync {
    /// Finds a property visible within `scope`.
    fn find_property(
        &self,
        id: PropertyId,
        scope: &PropertyScope,
    ) -> impl Future<Output = AppResult<Option<PropertyRecord>>> + Send;
}

/// Persistence for the property directory.
pub trait PropertyStore: PropertyLookup {
    /// Returns the owner's display name, or `None` if the owner does not exist.
    fn owner_name(&self, owner: OwnerId) -> impl Future<Output = AppResult<Option<String>>> + Send;

    /// Atomically inserts a property and, optionally, a manager assignment for it.
    fn insert_property(
        &self,
        property: NewProperty,
        assignment: Option<NewAssignment>,
    ) -> impl Future<Output = AppResult<()>> + Send;

    /// Lists properties matching `filter` within `scope`, ordered by title.
    fn list_properties(
        &self,
        filter: &PropertyFilter,
        scope: &PropertyScope,
    ) -> impl Future<Output = AppResult<Vec<PropertyRecord>>> + Send;

    /// Applies a partial update. Returns `false` if the property is gone.
    fn update_property(
        &self,
        id: PropertyId,
        changes: &UpdatePropertyInput,
    ) -> impl Future<Output = AppResult<bool>> + Send;

    /// Deletes a property and everything hanging off it.
    fn delete_property(&self, id: PropertyId) -> impl Future<Output = AppResult<bool>> + Send;
}

/// Property service.
pub struct PropertyService<A: AssignmentLookup, S: PropertyStore> {
    scopes: ScopeResolver<A>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

fn property_not_found() -> AppError {
    AppError::not_found("Property not found")
}

impl<A: AssignmentLookup, S: PropertyStore> PropertyService<A, S> {
    /// Creates a new property service.
    #[must_use]
    pub fn new(scopes: ScopeResolver<A>, store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            scopes,
            store,
            clock,
        }
    }

    /// Lists the properties visible to `principal`.
    pub async fn list(
        &self,
        principal: &Principal,
        filter: &PropertyFilter,
    ) -> AppResult<Vec<PropertyRecord>> {
        let scope = self.scopes.property_scope(principal).await?;
        if scope.is_nothing() {
            return Ok(Vec::new());
        }
        self.store.list_properties(filter, &scope).await
    }

    /// Fetches one property visible to `principal`.
    pub async fn get(&self, principal: &Principal, id: PropertyId) -> AppResult<PropertyRecord> {
        let scope = self.scopes.property_scope(principal).await?;
        self.store
            .find_property(id, &scope)
            .await?
            .ok_or_else(property_not_found)
    }

    /// Creates a property.
    ///
    /// Allowed for administrators and for managers holding the
    /// create-properties permission; a manager is assigned to the new
    /// property in the same atomic write.
    ///
    /// # Errors
    ///
    /// `Forbidden` without permission, `BadRequest` for blank fields,
    /// `NotFound` for an unknown owner.
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreatePropertyInput,
    ) -> AppResult<PropertyRecord> {
        if !principal.can_create_properties() {
            return Err(AppError::forbidden("Not allowed to create properties"));
        }
        let title = validate::non_blank("title", &input.title)?;
        let address = validate::non_blank("address", &input.address)?;

        let owner_name = self
            .store
            .owner_name(input.owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Owner not found"))?;

        let now = self.clock.now();
        let property = NewProperty {
            id: PropertyId::new(),
            title,
            address,
            owner_id: input.owner_id,
            created_at: now,
        };
        let assignment = match principal {
            Principal::Manager { user_id, .. } => Some(NewAssignment {
                id: AssignmentId::new(),
                user_id: *user_id,
                property_id: property.id,
                assigned_at: now,
            }),
            Principal::Admin { .. } | Principal::Owner { .. } => None,
        };

        let record = PropertyRecord {
            id: property.id,
            title: property.title.clone(),
            address: property.address.clone(),
            owner_id: property.owner_id,
            owner_name,
            created_at: now,
        };
        self.store.insert_property(property, assignment).await?;
        Ok(record)
    }

    /// Updates a property. Administrators only.
    ///
    /// Moving a property to another owner leaves its historical ledger
    /// entries attributed to the previous owner.
    pub async fn update(
        &self,
        principal: &Principal,
        id: PropertyId,
        input: UpdatePropertyInput,
    ) -> AppResult<PropertyRecord> {
        principal.require(&[Role::Admin])?;

        let changes = UpdatePropertyInput {
            title: input
                .title
                .map(|t| validate::non_blank("title", &t))
                .transpose()?,
            address: input
                .address
                .map(|a| validate::non_blank("address", &a))
                .transpose()?,
            owner_id: input.owner_id,
        };

        if let Some(owner_id) = changes.owner_id
            && self.store.owner_name(owner_id).await?.is_none()
        {
            return Err(AppError::not_found("Owner not found"));
        }

        if !self.store.update_property(id, &changes).await? {
            return Err(property_not_found());
        }
        self.store
            .find_property(id, &PropertyScope::All)
            .await?
            .ok_or_else(property_not_found)
    }

    /// Deletes a property. Administrators only.
    pub async fn delete(&self, principal: &Principal, id: PropertyId) -> AppResult<()> {
        principal.require(&[Role::Admin])?;
        if self.store.delete_property(id).await? {
            Ok(())
        } else {
            Err(property_not_found())
        }
    }
}
