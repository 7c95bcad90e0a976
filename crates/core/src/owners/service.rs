//! Owner service.

use std::future::Future;
use std::sync::Arc;

use rentdesk_shared::{AppError, AppResult, types::OwnerId};

use super::types::{OwnerDetail, OwnerRecord, OwnerRow, UpdateOwnerInput};
use crate::auth::{Principal, Role};
use crate::properties::{PropertyFilter, PropertyRecord};
use crate::scope::{AssignmentLookup, OwnerScope, PropertyScope, ScopeResolver};
use crate::validate;

/// Persistence for owner profiles.
pub trait OwnerStore: Send + Sync {
    /// Lists owners within `owners`, optionally filtered by a name substring,
    /// ordered by name. Property counts are limited to `properties`.
    fn list_owners(
        &self,
        owners: &OwnerScope,
        properties: &PropertyScope,
        search: Option<&str>,
    ) -> impl Future<Output = AppResult<Vec<OwnerRow>>> + Send;

    /// Finds one owner within `owners`.
    fn find_owner(
        &self,
        id: OwnerId,
        owners: &OwnerScope,
        properties: &PropertyScope,
    ) -> impl Future<Output = AppResult<Option<OwnerRow>>> + Send;

    /// Lists properties of the owner within `properties`, ordered by title.
    fn owner_properties(
        &self,
        filter: &PropertyFilter,
        properties: &PropertyScope,
    ) -> impl Future<Output = AppResult<Vec<PropertyRecord>>> + Send;

    /// Applies a partial update. Returns `false` if the owner is gone.
    fn update_owner(
        &self,
        id: OwnerId,
        changes: &UpdateOwnerInput,
    ) -> impl Future<Output = AppResult<bool>> + Send;

    /// Deletes the owner's user account, cascading to the profile and its properties.
    fn delete_owner(&self, id: OwnerId) -> impl Future<Output = AppResult<bool>> + Send;
}

/// Owner service.
pub struct OwnerService<A: AssignmentLookup, S: OwnerStore> {
    scopes: ScopeResolver<A>,
    store: Arc<S>,
}

fn owner_not_found() -> AppError {
    AppError::not_found("Owner not found")
}

impl<A: AssignmentLookup, S: OwnerStore> OwnerService<A, S> {
    /// Creates a new owner service.
    #[must_use]
    pub const fn new(scopes: ScopeResolver<A>, store: Arc<S>) -> Self {
        Self { scopes, store }
    }

    /// Lists owners. Administrators and managers only.
    pub async fn list(
        &self,
        principal: &Principal,
        search: Option<&str>,
    ) -> AppResult<Vec<OwnerRecord>> {
        principal.require(&[Role::Manager])?;
        let properties = self.scopes.property_scope(principal).await?;
        let owners = OwnerScope::from_property_scope(&properties);
        if owners == OwnerScope::Nothing {
            return Ok(Vec::new());
        }

        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let rows = self.store.list_owners(&owners, &properties, search).await?;
        Ok(rows.into_iter().map(OwnerRecord::from).collect())
    }

    /// Fetches one owner with their visible properties.
    pub async fn get(&self, principal: &Principal, id: OwnerId) -> AppResult<OwnerDetail> {
        let properties = self.scopes.property_scope(principal).await?;
        let owner = self.find_visible(id, &properties).await?;
        let filter = PropertyFilter {
            owner_id: Some(id),
            search: None,
        };
        let owned = self.store.owner_properties(&filter, &properties).await?;
        Ok(OwnerDetail {
            owner: owner.into(),
            properties: owned,
        })
    }

    /// Updates contact data of a visible owner.
    pub async fn update(
        &self,
        principal: &Principal,
        id: OwnerId,
        input: UpdateOwnerInput,
    ) -> AppResult<OwnerRecord> {
        let properties = self.scopes.property_scope(principal).await?;
        self.find_visible(id, &properties).await?;

        let changes = UpdateOwnerInput {
            name: input
                .name
                .map(|n| validate::non_blank("name", &n))
                .transpose()?,
            phone: input.phone.map(|p| p.trim().to_string()),
        };
        if !self.store.update_owner(id, &changes).await? {
            return Err(owner_not_found());
        }
        Ok(self.find_visible(id, &properties).await?.into())
    }

    /// Deletes a visible owner. Administrators and managers only.
    pub async fn delete(&self, principal: &Principal, id: OwnerId) -> AppResult<()> {
        principal.require(&[Role::Manager])?;
        let properties = self.scopes.property_scope(principal).await?;
        self.find_visible(id, &properties).await?;

        if self.store.delete_owner(id).await? {
            Ok(())
        } else {
            Err(owner_not_found())
        }
    }

    async fn find_visible(&self, id: OwnerId, properties: &PropertyScope) -> AppResult<OwnerRow> {
        let owners = OwnerScope::from_property_scope(properties);
        self.store
            .find_owner(id, &owners, properties)
            .await?
            .ok_or_else(owner_not_found)
    }
}
