//! Per-request scope resolution.

use std::future::Future;
use std::sync::Arc;

use rentdesk_shared::{
    AppResult,
    types::{PropertyId, UserId},
};

use super::{OwnerScope, PropertyScope};
use crate::auth::Principal;

/// Lookup of the properties assigned to a manager.
pub trait AssignmentLookup: Send + Sync {
    /// Returns the IDs of every property assigned to `manager`.
    fn assigned_property_ids(
        &self,
        manager: UserId,
    ) -> impl Future<Output = AppResult<Vec<PropertyId>>> + Send;
}

/// Resolves principals into scopes. Nothing is cached between calls, so
/// assignment changes take effect on the next request.
pub struct ScopeResolver<A: AssignmentLookup> {
    lookup: Arc<A>,
}

impl<A: AssignmentLookup> Clone for ScopeResolver<A> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<A: AssignmentLookup> ScopeResolver<A> {
    /// Creates a resolver over an assignment lookup.
    #[must_use]
    pub const fn new(lookup: Arc<A>) -> Self {
        Self { lookup }
    }

    /// Resolves the property scope of `principal`.
    ///
    /// # Errors
    ///
    /// Propagates assignment lookup failures.
    pub async fn property_scope(&self, principal: &Principal) -> AppResult<PropertyScope> {
        let assigned = match principal {
            Principal::Manager { user_id, .. } => {
                self.lookup.assigned_property_ids(*user_id).await?
            }
            Principal::Admin { .. } | Principal::Owner { .. } => Vec::new(),
        };
        Ok(PropertyScope::for_principal(principal, assigned))
    }

    /// Resolves the owner scope of `principal`.
    ///
    /// # Errors
    ///
    /// Propagates assignment lookup failures.
    pub async fn owner_scope(&self, principal: &Principal) -> AppResult<OwnerScope> {
        let scope = self.property_scope(principal).await?;
        Ok(OwnerScope::from_property_scope(&scope))
    }
}
