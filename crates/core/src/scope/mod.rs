//! Role-based row visibility.
//!
//! | Role    | Property filter                  | Owner filter                         |
//! |---------|----------------------------------|--------------------------------------|
//! | ADMIN   | unrestricted                     | unrestricted                         |
//! | OWNER   | `property.owner_id == owner`     | `owner.id == owner`                  |
//! | MANAGER | `property.id IN assigned`        | owner has a property `IN assigned`   |
//! | other   | nothing                          | nothing                              |
//!
//! Stays, transactions and payouts are always filtered through the
//! property filter of the row's property; they have no scope of their own.

mod resolver;

#[cfg(test)]
mod props;

pub use resolver::{AssignmentLookup, ScopeResolver};

use rentdesk_shared::types::{OwnerId, PropertyId};

use crate::auth::Principal;

/// Which properties a principal may see or touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyScope {
    /// Every property.
    All,
    /// Properties of one owner.
    Owner(OwnerId),
    /// An explicit, non-empty set of properties.
    Properties(Vec<PropertyId>),
    /// No property at all.
    Nothing,
}

impl PropertyScope {
    /// Builds the property scope of `principal`. `assigned` is only read for managers.
    #[must_use]
    pub fn for_principal(principal: &Principal, assigned: Vec<PropertyId>) -> Self {
        match principal {
            Principal::Admin { .. } => Self::All,
            Principal::Owner {
                owner: Some(owner_id),
                ..
            } => Self::Owner(*owner_id),
            Principal::Owner { owner: None, .. } => Self::Nothing,
            Principal::Manager { .. } => Self::of_properties(assigned),
        }
    }

    /// A scope over exactly `ids`; an empty list matches nothing.
    #[must_use]
    pub fn of_properties(ids: Vec<PropertyId>) -> Self {
        if ids.is_empty() {
            Self::Nothing
        } else {
            Self::Properties(ids)
        }
    }

    /// Whether a property owned by `owner_id` is visible.
    #[must_use]
    pub fn allows(&self, property_id: PropertyId, owner_id: OwnerId) -> bool {
        match self {
            Self::All => true,
            Self::Owner(owner) => *owner == owner_id,
            Self::Properties(ids) => ids.contains(&property_id),
            Self::Nothing => false,
        }
    }

    /// Whether this scope can never match a row.
    #[must_use]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

/// Which owner profiles a principal may see or touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerScope {
    /// Every owner.
    All,
    /// Exactly one owner.
    Only(OwnerId),
    /// Owners holding at least one of these properties.
    HavingProperties(Vec<PropertyId>),
    /// No owner at all.
    Nothing,
}

impl OwnerScope {
    /// Derives the owner scope from a property scope.
    #[must_use]
    pub fn from_property_scope(scope: &PropertyScope) -> Self {
        match scope {
            PropertyScope::All => Self::All,
            PropertyScope::Owner(owner) => Self::Only(*owner),
            PropertyScope::Properties(ids) => Self::HavingProperties(ids.clone()),
            PropertyScope::Nothing => Self::Nothing,
        }
    }

    /// Whether `owner_id`, holding `owned` properties, is visible.
    #[must_use]
    pub fn allows(&self, owner_id: OwnerId, owned: &[PropertyId]) -> bool {
        match self {
            Self::All => true,
            Self::Only(owner) => *owner == owner_id,
            Self::HavingProperties(ids) => owned.iter().any(|p| ids.contains(p)),
            Self::Nothing => false,
        }
    }
}
