//! Identities and the principals derived from them.

use rentdesk_shared::{
    AppError, AppResult,
    types::{OwnerId, UserId},
};
use serde::{Deserialize, Serialize};

use super::Role;

/// Current profile of a user, as returned by login and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: Role,
    /// Owner profile linked to an OWNER-role user, if any.
    pub owner_id: Option<OwnerId>,
    /// Manager may create owner accounts.
    pub can_create_owners: bool,
    /// Manager may create properties.
    pub can_create_properties: bool,
}

/// The authenticated caller of a request.
///
/// Built once per request from the caller's [`Identity`]; every scoping and
/// role decision reads this instead of comparing role strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Unrestricted administrator.
    Admin {
        /// User ID.
        user_id: UserId,
    },
    /// Manager restricted to assigned properties.
    Manager {
        /// User ID.
        user_id: UserId,
        /// May create owner accounts.
        can_create_owners: bool,
        /// May create properties.
        can_create_properties: bool,
    },
    /// Property owner restricted to their own profile.
    Owner {
        /// User ID.
        user_id: UserId,
        /// Linked owner profile (`None` if the profile is missing).
        owner: Option<OwnerId>,
    },
}

impl From<&Identity> for Principal {
    fn from(identity: &Identity) -> Self {
        match identity.role {
            Role::Admin => Self::Admin {
                user_id: identity.id,
            },
            Role::Manager => Self::Manager {
                user_id: identity.id,
                can_create_owners: identity.can_create_owners,
                can_create_properties: identity.can_create_properties,
            },
            Role::Owner => Self::Owner {
                user_id: identity.id,
                owner: identity.owner_id,
            },
        }
    }
}

impl Principal {
    /// Returns the authenticated user's ID.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        match self {
            Self::Admin { user_id } | Self::Manager { user_id, .. } | Self::Owner { user_id, .. } => {
                *user_id
            }
        }
    }

    /// Returns the role this principal acts under.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Admin { .. } => Role::Admin,
            Self::Manager { .. } => Role::Manager,
            Self::Owner { .. } => Role::Owner,
        }
    }

    /// Role gate. Administrators always pass; everyone else must hold one
    /// of the `allowed` roles.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` when the role is not allowed.
    pub fn require(&self, allowed: &[Role]) -> AppResult<()> {
        if matches!(self, Self::Admin { .. }) || allowed.contains(&self.role()) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "role {} may not perform this action",
                self.role()
            )))
        }
    }

    /// Strict owner gate for owner-only views; administrators do not pass.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` for any other role.
    pub fn require_owner(&self) -> AppResult<()> {
        if matches!(self, Self::Owner { .. }) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "role {} may not perform this action",
                self.role()
            )))
        }
    }

    /// Whether this principal may create owner accounts.
    #[must_use]
    pub const fn can_create_owners(&self) -> bool {
        match self {
            Self::Admin { .. } => true,
            Self::Manager {
                can_create_owners, ..
            } => *can_create_owners,
            Self::Owner { .. } => false,
        }
    }

    /// Whether this principal may create properties.
    #[must_use]
    pub const fn can_create_properties(&self) -> bool {
        match self {
            Self::Admin { .. } => true,
            Self::Manager {
                can_create_properties,
                ..
            } => *can_create_properties,
            Self::Owner { .. } => false,
        }
    }
}
