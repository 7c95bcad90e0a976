//! Account domain types.

use chrono::{DateTime, Utc};
use rentdesk_shared::types::{OwnerId, UserId};
use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// Input for creating an owner account and its profile.
#[derive(Debug, Clone)]
pub struct CreateOwnerAccountInput {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Input for creating a manager account.
#[derive(Debug, Clone)]
pub struct CreateManagerInput {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// May create owner accounts.
    pub can_create_owners: bool,
    /// May create properties.
    pub can_create_properties: bool,
}

/// Permission changes for a manager. `None` leaves a flag unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManagerPermissions {
    /// May create owner accounts.
    pub can_create_owners: Option<bool>,
    /// May create properties.
    pub can_create_properties: Option<bool>,
}

/// A manager account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerRecord {
    /// User ID.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// May create owner accounts.
    pub can_create_owners: bool,
    /// May create properties.
    pub can_create_properties: bool,
    /// Number of assigned properties.
    pub assigned_properties: u64,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// User row to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// User ID.
    pub id: UserId,
    /// Normalized login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Argon2 PHC hash.
    pub password_hash: String,
    /// Role.
    pub role: Role,
    /// May create owner accounts.
    pub can_create_owners: bool,
    /// May create properties.
    pub can_create_properties: bool,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Owner profile row to persist alongside its user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwnerProfile {
    /// Owner ID.
    pub id: OwnerId,
    /// Linked user.
    pub user_id: UserId,
    /// Contact phone.
    pub phone: Option<String>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}
