//! Property domain types.

use chrono::{DateTime, Utc};
use rentdesk_shared::types::{OwnerId, PropertyId};
use serde::{Deserialize, Serialize};

/// A property with its owner's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Property ID.
    pub id: PropertyId,
    /// Listing title.
    pub title: String,
    /// Street address.
    pub address: String,
    /// Current owner.
    pub owner_id: OwnerId,
    /// Current owner's name.
    pub owner_name: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a property.
#[derive(Debug, Clone)]
pub struct CreatePropertyInput {
    /// Listing title.
    pub title: String,
    /// Street address.
    pub address: String,
    /// Owner.
    pub owner_id: OwnerId,
}

/// Partial update of a property. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePropertyInput {
    /// New title.
    pub title: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New owner. Existing ledger entries keep their original owner.
    pub owner_id: Option<OwnerId>,
}

/// Property row to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProperty {
    /// Property ID.
    pub id: PropertyId,
    /// Listing title.
    pub title: String,
    /// Street address.
    pub address: String,
    /// Owner.
    pub owner_id: OwnerId,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Filters for listing properties, intersected with the caller's scope.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    /// Only this owner's properties.
    pub owner_id: Option<OwnerId>,
    /// Case-insensitive substring of title or address.
    pub search: Option<String>,
}
