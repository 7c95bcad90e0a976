//! Assignment domain types.

use chrono::{DateTime, Utc};
use rentdesk_shared::types::{AssignmentId, PropertyId, UserId};
use serde::{Deserialize, Serialize};

/// An assignment with display fields joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Assignment ID.
    pub id: AssignmentId,
    /// Manager.
    pub user_id: UserId,
    /// Manager's name.
    pub user_name: String,
    /// Property.
    pub property_id: PropertyId,
    /// Property title.
    pub property_title: String,
    /// Property address.
    pub property_address: String,
    /// Assignment instant.
    pub assigned_at: DateTime<Utc>,
}

/// Assignment row to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    /// Assignment ID.
    pub id: AssignmentId,
    /// Manager.
    pub user_id: UserId,
    /// Property.
    pub property_id: PropertyId,
    /// Assignment instant.
    pub assigned_at: DateTime<Utc>,
}

/// Request to assign a manager to a property.
#[derive(Debug, Clone, Copy)]
pub struct AssignInput {
    /// Manager.
    pub user_id: UserId,
    /// Property.
    pub property_id: PropertyId,
}

/// Filters for listing assignments.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentFilter {
    /// Only this manager.
    pub user_id: Option<UserId>,
    /// Only this property.
    pub property_id: Option<PropertyId>,
}
