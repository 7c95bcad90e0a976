//! Owner domain types.

use chrono::{DateTime, Utc};
use rentdesk_shared::types::{OwnerId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{LedgerTotals, TransactionType};
use crate::properties::PropertyRecord;

/// An owner as loaded from storage, with raw per-type ledger sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRow {
    /// Owner ID.
    pub id: OwnerId,
    /// Linked user account.
    pub user_id: UserId,
    /// Name (from the user account).
    pub name: String,
    /// Email (from the user account).
    pub email: String,
    /// Phone.
    pub phone: Option<String>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Number of the owner's properties within the caller's scope.
    pub properties_count: u64,
    /// All-time ledger sums of the owner, by type.
    pub ledger: Vec<(TransactionType, Decimal)>,
}

/// An owner with computed balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRecord {
    /// Owner ID.
    pub id: OwnerId,
    /// Linked user account.
    pub user_id: UserId,
    /// Name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Phone.
    pub phone: Option<String>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Number of visible properties.
    pub properties_count: u64,
    /// All-time balance.
    pub balance: Decimal,
}

impl From<OwnerRow> for OwnerRecord {
    fn from(row: OwnerRow) -> Self {
        let totals = LedgerTotals::from_type_sums(row.ledger);
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
            properties_count: row.properties_count,
            balance: totals.balance,
        }
    }
}

/// An owner together with their visible properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerDetail {
    /// Owner.
    #[serde(flatten)]
    pub owner: OwnerRecord,
    /// Visible properties, ordered by title.
    pub properties: Vec<PropertyRecord>,
}

/// Partial update of an owner's contact data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOwnerInput {
    /// New name (stored on the user account).
    pub name: Option<String>,
    /// New phone.
    pub phone: Option<String>,
}
