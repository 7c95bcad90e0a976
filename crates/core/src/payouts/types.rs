//! Payout domain types.

use chrono::{DateTime, Utc};
use rentdesk_shared::types::{OwnerId, PayoutId, PropertyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{DateWindow, TransactionRecord};

/// Input for recording a payout.
#[derive(Debug, Clone)]
pub struct CreatePayoutInput {
    /// Property the payout is booked on.
    pub property_id: PropertyId,
    /// Positive amount; rounded to two decimals.
    pub amount: Decimal,
    /// Free-text note.
    pub comment: Option<String>,
    /// Payment date or timestamp; defaults to now.
    pub paid_at: Option<String>,
}

/// Payout row to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayout {
    /// Payout ID.
    pub id: PayoutId,
    /// Owner being paid.
    pub owner_id: OwnerId,
    /// Property.
    pub property_id: PropertyId,
    /// Amount.
    pub amount: Decimal,
    /// Free-text note.
    pub comment: Option<String>,
    /// Payment instant.
    pub paid_at: DateTime<Utc>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A payout with display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRecord {
    /// Payout ID.
    pub id: PayoutId,
    /// Owner being paid.
    pub owner_id: OwnerId,
    /// Owner's name.
    pub owner_name: String,
    /// Property.
    pub property_id: PropertyId,
    /// Property title.
    pub property_title: String,
    /// Amount.
    pub amount: Decimal,
    /// Free-text note.
    pub comment: Option<String>,
    /// Payment instant.
    pub paid_at: DateTime<Utc>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A freshly created payout with its PAYOUT ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutDetail {
    /// Payout.
    #[serde(flatten)]
    pub payout: PayoutRecord,
    /// The ledger entry booked for it.
    pub transaction: TransactionRecord,
}

/// Filters for listing payouts, intersected with the caller's scope.
#[derive(Debug, Clone, Default)]
pub struct PayoutFilter {
    /// Only this property.
    pub property_id: Option<PropertyId>,
    /// Only payouts to this owner.
    pub owner_id: Option<OwnerId>,
    /// Bounds on the payment instant.
    pub window: DateWindow,
}
