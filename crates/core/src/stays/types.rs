//! Stay domain types.

use chrono::{DateTime, Utc};
use rentdesk_shared::types::{OwnerId, PropertyId, StayId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{DateWindow, TransactionRecord};

/// Input for recording a stay. Dates are raw ISO-8601 strings.
#[derive(Debug, Clone)]
pub struct CreateStayInput {
    /// Property.
    pub property_id: PropertyId,
    /// Guest name.
    pub guest_name: String,
    /// Check-in date or timestamp.
    pub check_in: String,
    /// Check-out date or timestamp.
    pub check_out: String,
    /// Amount paid by the guest.
    pub total_amount: Decimal,
    /// Management commission in percent, 0..=100.
    pub commission_percent: Option<Decimal>,
    /// Cleaning cost.
    pub cleaning_amount: Option<Decimal>,
    /// Overrides the INCOME comment.
    pub income_comment: Option<String>,
    /// Overrides the COMMISSION comment.
    pub commission_comment: Option<String>,
    /// Overrides the CLEANING comment.
    pub cleaning_comment: Option<String>,
}

/// Stay row to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStay {
    /// Stay ID.
    pub id: StayId,
    /// Property.
    pub property_id: PropertyId,
    /// Guest name.
    pub guest_name: String,
    /// Check-in instant.
    pub check_in: DateTime<Utc>,
    /// Check-out instant, after check-in.
    pub check_out: DateTime<Utc>,
    /// Amount paid by the guest.
    pub total_amount: Decimal,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A stay with property and owner display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRecord {
    /// Stay ID.
    pub id: StayId,
    /// Property.
    pub property_id: PropertyId,
    /// Property title.
    pub property_title: String,
    /// Current owner of the property.
    pub owner_id: OwnerId,
    /// Owner's name.
    pub owner_name: String,
    /// Guest name.
    pub guest_name: String,
    /// Check-in instant.
    pub check_in: DateTime<Utc>,
    /// Check-out instant.
    pub check_out: DateTime<Utc>,
    /// Amount paid by the guest.
    pub total_amount: Decimal,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A stay with its derived ledger entries in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayDetail {
    /// Stay.
    #[serde(flatten)]
    pub stay: StayRecord,
    /// Ledger entries referencing the stay.
    pub transactions: Vec<TransactionRecord>,
}

/// Filters for listing stays, intersected with the caller's scope.
#[derive(Debug, Clone, Default)]
pub struct StayFilter {
    /// Only this property.
    pub property_id: Option<PropertyId>,
    /// Only properties of this owner.
    pub owner_id: Option<OwnerId>,
    /// `from` bounds check-in, `to` bounds check-out.
    pub window: DateWindow,
    /// Case-insensitive substring of the guest name.
    pub guest_name: Option<String>,
}
