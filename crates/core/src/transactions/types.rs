//! Transaction listing and input types.

use rentdesk_shared::types::{OwnerId, PropertyId};
use rust_decimal::Decimal;

use crate::ledger::{DateWindow, TransactionType};

/// Input for a manual ledger entry.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Property the entry is booked on.
    pub property_id: PropertyId,
    /// Kind.
    pub kind: TransactionType,
    /// Positive amount; rounded to two decimals.
    pub amount: Decimal,
    /// Free-text note.
    pub comment: Option<String>,
}

/// Filters for listing ledger entries, intersected with the caller's scope.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only this property.
    pub property_id: Option<PropertyId>,
    /// Only entries attributed to this owner.
    pub owner_id: Option<OwnerId>,
    /// Only this kind.
    pub kind: Option<TransactionType>,
    /// Bounds on the creation instant.
    pub window: DateWindow,
}
