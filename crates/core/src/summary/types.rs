//! Summary request and response types.

use rentdesk_shared::types::OwnerId;
use serde::{Deserialize, Serialize};

use crate::ledger::{DateWindow, LedgerTotals, Period, TransactionRecord};
use crate::scope::PropertyScope;

/// Date selection of a summary request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRequest {
    /// Named period; ignored when `from` or `to` is set.
    pub period: Option<Period>,
    /// Explicit lower bound.
    pub from: Option<String>,
    /// Explicit upper bound.
    pub to: Option<String>,
}

/// Bounds of a ledger read: one owner, the caller's properties, a time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerQuery {
    /// Owner the entries are attributed to.
    pub owner_id: OwnerId,
    /// Caller's property scope.
    pub scope: PropertyScope,
    /// Bounds on the entries' creation instant.
    pub window: DateWindow,
}

/// Financial summary of one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    /// Owner.
    pub owner_id: OwnerId,
    /// Balance, income, expenses and payouts.
    #[serde(flatten)]
    pub totals: LedgerTotals,
    /// Owner's properties within the caller's scope.
    pub properties_count: u64,
    /// Stays in progress right now.
    pub active_stays_count: u64,
    /// Five most recent entries in the window.
    pub recent_transactions: Vec<TransactionRecord>,
    /// Period the request asked for.
    pub period: Period,
}
