//! Ledger domain types.

use chrono::{DateTime, Utc};
use rentdesk_shared::{
    AppError,
    types::{OwnerId, PayoutId, PropertyId, StayId, TransactionId},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Guest payment for a stay.
    Income,
    /// Management commission taken from a stay.
    Commission,
    /// Cleaning cost of a stay.
    Cleaning,
    /// Any other cost borne by the owner.
    Expense,
    /// Money paid out to the owner.
    Payout,
}

/// Figure a transaction type rolls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Adds to income.
    Income,
    /// Adds to expenses.
    Expenses,
    /// Adds to payouts.
    Payouts,
}

impl TransactionType {
    /// Every transaction type.
    pub const ALL: [Self; 5] = [
        Self::Income,
        Self::Commission,
        Self::Cleaning,
        Self::Expense,
        Self::Payout,
    ];

    /// Figure this type contributes to.
    #[must_use]
    pub const fn bucket(self) -> Bucket {
        match self {
            Self::Income => Bucket::Income,
            Self::Commission | Self::Cleaning | Self::Expense => Bucket::Expenses,
            Self::Payout => Bucket::Payouts,
        }
    }

    /// Sign of this type's contribution to the balance.
    #[must_use]
    pub const fn sign(self) -> Decimal {
        match self.bucket() {
            Bucket::Income => Decimal::ONE,
            Bucket::Expenses | Bucket::Payouts => Decimal::NEGATIVE_ONE,
        }
    }

    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Commission => "COMMISSION",
            Self::Cleaning => "CLEANING",
            Self::Expense => "EXPENSE",
            Self::Payout => "PAYOUT",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::bad_request(format!("unknown transaction type: {s}")))
    }
}

/// Ledger entry to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Entry ID.
    pub id: TransactionId,
    /// Kind.
    pub kind: TransactionType,
    /// Positive amount, two decimals.
    pub amount: Decimal,
    /// Free-text note.
    pub comment: Option<String>,
    /// Owner of the property at creation time.
    pub owner_id: OwnerId,
    /// Property.
    pub property_id: PropertyId,
    /// Originating stay.
    pub stay_id: Option<StayId>,
    /// Originating payout.
    pub payout_id: Option<PayoutId>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A persisted ledger entry with display names joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Entry ID.
    pub id: TransactionId,
    /// Kind.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount.
    pub amount: Decimal,
    /// Free-text note.
    pub comment: Option<String>,
    /// Owner snapshot.
    pub owner_id: OwnerId,
    /// Owner display name.
    pub owner_name: String,
    /// Property.
    pub property_id: PropertyId,
    /// Property title.
    pub property_title: String,
    /// Originating stay.
    pub stay_id: Option<StayId>,
    /// Originating payout.
    pub payout_id: Option<PayoutId>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Builds the record of a freshly inserted entry.
    #[must_use]
    pub fn from_new(
        entry: NewTransaction,
        owner_name: impl Into<String>,
        property_title: impl Into<String>,
    ) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind,
            amount: entry.amount,
            comment: entry.comment,
            owner_id: entry.owner_id,
            owner_name: owner_name.into(),
            property_id: entry.property_id,
            property_title: property_title.into(),
            stay_id: entry.stay_id,
            payout_id: entry.payout_id,
            created_at: entry.created_at,
        }
    }
}
