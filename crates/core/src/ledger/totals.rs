//! Roll-up of per-type sums into the owner's money figures.

use rentdesk_shared::types::round_money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Bucket, TransactionType};

/// Balance, income, expenses and payouts of an owner.
///
/// Never stored: always computed from ledger entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// `income - expenses - payouts`.
    pub balance: Decimal,
    /// Sum of INCOME entries.
    pub income: Decimal,
    /// Sum of COMMISSION, CLEANING and EXPENSE entries.
    pub expenses: Decimal,
    /// Sum of PAYOUT entries.
    pub payouts: Decimal,
}

impl LedgerTotals {
    /// Aggregates `(type, summed amount)` pairs, as returned by a grouped query.
    ///
    /// Rounds to two decimals at every step: each per-type sum, each bucket
    /// and the balance. A type may appear more than once.
    #[must_use]
    pub fn from_type_sums(sums: impl IntoIterator<Item = (TransactionType, Decimal)>) -> Self {
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        let mut payouts = Decimal::ZERO;

        for (kind, sum) in sums {
            let sum = round_money(sum);
            match kind.bucket() {
                Bucket::Income => income += sum,
                Bucket::Expenses => expenses += sum,
                Bucket::Payouts => payouts += sum,
            }
        }

        let income = round_money(income);
        let expenses = round_money(expenses);
        let payouts = round_money(payouts);

        Self {
            balance: round_money(income - expenses - payouts),
            income,
            expenses,
            payouts,
        }
    }

    /// Signed sum of individual entries, rounded the same way.
    #[must_use]
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (TransactionType, &'a Decimal)>) -> Self {
        Self::from_type_sums(entries.into_iter().map(|(kind, amount)| (kind, *amount)))
    }
}
