//! Property-based tests for ledger aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::totals::LedgerTotals;
use super::types::TransactionType;

/// Strategy to generate a positive two-decimal amount up to 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn kind() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::Income),
        Just(TransactionType::Commission),
        Just(TransactionType::Cleaning),
        Just(TransactionType::Expense),
        Just(TransactionType::Payout),
    ]
}

fn entries() -> impl Strategy<Value = Vec<(TransactionType, Decimal)>> {
    prop::collection::vec((kind(), amount()), 0..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The balance is exactly income minus expenses minus payouts.
    #[test]
    fn prop_balance_identity(entries in entries()) {
        let totals = LedgerTotals::from_type_sums(entries);
        prop_assert_eq!(totals.balance, totals.income - totals.expenses - totals.payouts);
    }

    /// The balance equals the signed sum of the entries.
    #[test]
    fn prop_balance_is_signed_sum(entries in entries()) {
        let signed: Decimal = entries.iter().map(|(k, a)| k.sign() * *a).sum();
        let totals = LedgerTotals::from_entries(entries.iter().map(|(k, a)| (*k, a)));
        prop_assert_eq!(totals.balance, signed);
    }

    /// Aggregating twice, or in another order, yields identical figures.
    #[test]
    fn prop_aggregation_is_idempotent_and_order_free(entries in entries()) {
        let first = LedgerTotals::from_type_sums(entries.clone());
        let second = LedgerTotals::from_type_sums(entries.clone());
        let mut reversed = entries;
        reversed.reverse();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first, LedgerTotals::from_type_sums(reversed));
    }

    /// Every figure carries at most two fractional digits.
    #[test]
    fn prop_figures_have_two_decimals(entries in entries()) {
        let totals = LedgerTotals::from_type_sums(entries);
        for figure in [totals.balance, totals.income, totals.expenses, totals.payouts] {
            prop_assert!(figure.scale() <= 2);
        }
    }
}
