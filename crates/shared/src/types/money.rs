//! Money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` with two fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a `NUMERIC(14, 2)` column holds.
pub const MAX_MONEY: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Rounds an amount to two decimals, halves away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `amount * percent / 100` rounded to two decimals, or `None` if
/// the product overflows.
#[must_use]
pub fn percent_of(amount: Decimal, percent: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(percent)
        .and_then(|p| p.checked_div(Decimal::ONE_HUNDRED))
        .map(round_money)
}
