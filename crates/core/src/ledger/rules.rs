//! Ledger entries derived from stays and payouts.

use chrono::{DateTime, Utc};
use rentdesk_shared::types::{
    OwnerId, PayoutId, PropertyId, StayId, TransactionId, percent_of, round_money,
};
use rust_decimal::Decimal;

use super::types::{NewTransaction, TransactionType};

/// Everything needed to derive the ledger entries of a stay.
#[derive(Debug, Clone)]
pub struct StayCharges {
    /// Stay the entries belong to.
    pub stay_id: StayId,
    /// Property of the stay.
    pub property_id: PropertyId,
    /// Property title, used in the default income comment.
    pub property_title: String,
    /// Current owner of the property.
    pub owner_id: OwnerId,
    /// Guest name, used in the default income comment.
    pub guest_name: String,
    /// Amount paid by the guest.
    pub total_amount: Decimal,
    /// Commission in percent of `total_amount`.
    pub commission_percent: Decimal,
    /// Cleaning cost.
    pub cleaning_amount: Decimal,
    /// Overrides the INCOME comment.
    pub income_comment: Option<String>,
    /// Overrides the COMMISSION comment.
    pub commission_comment: Option<String>,
    /// Overrides the CLEANING comment.
    pub cleaning_comment: Option<String>,
}

/// Derives the entries of a stay: INCOME always, COMMISSION when the
/// rounded commission is positive, CLEANING when the rounded cleaning
/// amount is positive.
#[must_use]
pub fn stay_entries(charges: StayCharges, created_at: DateTime<Utc>) -> Vec<NewTransaction> {
    let entry = |kind, amount, comment| NewTransaction {
        id: TransactionId::new(),
        kind,
        amount,
        comment: Some(comment),
        owner_id: charges.owner_id,
        property_id: charges.property_id,
        stay_id: Some(charges.stay_id),
        payout_id: None,
        created_at,
    };

    let income_comment = charges.income_comment.unwrap_or_else(|| {
        format!(
            "Guest {} stay at \"{}\"",
            charges.guest_name, charges.property_title
        )
    });
    let mut entries = vec![entry(
        TransactionType::Income,
        round_money(charges.total_amount),
        income_comment,
    )];

    let commission = percent_of(charges.total_amount, charges.commission_percent)
        .filter(|amount| *amount > Decimal::ZERO);
    if let Some(commission) = commission {
        entries.push(entry(
            TransactionType::Commission,
            commission,
            charges
                .commission_comment
                .unwrap_or_else(|| "Manager commission".to_string()),
        ));
    }

    let cleaning = round_money(charges.cleaning_amount);
    if cleaning > Decimal::ZERO {
        entries.push(entry(
            TransactionType::Cleaning,
            cleaning,
            charges
                .cleaning_comment
                .unwrap_or_else(|| "Cleaning after check-out".to_string()),
        ));
    }

    entries
}

/// Derives the single PAYOUT entry of a payout.
#[must_use]
pub fn payout_entry(
    payout_id: PayoutId,
    property_id: PropertyId,
    owner_id: OwnerId,
    amount: Decimal,
    comment: String,
    created_at: DateTime<Utc>,
) -> NewTransaction {
    NewTransaction {
        id: TransactionId::new(),
        kind: TransactionType::Payout,
        amount: round_money(amount),
        comment: Some(comment),
        owner_id,
        property_id,
        stay_id: None,
        payout_id: Some(payout_id),
        created_at,
    }
}
