//! Payout service.

use std::future::Future;
use std::sync::Arc;

use rentdesk_shared::{
    AppError, AppResult,
    types::{PageRequest, PageResponse, PayoutId, parse_timestamp},
};

use super::types::{CreatePayoutInput, NewPayout, PayoutDetail, PayoutFilter, PayoutRecord};
use crate::auth::{Principal, Role};
use crate::clock::Clock;
use crate::ledger::{NewTransaction, TransactionRecord, payout_entry};
use crate::properties::PropertyLookup;
use crate::scope::{AssignmentLookup, PropertyScope, ScopeResolver};
use crate::validate;

/// Persistence for payouts.
pub trait PayoutStore: PropertyLookup {
    /// Atomically inserts a payout and its PAYOUT ledger entry.
    fn insert_payout(
        &self,
        payout: NewPayout,
        entry: NewTransaction,
    ) -> impl Future<Output = AppResult<()>> + Send;

    /// Lists one page of payouts matching `filter` within `scope`, latest
    /// payment first, together with the total number of matches.
    fn list_payouts(
        &self,
        filter: &PayoutFilter,
        scope: &PropertyScope,
        page: PageRequest,
    ) -> impl Future<Output = AppResult<(Vec<PayoutRecord>, u64)>> + Send;

    /// Finds one payout within `scope`.
    fn find_payout(
        &self,
        id: PayoutId,
        scope: &PropertyScope,
    ) -> impl Future<Output = AppResult<Option<PayoutRecord>>> + Send;

    /// Deletes the payout row only. Its ledger entry remains.
    fn delete_payout(&self, id: PayoutId) -> impl Future<Output = AppResult<bool>> + Send;
}

/// Payout service.
pub struct PayoutService<A: AssignmentLookup, S: PayoutStore> {
    scopes: ScopeResolver<A>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

fn payout_not_found() -> AppError {
    AppError::not_found("Payout not found")
}

impl<A: AssignmentLookup, S: PayoutStore> PayoutService<A, S> {
    /// Creates a new payout service.
    #[must_use]
    pub fn new(scopes: ScopeResolver<A>, store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            scopes,
            store,
            clock,
        }
    }

    /// Records a payout together with exactly one PAYOUT entry, atomically.
    ///
    /// # Errors
    ///
    /// `BadRequest` for an amount that is not positive or does not fit the
    /// ledger, or a malformed `paid_at`,
    /// `Forbidden` for owners, `NotFound` if the property is not in scope.
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreatePayoutInput,
    ) -> AppResult<PayoutDetail> {
        let amount = validate::money("amount", input.amount)?;
        let now = self.clock.now();
        let paid_at = match input.paid_at.as_deref() {
            Some(raw) => parse_timestamp(raw)
                .ok_or_else(|| AppError::bad_request("paid_at must be an ISO-8601 date"))?,
            None => now,
        };
        principal.require(&[Role::Manager])?;

        let scope = self.scopes.property_scope(principal).await?;
        let property = self
            .store
            .find_property(input.property_id, &scope)
            .await?
            .ok_or_else(|| AppError::not_found("Property not found"))?;

        let comment = validate::optional_text(input.comment);
        let payout = NewPayout {
            id: PayoutId::new(),
            owner_id: property.owner_id,
            property_id: property.id,
            amount,
            comment: comment.clone(),
            paid_at,
            created_at: now,
        };
        let entry = payout_entry(
            payout.id,
            property.id,
            property.owner_id,
            amount,
            comment.unwrap_or_else(|| format!("Payout to owner {}", property.owner_name)),
            now,
        );

        let detail = PayoutDetail {
            payout: PayoutRecord {
                id: payout.id,
                owner_id: payout.owner_id,
                owner_name: property.owner_name.clone(),
                property_id: property.id,
                property_title: property.title.clone(),
                amount,
                comment: payout.comment.clone(),
                paid_at,
                created_at: now,
            },
            transaction: TransactionRecord::from_new(
                entry.clone(),
                property.owner_name,
                property.title,
            ),
        };
        self.store.insert_payout(payout, entry).await?;
        Ok(detail)
    }

    /// Lists payouts visible to `principal`.
    pub async fn list(
        &self,
        principal: &Principal,
        filter: &PayoutFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<PayoutRecord>> {
        let scope = self.scopes.property_scope(principal).await?;
        if scope.is_nothing() {
            return Ok(PageResponse::new(Vec::new(), page, 0));
        }
        let (items, total) = self.store.list_payouts(filter, &scope, page).await?;
        Ok(PageResponse::new(items, page, total))
    }

    /// Deletes a payout within scope. Administrators and managers only.
    /// The PAYOUT entry booked for it is kept.
    pub async fn delete(&self, principal: &Principal, id: PayoutId) -> AppResult<()> {
        principal.require(&[Role::Manager])?;
        let scope = self.scopes.property_scope(principal).await?;
        if self.store.find_payout(id, &scope).await?.is_none() {
            return Err(payout_not_found());
        }
        if self.store.delete_payout(id).await? {
            Ok(())
        } else {
            Err(payout_not_found())
        }
    }
}
