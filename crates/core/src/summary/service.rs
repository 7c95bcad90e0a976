//! Summary service.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rentdesk_shared::{AppError, AppResult, types::OwnerId};
use rust_decimal::Decimal;

use super::types::{LedgerQuery, OwnerSummary, SummaryRequest};
use crate::auth::Principal;
use crate::clock::Clock;
use crate::ledger::{DateWindow, LedgerTotals, TransactionRecord, TransactionType};
use crate::scope::{AssignmentLookup, OwnerScope, PropertyScope, ScopeResolver};

/// Number of entries in the recent-activity feed.
pub const RECENT_TRANSACTIONS: u64 = 5;

/// Read-side ledger queries.
pub trait LedgerStore: Send + Sync {
    /// Whether the owner exists within `scope`.
    fn owner_visible(
        &self,
        owner: OwnerId,
        scope: &OwnerScope,
    ) -> impl Future<Output = AppResult<bool>> + Send;

    /// Sums entry amounts by type.
    fn sum_by_type(
        &self,
        query: &LedgerQuery,
    ) -> impl Future<Output = AppResult<Vec<(TransactionType, Decimal)>>> + Send;

    /// Most recent entries, newest first.
    fn recent_transactions(
        &self,
        query: &LedgerQuery,
        limit: u64,
    ) -> impl Future<Output = AppResult<Vec<TransactionRecord>>> + Send;

    /// Counts the owner's properties within `scope`.
    fn count_properties(
        &self,
        owner: OwnerId,
        scope: &PropertyScope,
    ) -> impl Future<Output = AppResult<u64>> + Send;

    /// Counts the owner's stays within `scope` with `check_in <= at <= check_out`.
    fn count_active_stays(
        &self,
        owner: OwnerId,
        scope: &PropertyScope,
        at: DateTime<Utc>,
    ) -> impl Future<Output = AppResult<u64>> + Send;
}

/// Summary service.
pub struct SummaryService<A: AssignmentLookup, S: LedgerStore> {
    scopes: ScopeResolver<A>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<A: AssignmentLookup, S: LedgerStore> SummaryService<A, S> {
    /// Creates a new summary service.
    #[must_use]
    pub fn new(scopes: ScopeResolver<A>, store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            scopes,
            store,
            clock,
        }
    }

    /// Summarizes one owner's ledger as seen by `principal`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the owner is outside the caller's scope (never
    /// `Forbidden`), `BadRequest` for malformed dates.
    pub async fn get_owner_summary(
        &self,
        principal: &Principal,
        owner_id: OwnerId,
        request: &SummaryRequest,
    ) -> AppResult<OwnerSummary> {
        let scope = self.scopes.property_scope(principal).await?;
        let owners = OwnerScope::from_property_scope(&scope);
        if !self.store.owner_visible(owner_id, &owners).await? {
            return Err(AppError::not_found("Owner not found"));
        }

        let now = self.clock.now();
        let window = DateWindow::resolve(
            request.period,
            request.from.as_deref(),
            request.to.as_deref(),
            now,
        )?;

        let query = LedgerQuery {
            owner_id,
            scope,
            window,
        };
        let sums = self.store.sum_by_type(&query).await?;
        let recent_transactions = self
            .store
            .recent_transactions(&query, RECENT_TRANSACTIONS)
            .await?;
        let properties_count = self.store.count_properties(owner_id, &query.scope).await?;
        let active_stays_count = self
            .store
            .count_active_stays(owner_id, &query.scope, now)
            .await?;

        Ok(OwnerSummary {
            owner_id,
            totals: LedgerTotals::from_type_sums(sums),
            properties_count,
            active_stays_count,
            recent_transactions,
            period: request.period.unwrap_or_default(),
        })
    }

    /// Summarizes the calling owner's own ledger.
    ///
    /// # Errors
    ///
    /// `NotFound` unless the caller is an owner with a profile.
    pub async fn get_for_current_user(
        &self,
        principal: &Principal,
        request: &SummaryRequest,
    ) -> AppResult<OwnerSummary> {
        match principal {
            Principal::Owner {
                owner: Some(owner_id),
                ..
            } => self.get_owner_summary(principal, *owner_id, request).await,
            _ => Err(AppError::not_found("Only available to property owners")),
        }
    }
}
