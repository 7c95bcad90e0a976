//! Transaction service.

use std::future::Future;
use std::sync::Arc;

use rentdesk_shared::{
    AppError, AppResult,
    types::{PageRequest, PageResponse, TransactionId},
};

use super::types::{CreateTransactionInput, TransactionFilter};
use crate::auth::{Principal, Role};
use crate::clock::Clock;
use crate::ledger::{NewTransaction, TransactionRecord};
use crate::properties::PropertyLookup;
use crate::scope::{AssignmentLookup, PropertyScope, ScopeResolver};
use crate::validate;

/// Persistence for ledger entries.
pub trait TransactionStore: PropertyLookup {
    /// Inserts one ledger entry.
    fn insert_transaction(
        &self,
        entry: NewTransaction,
    ) -> impl Future<Output = AppResult<()>> + Send;

    /// Lists one page of entries matching `filter` within `scope`, newest
    /// first, together with the total number of matches.
    fn list_transactions(
        &self,
        filter: &TransactionFilter,
        scope: &PropertyScope,
        page: PageRequest,
    ) -> impl Future<Output = AppResult<(Vec<TransactionRecord>, u64)>> + Send;

    /// Finds one entry within `scope`.
    fn find_transaction(
        &self,
        id: TransactionId,
        scope: &PropertyScope,
    ) -> impl Future<Output = AppResult<Option<TransactionRecord>>> + Send;

    /// Deletes one entry.
    fn delete_transaction(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = AppResult<bool>> + Send;
}

/// Transaction service.
pub struct TransactionService<A: AssignmentLookup, S: TransactionStore> {
    scopes: ScopeResolver<A>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

fn transaction_not_found() -> AppError {
    AppError::not_found("Transaction not found")
}

impl<A: AssignmentLookup, S: TransactionStore> TransactionService<A, S> {
    /// Creates a new transaction service.
    #[must_use]
    pub fn new(scopes: ScopeResolver<A>, store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            scopes,
            store,
            clock,
        }
    }

    /// Books a manual entry on a property within scope. The owner is
    /// taken from the property at this moment and never re-derived.
    ///
    /// # Errors
    ///
    /// `BadRequest` for an amount that is not positive or does not fit the
    /// ledger, `Forbidden` for owners,
    /// `NotFound` if the property is not in scope.
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateTransactionInput,
    ) -> AppResult<TransactionRecord> {
        let amount = validate::money("amount", input.amount)?;
        principal.require(&[Role::Manager])?;

        let scope = self.scopes.property_scope(principal).await?;
        let property = self
            .store
            .find_property(input.property_id, &scope)
            .await?
            .ok_or_else(|| AppError::not_found("Property not found"))?;

        let entry = NewTransaction {
            id: TransactionId::new(),
            kind: input.kind,
            amount,
            comment: validate::optional_text(input.comment),
            owner_id: property.owner_id,
            property_id: property.id,
            stay_id: None,
            payout_id: None,
            created_at: self.clock.now(),
        };
        let record =
            TransactionRecord::from_new(entry.clone(), property.owner_name, property.title);
        self.store.insert_transaction(entry).await?;
        Ok(record)
    }

    /// Lists ledger entries visible to `principal`.
    pub async fn list(
        &self,
        principal: &Principal,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<TransactionRecord>> {
        let scope = self.scopes.property_scope(principal).await?;
        if scope.is_nothing() {
            return Ok(PageResponse::new(Vec::new(), page, 0));
        }
        let (items, total) = self.store.list_transactions(filter, &scope, page).await?;
        Ok(PageResponse::new(items, page, total))
    }

    /// Deletes an entry within scope. Administrators and managers only.
    pub async fn delete(&self, principal: &Principal, id: TransactionId) -> AppResult<()> {
        principal.require(&[Role::Manager])?;
        let scope = self.scopes.property_scope(principal).await?;
        if self.store.find_transaction(id, &scope).await?.is_none() {
            return Err(transaction_not_found());
        }
        if self.store.delete_transaction(id).await? {
            Ok(())
        } else {
            Err(transaction_not_found())
        }
    }
}
