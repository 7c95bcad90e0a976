//! Stay service.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rentdesk_shared::{
    AppError, AppResult,
    types::{Listing, StayId, parse_timestamp},
};
use rust_decimal::Decimal;

use super::types::{CreateStayInput, NewStay, StayDetail, StayFilter, StayRecord};
use crate::auth::{Principal, Role};
use crate::clock::Clock;
use crate::ledger::{NewTransaction, StayCharges, TransactionRecord, stay_entries};
use crate::properties::PropertyLookup;
use crate::scope::{AssignmentLookup, PropertyScope, ScopeResolver};
use crate::validate;

/// Persistence for stays.
pub trait StayStore: PropertyLookup {
    /// Atomically inserts a stay and its derived ledger entries.
    fn insert_stay(
        &self,
        stay: NewStay,
        entries: Vec<NewTransaction>,
    ) -> impl Future<Output = AppResult<()>> + Send;

    /// Lists stays matching `filter` within `scope`, latest check-in first.
    fn list_stays(
        &self,
        filter: &StayFilter,
        scope: &PropertyScope,
    ) -> impl Future<Output = AppResult<Vec<StayRecord>>> + Send;

    /// Finds one stay within `scope`, with its ledger entries.
    fn find_stay(
        &self,
        id: StayId,
        scope: &PropertyScope,
    ) -> impl Future<Output = AppResult<Option<StayDetail>>> + Send;

    /// Deletes a stay. Its ledger entries stay behind without the stay reference.
    fn delete_stay(&self, id: StayId) -> impl Future<Output = AppResult<bool>> + Send;
}

/// Stay service.
pub struct StayService<A: AssignmentLookup, S: StayStore> {
    scopes: ScopeResolver<A>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

fn stay_not_found() -> AppError {
    AppError::not_found("Stay not found")
}

fn parse_date(field: &str, value: &str) -> AppResult<DateTime<Utc>> {
    parse_timestamp(value)
        .ok_or_else(|| AppError::bad_request(format!("{field} must be an ISO-8601 date")))
}

impl<A: AssignmentLookup, S: StayStore> StayService<A, S> {
    /// Creates a new stay service.
    #[must_use]
    pub fn new(scopes: ScopeResolver<A>, store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            scopes,
            store,
            clock,
        }
    }

    /// Records a stay together with its INCOME, COMMISSION and CLEANING
    /// entries, all in one atomic write.
    ///
    /// # Errors
    ///
    /// `BadRequest` for invalid input (checked before anything is read or
    /// written), `Forbidden` for owners, `NotFound` if the property is not
    /// in scope.
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateStayInput,
    ) -> AppResult<StayDetail> {
        let check_in = parse_date("check_in", &input.check_in)?;
        let check_out = parse_date("check_out", &input.check_out)?;
        if check_out <= check_in {
            return Err(AppError::bad_request("check_out must be after check_in"));
        }
        let guest_name = validate::non_blank("guest_name", &input.guest_name)?;
        let total_amount = validate::money("total_amount", input.total_amount)?;
        let commission_percent = input.commission_percent.unwrap_or_default();
        if commission_percent < Decimal::ZERO || commission_percent > Decimal::ONE_HUNDRED {
            return Err(AppError::bad_request(
                "commission_percent must be between 0 and 100",
            ));
        }
        let cleaning_amount = validate::optional_money(
            "cleaning_amount",
            input.cleaning_amount.unwrap_or_default(),
        )?;

        principal.require(&[Role::Manager])?;
        let scope = self.scopes.property_scope(principal).await?;
        let property = self
            .store
            .find_property(input.property_id, &scope)
            .await?
            .ok_or_else(|| AppError::not_found("Property not found"))?;

        let now = self.clock.now();
        let stay = NewStay {
            id: StayId::new(),
            property_id: property.id,
            guest_name,
            check_in,
            check_out,
            total_amount,
            created_at: now,
        };
        let entries = stay_entries(
            StayCharges {
                stay_id: stay.id,
                property_id: property.id,
                property_title: property.title.clone(),
                owner_id: property.owner_id,
                guest_name: stay.guest_name.clone(),
                total_amount: stay.total_amount,
                commission_percent,
                cleaning_amount,
                income_comment: validate::optional_text(input.income_comment),
                commission_comment: validate::optional_text(input.commission_comment),
                cleaning_comment: validate::optional_text(input.cleaning_comment),
            },
            now,
        );

        let detail = StayDetail {
            stay: StayRecord {
                id: stay.id,
                property_id: property.id,
                property_title: property.title.clone(),
                owner_id: property.owner_id,
                owner_name: property.owner_name.clone(),
                guest_name: stay.guest_name.clone(),
                check_in,
                check_out,
                total_amount: stay.total_amount,
                created_at: now,
            },
            transactions: entries
                .iter()
                .cloned()
                .map(|e| TransactionRecord::from_new(e, &property.owner_name, &property.title))
                .collect(),
        };

        self.store.insert_stay(stay, entries).await?;
        Ok(detail)
    }

    /// Lists stays visible to `principal`.
    pub async fn list(
        &self,
        principal: &Principal,
        filter: &StayFilter,
    ) -> AppResult<Listing<StayRecord>> {
        let scope = self.scopes.property_scope(principal).await?;
        if scope.is_nothing() {
            return Ok(Listing::new(Vec::new()));
        }
        Ok(Listing::new(self.store.list_stays(filter, &scope).await?))
    }

    /// Fetches one stay with its ledger entries.
    pub async fn get(&self, principal: &Principal, id: StayId) -> AppResult<StayDetail> {
        let scope = self.scopes.property_scope(principal).await?;
        self.store
            .find_stay(id, &scope)
            .await?
            .ok_or_else(stay_not_found)
    }

    /// Deletes a stay within scope. Administrators and managers only.
    pub async fn delete(&self, principal: &Principal, id: StayId) -> AppResult<()> {
        principal.require(&[Role::Manager])?;
        let scope = self.scopes.property_scope(principal).await?;
        if self.store.find_stay(id, &scope).await?.is_none() {
            return Err(stay_not_found());
        }
        if self.store.delete_stay(id).await? {
            Ok(())
        } else {
            Err(stay_not_found())
        }
    }
}
