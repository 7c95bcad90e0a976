//! Ledger aggregation queries behind owner summaries.

use chrono::{DateTime, Utc};
use rentdesk_core::ledger::{TransactionRecord, TransactionType};
use rentdesk_core::scope::{OwnerScope, PropertyScope};
use rentdesk_core::summary::{LedgerQuery, LedgerStore};
use rentdesk_shared::{AppResult, types::OwnerId};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Select,
};

use super::transaction::transaction_records;
use crate::entities::sea_orm_active_enums::TransactionKind;
use crate::entities::{owners, properties, stays, transactions};
use crate::error::db_err;
use crate::scope::{owner_condition, property_condition, through_property};

/// Ledger repository for per-owner aggregates.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Entries of the query's owner within its scope and window.
fn ledger_entries(query: &LedgerQuery) -> Select<transactions::Entity> {
    transactions::Entity::find()
        .filter(transactions::Column::OwnerId.eq(query.owner_id.into_inner()))
        .filter(through_property(transactions::Column::PropertyId, &query.scope))
        .apply_if(query.window.from, |q, from| {
            q.filter(transactions::Column::CreatedAt.gte(from))
        })
        .apply_if(query.window.to, |q, to| {
            q.filter(transactions::Column::CreatedAt.lte(to))
        })
}

impl LedgerStore for LedgerRepository {
    async fn owner_visible(&self, owner: OwnerId, scope: &OwnerScope) -> AppResult<bool> {
        let count = owners::Entity::find_by_id(owner.into_inner())
            .filter(owner_condition(scope))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn sum_by_type(&self, query: &LedgerQuery) -> AppResult<Vec<(TransactionType, Decimal)>> {
        let sums: Vec<(TransactionKind, Decimal)> = ledger_entries(query)
            .select_only()
            .column(transactions::Column::Kind)
            .column_as(transactions::Column::Amount.sum(), "total")
            .group_by(transactions::Column::Kind)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(sums
            .into_iter()
            .map(|(kind, total)| (kind.into(), total))
            .collect())
    }

    async fn recent_transactions(
        &self,
        query: &LedgerQuery,
        limit: u64,
    ) -> AppResult<Vec<TransactionRecord>> {
        transaction_records(
            &self.db,
            ledger_entries(query)
                .order_by_desc(transactions::Column::CreatedAt)
                .order_by_desc(transactions::Column::Id)
                .limit(limit),
        )
        .await
        .map_err(db_err)
    }

    async fn count_properties(&self, owner: OwnerId, scope: &PropertyScope) -> AppResult<u64> {
        properties::Entity::find()
            .filter(properties::Column::OwnerId.eq(owner.into_inner()))
            .filter(property_condition(scope))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn count_active_stays(
        &self,
        owner: OwnerId,
        scope: &PropertyScope,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        stays::Entity::find()
            .filter(through_property(
                stays::Column::PropertyId,
                &PropertyScope::Owner(owner),
            ))
            .filter(through_property(stays::Column::PropertyId, scope))
            .filter(stays::Column::CheckIn.lte(at))
            .filter(stays::Column::CheckOut.gte(at))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
