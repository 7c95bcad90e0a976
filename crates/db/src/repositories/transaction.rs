//! Ledger (transaction) repository.

use chrono::Utc;
use rentdesk_core::ledger::{NewTransaction, TransactionRecord};
use rentdesk_core::properties::{PropertyLookup, PropertyRecord};
use rentdesk_core::scope::PropertyScope;
use rentdesk_core::transactions::{TransactionFilter, TransactionStore};
use rentdesk_shared::{
    AppResult,
    types::{PageRequest, PropertyId, TransactionId},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Select, Set,
};

use super::names::DisplayNames;
use super::property::find_scoped_property;
use crate::entities::sea_orm_active_enums::TransactionKind;
use crate::entities::transactions;
use crate::error::db_err;
use crate::scope::through_property;

/// Transaction repository for ledger entries.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Inserts one ledger row.
pub(crate) async fn insert_transaction_row<C: ConnectionTrait>(
    db: &C,
    entry: NewTransaction,
) -> Result<(), DbErr> {
    transactions::ActiveModel {
        id: Set(entry.id.into_inner()),
        kind: Set(TransactionKind::from(entry.kind)),
        amount: Set(entry.amount),
        comment: Set(entry.comment),
        owner_id: Set(entry.owner_id.into_inner()),
        property_id: Set(entry.property_id.into_inner()),
        stay_id: Set(entry.stay_id.map(|id| id.into_inner())),
        payout_id: Set(entry.payout_id.map(|id| id.into_inner())),
        created_at: Set(entry.created_at.into()),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Loads ledger rows and renders them with display names.
pub(crate) async fn transaction_records<C: ConnectionTrait>(
    db: &C,
    query: Select<transactions::Entity>,
) -> Result<Vec<TransactionRecord>, DbErr> {
    let rows = query.all(db).await?;
    let names = DisplayNames::for_transactions(db, &rows).await?;
    Ok(rows.into_iter().map(|t| names.transaction(t)).collect())
}

fn filtered(filter: &TransactionFilter, scope: &PropertyScope) -> Select<transactions::Entity> {
    transactions::Entity::find()
        .filter(through_property(transactions::Column::PropertyId, scope))
        .apply_if(filter.property_id, |q, id| {
            q.filter(transactions::Column::PropertyId.eq(id.into_inner()))
        })
        .apply_if(filter.owner_id, |q, owner| {
            q.filter(transactions::Column::OwnerId.eq(owner.into_inner()))
        })
        .apply_if(filter.kind, |q, kind| {
            q.filter(transactions::Column::Kind.eq(TransactionKind::from(kind)))
        })
        .apply_if(filter.window.from, |q, from| {
            q.filter(transactions::Column::CreatedAt.gte(from))
        })
        .apply_if(filter.window.to, |q, to| {
            q.filter(transactions::Column::CreatedAt.lte(to))
        })
}

impl PropertyLookup for TransactionRepository {
    async fn find_property(
        &self,
        id: PropertyId,
        scope: &PropertyScope,
    ) -> AppResult<Option<PropertyRecord>> {
        find_scoped_property(&self.db, id, scope)
            .await
            .map_err(db_err)
    }
}

impl TransactionStore for TransactionRepository {
    async fn insert_transaction(&self, entry: NewTransaction) -> AppResult<()> {
        let (id, kind) = (entry.id, entry.kind);
        insert_transaction_row(&self.db, entry)
            .await
            .map_err(db_err)?;
        tracing::info!(transaction_id = %id, kind = %kind, "transaction created");
        Ok(())
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        scope: &PropertyScope,
        page: PageRequest,
    ) -> AppResult<(Vec<TransactionRecord>, u64)> {
        let query = filtered(filter, scope);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let items = transaction_records(
            &self.db,
            query
                .order_by_desc(transactions::Column::CreatedAt)
                .order_by_desc(transactions::Column::Id)
                .offset(page.offset())
                .limit(page.limit()),
        )
        .await
        .map_err(db_err)?;
        Ok((items, total))
    }

    async fn find_transaction(
        &self,
        id: TransactionId,
        scope: &PropertyScope,
    ) -> AppResult<Option<TransactionRecord>> {
        let query = transactions::Entity::find_by_id(id.into_inner())
            .filter(through_property(transactions::Column::PropertyId, scope));
        let mut records = transaction_records(&self.db, query)
            .await
            .map_err(db_err)?;
        Ok(records.pop())
    }

    async fn delete_transaction(&self, id: TransactionId) -> AppResult<bool> {
        let result = transactions::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(transaction_id = %id, "transaction deleted");
        }
        Ok(deleted)
    }
}

