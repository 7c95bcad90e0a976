//! Payout repository.

use chrono::Utc;
use rentdesk_core::ledger::NewTransaction;
use rentdesk_core::payouts::{NewPayout, PayoutFilter, PayoutRecord, PayoutStore};
use rentdesk_core::properties::{PropertyLookup, PropertyRecord};
use rentdesk_core::scope::PropertyScope;
use rentdesk_shared::{
    AppResult,
    types::{OwnerId, PageRequest, PayoutId, PropertyId},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Select, Set,
    TransactionTrait,
};

use super::names::DisplayNames;
use super::property::find_scoped_property;
use super::transaction::insert_transaction_row;
use crate::entities::payouts;
use crate::error::db_err;
use crate::scope::through_property;

/// Payout repository for owner payments.
#[derive(Debug, Clone)]
pub struct PayoutRepository {
    db: DatabaseConnection,
}

impl PayoutRepository {
    /// Creates a new payout repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn payout_records<C: ConnectionTrait>(
    db: &C,
    query: Select<payouts::Entity>,
) -> Result<Vec<PayoutRecord>, DbErr> {
    let rows = query.all(db).await?;
    let names = DisplayNames::load(
        db,
        rows.iter().map(|p| p.property_id),
        rows.iter().map(|p| p.owner_id),
    )
    .await?;
    Ok(rows
        .into_iter()
        .map(|p| PayoutRecord {
            id: PayoutId::from_uuid(p.id),
            owner_id: OwnerId::from_uuid(p.owner_id),
            owner_name: names.owner(p.owner_id),
            property_id: PropertyId::from_uuid(p.property_id),
            property_title: names.title(p.property_id),
            amount: p.amount,
            comment: p.comment,
            paid_at: p.paid_at.with_timezone(&Utc),
            created_at: p.created_at.with_timezone(&Utc),
        })
        .collect())
}

impl PropertyLookup for PayoutRepository {
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

impl PayoutStore for PayoutRepository {
    async fn insert_payout(&self, payout: NewPayout, entry: NewTransaction) -> AppResult<()> {
        let payout_id = payout.id;
        let txn = self.db.begin().await.map_err(db_err)?;

        payouts::ActiveModel {
            id: Set(payout.id.into_inner()),
            owner_id: Set(payout.owner_id.into_inner()),
            property_id: Set(payout.property_id.into_inner()),
            amount: Set(payout.amount),
            comment: Set(payout.comment),
            paid_at: Set(payout.paid_at.into()),
            created_at: Set(payout.created_at.into()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;
        insert_transaction_row(&txn, entry).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        tracing::info!(payout_id = %payout_id, amount = %payout.amount, "payout created");
        Ok(())
    }

    async fn list_payouts(
        &self,
        filter: &PayoutFilter,
        scope: &PropertyScope,
        page: PageRequest,
    ) -> AppResult<(Vec<PayoutRecord>, u64)> {
        let query = payouts::Entity::find()
            .filter(through_property(payouts::Column::PropertyId, scope))
            .apply_if(filter.property_id, |q, id| {
                q.filter(payouts::Column::PropertyId.eq(id.into_inner()))
            })
            .apply_if(filter.owner_id, |q, owner| {
                q.filter(payouts::Column::OwnerId.eq(owner.into_inner()))
            })
            .apply_if(filter.window.from, |q, from| {
                q.filter(payouts::Column::PaidAt.gte(from))
            })
            .apply_if(filter.window.to, |q, to| q.filter(payouts::Column::PaidAt.lte(to)));

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let items = payout_records(
            &self.db,
            query
                .order_by_desc(payouts::Column::PaidAt)
                .order_by_desc(payouts::Column::Id)
                .offset(page.offset())
                .limit(page.limit()),
        )
        .await
        .map_err(db_err)?;
        Ok((items, total))
    }

    async fn find_payout(
        &self,
        id: PayoutId,
        scope: &PropertyScope,
    ) -> AppResult<Option<PayoutRecord>> {
        let query = payouts::Entity::find_by_id(id.into_inner())
            .filter(through_property(payouts::Column::PropertyId, scope));
        let mut records = payout_records(&self.db, query).await.map_err(db_err)?;
        Ok(records.pop())
    }

    async fn delete_payout(&self, id: PayoutId) -> AppResult<bool> {
        let result = payouts::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(payout_id = %id, "payout deleted");
        }
        Ok(deleted)
    }
}
