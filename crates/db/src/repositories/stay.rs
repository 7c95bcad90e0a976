//! Stay repository.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rentdesk_core::ledger::{NewTransaction, TransactionType};
use rentdesk_core::properties::{PropertyLookup, PropertyRecord};
use rentdesk_core::scope::PropertyScope;
use rentdesk_core::stays::{NewStay, StayDetail, StayFilter, StayRecord, StayStore};
use rentdesk_shared::{
    AppResult,
    types::{OwnerId, PropertyId, StayId},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QueryTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use super::names::owner_names;
use super::property::find_scoped_property;
use super::transaction::{insert_transaction_row, transaction_records};
use crate::entities::{properties, stays, transactions};
use crate::error::db_err;
use crate::scope::{contains_ci, through_property};

/// Stay repository for guest stays.
#[derive(Debug, Clone)]
pub struct StayRepository {
    db: DatabaseConnection,
}

impl StayRepository {
    /// Creates a new stay repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn stay_records<C: ConnectionTrait>(
    db: &C,
    rows: Vec<stays::Model>,
) -> Result<Vec<StayRecord>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let props: HashMap<Uuid, properties::Model> = properties::Entity::find()
        .filter(properties::Column::Id.is_in(rows.iter().map(|s| s.property_id)))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let owner_ids: HashSet<Uuid> = props.values().map(|p| p.owner_id).collect();
    let owners = owner_names(db, owner_ids).await?;

    Ok(rows
        .into_iter()
        .filter_map(|s| {
            let property = props.get(&s.property_id)?;
            Some(StayRecord {
                id: StayId::from_uuid(s.id),
                property_id: PropertyId::from_uuid(s.property_id),
                property_title: property.title.clone(),
                owner_id: OwnerId::from_uuid(property.owner_id),
                owner_name: owners.get(&property.owner_id).cloned().unwrap_or_default(),
                guest_name: s.guest_name,
                check_in: s.check_in.with_timezone(&Utc),
                check_out: s.check_out.with_timezone(&Utc),
                total_amount: s.total_amount,
                created_at: s.created_at.with_timezone(&Utc),
            })
        })
        .collect())
}

/// Position of a type in the order stay entries are created.
fn creation_rank(kind: TransactionType) -> usize {
    TransactionType::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(usize::MAX)
}

impl PropertyLookup for StayRepository {
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

impl StayStore for StayRepository {
    async fn insert_stay(&self, stay: NewStay, entries: Vec<NewTransaction>) -> AppResult<()> {
        let stay_id = stay.id;
        let entry_count = entries.len();
        let txn = self.db.begin().await.map_err(db_err)?;

        stays::ActiveModel {
            id: Set(stay.id.into_inner()),
            property_id: Set(stay.property_id.into_inner()),
            guest_name: Set(stay.guest_name),
            check_in: Set(stay.check_in.into()),
            check_out: Set(stay.check_out.into()),
            total_amount: Set(stay.total_amount),
            created_at: Set(stay.created_at.into()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        for entry in entries {
            insert_transaction_row(&txn, entry).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        tracing::info!(stay_id = %stay_id, entries = entry_count, "stay created");
        Ok(())
    }

    async fn list_stays(
        &self,
        filter: &StayFilter,
        scope: &PropertyScope,
    ) -> AppResult<Vec<StayRecord>> {
        let rows = stays::Entity::find()
            .filter(through_property(stays::Column::PropertyId, scope))
            .apply_if(filter.property_id, |q, id| {
                q.filter(stays::Column::PropertyId.eq(id.into_inner()))
            })
            .apply_if(filter.owner_id, |q, owner| {
                q.filter(through_property(
                    stays::Column::PropertyId,
                    &PropertyScope::Owner(owner),
                ))
            })
            .apply_if(filter.window.from, |q, from| {
                q.filter(stays::Column::CheckIn.gte(from))
            })
            .apply_if(filter.window.to, |q, to| q.filter(stays::Column::CheckOut.lte(to)))
            .apply_if(
                filter.guest_name.as_deref().filter(|g| !g.trim().is_empty()),
                |q, guest| q.filter(contains_ci(stays::Column::GuestName, guest)),
            )
            .order_by_desc(stays::Column::CheckIn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        stay_records(&self.db, rows).await.map_err(db_err)
    }

    async fn find_stay(&self, id: StayId, scope: &PropertyScope) -> AppResult<Option<StayDetail>> {
        let Some(row) = stays::Entity::find_by_id(id.into_inner())
            .filter(through_property(stays::Column::PropertyId, scope))
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        let Some(stay) = stay_records(&self.db, vec![row])
            .await
            .map_err(db_err)?
            .pop()
        else {
            return Ok(None);
        };

        let mut transactions = transaction_records(
            &self.db,
            transactions::Entity::find()
                .filter(transactions::Column::StayId.eq(id.into_inner()))
                .order_by_asc(transactions::Column::CreatedAt),
        )
        .await
        .map_err(db_err)?;
        transactions.sort_by_key(|t| (t.created_at, creation_rank(t.kind)));

        Ok(Some(StayDetail { stay, transactions }))
    }

    async fn delete_stay(&self, id: StayId) -> AppResult<bool> {
        let result = stays::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(stay_id = %id, "stay deleted");
        }
        Ok(deleted)
    }
}
