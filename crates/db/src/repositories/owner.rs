//! Owner repository.

use std::collections::HashMap;

use chrono::Utc;
use rentdesk_core::ledger::TransactionType;
use rentdesk_core::owners::{OwnerRow, OwnerStore, UpdateOwnerInput};
use rentdesk_core::properties::{PropertyFilter, PropertyRecord};
use rentdesk_core::scope::{OwnerScope, PropertyScope};
use rentdesk_shared::{
    AppResult,
    types::{OwnerId, UserId},
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, SelectTwo, Set, TransactionTrait,
};
use uuid::Uuid;

use super::property::list_scoped_properties;
use crate::entities::sea_orm_active_enums::TransactionKind;
use crate::entities::{owners, properties, transactions, users};
use crate::error::db_err;
use crate::scope::{contains_ci, owner_condition, property_condition};

/// Owner repository for owner profiles and balances.
#[derive(Debug, Clone)]
pub struct OwnerRepository {
    db: DatabaseConnection,
}

impl OwnerRepository {
    /// Creates a new owner repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn owner_rows(
        &self,
        query: SelectTwo<owners::Entity, users::Entity>,
        scope: &PropertyScope,
    ) -> Result<Vec<OwnerRow>, DbErr> {
        let rows = query.all(&self.db).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|(o, _)| o.id).collect();

        let counts: HashMap<Uuid, i64> = properties::Entity::find()
            .select_only()
            .column(properties::Column::OwnerId)
            .column_as(properties::Column::Id.count(), "count")
            .filter(properties::Column::OwnerId.is_in(ids.clone()))
            .filter(property_condition(scope))
            .group_by(properties::Column::OwnerId)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        let mut ledgers: HashMap<Uuid, Vec<(TransactionType, Decimal)>> = HashMap::new();
        let sums: Vec<(Uuid, TransactionKind, Decimal)> = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::OwnerId)
            .column(transactions::Column::Kind)
            .column_as(transactions::Column::Amount.sum(), "total")
            .filter(transactions::Column::OwnerId.is_in(ids))
            .group_by(transactions::Column::OwnerId)
            .group_by(transactions::Column::Kind)
            .into_tuple()
            .all(&self.db)
            .await?;
        for (owner_id, kind, total) in sums {
            ledgers.entry(owner_id).or_default().push((kind.into(), total));
        }

        Ok(rows
            .into_iter()
            .map(|(owner, user)| {
                let (name, email) = user.map(|u| (u.name, u.email)).unwrap_or_default();
                OwnerRow {
                    id: OwnerId::from_uuid(owner.id),
                    user_id: UserId::from_uuid(owner.user_id),
                    name,
                    email,
                    phone: owner.phone,
                    created_at: owner.created_at.with_timezone(&Utc),
                    properties_count: counts
                        .get(&owner.id)
                        .map_or(0, |n| u64::try_from(*n).unwrap_or(0)),
                    ledger: ledgers.remove(&owner.id).unwrap_or_default(),
                }
            })
            .collect())
    }
}

impl OwnerStore for OwnerRepository {
    async fn list_owners(
        &self,
        owners: &OwnerScope,
        properties: &PropertyScope,
        search: Option<&str>,
    ) -> AppResult<Vec<OwnerRow>> {
        let query = owners::Entity::find()
            .find_also_related(users::Entity)
            .filter(owner_condition(owners))
            .apply_if(search.filter(|s| !s.trim().is_empty()), |q, s| {
                q.filter(contains_ci(users::Column::Name, s))
            })
            .order_by_asc(users::Column::Name);
        self.owner_rows(query, properties).await.map_err(db_err)
    }

    async fn find_owner(
        &self,
        id: OwnerId,
        owners: &OwnerScope,
        properties: &PropertyScope,
    ) -> AppResult<Option<OwnerRow>> {
        let query = owners::Entity::find()
            .find_also_related(users::Entity)
            .filter(owners::Column::Id.eq(id.into_inner()))
            .filter(owner_condition(owners));
        let mut rows = self.owner_rows(query, properties).await.map_err(db_err)?;
        Ok(rows.pop())
    }

    async fn owner_properties(
        &self,
        filter: &PropertyFilter,
        properties: &PropertyScope,
    ) -> AppResult<Vec<PropertyRecord>> {
        list_scoped_properties(&self.db, filter, properties)
            .await
            .map_err(db_err)
    }

    async fn update_owner(&self, id: OwnerId, changes: &UpdateOwnerInput) -> AppResult<bool> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(owner) = owners::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            return Ok(false);
        };
        let now = Utc::now().into();
        let user_id = owner.user_id;

        if let Some(phone) = &changes.phone {
            let mut model: owners::ActiveModel = owner.into();
            model.phone = Set(Some(phone.clone()));
            model.updated_at = Set(now);
            model.update(&txn).await.map_err(db_err)?;
        }
        if let Some(name) = &changes.name {
            users::ActiveModel {
                id: Set(user_id),
                name: Set(name.clone()),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        tracing::info!(owner_id = %id, "owner updated");
        Ok(true)
    }

    async fn delete_owner(&self, id: OwnerId) -> AppResult<bool> {
        let Some(owner) = owners::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(false);
        };

        // Deleting the account cascades to the profile, its properties and
        // everything hanging off them.
        let result = users::Entity::delete_by_id(owner.user_id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(owner_id = %id, user_id = %owner.user_id, "owner deleted");
        }
        Ok(deleted)
    }
}
