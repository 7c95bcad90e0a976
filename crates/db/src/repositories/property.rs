//! Property repository.

use std::collections::HashSet;

use chrono::Utc;
use rentdesk_core::assignments::NewAssignment;
use rentdesk_core::properties::{
    NewProperty, PropertyFilter, PropertyLookup, PropertyRecord, PropertyStore,
    UpdatePropertyInput,
};
use rentdesk_core::scope::PropertyScope;
use rentdesk_shared::{
    AppResult,
    types::{OwnerId, PropertyId},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QueryTrait, Set, TransactionTrait,
};

use super::names::owner_names;
use crate::entities::{manager_properties, properties};
use crate::error::db_err;
use crate::scope::{contains_ci, property_condition};

/// Property repository for the property directory.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DatabaseConnection,
}

impl PropertyRepository {
    /// Creates a new property repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Lists properties matching `filter` within `scope`, ordered by title.
pub(crate) async fn list_scoped_properties<C: ConnectionTrait>(
    db: &C,
    filter: &PropertyFilter,
    scope: &PropertyScope,
) -> Result<Vec<PropertyRecord>, DbErr> {
    let rows = properties::Entity::find()
        .filter(property_condition(scope))
        .apply_if(filter.owner_id, |q, owner| {
            q.filter(properties::Column::OwnerId.eq(owner.into_inner()))
        })
        .apply_if(
            filter.search.as_deref().filter(|s| !s.trim().is_empty()),
            |q, search| {
                q.filter(
                    Condition::any()
                        .add(contains_ci(properties::Column::Title, search))
                        .add(contains_ci(properties::Column::Address, search)),
                )
            },
        )
        .order_by_asc(properties::Column::Title)
        .all(db)
        .await?;
    with_owner_names(db, rows).await
}

/// Finds one property within `scope`.
pub(crate) async fn find_scoped_property<C: ConnectionTrait>(
    db: &C,
    id: PropertyId,
    scope: &PropertyScope,
) -> Result<Option<PropertyRecord>, DbErr> {
    let Some(row) = properties::Entity::find_by_id(id.into_inner())
        .filter(property_condition(scope))
        .one(db)
        .await?
    else {
        return Ok(None);
    };
    Ok(with_owner_names(db, vec![row]).await?.pop())
}

async fn with_owner_names<C: ConnectionTrait>(
    db: &C,
    rows: Vec<properties::Model>,
) -> Result<Vec<PropertyRecord>, DbErr> {
    let owner_ids: HashSet<_> = rows.iter().map(|p| p.owner_id).collect();
    let names = owner_names(db, owner_ids).await?;
    Ok(rows
        .into_iter()
        .map(|p| PropertyRecord {
            id: PropertyId::from_uuid(p.id),
            owner_name: names.get(&p.owner_id).cloned().unwrap_or_default(),
            owner_id: OwnerId::from_uuid(p.owner_id),
            title: p.title,
            address: p.address,
            created_at: p.created_at.with_timezone(&Utc),
        })
        .collect())
}

impl PropertyLookup for PropertyRepository {
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

impl PropertyStore for PropertyRepository {
    async fn owner_name(&self, owner: OwnerId) -> AppResult<Option<String>> {
        let names = owner_names(&self.db, HashSet::from([owner.into_inner()]))
            .await
            .map_err(db_err)?;
        Ok(names.get(&owner.into_inner()).cloned())
    }

    async fn insert_property(
        &self,
        property: NewProperty,
        assignment: Option<NewAssignment>,
    ) -> AppResult<()> {
        let property_id = property.id;
        let created_at = property.created_at.into();
        let txn = self.db.begin().await.map_err(db_err)?;

        properties::ActiveModel {
            id: Set(property.id.into_inner()),
            title: Set(property.title),
            address: Set(property.address),
            owner_id: Set(property.owner_id.into_inner()),
            created_at: Set(created_at),
            updated_at: Set(created_at),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        if let Some(assignment) = assignment {
            manager_properties::ActiveModel {
                id: Set(assignment.id.into_inner()),
                user_id: Set(assignment.user_id.into_inner()),
                property_id: Set(assignment.property_id.into_inner()),
                assigned_at: Set(assignment.assigned_at.into()),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        tracing::info!(property_id = %property_id, "property created");
        Ok(())
    }

    async fn list_properties(
        &self,
        filter: &PropertyFilter,
        scope: &PropertyScope,
    ) -> AppResult<Vec<PropertyRecord>> {
        list_scoped_properties(&self.db, filter, scope)
            .await
            .map_err(db_err)
    }

    async fn update_property(
        &self,
        id: PropertyId,
        changes: &UpdatePropertyInput,
    ) -> AppResult<bool> {
        let Some(existing) = properties::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(false);
        };

        let mut model: properties::ActiveModel = existing.into();
        if let Some(title) = &changes.title {
            model.title = Set(title.clone());
        }
        if let Some(address) = &changes.address {
            model.address = Set(address.clone());
        }
        if let Some(owner_id) = changes.owner_id {
            model.owner_id = Set(owner_id.into_inner());
        }
        model.updated_at = Set(Utc::now().into());
        model.update(&self.db).await.map_err(db_err)?;

        tracing::info!(property_id = %id, "property updated");
        Ok(true)
    }

    async fn delete_property(&self, id: PropertyId) -> AppResult<bool> {
        let result = properties::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(property_id = %id, "property deleted");
        }
        Ok(deleted)
    }
}

