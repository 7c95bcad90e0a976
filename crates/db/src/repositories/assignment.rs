//! Manager assignment repository.

use std::collections::HashMap;

use chrono::Utc;
use rentdesk_core::assignments::{
    AssignmentFilter, AssignmentRecord, AssignmentStore, NewAssignment,
};
use rentdesk_core::scope::AssignmentLookup;
use rentdesk_shared::{
    AppResult,
    types::{AssignmentId, PropertyId, UserId},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::UserRole;
use crate::entities::{manager_properties, properties, users};
use crate::error::db_err;

/// Assignment repository for manager-to-property links.
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    db: DatabaseConnection,
}

impl AssignmentRepository {
    /// Creates a new assignment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn records(
        &self,
        rows: Vec<manager_properties::Model>,
    ) -> Result<Vec<AssignmentRecord>, DbErr> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let managers: HashMap<Uuid, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(rows.iter().map(|a| a.user_id)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();
        let props: HashMap<Uuid, properties::Model> = properties::Entity::find()
            .filter(properties::Column::Id.is_in(rows.iter().map(|a| a.property_id)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(rows
            .into_iter()
            .map(|a| {
                let property = props.get(&a.property_id);
                AssignmentRecord {
                    id: AssignmentId::from_uuid(a.id),
                    user_id: UserId::from_uuid(a.user_id),
                    user_name: managers.get(&a.user_id).cloned().unwrap_or_default(),
                    property_id: PropertyId::from_uuid(a.property_id),
                    property_title: property.map(|p| p.title.clone()).unwrap_or_default(),
                    property_address: property.map(|p| p.address.clone()).unwrap_or_default(),
                    assigned_at: a.assigned_at.with_timezone(&Utc),
                }
            })
            .collect())
    }
}

impl AssignmentLookup for AssignmentRepository {
    async fn assigned_property_ids(&self, manager: UserId) -> AppResult<Vec<PropertyId>> {
        let ids: Vec<Uuid> = manager_properties::Entity::find()
            .select_only()
            .column(manager_properties::Column::PropertyId)
            .filter(manager_properties::Column::UserId.eq(manager.into_inner()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(ids.into_iter().map(PropertyId::from_uuid).collect())
    }
}

impl AssignmentStore for AssignmentRepository {
    async fn is_manager(&self, user: UserId) -> AppResult<bool> {
        let count = users::Entity::find_by_id(user.into_inner())
            .filter(users::Column::Role.eq(UserRole::Manager))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn property_exists(&self, property: PropertyId) -> AppResult<bool> {
        let count = properties::Entity::find_by_id(property.into_inner())
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn is_assigned(&self, user: UserId, property: PropertyId) -> AppResult<bool> {
        let count = manager_properties::Entity::find()
            .filter(manager_properties::Column::UserId.eq(user.into_inner()))
            .filter(manager_properties::Column::PropertyId.eq(property.into_inner()))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn insert_assignment(&self, assignment: NewAssignment) -> AppResult<()> {
        manager_properties::ActiveModel {
            id: Set(assignment.id.into_inner()),
            user_id: Set(assignment.user_id.into_inner()),
            property_id: Set(assignment.property_id.into_inner()),
            assigned_at: Set(assignment.assigned_at.into()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn find_assignment(&self, id: AssignmentId) -> AppResult<Option<AssignmentRecord>> {
        let Some(row) = manager_properties::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        Ok(self.records(vec![row]).await.map_err(db_err)?.pop())
    }

    async fn list_assignments(&self, filter: AssignmentFilter) -> AppResult<Vec<AssignmentRecord>> {
        let rows = manager_properties::Entity::find()
            .apply_if(filter.user_id, |q, user| {
                q.filter(manager_properties::Column::UserId.eq(user.into_inner()))
            })
            .apply_if(filter.property_id, |q, property| {
                q.filter(manager_properties::Column::PropertyId.eq(property.into_inner()))
            })
            .order_by_desc(manager_properties::Column::AssignedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.records(rows).await.map_err(db_err)
    }

    async fn delete_assignment(&self, id: AssignmentId) -> AppResult<bool> {
        let result = manager_properties::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
