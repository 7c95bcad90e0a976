//! Batched lookup of display names for listing rows.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rentdesk_core::ledger::TransactionRecord;
use rentdesk_shared::types::{OwnerId, PayoutId, PropertyId, StayId, TransactionId};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{owners, properties, transactions, users};

/// Property titles and owner names keyed by ID.
#[derive(Debug, Default)]
pub(crate) struct DisplayNames {
    titles: HashMap<Uuid, String>,
    owners: HashMap<Uuid, String>,
}

impl DisplayNames {
    /// Loads titles for `property_ids` and names for `owner_ids`.
    pub(crate) async fn load<C: ConnectionTrait>(
        db: &C,
        property_ids: impl IntoIterator<Item = Uuid>,
        owner_ids: impl IntoIterator<Item = Uuid>,
    ) -> Result<Self, DbErr> {
        let property_ids: HashSet<Uuid> = property_ids.into_iter().collect();
        let owner_ids: HashSet<Uuid> = owner_ids.into_iter().collect();

        let titles = if property_ids.is_empty() {
            HashMap::new()
        } else {
            properties::Entity::find()
                .filter(properties::Column::Id.is_in(property_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|p| (p.id, p.title))
                .collect()
        };

        let owners = owner_names(db, owner_ids).await?;

        Ok(Self { titles, owners })
    }

    /// Loads the names needed to render `rows`.
    pub(crate) async fn for_transactions<C: ConnectionTrait>(
        db: &C,
        rows: &[transactions::Model],
    ) -> Result<Self, DbErr> {
        Self::load(
            db,
            rows.iter().map(|t| t.property_id),
            rows.iter().map(|t| t.owner_id),
        )
        .await
    }

    pub(crate) fn title(&self, property_id: Uuid) -> String {
        self.titles.get(&property_id).cloned().unwrap_or_default()
    }

    pub(crate) fn owner(&self, owner_id: Uuid) -> String {
        self.owners.get(&owner_id).cloned().unwrap_or_default()
    }

    /// Renders a ledger row.
    pub(crate) fn transaction(&self, model: transactions::Model) -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::from_uuid(model.id),
            kind: model.kind.into(),
            amount: model.amount,
            comment: model.comment,
            owner_id: OwnerId::from_uuid(model.owner_id),
            owner_name: self.owner(model.owner_id),
            property_id: PropertyId::from_uuid(model.property_id),
            property_title: self.title(model.property_id),
            stay_id: model.stay_id.map(StayId::from_uuid),
            payout_id: model.payout_id.map(PayoutId::from_uuid),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Owner display names (held on the linked user account).
pub(crate) async fn owner_names<C: ConnectionTrait>(
    db: &C,
    owner_ids: HashSet<Uuid>,
) -> Result<HashMap<Uuid, String>, DbErr> {
    if owner_ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(owners::Entity::find()
        .filter(owners::Column::Id.is_in(owner_ids))
        .find_also_related(users::Entity)
        .all(db)
        .await?
        .into_iter()
        .map(|(owner, user)| (owner.id, user.map(|u| u.name).unwrap_or_default()))
        .collect())
}
