//! Translation of access scopes into SQL conditions.
//!
//! Scope filters are always added alongside request filters, so a query
//! string can narrow what a caller sees but never widen it.

use rentdesk_core::scope::{OwnerScope, PropertyScope};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, QueryTrait};

use crate::entities::{owners, properties};

/// A condition that matches no row.
fn nothing() -> Condition {
    Condition::all().add(Expr::value(false))
}

/// Condition on the `properties` table itself.
pub(crate) fn property_condition(scope: &PropertyScope) -> Condition {
    match scope {
        PropertyScope::All => Condition::all(),
        PropertyScope::Owner(owner) => {
            Condition::all().add(properties::Column::OwnerId.eq(owner.into_inner()))
        }
        PropertyScope::Properties(ids) => Condition::all()
            .add(properties::Column::Id.is_in(ids.iter().map(|id| id.into_inner()))),
        PropertyScope::Nothing => nothing(),
    }
}

/// Condition on a table referencing `properties` through `column`.
///
/// Ownership is checked against the property's current owner, not any
/// owner snapshot stored on the row.
pub(crate) fn through_property<C: ColumnTrait>(column: C, scope: &PropertyScope) -> Condition {
    match scope {
        PropertyScope::All => Condition::all(),
        PropertyScope::Owner(owner) => Condition::all().add(
            column.in_subquery(
                properties::Entity::find()
                    .select_only()
                    .column(properties::Column::Id)
                    .filter(properties::Column::OwnerId.eq(owner.into_inner()))
                    .into_query(),
            ),
        ),
        PropertyScope::Properties(ids) => {
            Condition::all().add(column.is_in(ids.iter().map(|id| id.into_inner())))
        }
        PropertyScope::Nothing => nothing(),
    }
}

/// Condition on the `owners` table.
pub(crate) fn owner_condition(scope: &OwnerScope) -> Condition {
    match scope {
        OwnerScope::All => Condition::all(),
        OwnerScope::Only(owner) => Condition::all().add(owners::Column::Id.eq(owner.into_inner())),
        OwnerScope::HavingProperties(ids) => Condition::all().add(
            owners::Column::Id.in_subquery(
                properties::Entity::find()
                    .select_only()
                    .column(properties::Column::OwnerId)
                    .filter(properties::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
                    .into_query(),
            ),
        ),
        OwnerScope::Nothing => nothing(),
    }
}

/// Case-insensitive substring match.
pub(crate) fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.trim().to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column.as_column_ref()))).like(pattern)
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentdesk_shared::types::{OwnerId, PropertyId};
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(condition: Condition) -> String {
        properties::Entity::find()
            .filter(condition)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_all_adds_no_filter() {
        assert!(!sql(property_condition(&PropertyScope::All)).contains("WHERE"));
    }

    #[test]
    fn test_nothing_is_false() {
        assert!(sql(property_condition(&PropertyScope::Nothing)).contains("FALSE"));
    }

    #[test]
    fn test_owner_scope_filters_owner_column() {
        let owner = OwnerId::new();
        let out = sql(property_condition(&PropertyScope::Owner(owner)));
        assert!(out.contains("\"properties\".\"owner_id\" ="));
        assert!(out.contains(&owner.into_inner().to_string()));
    }

    #[test]
    fn test_properties_scope_uses_in_list() {
        let ids = vec![PropertyId::new(), PropertyId::new()];
        let out = sql(property_condition(&PropertyScope::Properties(ids)));
        assert!(out.contains("\"properties\".\"id\" IN ("));
    }

    #[test]
    fn test_owner_through_property_uses_subquery() {
        let owner = OwnerId::new();
        let out = sql(through_property(
            properties::Column::Id,
            &PropertyScope::Owner(owner),
        ));
        assert!(out.contains("IN (SELECT"));
    }

    #[test]
    fn test_like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
