//! Mapping of `SeaORM` failures onto application errors.

use rentdesk_shared::AppError;
use sea_orm::{DbErr, SqlErr};

/// Maps a database error. Unique-key violations become `Conflict`;
/// anything else is an infrastructure failure.
pub(crate) fn db_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, "unique constraint violation");
            AppError::conflict("Resource already exists")
        }
        _ => {
            tracing::error!(error = %err, "database error");
            AppError::Database(err.to_string())
        }
    }
}
