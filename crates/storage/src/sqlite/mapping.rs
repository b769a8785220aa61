use sqlx::Row;

use crate::repository::{ProgressDocument, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Decode the `value` column of a `kv_store` row as a progress document.
pub(crate) fn map_progress_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<ProgressDocument, StorageError> {
    let raw: String = row.try_get("value").map_err(ser)?;
    ProgressDocument::from_json(&raw)
}
