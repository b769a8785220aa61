use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::repository::{PROGRESS_KEY, ProgressDocument, ProgressRepository, StorageError};

use super::SqliteRepository;
use super::mapping::{conn, map_progress_row};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_progress(&self) -> Result<Option<ProgressDocument>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT value
            FROM kv_store
            WHERE key = ?1
            ",
        )
        .bind(PROGRESS_KEY)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_progress_row).transpose()
    }

    async fn save_progress(&self, document: &ProgressDocument) -> Result<(), StorageError> {
        let value = document.to_json()?;
        sqlx::query(
            r"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(PROGRESS_KEY)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        debug!(stars = document.stars, daily = document.daily_progress, "saved progress");
        Ok(())
    }
}
