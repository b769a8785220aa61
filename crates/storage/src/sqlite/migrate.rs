use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

struct Migration {
    version: i64,
    sql: &'static str,
}

/// Ordered schema history. Append only.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: r"
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    ",
}];

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );
        ",
    )
    .execute(pool)
    .await?;

    let current: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await?;
    let current = current.unwrap_or(0);

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        apply(pool, migration)
            .await
            .map_err(|source| SqliteInitError::Migration {
                version: migration.version,
                source,
            })?;
    }
    Ok(())
}

async fn apply(pool: &SqlitePool, migration: &Migration) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query(migration.sql).execute(&mut *tx).await?;
    sqlx::query(
        r"
        INSERT INTO schema_migrations (version, applied_at)
        VALUES (?1, ?2)
        ON CONFLICT(version) DO NOTHING
        ",
    )
    .bind(migration.version)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;
    tx.commit().await
}
