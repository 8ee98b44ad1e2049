use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Applies pending schema versions in order.
///
/// Version 1 creates the session and per-module progress tables.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

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

    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS sessions (
                    session_key TEXT PRIMARY KEY,
                    total_score INTEGER NOT NULL CHECK (total_score >= 0),
                    updated_at INTEGER NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        // completed_seq orders completions; NULL while the module is open.
        // sessions.updated_at holds unix milliseconds.
        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS module_progress (
                    session_key TEXT NOT NULL,
                    module_id TEXT NOT NULL
                        CHECK (module_id IN ('solar', 'wind', 'hydro', 'biomass')),
                    score INTEGER NOT NULL CHECK (score IN (0, 100)),
                    completed INTEGER NOT NULL CHECK (completed IN (0, 1)),
                    completed_seq INTEGER,
                    PRIMARY KEY (session_key, module_id),
                    FOREIGN KEY (session_key) REFERENCES sessions(session_key) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_sessions_updated_at
                    ON sessions(updated_at);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(version = 1, "applied schema migration");
    }

    Ok(())
}
