use chrono::{DateTime, Utc};
use energy_core::model::{ProgressState, SessionKey};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{map_module_row, sequence_to_i64, ser};
use crate::repository::{ProgressRecord, ProgressRepository, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load(&self, key: &SessionKey) -> Result<ProgressState, StorageError> {
        let session = sqlx::query(
            r"
            SELECT total_score, updated_at
            FROM sessions
            WHERE session_key = ?1
            ",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(session) = session else {
            tracing::debug!(session = %key, "no stored progress, starting fresh");
            return Ok(ProgressState::new());
        };

        let total_score: i64 = session.try_get("total_score").map_err(ser)?;
        let total_score = u32::try_from(total_score)
            .map_err(|_| StorageError::Serialization(format!("invalid total: {total_score}")))?;
        let updated_ms: i64 = session.try_get("updated_at").map_err(ser)?;
        let updated_at = DateTime::<Utc>::from_timestamp_millis(updated_ms)
            .ok_or_else(|| StorageError::Serialization(format!("invalid updated_at: {updated_ms}")))?;

        let rows = sqlx::query(
            r"
            SELECT module_id, score, completed, completed_seq
            FROM module_progress
            WHERE session_key = ?1
            ORDER BY completed_seq IS NULL, completed_seq, module_id
            ",
        )
        .bind(key.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut modules = Vec::with_capacity(rows.len());
        let mut completed = Vec::new();
        for row in &rows {
            let (id, progress, seq) = map_module_row(row)?;
            if seq.is_some() {
                completed.push(id);
            }
            modules.push((id, progress));
        }

        ProgressRecord {
            session_key: key.clone(),
            modules,
            completed,
            total_score,
            updated_at,
        }
        .into_state()
    }

    async fn save(
        &self,
        key: &SessionKey,
        state: &ProgressState,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO sessions (session_key, total_score, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(session_key) DO UPDATE SET
                total_score = excluded.total_score,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key.as_str())
        .bind(i64::from(state.total_score()))
        .bind(saved_at.timestamp_millis())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        sqlx::query("DELETE FROM module_progress WHERE session_key = ?1")
            .bind(key.as_str())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        for (id, progress) in state.modules() {
            let seq = state
                .completed_modules()
                .iter()
                .position(|done| *done == id)
                .map(sequence_to_i64)
                .transpose()?;
            sqlx::query(
                r"
                INSERT INTO module_progress (session_key, module_id, score, completed, completed_seq)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ",
            )
            .bind(key.as_str())
            .bind(id.as_str())
            .bind(i64::from(progress.score))
            .bind(i64::from(progress.completed))
            .bind(seq)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        tracing::debug!(
            session = %key,
            total = state.total_score(),
            "saved session progress"
        );
        Ok(())
    }

    async fn purge_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError> {
        let res = sqlx::query("DELETE FROM sessions WHERE updated_at < ?1")
            .bind(cutoff.timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        let removed = res.rows_affected();
        tracing::info!(removed, %cutoff, "purged stale sessions");
        Ok(removed)
    }
}
