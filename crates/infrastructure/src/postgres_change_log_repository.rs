//! PostgreSQL-backed change log repository.
//!
//! Each entry is stored as a JSONB document alongside the columns the
//! listing query filters and sorts on.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use flexup_application::ChangeLogRepository;
use flexup_core::{AppError, AppResult, RecordId};
use flexup_domain::{BusinessDomain, ChangeEntry, codec};

/// PostgreSQL implementation of the change log repository port.
#[derive(Clone)]
pub struct PostgresChangeLogRepository {
    pool: PgPool,
}

impl PostgresChangeLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ChangeLogRow {
    entry: serde_json::Value,
}

#[async_trait]
impl ChangeLogRepository for PostgresChangeLogRepository {
    async fn append(&self, entry: ChangeEntry) -> AppResult<()> {
        let document = serde_json::to_value(&entry).map_err(|error| {
            AppError::Internal(format!("failed to serialize change log entry: {error}"))
        })?;

        sqlx::query(
            r"
            INSERT INTO change_log_entries (id, domain, record_id, changed_at, entry)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(entry.id().as_uuid())
        .bind(codec::encode(entry.domain()))
        .bind(entry.record_id().as_uuid())
        .bind(entry.changed_at())
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(|error| query_failed(error, "append change log entry"))?;

        Ok(())
    }

    async fn list_for_record(
        &self,
        domain: BusinessDomain,
        record_id: RecordId,
    ) -> AppResult<Vec<ChangeEntry>> {
        let rows = sqlx::query_as::<_, ChangeLogRow>(
            r"
            SELECT entry
            FROM change_log_entries
            WHERE domain = $1 AND record_id = $2
            ORDER BY changed_at DESC, id DESC
            ",
        )
        .bind(codec::encode(domain))
        .bind(record_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| query_failed(error, "list change log entries"))?;

        rows.into_iter()
            .map(|row| {
                serde_json::from_value::<ChangeEntry>(row.entry).map_err(|error| {
                    AppError::Internal(format!("failed to deserialize change log entry: {error}"))
                })
            })
            .collect()
    }
}

fn query_failed(error: sqlx::Error, operation: &str) -> AppError {
    tracing::error!(%error, operation, "change log repository query failed");
    AppError::Internal(format!("failed to {operation}: {error}"))
}
