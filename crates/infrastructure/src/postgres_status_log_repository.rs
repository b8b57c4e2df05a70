//! PostgreSQL-backed status log repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use flexup_application::StatusLogRepository;
use flexup_core::{AccountId, AppError, AppResult, RecordId};
use flexup_domain::{BusinessDomain, Status, StatusAction, StatusLogEntry, codec};

/// PostgreSQL implementation of the status log repository port.
///
/// The log is append-only: entries are never updated or deleted.
#[derive(Clone)]
pub struct PostgresStatusLogRepository {
    pool: PgPool,
}

impl PostgresStatusLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StatusLogRow {
    id: uuid::Uuid,
    domain: String,
    record_id: uuid::Uuid,
    action: Option<String>,
    initial_status: Option<String>,
    new_status: Option<String>,
    recorded_by: Option<uuid::Uuid>,
    by_system: bool,
    recorded_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<StatusLogRow> for StatusLogEntry {
    type Error = AppError;

    fn try_from(row: StatusLogRow) -> AppResult<Self> {
        StatusLogEntry::new(
            RecordId::from_uuid(row.id),
            codec::decode::<BusinessDomain>(&row.domain)?,
            RecordId::from_uuid(row.record_id),
            codec::decode_optional::<StatusAction>(row.action.as_deref())?,
            codec::decode_optional::<Status>(row.initial_status.as_deref())?,
            codec::decode_optional::<Status>(row.new_status.as_deref())?,
            row.recorded_by.map(AccountId::from_uuid),
            row.by_system,
            row.recorded_at,
        )
    }
}

#[async_trait]
impl StatusLogRepository for PostgresStatusLogRepository {
    async fn append(&self, entry: StatusLogEntry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO status_log_entries (
                id, domain, record_id, action, initial_status, new_status,
                recorded_by, by_system, recorded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(entry.id().as_uuid())
        .bind(codec::encode(entry.domain()))
        .bind(entry.record_id().as_uuid())
        .bind(codec::encode_optional(entry.action()))
        .bind(codec::encode_optional(entry.initial_status()))
        .bind(codec::encode_optional(entry.new_status()))
        .bind(entry.recorded_by().map(|account_id| account_id.as_uuid()))
        .bind(entry.by_system())
        .bind(entry.recorded_at())
        .execute(&self.pool)
        .await
        .map_err(|error| query_failed(error, "append status log entry"))?;

        Ok(())
    }

    async fn list_for_record(
        &self,
        domain: BusinessDomain,
        record_id: RecordId,
    ) -> AppResult<Vec<StatusLogEntry>> {
        let rows = sqlx::query_as::<_, StatusLogRow>(
            r"
            SELECT
                id, domain, record_id, action, initial_status, new_status,
                recorded_by, by_system, recorded_at
            FROM status_log_entries
            WHERE domain = $1 AND record_id = $2
            ORDER BY recorded_at DESC, id DESC
            ",
        )
        .bind(codec::encode(domain))
        .bind(record_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| query_failed(error, "list status log entries"))?;

        rows.into_iter().map(StatusLogEntry::try_from).collect()
    }
}

fn query_failed(error: sqlx::Error, operation: &str) -> AppError {
    tracing::error!(%error, operation, "status log repository query failed");
    AppError::Internal(format!("failed to {operation}: {error}"))
}
