use async_trait::async_trait;
use flexup_application::StatusLogRepository;
use flexup_core::{AppResult, RecordId};
use flexup_domain::{BusinessDomain, StatusLogEntry};
use tokio::sync::RwLock;

#[cfg(test)]
mod tests;

/// In-memory status log repository implementation.
///
/// Entries are kept in append order; listing reverses so the newest entry
/// comes first, matching the persistent implementations.
#[derive(Debug, Default)]
pub struct InMemoryStatusLogRepository {
    entries: RwLock<Vec<StatusLogEntry>>,
}

impl InMemoryStatusLogRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl StatusLogRepository for InMemoryStatusLogRepository {
    async fn append(&self, entry: StatusLogEntry) -> AppResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn list_for_record(
        &self,
        domain: BusinessDomain,
        record_id: RecordId,
    ) -> AppResult<Vec<StatusLogEntry>> {
        let entries = self.entries.read().await;

        let mut values: Vec<StatusLogEntry> = entries
            .iter()
            .filter(|entry| entry.domain() == domain && entry.record_id() == record_id)
            .cloned()
            .collect();
        values.reverse();

        Ok(values)
    }
}
