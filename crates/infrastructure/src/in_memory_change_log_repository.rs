use async_trait::async_trait;
use flexup_application::ChangeLogRepository;
use flexup_core::{AppResult, RecordId};
use flexup_domain::{BusinessDomain, ChangeEntry};
use tokio::sync::RwLock;

#[cfg(test)]
mod tests;

/// In-memory change log repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryChangeLogRepository {
    entries: RwLock<Vec<ChangeEntry>>,
}

impl InMemoryChangeLogRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChangeLogRepository for InMemoryChangeLogRepository {
    async fn append(&self, entry: ChangeEntry) -> AppResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn list_for_record(
        &self,
        domain: BusinessDomain,
        record_id: RecordId,
    ) -> AppResult<Vec<ChangeEntry>> {
        let entries = self.entries.read().await;

        let mut values: Vec<ChangeEntry> = entries
            .iter()
            .filter(|entry| entry.domain() == domain && entry.record_id() == record_id)
            .cloned()
            .collect();
        values.reverse();

        Ok(values)
    }
}
