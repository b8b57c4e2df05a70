use chrono::Utc;
use flexup_application::ChangeLogRepository;
use flexup_core::RecordId;
use flexup_domain::{BusinessDomain, ChangeEntry};

use super::InMemoryChangeLogRepository;

fn entry(record_id: RecordId, old_name: &str, new_name: &str) -> ChangeEntry {
    ChangeEntry::from_snapshots(
        RecordId::new(),
        BusinessDomain::Product,
        record_id,
        None,
        Utc::now(),
        &[("name", Some(old_name.to_owned()))],
        &[("name", Some(new_name.to_owned()))],
    )
}

#[tokio::test]
async fn listing_returns_entries_newest_first() {
    let repository = InMemoryChangeLogRepository::new();
    let record_id = RecordId::new();

    let first = entry(record_id, "Widget", "Gadget");
    let second = entry(record_id, "Gadget", "Gizmo");
    assert!(repository.append(first.clone()).await.is_ok());
    assert!(repository.append(second.clone()).await.is_ok());

    let listed = repository
        .list_for_record(BusinessDomain::Product, record_id)
        .await
        .unwrap_or_default();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id(), second.id());
    assert_eq!(listed[1].id(), first.id());
}

#[tokio::test]
async fn listing_is_scoped_to_the_record() {
    let repository = InMemoryChangeLogRepository::new();
    let record_id = RecordId::new();

    let append_known = repository
        .append(entry(record_id, "Widget", "Gadget"))
        .await;
    assert!(append_known.is_ok());
    let append_other = repository
        .append(entry(RecordId::new(), "Widget", "Gadget"))
        .await;
    assert!(append_other.is_ok());

    let listed = repository
        .list_for_record(BusinessDomain::Product, record_id)
        .await
        .unwrap_or_default();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].record_id(), record_id);
}
