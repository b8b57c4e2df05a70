use chrono::Utc;
use flexup_application::StatusLogRepository;
use flexup_core::RecordId;
use flexup_domain::{BusinessDomain, Status, StatusAction, StatusLogEntry};

use super::InMemoryStatusLogRepository;

fn entry(
    domain: BusinessDomain,
    record_id: RecordId,
    action: Option<StatusAction>,
    new_status: Status,
) -> StatusLogEntry {
    let entry = StatusLogEntry::new(
        RecordId::new(),
        domain,
        record_id,
        action,
        None,
        Some(new_status),
        None,
        true,
        Utc::now(),
    );
    match entry {
        Ok(entry) => entry,
        Err(_) => unreachable!(),
    }
}

#[tokio::test]
async fn listing_returns_entries_newest_first() {
    let repository = InMemoryStatusLogRepository::new();
    let record_id = RecordId::new();

    let first = entry(BusinessDomain::Product, record_id, None, Status::Draft);
    let second = entry(
        BusinessDomain::Product,
        record_id,
        Some(StatusAction::Confirm),
        Status::Active,
    );
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
async fn listing_is_scoped_to_the_domain_and_record() {
    let repository = InMemoryStatusLogRepository::new();
    let record_id = RecordId::new();

    let append_product = repository
        .append(entry(
            BusinessDomain::Product,
            record_id,
            None,
            Status::Draft,
        ))
        .await;
    assert!(append_product.is_ok());
    let append_user = repository
        .append(entry(BusinessDomain::User, record_id, None, Status::Pending))
        .await;
    assert!(append_user.is_ok());
    let append_other = repository
        .append(entry(
            BusinessDomain::Product,
            RecordId::new(),
            None,
            Status::Draft,
        ))
        .await;
    assert!(append_other.is_ok());

    let listed = repository
        .list_for_record(BusinessDomain::Product, record_id)
        .await
        .unwrap_or_default();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].domain(), BusinessDomain::Product);
}
