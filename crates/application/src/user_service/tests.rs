use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use flexup_core::{AppError, AppResult, RecordId, UserId};
use flexup_domain::{BusinessDomain, EmailAddress, Status, StatusLogEntry, UserAccount};
use tokio::sync::Mutex;

use crate::ports::{StatusLogRepository, UserRepository};

use super::UserService;

#[derive(Default)]
struct FakeUserRepository {
    users: Mutex<HashMap<UserId, UserAccount>>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn insert(&self, user: UserAccount) -> AppResult<()> {
        let mut users = self.users.lock().await;
        if users.values().any(|known| known.email() == user.email()) {
            return Err(AppError::Conflict(format!(
                "a user with email '{}' already exists",
                user.email()
            )));
        }
        users.insert(user.id(), user);
        Ok(())
    }

    async fn update(&self, user: UserAccount) -> AppResult<()> {
        let mut users = self.users.lock().await;
        if !users.contains_key(&user.id()) {
            return Err(AppError::NotFound(format!(
                "no user with id '{}'",
                user.id()
            )));
        }
        users.insert(user.id(), user);
        Ok(())
    }

    async fn find(&self, id: UserId) -> AppResult<Option<UserAccount>> {
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<UserAccount>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }
}

#[derive(Default)]
struct FakeStatusLogRepository {
    entries: Mutex<Vec<StatusLogEntry>>,
}

#[async_trait]
impl StatusLogRepository for FakeStatusLogRepository {
    async fn append(&self, entry: StatusLogEntry) -> AppResult<()> {
        self.entries.lock().await.push(entry);
        Ok(())
    }

    async fn list_for_record(
        &self,
        domain: BusinessDomain,
        record_id: RecordId,
    ) -> AppResult<Vec<StatusLogEntry>> {
        let mut entries: Vec<StatusLogEntry> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|entry| entry.domain() == domain && entry.record_id() == record_id)
            .cloned()
            .collect();
        entries.reverse();
        Ok(entries)
    }
}

fn service() -> UserService {
    UserService::new(
        Arc::new(FakeUserRepository::default()),
        Arc::new(FakeStatusLogRepository::default()),
    )
}

#[tokio::test]
async fn registration_creates_a_pending_user() {
    let service = service();
    let user = service
        .register("Jo@Example.com")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(user.email().as_str(), "jo@example.com");
    assert_eq!(user.status(), Status::Pending);

    let history = service.status_history(user.id()).await.unwrap_or_default();
    assert_eq!(history.len(), 1);
    assert!(history[0].by_system());
    assert_eq!(history[0].new_status(), Some(Status::Pending));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let service = service();
    let first = service.register("jo@example.com").await;
    assert!(first.is_ok());

    let second = service.register("JO@example.com").await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let service = service();
    let result = service.register("not-an-email").await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn verification_activates_and_logs_the_transition() {
    let service = service();
    let user = service
        .register("jo@example.com")
        .await
        .unwrap_or_else(|_| unreachable!());

    let verified = service
        .verify_email(user.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(verified.status(), Status::Active);
    assert!(verified.is_email_verified());

    let history = service.status_history(user.id()).await.unwrap_or_default();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].initial_status(), Some(Status::Pending));
    assert_eq!(history[0].new_status(), Some(Status::Active));
}

#[tokio::test]
async fn login_requires_a_verified_active_user() {
    let service = service();
    let user = service
        .register("jo@example.com")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(service.ensure_can_login("jo@example.com").await.is_err());

    let _ = service.verify_email(user.id()).await;
    assert!(service.ensure_can_login("jo@example.com").await.is_ok());

    let _ = service.suspend(user.id()).await;
    let result = service.ensure_can_login("jo@example.com").await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn unknown_email_cannot_log_in() {
    let service = service();
    let result = service.ensure_can_login("ghost@example.com").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn closed_users_stay_closed() {
    let service = service();
    let user = service
        .register("jo@example.com")
        .await
        .unwrap_or_else(|_| unreachable!());

    let closed = service
        .close(user.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(closed.status(), Status::Closed);

    let result = service.verify_email(user.id()).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}
