use std::sync::Arc;

use chrono::Utc;
use flexup_core::{AppError, AppResult, RecordId, UserId};
use flexup_domain::{BusinessDomain, EmailAddress, Status, StatusLogEntry, UserAccount};

use crate::ports::{StatusLogRepository, UserRepository};

#[cfg(test)]
mod tests;

/// Application service for user registration and lifecycle.
///
/// The user domain is system-managed: no account member mutates users, so
/// every status change is logged as a system action.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    status_log: Arc<dyn StatusLogRepository>,
}

impl UserService {
    /// Creates a new user service from repository implementations.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, status_log: Arc<dyn StatusLogRepository>) -> Self {
        Self { users, status_log }
    }

    /// Registers a new pending user.
    pub async fn register(&self, email: &str) -> AppResult<UserAccount> {
        let email = EmailAddress::new(email)?;
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "a user with email '{email}' already exists"
            )));
        }

        let user = UserAccount::register(UserId::new(), email, Utc::now());
        self.users.insert(user.clone()).await?;
        self.append_status_entry(&user, None, Some(user.status()))
            .await?;

        Ok(user)
    }

    /// Marks a user's email as verified, activating the account.
    pub async fn verify_email(&self, id: UserId) -> AppResult<UserAccount> {
        let mut user = self.require_user(id).await?;
        let previous_status = user.status();
        user.verify_email()?;
        self.users.update(user.clone()).await?;

        if user.status() != previous_status {
            self.append_status_entry(&user, Some(previous_status), Some(user.status()))
                .await?;
        }

        Ok(user)
    }

    /// Suspends a user.
    pub async fn suspend(&self, id: UserId) -> AppResult<UserAccount> {
        let mut user = self.require_user(id).await?;
        let previous_status = user.status();
        user.suspend();
        self.users.update(user.clone()).await?;
        self.append_status_entry(&user, Some(previous_status), Some(user.status()))
            .await?;

        Ok(user)
    }

    /// Closes a user account for good.
    pub async fn close(&self, id: UserId) -> AppResult<UserAccount> {
        let mut user = self.require_user(id).await?;
        let previous_status = user.status();
        user.close();
        self.users.update(user.clone()).await?;
        self.append_status_entry(&user, Some(previous_status), Some(user.status()))
            .await?;

        Ok(user)
    }

    /// Resolves a user by email and checks that they may log in.
    pub async fn ensure_can_login(&self, email: &str) -> AppResult<UserAccount> {
        let email = EmailAddress::new(email)?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no user with email '{email}'")))?;

        user.ensure_can_login()?;
        Ok(user)
    }

    /// Returns the status history of a user, newest first.
    pub async fn status_history(&self, id: UserId) -> AppResult<Vec<StatusLogEntry>> {
        self.status_log
            .list_for_record(BusinessDomain::User, RecordId::from_uuid(id.as_uuid()))
            .await
    }

    async fn require_user(&self, id: UserId) -> AppResult<UserAccount> {
        self.users
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no user with id '{id}'")))
    }

    async fn append_status_entry(
        &self,
        user: &UserAccount,
        initial_status: Option<Status>,
        new_status: Option<Status>,
    ) -> AppResult<()> {
        let entry = StatusLogEntry::new(
            RecordId::new(),
            BusinessDomain::User,
            RecordId::from_uuid(user.id().as_uuid()),
            None,
            initial_status,
            new_status,
            None,
            true,
            Utc::now(),
        )?;

        self.status_log.append(entry).await
    }
}
