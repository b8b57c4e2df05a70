//! Platform user accounts identified by email address.

use chrono::{DateTime, Utc};
use flexup_core::{AppError, AppResult, UserId};
use serde::{Deserialize, Serialize};

use crate::registry::ShortList;
use crate::status::Status;

/// Statuses a user account may take.
#[must_use]
pub fn user_statuses() -> ShortList<Status> {
    Status::short_list()
}

/// A validated, lowercased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address, lowercasing the input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the address is empty, longer
    /// than 254 characters, or not of the form `local@domain.tld`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into().trim().to_lowercase();
        if value.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }
        if value.chars().count() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(
                "email address must not contain whitespace".to_owned(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(AppError::Validation(format!(
                "'{value}' is not a valid email address"
            )));
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
            return Err(AppError::Validation(format!(
                "'{value}' is not a valid email address"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A platform user.
///
/// Users start pending until their email is verified, and may later be
/// suspended by the platform or closed for good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    id: UserId,
    email: EmailAddress,
    is_staff: bool,
    status: Status,
    is_email_verified: bool,
    joined_at: DateTime<Utc>,
}

impl UserAccount {
    /// Registers a new pending user.
    #[must_use]
    pub fn register(id: UserId, email: EmailAddress, joined_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            is_staff: false,
            status: Status::Pending,
            is_email_verified: false,
            joined_at,
        }
    }

    /// Reassembles a user account from stored state.
    #[must_use]
    pub fn from_parts(
        id: UserId,
        email: EmailAddress,
        is_staff: bool,
        status: Status,
        is_email_verified: bool,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            is_staff,
            status,
            is_email_verified,
            joined_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns whether the user is a staff member.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    /// Returns the account status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns whether the email has been verified.
    #[must_use]
    pub fn is_email_verified(&self) -> bool {
        self.is_email_verified
    }

    /// Returns when the user joined the platform.
    #[must_use]
    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Returns whether the user may use the platform.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == Status::Active && self.is_email_verified
    }

    /// Grants staff privileges.
    pub fn promote_to_staff(&mut self) {
        self.is_staff = true;
    }

    /// Marks the email as verified and activates the account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the account has been closed.
    pub fn verify_email(&mut self) -> AppResult<()> {
        if self.status == Status::Closed {
            return Err(AppError::Validation(
                "a closed user account cannot be reactivated".to_owned(),
            ));
        }

        self.is_email_verified = true;
        if self.status == Status::Pending {
            self.status = Status::Active;
        }
        Ok(())
    }

    /// Suspends the account.
    pub fn suspend(&mut self) {
        self.status = Status::Suspended;
    }

    /// Closes the account for good.
    pub fn close(&mut self) {
        self.status = Status::Closed;
    }

    /// Checks that the user may log in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the email is unverified, and
    /// [`AppError::Forbidden`] when the account is suspended or closed.
    pub fn ensure_can_login(&self) -> AppResult<()> {
        if !self.is_email_verified {
            return Err(AppError::Validation("email not verified".to_owned()));
        }
        match self.status {
            Status::Suspended => Err(AppError::Forbidden(
                "user has been suspended".to_owned(),
            )),
            Status::Closed => Err(AppError::Forbidden(
                "user account has been closed".to_owned(),
            )),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for UserAccount {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} 🧑‍💻{}", self.email, self.status.symbol())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use flexup_core::UserId;

    use super::{EmailAddress, UserAccount, user_statuses};
    use crate::status::Status;

    fn email(value: &str) -> EmailAddress {
        EmailAddress::new(value).unwrap_or_else(|_| unreachable!())
    }

    fn registered() -> UserAccount {
        UserAccount::register(UserId::new(), email("Jo@Example.com"), Utc::now())
    }

    #[test]
    fn email_addresses_are_lowercased() {
        assert_eq!(email("Jo@Example.COM").as_str(), "jo@example.com");
    }

    #[test]
    fn malformed_email_addresses_are_rejected() {
        for candidate in ["", "no-at-sign.com", "@example.com", "jo@", "jo@nodot", "a b@x.com"] {
            assert!(
                EmailAddress::new(candidate).is_err(),
                "'{candidate}' should be rejected"
            );
        }
    }

    #[test]
    fn overlong_email_address_is_rejected() {
        let candidate = format!("{}@example.com", "a".repeat(250));
        assert!(EmailAddress::new(candidate).is_err());
    }

    #[test]
    fn new_users_start_pending_and_unverified() {
        let user = registered();
        assert_eq!(user.status(), Status::Pending);
        assert!(!user.is_email_verified());
        assert!(!user.is_active());
        assert!(user.ensure_can_login().is_err());
    }

    #[test]
    fn verification_activates_the_account() {
        let mut user = registered();
        assert!(user.verify_email().is_ok());
        assert_eq!(user.status(), Status::Active);
        assert!(user.is_active());
        assert!(user.ensure_can_login().is_ok());
    }

    #[test]
    fn suspended_and_closed_users_cannot_log_in() {
        let mut user = registered();
        let _ = user.verify_email();
        user.suspend();
        assert!(user.ensure_can_login().is_err());
        user.close();
        assert!(user.ensure_can_login().is_err());
    }

    #[test]
    fn closed_accounts_cannot_be_reverified() {
        let mut user = registered();
        user.close();
        assert!(user.verify_email().is_err());
    }

    #[test]
    fn user_statuses_match_the_generic_short_list() {
        let statuses = user_statuses();
        assert!(statuses.contains(Status::Pending));
        assert!(statuses.contains(Status::Active));
        assert!(!statuses.contains(Status::Draft));
    }

    #[test]
    fn display_shows_email_and_status_symbol() {
        let user = registered();
        assert_eq!(user.to_string(), "jo@example.com 🧑‍💻🕒");
    }
}
