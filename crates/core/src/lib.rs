//! Shared primitives for all FlexUp crates.

#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Result type used across FlexUp crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid combination of call parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Caller is blocked by a permission rule.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID value.
            #[must_use]
            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifier of the account that owns a business record.
    AccountId
);

uuid_id!(
    /// Identifier of a platform user.
    UserId
);

uuid_id!(
    /// Identifier of a persisted business record.
    RecordId
);

#[cfg(test)]
mod tests {
    use super::{AccountId, NonEmptyString, RecordId};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("  \t ");
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_string_keeps_inner_value() {
        let value = NonEmptyString::new("Standard licence");
        assert!(value.is_ok());
        assert_eq!(
            value.unwrap_or_else(|_| unreachable!()).as_str(),
            "Standard licence"
        );
    }

    #[test]
    fn identifiers_format_as_uuid() {
        assert_eq!(AccountId::new().to_string().len(), 36);
        assert_eq!(RecordId::new().to_string().len(), 36);
    }
}
