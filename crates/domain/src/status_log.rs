//! Append-only log of status changes and lifecycle actions.

use chrono::{DateTime, Utc};
use flexup_core::{AccountId, AppError, AppResult, RecordId};
use serde::{Deserialize, Serialize};

use crate::business_domain::BusinessDomain;
use crate::registry::FlexEnum;
use crate::status::{Status, StatusAction};

/// One recorded status change of a business record.
///
/// Entries are immutable once created: the type exposes no mutators and
/// repositories only ever append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusLogEntry {
    id: RecordId,
    domain: BusinessDomain,
    record_id: RecordId,
    action: Option<StatusAction>,
    initial_status: Option<Status>,
    new_status: Option<Status>,
    recorded_by: Option<AccountId>,
    by_system: bool,
    recorded_at: DateTime<Utc>,
}

impl StatusLogEntry {
    /// Creates a status log entry.
    ///
    /// The action is absent for pure system status changes, the initial
    /// status is absent for the first status a record takes, and the new
    /// status is absent while a joint action awaits agreement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when neither an acting account nor
    /// the system flag is given.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RecordId,
        domain: BusinessDomain,
        record_id: RecordId,
        action: Option<StatusAction>,
        initial_status: Option<Status>,
        new_status: Option<Status>,
        recorded_by: Option<AccountId>,
        by_system: bool,
        recorded_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if recorded_by.is_none() && !by_system {
            return Err(AppError::Validation(
                "either an acting account or the system flag is required".to_owned(),
            ));
        }

        Ok(Self {
            id,
            domain,
            record_id,
            action,
            initial_status,
            new_status,
            recorded_by,
            by_system,
            recorded_at,
        })
    }

    /// Returns the entry identifier.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the domain of the record the entry belongs to.
    #[must_use]
    pub fn domain(&self) -> BusinessDomain {
        self.domain
    }

    /// Returns the record the entry belongs to.
    #[must_use]
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// Returns the lifecycle action, `None` for system status changes.
    #[must_use]
    pub fn action(&self) -> Option<StatusAction> {
        self.action
    }

    /// Returns the status before the change.
    #[must_use]
    pub fn initial_status(&self) -> Option<Status> {
        self.initial_status
    }

    /// Returns the status after the change.
    #[must_use]
    pub fn new_status(&self) -> Option<Status> {
        self.new_status
    }

    /// Returns the account that acted, `None` for system actions.
    #[must_use]
    pub fn recorded_by(&self) -> Option<AccountId> {
        self.recorded_by
    }

    /// Returns whether the platform itself recorded the change.
    #[must_use]
    pub fn by_system(&self) -> bool {
        self.by_system
    }

    /// Returns when the change was recorded.
    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    fn status_with_symbol(status: Option<Status>, missing: &str) -> String {
        match status {
            Some(status) => format!("{} {}", status.label(), status.symbol()),
            None => missing.to_owned(),
        }
    }
}

impl std::fmt::Display for StatusLogEntry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self.action {
            Some(action) => action.label().to_owned(),
            None => "(system)".to_owned(),
        };
        let by = match self.recorded_by {
            Some(account_id) => account_id.to_string(),
            None => "System".to_owned(),
        };
        write!(
            formatter,
            "{}: {action}, {} -> {}, by {by}",
            self.recorded_at.date_naive(),
            Self::status_with_symbol(self.initial_status, "(none)"),
            Self::status_with_symbol(self.new_status, "(no new status)"),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use flexup_core::{AccountId, RecordId};

    use super::StatusLogEntry;
    use crate::business_domain::BusinessDomain;
    use crate::status::{Status, StatusAction};

    #[test]
    fn an_actor_or_the_system_flag_is_required() {
        let result = StatusLogEntry::new(
            RecordId::new(),
            BusinessDomain::Order,
            RecordId::new(),
            Some(StatusAction::Send),
            Some(Status::Draft),
            Some(Status::Pending),
            None,
            false,
            Utc::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn an_actor_may_act_on_behalf_of_the_system() {
        let result = StatusLogEntry::new(
            RecordId::new(),
            BusinessDomain::Order,
            RecordId::new(),
            Some(StatusAction::Cancel),
            Some(Status::Active),
            Some(Status::Cancelled),
            Some(AccountId::new()),
            true,
            Utc::now(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn system_entries_need_no_actor() {
        let result = StatusLogEntry::new(
            RecordId::new(),
            BusinessDomain::Order,
            RecordId::new(),
            None,
            Some(Status::Upcoming),
            Some(Status::Overdue),
            None,
            true,
            Utc::now(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn summary_shows_statuses_with_symbols() {
        let recorded_at = Utc
            .with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .unwrap_or_else(|| unreachable!());
        let entry = StatusLogEntry::new(
            RecordId::new(),
            BusinessDomain::Order,
            RecordId::new(),
            Some(StatusAction::Confirm),
            Some(Status::Pending),
            Some(Status::Confirmed),
            None,
            true,
            recorded_at,
        );
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => unreachable!(),
        };
        assert_eq!(
            entry.to_string(),
            "2025-03-14: Confirm, Pending 🕒 -> Confirmed 🔵, by System"
        );
    }

    #[test]
    fn joint_requests_may_lack_a_new_status() {
        let entry = StatusLogEntry::new(
            RecordId::new(),
            BusinessDomain::Contract,
            RecordId::new(),
            Some(StatusAction::Pause),
            Some(Status::InProgress),
            None,
            Some(AccountId::new()),
            false,
            Utc::now(),
        );
        assert!(entry.is_ok());
        let entry = entry.unwrap_or_else(|_| unreachable!());
        assert!(entry.to_string().contains("(no new status)"));
    }
}
