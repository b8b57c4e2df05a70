//! Lifecycle statuses and the actions that move records between them.

use flexup_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::registry::{FlexEnum, PropertyValue, ShortList, members_of_table, undeclared_property};

/// Visual tone attached to a status for UI badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Positive outcome.
    Success,
    /// Neutral information.
    Info,
    /// Needs attention.
    Warning,
    /// Blocking or destructive state.
    Danger,
    /// Emphasised neutral state.
    Primary,
    /// De-emphasised state.
    Secondary,
}

impl Tone {
    /// Returns the lowercase tone name used by UI themes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Generic lifecycle status shared by every kind of business record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Status {
    New,
    Draft,
    Pending,
    Rejected,
    Retracted,
    Signed,
    Confirmed,
    NotStarted,
    InProgress,
    Paused,
    Completed,
    Claims,
    Accepted,
    PendingDueDate,
    PendingAmount,
    NoDueDate,
    Upcoming,
    Overdue,
    Scheduled,
    Active,
    Cancelled,
    Closed,
    Converted,
    Deleted,
    Expired,
    Frozen,
    Paid,
    Payable,
    Resolved,
    Suspended,
    Terminated,
}

struct StatusRow {
    member: Status,
    code: &'static str,
    label: &'static str,
    symbol: &'static str,
    tone: Tone,
    description: &'static str,
}

#[rustfmt::skip]
const STATUS_TABLE: &[StatusRow] = &[
    StatusRow { member: Status::New,            code: "NW", label: "New",              symbol: "🆕",   tone: Tone::Info,      description: "same as draft but never sent; can still be deleted" },
    StatusRow { member: Status::Draft,          code: "DR", label: "Draft",            symbol: "📄",   tone: Tone::Secondary, description: "not yet confirmed or signed" },
    StatusRow { member: Status::Pending,        code: "PE", label: "Pending",          symbol: "🕒",   tone: Tone::Warning,   description: "sent but not yet confirmed" },
    StatusRow { member: Status::Rejected,       code: "RJ", label: "Rejected",         symbol: "🚫",   tone: Tone::Info,      description: "rejected by the counterparty" },
    StatusRow { member: Status::Retracted,      code: "RT", label: "Retracted",        symbol: "🔙",   tone: Tone::Info,      description: "retracted by the sender" },
    StatusRow { member: Status::Signed,         code: "SI", label: "Signed",           symbol: "🖊️",   tone: Tone::Success,   description: "contract has been signed" },
    StatusRow { member: Status::Confirmed,      code: "CF", label: "Confirmed",        symbol: "🔵",   tone: Tone::Success,   description: "order has been confirmed" },
    StatusRow { member: Status::NotStarted,     code: "NS", label: "Not started",      symbol: "🔨",   tone: Tone::Info,      description: "delivery has not yet started" },
    StatusRow { member: Status::InProgress,     code: "IP", label: "In progress",      symbol: "🚚",   tone: Tone::Success,   description: "delivery is ongoing" },
    StatusRow { member: Status::Paused,         code: "PS", label: "Paused",           symbol: "⏸️",   tone: Tone::Primary,   description: "delivery paused jointly by all parties" },
    StatusRow { member: Status::Completed,      code: "CP", label: "Completed",        symbol: "✅",   tone: Tone::Warning,   description: "delivery has been completed" },
    StatusRow { member: Status::Claims,         code: "CA", label: "Claims",           symbol: "❗",   tone: Tone::Warning,   description: "claims raised by the client after delivery" },
    StatusRow { member: Status::Accepted,       code: "AP", label: "Accepted",         symbol: "👍",   tone: Tone::Success,   description: "delivery has been accepted" },
    StatusRow { member: Status::PendingDueDate, code: "PU", label: "Pending due date", symbol: "🕘📆", tone: Tone::Warning,   description: "waiting for a due date to be set" },
    StatusRow { member: Status::PendingAmount,  code: "PA", label: "Pending amount",   symbol: "🕘💸", tone: Tone::Warning,   description: "waiting for an amount to be set" },
    StatusRow { member: Status::NoDueDate,      code: "ND", label: "No due date",      symbol: "⌛",   tone: Tone::Info,      description: "no due date has been agreed" },
    StatusRow { member: Status::Upcoming,       code: "UP", label: "Upcoming",         symbol: "🔜",   tone: Tone::Info,      description: "due date lies in the future" },
    StatusRow { member: Status::Overdue,        code: "OD", label: "Overdue",          symbol: "🚨",   tone: Tone::Danger,    description: "due date has passed without settlement" },
    StatusRow { member: Status::Scheduled,      code: "SC", label: "Scheduled",        symbol: "📅",   tone: Tone::Info,      description: "scheduled for a future date" },
    StatusRow { member: Status::Active,         code: "AC", label: "Active",           symbol: "🟢",   tone: Tone::Success,   description: "record is active" },
    StatusRow { member: Status::Cancelled,      code: "CN", label: "Cancelled",        symbol: "❌",   tone: Tone::Secondary, description: "cancelled by the parties" },
    StatusRow { member: Status::Closed,         code: "CL", label: "Closed",           symbol: "🛑",   tone: Tone::Secondary, description: "was active but closed by the user" },
    StatusRow { member: Status::Converted,      code: "CV", label: "Converted",        symbol: "🔄",   tone: Tone::Success,   description: "commitment has been converted into tokens" },
    StatusRow { member: Status::Deleted,        code: "DE", label: "Deleted",          symbol: "🗑️",   tone: Tone::Danger,    description: "record was deleted before being sent" },
    StatusRow { member: Status::Expired,        code: "EX", label: "Expired",          symbol: "⌛",   tone: Tone::Secondary, description: "validity period has ended" },
    StatusRow { member: Status::Frozen,         code: "FZ", label: "Frozen",           symbol: "❄️",   tone: Tone::Info,      description: "items and tranches are frozen while the order status forbids changes" },
    StatusRow { member: Status::Paid,           code: "PD", label: "Paid",             symbol: "💵",   tone: Tone::Success,   description: "payment has been made" },
    StatusRow { member: Status::Payable,        code: "PY", label: "Payable",          symbol: "💰",   tone: Tone::Info,      description: "resolution computed a payable amount" },
    StatusRow { member: Status::Resolved,       code: "RS", label: "Resolved",         symbol: "✔️",   tone: Tone::Success,   description: "resolution computed a payable amount of zero" },
    StatusRow { member: Status::Suspended,      code: "SP", label: "Suspended",        symbol: "⛔",   tone: Tone::Danger,    description: "record has been suspended" },
    StatusRow { member: Status::Terminated,     code: "TM", label: "Terminated",       symbol: "✖️",   tone: Tone::Secondary, description: "contract has been terminated" },
];

members_of_table!(STATUS_MEMBERS, Status, STATUS_TABLE, Status::New);

impl Status {
    fn row(self) -> &'static StatusRow {
        &STATUS_TABLE[self as usize]
    }

    /// Returns the badge symbol of this status.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        self.row().symbol
    }

    /// Returns the UI tone of this status.
    #[must_use]
    pub fn tone(self) -> Tone {
        self.row().tone
    }

    /// Returns the long description of this status.
    #[must_use]
    pub fn description(self) -> &'static str {
        self.row().description
    }

    /// Returns the default short-list of statuses for generic records.
    #[must_use]
    pub fn short_list() -> ShortList<Self> {
        ShortList::new([Self::Pending, Self::Active, Self::Closed, Self::Suspended])
    }
}

impl FlexEnum for Status {
    fn members() -> &'static [Self] {
        &STATUS_MEMBERS
    }

    fn code(self) -> &'static str {
        self.row().code
    }

    fn label(self) -> &'static str {
        self.row().label
    }

    fn property_names() -> &'static [&'static str] {
        &["label", "symbol", "tone", "description"]
    }

    fn property(self, name: &str) -> AppResult<Option<PropertyValue>> {
        let row = self.row();
        match name {
            "label" => Ok(Some(PropertyValue::text(row.label))),
            "symbol" => Ok(Some(PropertyValue::text(row.symbol))),
            "tone" => Ok(Some(PropertyValue::text(row.tone.as_str()))),
            "description" => Ok(Some(PropertyValue::text(row.description))),
            _ => Err(undeclared_property::<Self>(name)),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.label())
    }
}

/// Action a party or the system applies to a record's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum StatusAction {
    Delete,
    Send,
    Retract,
    Reject,
    Modify,
    Sign,
    Confirm,
    Cancel,
    Start,
    Pause,
    Resume,
    Complete,
    Claim,
    Accept,
    Terminate,
}

struct StatusActionRow {
    member: StatusAction,
    code: &'static str,
    label: &'static str,
}

#[rustfmt::skip]
const STATUS_ACTION_TABLE: &[StatusActionRow] = &[
    // Delete hides the record from users instead of removing the row.
    StatusActionRow { member: StatusAction::Delete,    code: "DE", label: "Delete" },
    StatusActionRow { member: StatusAction::Send,      code: "SD", label: "Send" },
    StatusActionRow { member: StatusAction::Retract,   code: "RT", label: "Retract" },
    StatusActionRow { member: StatusAction::Reject,    code: "RJ", label: "Reject" },
    StatusActionRow { member: StatusAction::Modify,    code: "MD", label: "Modify" },
    StatusActionRow { member: StatusAction::Sign,      code: "SG", label: "Sign" },
    StatusActionRow { member: StatusAction::Confirm,   code: "CO", label: "Confirm" },
    StatusActionRow { member: StatusAction::Cancel,    code: "CX", label: "Cancel" },
    StatusActionRow { member: StatusAction::Start,     code: "ST", label: "Start" },
    StatusActionRow { member: StatusAction::Pause,     code: "PS", label: "Pause" },
    StatusActionRow { member: StatusAction::Resume,    code: "RE", label: "Resume" },
    StatusActionRow { member: StatusAction::Complete,  code: "CP", label: "Complete" },
    StatusActionRow { member: StatusAction::Claim,     code: "CL", label: "Claim" },
    StatusActionRow { member: StatusAction::Accept,    code: "AC", label: "Accept" },
    StatusActionRow { member: StatusAction::Terminate, code: "TR", label: "Terminate" },
];

members_of_table!(
    STATUS_ACTION_MEMBERS,
    StatusAction,
    STATUS_ACTION_TABLE,
    StatusAction::Delete
);

impl StatusAction {
    fn row(self) -> &'static StatusActionRow {
        &STATUS_ACTION_TABLE[self as usize]
    }
}

impl FlexEnum for StatusAction {
    fn members() -> &'static [Self] {
        &STATUS_ACTION_MEMBERS
    }

    fn code(self) -> &'static str {
        self.row().code
    }

    fn label(self) -> &'static str {
        self.row().label
    }

    fn property_names() -> &'static [&'static str] {
        &["label"]
    }

    fn property(self, name: &str) -> AppResult<Option<PropertyValue>> {
        match name {
            "label" => Ok(Some(PropertyValue::text(self.row().label))),
            _ => Err(undeclared_property::<Self>(name)),
        }
    }
}

impl std::fmt::Display for StatusAction {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.label())
    }
}

/// How a status action takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionMode {
    /// One party acts alone; the action applies immediately.
    Unilateral,
    /// All parties must agree before the action applies.
    Joint,
    /// The platform itself acts; the action applies immediately.
    System,
}

struct ActionModeRow {
    member: ActionMode,
    code: &'static str,
    label: &'static str,
    is_immediate: bool,
}

#[rustfmt::skip]
const ACTION_MODE_TABLE: &[ActionModeRow] = &[
    ActionModeRow { member: ActionMode::Unilateral, code: "U", label: "Unilateral", is_immediate: true },
    ActionModeRow { member: ActionMode::Joint,      code: "J", label: "Joint",      is_immediate: false },
    ActionModeRow { member: ActionMode::System,     code: "S", label: "System",     is_immediate: true },
];

members_of_table!(
    ACTION_MODE_MEMBERS,
    ActionMode,
    ACTION_MODE_TABLE,
    ActionMode::Unilateral
);

impl ActionMode {
    fn row(self) -> &'static ActionModeRow {
        &ACTION_MODE_TABLE[self as usize]
    }

    /// Returns whether the action applies without waiting for agreement.
    #[must_use]
    pub fn is_immediate(self) -> bool {
        self.row().is_immediate
    }
}

impl FlexEnum for ActionMode {
    fn members() -> &'static [Self] {
        &ACTION_MODE_MEMBERS
    }

    fn code(self) -> &'static str {
        self.row().code
    }

    fn label(self) -> &'static str {
        self.row().label
    }

    fn property_names() -> &'static [&'static str] {
        &["label", "is_immediate"]
    }

    fn property(self, name: &str) -> AppResult<Option<PropertyValue>> {
        let row = self.row();
        match name {
            "label" => Ok(Some(PropertyValue::text(row.label))),
            "is_immediate" => Ok(Some(PropertyValue::boolean(row.is_immediate))),
            _ => Err(undeclared_property::<Self>(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionMode, Status, StatusAction};
    use crate::registry::{FlexEnum, PropertyValue};

    #[test]
    fn status_table_rows_follow_declaration_order() {
        for (index, member) in Status::members().iter().enumerate() {
            assert_eq!(*member as usize, index, "row out of order: {member:?}");
        }
        for (index, member) in StatusAction::members().iter().enumerate() {
            assert_eq!(*member as usize, index);
        }
        for (index, member) in ActionMode::members().iter().enumerate() {
            assert_eq!(*member as usize, index);
        }
    }

    #[test]
    fn status_codes_are_unique() {
        let mut codes: Vec<&str> = Status::members().iter().map(|s| s.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Status::members().len());
    }

    #[test]
    fn status_exposes_all_declared_properties() {
        for member in Status::members().iter().copied() {
            for name in Status::property_names() {
                let value = member.property(name);
                assert!(value.is_ok(), "property {name} failed for {member:?}");
            }
        }
    }

    #[test]
    fn status_tone_is_reachable_by_name() {
        let tone = Status::Overdue.property("tone");
        assert_eq!(tone.ok().flatten(), Some(PropertyValue::text("danger")));
    }

    #[test]
    fn default_short_list_keeps_declared_order() {
        let list = Status::short_list();
        assert_eq!(
            list.members(),
            &[
                Status::Pending,
                Status::Active,
                Status::Closed,
                Status::Suspended
            ]
        );
    }

    #[test]
    fn action_mode_immediacy_matches_table() {
        assert!(ActionMode::Unilateral.is_immediate());
        assert!(!ActionMode::Joint.is_immediate());
        assert!(ActionMode::System.is_immediate());
    }

    #[test]
    fn status_displays_as_label() {
        assert_eq!(Status::InProgress.to_string(), "In progress");
        assert_eq!(StatusAction::Confirm.to_string(), "Confirm");
    }
}
