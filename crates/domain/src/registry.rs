use flexup_core::{AppError, AppResult};
use serde::Serialize;

/// Dynamic value of a member property.
///
/// Enum tables keep their metadata in typed columns; this is the tagged
/// representation handed out by name-based lookups. A missing (null) property
/// is modelled as `Option::None` at the call site, not as a variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// UTF-8 text value.
    Text(String),
    /// Signed integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
}

impl PropertyValue {
    /// Creates a text property value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates an integer property value.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::Integer(value)
    }

    /// Creates a floating point property value.
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::Float(value)
    }

    /// Creates a boolean property value.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A `(code, label)` pair offered to form and UI rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// Stable short code stored in the database.
    pub code: &'static str,
    /// Human-readable label shown to the user.
    pub label: &'static str,
}

/// An enumerated domain type backed by an immutable metadata table.
///
/// Every implementor declares its members once, in a fixed order, together
/// with a fixed set of named properties shared by all members. Members are
/// defined at process start and never created or destroyed at runtime.
pub trait FlexEnum: Copy + Eq + 'static {
    /// Returns every member in declaration order.
    fn members() -> &'static [Self];

    /// Returns the stable short code identifying this member in storage.
    fn code(self) -> &'static str;

    /// Returns the human-readable label of this member.
    fn label(self) -> &'static str;

    /// Returns the ordered property set declared for this enum type.
    fn property_names() -> &'static [&'static str];

    /// Returns the named property of this member, `None` when the value is
    /// null for this member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] when `name` is not part of the
    /// declared property set.
    fn property(self, name: &str) -> AppResult<Option<PropertyValue>>;

    /// Looks up a member by its stable code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no member carries the code.
    fn from_code(code: &str) -> AppResult<Self> {
        Self::members()
            .iter()
            .copied()
            .find(|member| member.code() == code)
            .ok_or_else(|| AppError::NotFound(format!("no enum member with code '{code}'")))
    }

    /// Returns the `(code, label)` pair for this member.
    fn choice(self) -> Choice {
        Choice {
            code: self.code(),
            label: self.label(),
        }
    }
}

/// Builds the error for a property name outside the declared set.
pub(crate) fn undeclared_property<E: FlexEnum>(name: &str) -> AppError {
    AppError::InvalidArgument(format!(
        "unknown property '{}'; declared properties are [{}]",
        name,
        E::property_names().join(", ")
    ))
}

/// An ordered subset of one enum type's members.
///
/// Short-lists restrict the valid choices for a field in a particular context
/// (e.g. the statuses a product may take). They are derived from the enum
/// table and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortList<E: FlexEnum> {
    members: Vec<E>,
}

impl<E: FlexEnum> ShortList<E> {
    /// Creates a short-list, dropping duplicates while preserving the order
    /// of first occurrence.
    pub fn new(members: impl IntoIterator<Item = E>) -> Self {
        let mut deduplicated: Vec<E> = Vec::new();
        for member in members {
            if !deduplicated.contains(&member) {
                deduplicated.push(member);
            }
        }

        Self {
            members: deduplicated,
        }
    }

    /// Returns the members in short-list order.
    #[must_use]
    pub fn members(&self) -> &[E] {
        &self.members
    }

    /// Returns whether the member belongs to the short-list.
    #[must_use]
    pub fn contains(&self, member: E) -> bool {
        self.members.contains(&member)
    }

    /// Returns whether some short-list member carries the code.
    #[must_use]
    pub fn contains_code(&self, code: &str) -> bool {
        self.members.iter().any(|member| member.code() == code)
    }

    /// Returns the `(code, label)` pairs in short-list order.
    #[must_use]
    pub fn choices(&self) -> Vec<Choice> {
        self.members.iter().map(|member| member.choice()).collect()
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the short-list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Derives the declaration-ordered member array from a metadata table.
macro_rules! members_of_table {
    ($members:ident, $ty:ty, $table:ident, $seed:expr) => {
        const $members: [$ty; $table.len()] = {
            let mut members = [$seed; $table.len()];
            let mut index = 0;
            while index < $table.len() {
                members[index] = $table[index].member;
                index += 1;
            }
            members
        };
    };
}

pub(crate) use members_of_table;

#[cfg(test)]
mod tests {
    use super::{FlexEnum, ShortList};
    use crate::status::Status;

    #[test]
    fn from_code_resolves_declared_member() {
        let member = Status::from_code("DR");
        assert!(member.is_ok());
        assert_eq!(member.unwrap_or(Status::New), Status::Draft);
    }

    #[test]
    fn from_code_rejects_unknown_code() {
        assert!(Status::from_code("??").is_err());
    }

    #[test]
    fn property_outside_declared_set_is_rejected() {
        assert!(Status::Draft.property("rank").is_err());
    }

    #[test]
    fn short_list_deduplicates_preserving_order() {
        let list = ShortList::new([Status::Active, Status::Draft, Status::Active]);
        assert_eq!(list.members(), &[Status::Active, Status::Draft]);
        assert!(list.contains(Status::Draft));
        assert!(!list.contains(Status::Closed));
    }

    #[test]
    fn short_list_choices_follow_list_order() {
        let list = ShortList::new([Status::Closed, Status::Active]);
        let choices = list.choices();
        assert_eq!(choices[0].code, "CL");
        assert_eq!(choices[1].code, "AC");
    }
}
