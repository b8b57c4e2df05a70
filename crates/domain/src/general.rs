//! Cross-cutting presentation enums: visibility, focus and content origin.

use flexup_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::registry::{FlexEnum, PropertyValue, members_of_table, undeclared_property};

/// Who can discover a record in the public directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Found only by typing the exact account code.
    Private,
    /// Listed in the public directory.
    Public,
    /// Offline record, visible only inside the account that created it.
    Local,
}

struct VisibilityRow {
    member: Visibility,
    code: &'static str,
    label: &'static str,
    symbol: &'static str,
}

#[rustfmt::skip]
const VISIBILITY_TABLE: &[VisibilityRow] = &[
    VisibilityRow { member: Visibility::Private, code: "R", label: "Private", symbol: "🔒" },
    VisibilityRow { member: Visibility::Public,  code: "B", label: "Public",  symbol: "🌍" },
    VisibilityRow { member: Visibility::Local,   code: "L", label: "Local",   symbol: "📍" },
];

members_of_table!(
    VISIBILITY_MEMBERS,
    Visibility,
    VISIBILITY_TABLE,
    Visibility::Private
);

impl Visibility {
    fn row(self) -> &'static VisibilityRow {
        &VISIBILITY_TABLE[self as usize]
    }

    /// Returns the badge symbol of this visibility.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        self.row().symbol
    }
}

impl FlexEnum for Visibility {
    fn members() -> &'static [Self] {
        &VISIBILITY_MEMBERS
    }

    fn code(self) -> &'static str {
        self.row().code
    }

    fn label(self) -> &'static str {
        self.row().label
    }

    fn property_names() -> &'static [&'static str] {
        &["label", "symbol"]
    }

    fn property(self, name: &str) -> AppResult<Option<PropertyValue>> {
        let row = self.row();
        match name {
            "label" => Ok(Some(PropertyValue::text(row.label))),
            "symbol" => Ok(Some(PropertyValue::text(row.symbol))),
            _ => Err(undeclared_property::<Self>(name)),
        }
    }
}

/// User-assigned prominence of a record in lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Focus {
    Normal,
    Starred,
    Archived,
}

struct FocusRow {
    member: Focus,
    code: &'static str,
    label: &'static str,
    symbol: Option<&'static str>,
    color: &'static str,
}

#[rustfmt::skip]
const FOCUS_TABLE: &[FocusRow] = &[
    FocusRow { member: Focus::Normal,   code: "N", label: "Normal",   symbol: None,       color: "#3a60b1" },
    FocusRow { member: Focus::Starred,  code: "S", label: "Starred",  symbol: Some("⭐"), color: "#f9c74f" },
    FocusRow { member: Focus::Archived, code: "A", label: "Archived", symbol: Some("📦"), color: "#9ec1c7" },
];

members_of_table!(FOCUS_MEMBERS, Focus, FOCUS_TABLE, Focus::Normal);

impl Focus {
    fn row(self) -> &'static FocusRow {
        &FOCUS_TABLE[self as usize]
    }

    /// Returns the badge symbol, `None` for the unmarked focus.
    #[must_use]
    pub fn symbol(self) -> Option<&'static str> {
        self.row().symbol
    }

    /// Returns the hex display colour of this focus.
    #[must_use]
    pub fn color(self) -> &'static str {
        self.row().color
    }
}

impl FlexEnum for Focus {
    fn members() -> &'static [Self] {
        &FOCUS_MEMBERS
    }

    fn code(self) -> &'static str {
        self.row().code
    }

    fn label(self) -> &'static str {
        self.row().label
    }

    fn property_names() -> &'static [&'static str] {
        &["label", "symbol", "color"]
    }

    fn property(self, name: &str) -> AppResult<Option<PropertyValue>> {
        let row = self.row();
        match name {
            "label" => Ok(Some(PropertyValue::text(row.label))),
            "symbol" => Ok(row.symbol.map(PropertyValue::text)),
            "color" => Ok(Some(PropertyValue::text(row.color))),
            _ => Err(undeclared_property::<Self>(name)),
        }
    }
}

/// Named group of focuses used to filter record lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum FocusGroup {
    Default,
    Normal,
    Starred,
    Archived,
    All,
}

struct FocusGroupRow {
    member: FocusGroup,
    code: &'static str,
    label: &'static str,
    focuses: &'static [Focus],
}

#[rustfmt::skip]
const FOCUS_GROUP_TABLE: &[FocusGroupRow] = &[
    FocusGroupRow { member: FocusGroup::Default,  code: "D", label: "Default",  focuses: &[Focus::Normal, Focus::Starred] },
    FocusGroupRow { member: FocusGroup::Normal,   code: "N", label: "Normal",   focuses: &[Focus::Normal] },
    FocusGroupRow { member: FocusGroup::Starred,  code: "S", label: "Starred",  focuses: &[Focus::Starred] },
    FocusGroupRow { member: FocusGroup::Archived, code: "A", label: "Archived", focuses: &[Focus::Archived] },
    FocusGroupRow { member: FocusGroup::All,      code: "L", label: "All",      focuses: &[Focus::Normal, Focus::Starred, Focus::Archived] },
];

members_of_table!(
    FOCUS_GROUP_MEMBERS,
    FocusGroup,
    FOCUS_GROUP_TABLE,
    FocusGroup::Default
);

impl FocusGroup {
    fn row(self) -> &'static FocusGroupRow {
        &FOCUS_GROUP_TABLE[self as usize]
    }

    /// Returns the focuses this group selects. List-typed, so it is exposed
    /// here rather than through the name-based property lookup.
    #[must_use]
    pub fn focuses(self) -> &'static [Focus] {
        self.row().focuses
    }

    /// Returns whether the group selects records carrying the focus.
    #[must_use]
    pub fn selects(self, focus: Focus) -> bool {
        self.focuses().contains(&focus)
    }
}

impl FlexEnum for FocusGroup {
    fn members() -> &'static [Self] {
        &FOCUS_GROUP_MEMBERS
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

/// Whether a record was authored by the platform or by its community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ContentOrigin {
    System,
    Community,
}

struct ContentOriginRow {
    member: ContentOrigin,
    code: &'static str,
    label: &'static str,
    symbol: Option<&'static str>,
}

#[rustfmt::skip]
const CONTENT_ORIGIN_TABLE: &[ContentOriginRow] = &[
    ContentOriginRow { member: ContentOrigin::System,    code: "S", label: "System",    symbol: Some("🛡️") },
    ContentOriginRow { member: ContentOrigin::Community, code: "C", label: "Community", symbol: None },
];

members_of_table!(
    CONTENT_ORIGIN_MEMBERS,
    ContentOrigin,
    CONTENT_ORIGIN_TABLE,
    ContentOrigin::System
);

impl ContentOrigin {
    fn row(self) -> &'static ContentOriginRow {
        &CONTENT_ORIGIN_TABLE[self as usize]
    }

    /// Returns the badge symbol, `None` for community content.
    #[must_use]
    pub fn symbol(self) -> Option<&'static str> {
        self.row().symbol
    }
}

impl FlexEnum for ContentOrigin {
    fn members() -> &'static [Self] {
        &CONTENT_ORIGIN_MEMBERS
    }

    fn code(self) -> &'static str {
        self.row().code
    }

    fn label(self) -> &'static str {
        self.row().label
    }

    fn property_names() -> &'static [&'static str] {
        &["label", "symbol"]
    }

    fn property(self, name: &str) -> AppResult<Option<PropertyValue>> {
        let row = self.row();
        match name {
            "label" => Ok(Some(PropertyValue::text(row.label))),
            "symbol" => Ok(row.symbol.map(PropertyValue::text)),
            _ => Err(undeclared_property::<Self>(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentOrigin, Focus, FocusGroup, Visibility};
    use crate::lookup::filter_choices;
    use crate::registry::FlexEnum;

    #[test]
    fn tables_follow_declaration_order() {
        for (index, member) in Visibility::members().iter().enumerate() {
            assert_eq!(*member as usize, index);
        }
        for (index, member) in Focus::members().iter().enumerate() {
            assert_eq!(*member as usize, index);
        }
        for (index, member) in FocusGroup::members().iter().enumerate() {
            assert_eq!(*member as usize, index);
        }
        for (index, member) in ContentOrigin::members().iter().enumerate() {
            assert_eq!(*member as usize, index);
        }
    }

    #[test]
    fn null_symbols_are_excluded_from_symbol_choices() {
        let with_symbol = filter_choices::<Focus>("symbol");
        assert!(with_symbol.is_ok());
        let codes: Vec<&str> = with_symbol
            .unwrap_or_default()
            .iter()
            .map(|choice| choice.code)
            .collect();
        assert_eq!(codes, vec!["S", "A"]);
    }

    #[test]
    fn focus_groups_select_their_focuses() {
        assert!(FocusGroup::Default.selects(Focus::Starred));
        assert!(!FocusGroup::Default.selects(Focus::Archived));
        assert_eq!(FocusGroup::All.focuses().len(), 3);
    }

    #[test]
    fn content_origin_codes_resolve() {
        let origin = ContentOrigin::from_code("C");
        assert_eq!(origin.ok(), Some(ContentOrigin::Community));
    }
}
