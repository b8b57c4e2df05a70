//! Field-level change log built from record snapshots.

use chrono::{DateTime, Utc};
use flexup_core::{AccountId, RecordId};
use serde::{Deserialize, Serialize};

use crate::business_domain::BusinessDomain;
use crate::diff;

/// Texts longer than this many words are logged as highlighted diffs instead
/// of full values.
const DIFF_ABOVE_WORDS: usize = 10;

const PREVIEW_CHARS: usize = 50;

/// One changed field inside a change entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    field_name: String,
    old_value: Option<String>,
    new_value: Option<String>,
}

impl FieldChange {
    /// Returns the name of the changed field.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Returns the value before the change.
    #[must_use]
    pub fn old_value(&self) -> Option<&str> {
        self.old_value.as_deref()
    }

    /// Returns the value after the change.
    #[must_use]
    pub fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }
}

fn preview(value: Option<&str>) -> String {
    match value {
        None => String::new(),
        Some(value) if value.chars().count() > PREVIEW_CHARS => {
            let truncated: String = value.chars().take(PREVIEW_CHARS).collect();
            format!("{truncated}...")
        }
        Some(value) => value.to_owned(),
    }
}

impl std::fmt::Display for FieldChange {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}: {} → {}",
            self.field_name,
            preview(self.old_value()),
            preview(self.new_value())
        )
    }
}

/// All field changes one save applied to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEntry {
    id: RecordId,
    domain: BusinessDomain,
    record_id: RecordId,
    changed_by: Option<AccountId>,
    changed_at: DateTime<Utc>,
    changes: Vec<FieldChange>,
}

impl ChangeEntry {
    /// Builds a change entry by comparing two field snapshots.
    ///
    /// Fields present in the old snapshot are compared against the new one by
    /// name. Long text values are stored as word-level diffs so the log stays
    /// readable.
    #[must_use]
    pub fn from_snapshots(
        id: RecordId,
        domain: BusinessDomain,
        record_id: RecordId,
        changed_by: Option<AccountId>,
        changed_at: DateTime<Utc>,
        old_snapshot: &[(&'static str, Option<String>)],
        new_snapshot: &[(&'static str, Option<String>)],
    ) -> Self {
        let mut changes = Vec::new();
        for (field_name, old_value) in old_snapshot {
            let new_value = new_snapshot
                .iter()
                .find(|(name, _)| name == field_name)
                .and_then(|(_, value)| value.clone());
            if *old_value == new_value {
                continue;
            }

            let change = match (old_value, &new_value) {
                (Some(old), Some(new))
                    if old.split_whitespace().count() > DIFF_ABOVE_WORDS =>
                {
                    let (old_diff, new_diff) = diff::render_separate(old, new);
                    FieldChange {
                        field_name: (*field_name).to_owned(),
                        old_value: Some(old_diff),
                        new_value: Some(new_diff),
                    }
                }
                _ => FieldChange {
                    field_name: (*field_name).to_owned(),
                    old_value: old_value.clone(),
                    new_value,
                },
            };
            changes.push(change);
        }

        Self {
            id,
            domain,
            record_id,
            changed_by,
            changed_at,
            changes,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the domain of the changed record.
    #[must_use]
    pub fn domain(&self) -> BusinessDomain {
        self.domain
    }

    /// Returns the changed record.
    #[must_use]
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// Returns the account that made the change, `None` for system changes.
    #[must_use]
    pub fn changed_by(&self) -> Option<AccountId> {
        self.changed_by
    }

    /// Returns when the change happened.
    #[must_use]
    pub fn changed_at(&self) -> DateTime<Utc> {
        self.changed_at
    }

    /// Returns the individual field changes.
    #[must_use]
    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    /// Returns whether the snapshots were identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl std::fmt::Display for ChangeEntry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let by = match self.changed_by {
            Some(account_id) => account_id.to_string(),
            None => "System".to_owned(),
        };
        write!(
            formatter,
            "{} by {by}: {} {} ({} change(s))",
            self.changed_at.format("%Y-%m-%d"),
            self.domain,
            self.record_id,
            self.changes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use flexup_core::RecordId;

    use super::ChangeEntry;
    use crate::business_domain::BusinessDomain;

    fn snapshot(pairs: &[(&'static str, Option<&str>)]) -> Vec<(&'static str, Option<String>)> {
        pairs
            .iter()
            .map(|(name, value)| (*name, value.map(str::to_owned)))
            .collect()
    }

    fn entry_from(
        old: &[(&'static str, Option<String>)],
        new: &[(&'static str, Option<String>)],
    ) -> ChangeEntry {
        ChangeEntry::from_snapshots(
            RecordId::new(),
            BusinessDomain::Product,
            RecordId::new(),
            None,
            Utc::now(),
            old,
            new,
        )
    }

    #[test]
    fn identical_snapshots_produce_an_empty_entry() {
        let fields = snapshot(&[("name", Some("Widget")), ("status", Some("AC"))]);
        let entry = entry_from(&fields, &fields);
        assert!(entry.is_empty());
    }

    #[test]
    fn changed_fields_are_recorded_with_both_values() {
        let old = snapshot(&[("name", Some("Widget")), ("status", Some("DR"))]);
        let new = snapshot(&[("name", Some("Widget")), ("status", Some("AC"))]);
        let entry = entry_from(&old, &new);
        assert_eq!(entry.changes().len(), 1);
        let change = &entry.changes()[0];
        assert_eq!(change.field_name(), "status");
        assert_eq!(change.old_value(), Some("DR"));
        assert_eq!(change.new_value(), Some("AC"));
    }

    #[test]
    fn cleared_fields_are_recorded_as_none() {
        let old = snapshot(&[("description", Some("short text"))]);
        let new = snapshot(&[("description", None)]);
        let entry = entry_from(&old, &new);
        assert_eq!(entry.changes().len(), 1);
        assert_eq!(entry.changes()[0].new_value(), None);
    }

    #[test]
    fn long_texts_are_stored_as_diffs() {
        let old_text = "one two three four five six seven eight nine ten eleven twelve";
        let new_text = "one two three four five six seven eight nine ten eleven CHANGED";
        let old = snapshot(&[("description", Some(old_text))]);
        let new = snapshot(&[("description", Some(new_text))]);
        let entry = entry_from(&old, &new);
        let change = &entry.changes()[0];
        assert!(change.old_value().is_some_and(|value| value.contains("~~twelve~~")));
        assert!(change.new_value().is_some_and(|value| value.contains("**CHANGED**")));
    }

    #[test]
    fn short_texts_are_stored_verbatim() {
        let old = snapshot(&[("description", Some("short old text"))]);
        let new = snapshot(&[("description", Some("short new text"))]);
        let entry = entry_from(&old, &new);
        let change = &entry.changes()[0];
        assert_eq!(change.old_value(), Some("short old text"));
        assert_eq!(change.new_value(), Some("short new text"));
    }

    #[test]
    fn field_change_preview_truncates_long_values() {
        let long_value = "x".repeat(80);
        let old = snapshot(&[("description", Some(long_value.as_str()))]);
        let new = snapshot(&[("description", Some("short"))]);
        let entry = entry_from(&old, &new);
        let rendered = entry.changes()[0].to_string();
        assert!(rendered.contains("..."));
        assert!(rendered.len() < 80);
    }
}
