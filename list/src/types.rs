//! Domain types for the shopping list.
//!
//! A list is an ordered collection of items (most recent first), a view
//! filter, and a readiness flag that flips once the persisted record has been
//! loaded.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use shopping_list_macros::Action;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque identifier of a list item
///
/// Stored as a plain string so records written by other front ends hydrate
/// unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps an existing identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Creation time of an item, kept as the text it was stored with
///
/// Records written elsewhere may use any ISO-8601 form; the text round-trips
/// unchanged. New timestamps use millisecond UTC, e.g.
/// `2025-01-01T00:00:00.000Z`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wraps stored timestamp text as-is
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the stored text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort parse of the stored text
    ///
    /// Accepts RFC 3339, a date-time without offset (read as UTC), and a
    /// bare date (midnight UTC). Returns `None` for anything else.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let text = self.0.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Some(parsed);
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc().fixed_offset());
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc().fixed_offset())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(time: DateTime<Utc>) -> Self {
        Self(time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single shopping-list entry
///
/// Serialized field names match the persisted record:
/// `id`, `text`, `completed`, `createdAt`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, fixed at creation
    pub id: ItemId,
    /// Trimmed, non-empty display text
    pub text: String,
    /// Whether the item has been picked up
    pub completed: bool,
    /// When the item was added
    pub created_at: Timestamp,
}

impl Item {
    /// Creates a new, uncompleted item
    #[must_use]
    pub fn new(id: ItemId, text: String, created_at: impl Into<Timestamp>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: created_at.into(),
        }
    }

    /// Flips the completion flag
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// View selector over the collection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every item
    #[default]
    All,
    /// Items not yet completed
    Active,
    /// Completed items only
    Completed,
}

impl Filter {
    /// All filters in display order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Returns true if `item` is visible under this filter
    #[must_use]
    pub const fn matches(self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::Active => !item.completed,
            Self::Completed => item.completed,
        }
    }

    /// The lowercase name used in records and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown filter name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown filter {0:?} (expected all, active or completed)")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// State of the shopping list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListState {
    /// Items, most recently added first
    pub items: Vec<Item>,
    /// Active view filter
    pub filter: Filter,
    /// True once the persisted record has been loaded (or given up on)
    pub ready: bool,
    /// Number of accepted mutations; orders persistence writes
    pub revision: u64,
}

impl ListState {
    /// Creates an empty state that has not been hydrated yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hydrated state holding `items`
    #[must_use]
    pub fn ready_with(items: Vec<Item>) -> Self {
        Self {
            items,
            ready: true,
            ..Self::default()
        }
    }

    /// Returns the number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an item by ID
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Returns a mutable item by ID
    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Checks if an item exists
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Items visible under the current filter, in collection order
    pub fn filtered(&self) -> impl Iterator<Item = &Item> + '_ {
        let filter = self.filter;
        self.items.iter().filter(move |item| filter.matches(item))
    }

    /// Owned copy of the items visible under the current filter
    #[must_use]
    pub fn filtered_items(&self) -> Vec<Item> {
        self.filtered().cloned().collect()
    }

    /// Number of items not yet completed
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    /// Number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }
}

/// Actions the list reducer understands
///
/// `#[mutation]` variants change the collection and are written to storage.
/// `#[lifecycle]` variants drive hydration. `SetFilter` only changes the view.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum ListAction {
    // ========== Lifecycle ==========
    /// Load the persisted record
    #[lifecycle]
    Hydrate,

    /// The persisted record was read (absent records hydrate as empty)
    #[lifecycle]
    Hydrated {
        /// Items read from storage
        items: Vec<Item>,
    },

    /// The persisted record could not be read or parsed
    #[lifecycle]
    HydrationFailed {
        /// Why loading failed
        reason: String,
    },

    // ========== Mutations ==========
    /// Add a new item at the top of the list
    #[mutation]
    AddItem {
        /// Raw text as entered
        text: String,
    },

    /// Flip an item's completion flag
    #[mutation]
    ToggleItem {
        /// Item to toggle
        id: ItemId,
    },

    /// Remove an item
    #[mutation]
    DeleteItem {
        /// Item to delete
        id: ItemId,
    },

    /// Replace an item's text
    #[mutation]
    UpdateItem {
        /// Item to edit
        id: ItemId,
        /// Raw replacement text
        text: String,
    },

    /// Remove every completed item
    #[mutation]
    ClearCompleted,

    // ========== View ==========
    /// Change the view filter
    SetFilter {
        /// New filter
        filter: Filter,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: &str, text: &str, completed: bool) -> Item {
        Item {
            id: ItemId::new(id),
            text: text.to_string(),
            completed,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap().into(),
        }
    }

    #[test]
    fn item_new_is_active() {
        let item = Item::new(ItemId::new("a"), "Milk".to_string(), Utc::now());
        assert!(!item.completed);
        assert_eq!(item.text, "Milk");
    }

    #[test]
    fn item_toggle_is_self_inverse() {
        let mut item = item("a", "Milk", false);
        item.toggle();
        assert!(item.completed);
        item.toggle();
        assert!(!item.completed);
    }

    #[test]
    fn item_serializes_with_record_field_names() {
        let json = serde_json::to_value(item("lq3x9k2abc", "Eggs", true)).unwrap();
        assert_eq!(json["id"], "lq3x9k2abc");
        assert_eq!(json["text"], "Eggs");
        assert_eq!(json["completed"], true);
        assert_eq!(json["createdAt"], "2025-01-01T00:00:00.000Z");
    }

    #[test]
    fn item_parses_javascript_iso_timestamps() {
        let parsed: Item = serde_json::from_str(
            r#"{"id":"x","text":"Bread","completed":false,"createdAt":"2024-05-01T10:15:30.123Z"}"#,
        )
        .unwrap();
        assert_eq!(parsed.text, "Bread");
        assert_eq!(parsed.created_at.as_str(), "2024-05-01T10:15:30.123Z");
        assert_eq!(
            parsed.created_at.to_datetime().unwrap().timestamp_subsec_millis(),
            123
        );
    }

    #[test]
    fn timestamp_text_survives_round_trip() {
        for text in [
            "2024-05-01",
            "2024-05-01T10:15:30",
            "2024-05-01T10:15:30.123+02:00",
            "last tuesday",
        ] {
            let json = format!(r#"{{"id":"x","text":"Bread","completed":false,"createdAt":"{text}"}}"#);
            let parsed: Item = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.created_at.as_str(), text);

            let written = serde_json::to_value(&parsed).unwrap();
            assert_eq!(written["createdAt"], text);
        }
    }

    #[test]
    fn timestamp_parses_leniently() {
        let midnight = Timestamp::new("2024-05-01").to_datetime().unwrap();
        assert_eq!(midnight.to_rfc3339(), "2024-05-01T00:00:00+00:00");

        let naive = Timestamp::new("2024-05-01T10:15:30").to_datetime().unwrap();
        assert_eq!(naive.to_rfc3339(), "2024-05-01T10:15:30+00:00");

        let offset = Timestamp::new("2024-05-01T10:15:30+02:00").to_datetime().unwrap();
        assert_eq!(offset.offset().local_minus_utc(), 2 * 3600);

        assert!(Timestamp::new("soon").to_datetime().is_none());
    }

    #[test]
    fn timestamp_from_clock_time_matches_iso_string() {
        let time = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Timestamp::from(time).as_str(), "2025-01-01T00:00:00.000Z");
    }

    #[test]
    fn filter_parse_and_display() {
        for filter in Filter::ALL {
            assert_eq!(filter.to_string().parse::<Filter>(), Ok(filter));
        }
        assert_eq!(" Active ".parse::<Filter>(), Ok(Filter::Active));
        assert!("done".parse::<Filter>().is_err());
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn filter_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Filter::Completed).unwrap(), "\"completed\"");
    }

    #[test]
    fn state_counts_and_projection() {
        let mut state = ListState::ready_with(vec![
            item("3", "Bread", false),
            item("2", "Eggs", true),
            item("1", "Milk", false),
        ]);
        assert_eq!(state.active_count(), 2);
        assert_eq!(state.completed_count(), 1);

        state.filter = Filter::Active;
        let visible: Vec<_> = state.filtered().map(|i| i.text.as_str()).collect();
        assert_eq!(visible, ["Bread", "Milk"]);

        state.filter = Filter::Completed;
        assert_eq!(state.filtered_items(), vec![item("2", "Eggs", true)]);

        state.filter = Filter::All;
        assert_eq!(state.filtered_items(), state.items);
    }

    #[test]
    fn state_lookup() {
        let state = ListState::ready_with(vec![item("1", "Milk", false)]);
        assert!(state.contains(&ItemId::new("1")));
        assert!(!state.contains(&ItemId::new("2")));
        assert_eq!(state.len(), 1);
        assert!(!ListState::new().ready);
    }

    #[test]
    fn action_classification() {
        assert!(ListAction::ClearCompleted.is_mutation());
        assert!(ListAction::Hydrate.is_lifecycle());
        let view = ListAction::SetFilter {
            filter: Filter::Active,
        };
        assert!(!view.is_mutation());
        assert!(!view.is_lifecycle());
        assert_eq!(view.name(), "SetFilter");
    }
}
