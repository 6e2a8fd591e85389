//! Query engine: filtered, sorted views over a collection snapshot.
//!
//! Everything here is a pure function of its inputs. Consumers re-run
//! [`filter_and_sort`] after every mutation or [`QuerySpec`] change.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::Record;
use crate::error::DomainError;

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn unbounded() -> Self {
        Self::new(0, u32::MAX)
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Field a view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Height,
    Weight,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Height => "height",
            Self::Weight => "weight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Sort field plus direction, written `field-direction` (e.g. `height-desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub const fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub const fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = match self.field {
            SortField::Name => locale_compare(a.name(), b.name()),
            SortField::Height => a.height().cmp(&b.height()),
            SortField::Weight => a.weight().cmp(&b.weight()),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field.as_str(), self.direction.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| DomainError::parse(format!("Invalid sort key: {}", s)))?;

        let field = match field.to_lowercase().as_str() {
            "name" => SortField::Name,
            "height" => SortField::Height,
            "weight" => SortField::Weight,
            other => return Err(DomainError::parse(format!("Unknown sort field: {}", other))),
        };
        let direction = match direction.to_lowercase().as_str() {
            "asc" => SortDirection::Ascending,
            "desc" => SortDirection::Descending,
            other => {
                return Err(DomainError::parse(format!(
                    "Unknown sort direction: {}",
                    other
                )))
            }
        };

        Ok(Self::new(field, direction))
    }
}

impl Serialize for SortKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Combined search, filter and sort parameters for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    /// Case-insensitive substring match on the name; blank matches everything.
    pub search_text: String,
    /// Empty means no type filter; otherwise a record needs one matching tag.
    pub type_filter: BTreeSet<String>,
    pub height_range: ValueRange,
    pub weight_range: ValueRange,
    /// `None` keeps store order.
    pub sort_key: Option<SortKey>,
}

impl QuerySpec {
    /// The state a browse screen starts in and resets to.
    pub fn browse_defaults() -> Self {
        Self {
            search_text: String::new(),
            type_filter: BTreeSet::new(),
            height_range: ValueRange::new(0, 200),
            weight_range: ValueRange::new(0, 10_000),
            sort_key: Some(SortKey::ascending(SortField::Name)),
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Replaces the type filter. Tags are compared in lowercase, the same
    /// form record types are stored in.
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_filter = types.into_iter().map(|t| type_tag(t.into())).collect();
        self
    }

    pub fn with_height_range(mut self, range: ValueRange) -> Self {
        self.height_range = range;
        self
    }

    pub fn with_weight_range(mut self, range: ValueRange) -> Self {
        self.weight_range = range;
        self
    }

    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    /// Adds `tag` to the type filter, or removes it if already selected.
    pub fn toggle_type(&mut self, tag: impl Into<String>) {
        let tag = type_tag(tag.into());
        if !self.type_filter.remove(&tag) {
            self.type_filter.insert(tag);
        }
    }

    fn matches_search(&self, record: &Record) -> bool {
        self.search_text.is_empty()
            || record
                .name()
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }

    fn matches_types(&self, record: &Record) -> bool {
        self.type_filter.is_empty()
            || self.type_filter.iter().any(|tag| record.has_type(tag))
    }
}

fn type_tag(tag: String) -> String {
    tag.trim().to_lowercase()
}

/// Produces the ordered view of `snapshot` described by `spec`.
///
/// Filters apply in a fixed order (name search, types, height, weight) and
/// the sort is stable, so records with equal keys keep their snapshot order.
pub fn filter_and_sort(snapshot: &[Record], spec: &QuerySpec) -> Vec<Record> {
    let mut view: Vec<Record> = snapshot
        .iter()
        .filter(|record| spec.matches_search(record))
        .filter(|record| spec.matches_types(record))
        .filter(|record| spec.height_range.contains(record.height()))
        .filter(|record| spec.weight_range.contains(record.weight()))
        .cloned()
        .collect();

    if let Some(key) = spec.sort_key {
        view.sort_by(|a, b| key.compare(a, b));
    }
    view
}

/// Case-folded comparison with a code-point tie break, so `"Abra"` sorts
/// next to `"abra"` rather than before every lowercase name.
fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RawRecord;

    fn record(id: u32, name: &str, height: u32, weight: u32, types: &[&str]) -> Record {
        Record::from_raw(
            RawRecord::new(id, name)
                .with_height(height)
                .with_weight(weight)
                .with_types(types.iter().copied()),
        )
        .unwrap()
    }

    fn names(view: &[Record]) -> Vec<&str> {
        view.iter().map(Record::name).collect()
    }

    fn snapshot() -> Vec<Record> {
        vec![
            record(1, "bulbasaur", 7, 69, &["grass", "poison"]),
            record(2, "charmander", 6, 85, &["fire"]),
            record(3, "squirtle", 5, 90, &["water"]),
            record(4, "charizard", 17, 905, &["fire", "flying"]),
            record(5, "pidgey", 3, 18, &["normal", "flying"]),
        ]
    }

    #[test]
    fn scenario_height_ascending() {
        let snapshot = vec![
            record(1, "bulbasaur", 7, 69, &["grass"]),
            record(2, "charmander", 6, 85, &["fire"]),
        ];
        let spec = QuerySpec::default().with_sort(SortKey::ascending(SortField::Height));
        assert_eq!(
            names(&filter_and_sort(&snapshot, &spec)),
            vec!["charmander", "bulbasaur"]
        );
    }

    #[test]
    fn scenario_search_text() {
        let spec = QuerySpec::default().with_search("bulb");
        assert_eq!(names(&filter_and_sort(&snapshot(), &spec)), vec!["bulbasaur"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let spec = QuerySpec::default().with_search("CHAR");
        assert_eq!(
            names(&filter_and_sort(&snapshot(), &spec)),
            vec!["charmander", "charizard"]
        );
    }

    #[test]
    fn default_spec_keeps_store_order() {
        let view = filter_and_sort(&snapshot(), &QuerySpec::default());
        assert_eq!(view, snapshot());
    }

    #[test]
    fn type_filter_matches_any_selected_tag() {
        let spec = QuerySpec::default().with_types(["flying", "water"]);
        assert_eq!(
            names(&filter_and_sort(&snapshot(), &spec)),
            vec!["squirtle", "charizard", "pidgey"]
        );
    }

    #[test]
    fn toggle_type_adds_then_removes() {
        let mut spec = QuerySpec::default();
        spec.toggle_type("fire");
        assert!(spec.type_filter.contains("fire"));
        spec.toggle_type("fire");
        assert!(spec.type_filter.is_empty());
    }

    #[test]
    fn type_tags_are_case_insensitive() {
        let spec = QuerySpec::default().with_types(["Fire", " WATER "]);
        assert_eq!(
            names(&filter_and_sort(&snapshot(), &spec)),
            vec!["charmander", "squirtle", "charizard"]
        );

        let mut spec = QuerySpec::default();
        spec.toggle_type("FIRE");
        assert!(spec.type_filter.contains("fire"));
        spec.toggle_type("fire");
        assert!(spec.type_filter.is_empty());
    }

    #[test]
    fn ranges_are_inclusive() {
        let at_bound = QuerySpec::default().with_height_range(ValueRange::new(0, 7));
        let view = filter_and_sort(&snapshot(), &at_bound);
        assert!(names(&view).contains(&"bulbasaur"));

        let below = QuerySpec::default().with_height_range(ValueRange::new(0, 6));
        let view = filter_and_sort(&snapshot(), &below);
        assert!(!names(&view).contains(&"bulbasaur"));

        let lower = QuerySpec::default().with_weight_range(ValueRange::new(85, 90));
        assert_eq!(
            names(&filter_and_sort(&snapshot(), &lower)),
            vec!["charmander", "squirtle"]
        );
    }

    #[test]
    fn filters_combine() {
        let spec = QuerySpec::default()
            .with_search("char")
            .with_types(["fire"])
            .with_height_range(ValueRange::new(0, 10))
            .with_sort(SortKey::descending(SortField::Weight));
        assert_eq!(names(&filter_and_sort(&snapshot(), &spec)), vec!["charmander"]);
    }

    #[test]
    fn sort_descending_by_weight() {
        let spec = QuerySpec::default().with_sort(SortKey::descending(SortField::Weight));
        assert_eq!(
            names(&filter_and_sort(&snapshot(), &spec)),
            vec!["charizard", "squirtle", "charmander", "bulbasaur", "pidgey"]
        );
    }

    #[test]
    fn sort_by_name_both_directions() {
        let asc = QuerySpec::default().with_sort(SortKey::ascending(SortField::Name));
        assert_eq!(
            names(&filter_and_sort(&snapshot(), &asc)),
            vec!["bulbasaur", "charizard", "charmander", "pidgey", "squirtle"]
        );
        let desc = QuerySpec::default().with_sort(SortKey::descending(SortField::Name));
        assert_eq!(
            names(&filter_and_sort(&snapshot(), &desc)),
            vec!["squirtle", "pidgey", "charmander", "charizard", "bulbasaur"]
        );
    }

    #[test]
    fn sort_is_stable_for_every_key() {
        let snapshot = vec![
            record(10, "ditto", 3, 40, &["normal"]),
            record(11, "ditto", 3, 40, &["normal"]),
            record(12, "abra", 9, 195, &["psychic"]),
            record(13, "ditto", 3, 40, &["normal"]),
        ];
        let keys = [SortField::Name, SortField::Height, SortField::Weight];
        let directions = [SortDirection::Ascending, SortDirection::Descending];

        for field in keys {
            for direction in directions {
                let spec = QuerySpec::default().with_sort(SortKey::new(field, direction));
                let dittos: Vec<u32> = filter_and_sort(&snapshot, &spec)
                    .iter()
                    .filter(|r| r.name() == "ditto")
                    .map(|r| r.id().value())
                    .collect();
                assert_eq!(dittos, vec![10, 11, 13], "{}", SortKey::new(field, direction));
            }
        }
    }

    #[test]
    fn derivation_is_idempotent() {
        let spec = QuerySpec::browse_defaults().with_types(["fire", "grass"]);
        let snapshot = snapshot();
        assert_eq!(
            filter_and_sort(&snapshot, &spec),
            filter_and_sort(&snapshot, &spec)
        );
    }

    #[test]
    fn browse_defaults_hide_heavy_records() {
        let view = filter_and_sort(&snapshot(), &QuerySpec::browse_defaults());
        assert_eq!(
            names(&view),
            vec!["bulbasaur", "charizard", "charmander", "pidgey", "squirtle"]
        );
        let heavy = vec![record(20, "snorlax", 21, 4600, &["normal"]), record(21, "groudon", 35, 9500, &["ground"])];
        let none_heavier = QuerySpec::browse_defaults().with_weight_range(ValueRange::new(0, 9_000));
        assert_eq!(names(&filter_and_sort(&heavy, &none_heavier)), vec!["snorlax"]);
    }

    #[test]
    fn sort_key_round_trips_through_text() {
        let key: SortKey = "height-desc".parse().unwrap();
        assert_eq!(key, SortKey::descending(SortField::Height));
        assert_eq!(key.to_string(), "height-desc");
        assert!("speed-asc".parse::<SortKey>().is_err());
        assert!("name-sideways".parse::<SortKey>().is_err());
        assert!("name".parse::<SortKey>().is_err());
    }

    #[test]
    fn query_spec_deserializes_partial_json() {
        let spec: QuerySpec =
            serde_json::from_str(r#"{"search_text":"mew","sort_key":"weight-asc"}"#).unwrap();
        assert_eq!(spec.search_text, "mew");
        assert_eq!(spec.sort_key, Some(SortKey::ascending(SortField::Weight)));
        assert_eq!(spec.height_range, ValueRange::unbounded());
    }

    #[test]
    fn locale_compare_folds_case() {
        assert_eq!(locale_compare("Abra", "abra"), Ordering::Less);
        assert_eq!(locale_compare("Abra", "bulbasaur"), Ordering::Less);
        assert_eq!(locale_compare("zubat", "Abra"), Ordering::Greater);
    }
}
