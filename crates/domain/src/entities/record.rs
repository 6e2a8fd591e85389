//! Record entity - one creature managed by the store.
//!
//! Records enter the system two ways:
//!
//! - [`RawRecord`]: a catalog entry as delivered by the catalog loader
//! - [`RecordInput`]: a create/edit form submission
//!
//! Both pass through the same normalization rules before becoming a
//! [`Record`], so every stored record satisfies the same invariants.

use serde::{Deserialize, Serialize};

use crate::common::none_if_blank;
use crate::error::DomainError;
use crate::ids::RecordId;
use crate::value_objects::{
    tracked_stats, with_tracked_defaults, ListField, NumericField, StatEntry, StatKind,
};

/// Sprite used when neither the catalog nor the form supplies an image.
pub const PLACEHOLDER_SPRITE_URL: &str = "https://via.placeholder.com/150";

/// A creature record.
///
/// # Invariants
///
/// - `name` is non-empty and lowercase
/// - `stats` contains `hp`, `attack` and `defense`
/// - `sprite_url` is never blank
///
/// Fields are private because these invariants must survive every mutation;
/// the only writers are the constructors here and [`crate::RecordCollection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    id: RecordId,
    name: String,
    height: u32,
    weight: u32,
    types: Vec<String>,
    abilities: Vec<String>,
    sprite_url: String,
    stats: Vec<StatEntry>,
}

impl Record {
    /// Normalizes a catalog entry, keeping its id and any extra stat kinds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the entry has a blank name.
    pub fn from_raw(raw: RawRecord) -> Result<Self, DomainError> {
        Ok(Self {
            id: raw.id,
            name: normalize_name(&raw.name)?,
            height: raw.height,
            weight: raw.weight,
            types: normalize_types(raw.types),
            abilities: normalize_items(raw.abilities),
            sprite_url: raw
                .sprite_url
                .as_deref()
                .and_then(none_if_blank)
                .unwrap_or(PLACEHOLDER_SPRITE_URL)
                .to_string(),
            stats: with_tracked_defaults(raw.stats),
        })
    }

    /// Builds a new record from a validated form under a freshly allocated id.
    pub(crate) fn from_input(id: RecordId, input: &RecordInput) -> Result<Self, DomainError> {
        let fields = input.normalize()?;
        Ok(Self {
            id,
            name: fields.name,
            height: fields.height,
            weight: fields.weight,
            types: fields.types,
            abilities: fields.abilities,
            sprite_url: fields
                .image
                .unwrap_or_else(|| PLACEHOLDER_SPRITE_URL.to_string()),
            stats: fields.stats,
        })
    }

    /// Replaces every mutable field from a validated form.
    ///
    /// The id never changes. A blank image keeps the current sprite instead of
    /// resetting it to the placeholder. On error the record is left untouched.
    pub(crate) fn apply_input(&mut self, input: &RecordInput) -> Result<(), DomainError> {
        let fields = input.normalize()?;
        self.name = fields.name;
        self.height = fields.height;
        self.weight = fields.weight;
        self.types = fields.types;
        self.abilities = fields.abilities;
        if let Some(image) = fields.image {
            self.sprite_url = image;
        }
        self.stats = fields.stats;
        Ok(())
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Height in decimetres.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Weight in hectograms.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn abilities(&self) -> &[String] {
        &self.abilities
    }

    pub fn sprite_url(&self) -> &str {
        &self.sprite_url
    }

    pub fn stats(&self) -> &[StatEntry] {
        &self.stats
    }

    /// Value of a tracked stat (always present after normalization).
    pub fn stat(&self, kind: StatKind) -> u32 {
        self.stats
            .iter()
            .find(|entry| entry.kind() == Some(kind))
            .map(|entry| entry.value)
            .unwrap_or(0)
    }

    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

/// A catalog entry before normalization.
///
/// This is the flattened shape the catalog loader hands to the store; wire
/// decoding of the remote API lives in the engine's adapter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    pub id: RecordId,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub sprite_url: Option<String>,
    pub stats: Vec<StatEntry>,
}

impl RawRecord {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sprite(mut self, url: impl Into<String>) -> Self {
        self.sprite_url = Some(url.into());
        self
    }

    pub fn with_stat(mut self, name: impl Into<String>, value: u32) -> Self {
        self.stats.push(StatEntry::new(name, value));
        self
    }
}

/// A create/edit form submission.
///
/// Every field is optional on the wire; missing fields take their defaults
/// (blank text, empty lists).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordInput {
    pub name: String,
    pub height: NumericField,
    pub weight: NumericField,
    pub types: ListField,
    pub abilities: ListField,
    /// Sprite URL; blank means "use the default".
    pub image: String,
    pub hp: NumericField,
    pub attack: NumericField,
    pub defense: NumericField,
}

impl RecordInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_height(mut self, height: impl Into<NumericField>) -> Self {
        self.height = height.into();
        self
    }

    pub fn with_weight(mut self, weight: impl Into<NumericField>) -> Self {
        self.weight = weight.into();
        self
    }

    pub fn with_types(mut self, types: impl Into<ListField>) -> Self {
        self.types = types.into();
        self
    }

    pub fn with_abilities(mut self, abilities: impl Into<ListField>) -> Self {
        self.abilities = abilities.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_hp(mut self, hp: impl Into<NumericField>) -> Self {
        self.hp = hp.into();
        self
    }

    pub fn with_attack(mut self, attack: impl Into<NumericField>) -> Self {
        self.attack = attack.into();
        self
    }

    pub fn with_defense(mut self, defense: impl Into<NumericField>) -> Self {
        self.defense = defense.into();
        self
    }

    /// Validates the form and applies the normalization rules.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is blank after trimming
    /// - No type remains after splitting and trimming
    fn normalize(&self) -> Result<NormalizedInput, DomainError> {
        let name = normalize_name(&self.name)?;
        let types = normalize_types(self.types.items());
        if types.is_empty() {
            return Err(DomainError::validation("At least one type is required"));
        }

        Ok(NormalizedInput {
            name,
            height: self.height.value(),
            weight: self.weight.value(),
            types,
            abilities: self.abilities.items(),
            image: none_if_blank(&self.image).map(str::to_string),
            stats: tracked_stats(self.hp.value(), self.attack.value(), self.defense.value()),
        })
    }
}

struct NormalizedInput {
    name: String,
    height: u32,
    weight: u32,
    types: Vec<String>,
    abilities: Vec<String>,
    image: Option<String>,
    stats: Vec<StatEntry>,
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    none_if_blank(name)
        .map(str::to_lowercase)
        .ok_or_else(|| DomainError::validation("Name is required"))
}

fn normalize_items(items: Vec<String>) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| none_if_blank(item))
        .map(str::to_string)
        .collect()
}

// Type tags share the lowercase vocabulary, so they are folded like names.
fn normalize_types(types: Vec<String>) -> Vec<String> {
    normalize_items(types)
        .into_iter()
        .map(|tag| tag.to_lowercase())
        .collect()
}
