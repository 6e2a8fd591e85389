//! Stat value objects - the base stats tracked on every record.
//!
//! Provides type safety for the three tracked stat kinds instead of using
//! magic strings like "hp" or "attack".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stat kinds the store reads and writes on create/update.
///
/// Catalog records may carry further kinds (`speed`, `special-attack`, ...);
/// those are kept as plain [`StatEntry`] names and never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    /// Hit points
    Hp,
    /// Physical attack
    Attack,
    /// Physical defense
    Defense,
}

impl StatKind {
    /// Tracked kinds in the order they are written to a record.
    pub const TRACKED: [StatKind; 3] = [Self::Hp, Self::Attack, Self::Defense];

    /// Returns the catalog name of the stat (e.g., "hp", "attack").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Attack => "attack",
            Self::Defense => "defense",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hp" => Ok(Self::Hp),
            "attack" => Ok(Self::Attack),
            "defense" => Ok(Self::Defense),
            _ => Err(()),
        }
    }
}

/// One named base stat on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub name: String,
    pub value: u32,
}

impl StatEntry {
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn tracked(kind: StatKind, value: u32) -> Self {
        Self::new(kind.as_str(), value)
    }

    /// The tracked kind this entry represents, if any.
    pub fn kind(&self) -> Option<StatKind> {
        self.name.parse().ok()
    }
}

/// Builds the three tracked stats from caller-supplied values.
pub fn tracked_stats(hp: u32, attack: u32, defense: u32) -> Vec<StatEntry> {
    vec![
        StatEntry::tracked(StatKind::Hp, hp),
        StatEntry::tracked(StatKind::Attack, attack),
        StatEntry::tracked(StatKind::Defense, defense),
    ]
}

/// Ensures every tracked kind is present, appending a zero entry for each
/// missing one. Entries already present keep their position and value.
pub fn with_tracked_defaults(mut stats: Vec<StatEntry>) -> Vec<StatEntry> {
    for kind in StatKind::TRACKED {
        if !stats.iter().any(|entry| entry.kind() == Some(kind)) {
            stats.push(StatEntry::tracked(kind, 0));
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_kind_as_str() {
        assert_eq!(StatKind::Hp.as_str(), "hp");
        assert_eq!(StatKind::Attack.as_str(), "attack");
        assert_eq!(StatKind::Defense.as_str(), "defense");
    }

    #[test]
    fn test_stat_kind_from_str() {
        assert_eq!(StatKind::from_str("hp"), Ok(StatKind::Hp));
        assert_eq!(StatKind::from_str("HP"), Ok(StatKind::Hp));
        assert_eq!(StatKind::from_str(" defense "), Ok(StatKind::Defense));
        assert_eq!(StatKind::from_str("special-attack"), Err(()));
    }

    #[test]
    fn test_tracked_stats_order() {
        let stats = tracked_stats(35, 55, 40);
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["hp", "attack", "defense"]);
        assert_eq!(stats[0].value, 35);
    }

    #[test]
    fn test_with_tracked_defaults_keeps_extra_kinds() {
        let stats = with_tracked_defaults(vec![
            StatEntry::new("speed", 90),
            StatEntry::new("attack", 55),
        ]);

        assert_eq!(
            stats,
            vec![
                StatEntry::new("speed", 90),
                StatEntry::new("attack", 55),
                StatEntry::new("hp", 0),
                StatEntry::new("defense", 0),
            ]
        );
    }
}
