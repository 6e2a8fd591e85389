use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Integer identity of a record.
///
/// Catalog records keep the catalog's numeric id; locally created records are
/// allocated by [`RecordId::next_after`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u32);

impl RecordId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Allocates the id following the largest one in `existing`.
    ///
    /// An empty collection yields `1`. The result is never present in
    /// `existing` because it is strictly greater than every member.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` once `u32::MAX` is taken.
    pub fn next_after(existing: impl IntoIterator<Item = RecordId>) -> Result<Self, DomainError> {
        let max = existing.into_iter().map(|id| id.0).max().unwrap_or(0);
        max.checked_add(1)
            .map(Self)
            .ok_or_else(|| DomainError::constraint("record id space exhausted"))
    }
}

// Zero is never allocated; it only fills unset raw records.
impl Default for RecordId {
    fn default() -> Self {
        Self(0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RecordId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<RecordId> for u32 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| DomainError::parse(format!("Invalid record id: {}", s)))
    }
}
