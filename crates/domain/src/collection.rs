//! The authoritative ordered record collection.
//!
//! Pure and synchronous: the engine wraps it in a lock and adds catalog
//! reloads, but every identity and ordering rule lives here.

use std::collections::HashSet;

use crate::entities::{RawRecord, Record, RecordInput};
use crate::error::DomainError;
use crate::ids::RecordId;

/// Ordered collection of records with unique ids.
///
/// Store order is most-recently-created first, then catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCollection {
    records: Vec<Record>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a catalog batch into a fresh collection, preserving order.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that does not normalize, or if two entries
    /// share an id. No partial collection is produced.
    pub fn from_raw(raw: Vec<RawRecord>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(raw.len());
        let mut records = Vec::with_capacity(raw.len());

        for entry in raw {
            let record = Record::from_raw(entry)?;
            if !seen.insert(record.id()) {
                return Err(DomainError::constraint(format!(
                    "duplicate record id {} in catalog batch",
                    record.id()
                )));
            }
            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in store order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// The id the next `create` will assign.
    pub fn next_id(&self) -> Result<RecordId, DomainError> {
        RecordId::next_after(self.records.iter().map(Record::id))
    }

    /// Validates the form, assigns a fresh id and prepends the new record.
    pub fn create(&mut self, input: &RecordInput) -> Result<Record, DomainError> {
        let record = Record::from_input(self.next_id()?, input)?;
        self.records.insert(0, record.clone());
        Ok(record)
    }

    /// Replaces the mutable fields of an existing record in place.
    pub fn update(&mut self, id: RecordId, input: &RecordInput) -> Result<Record, DomainError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| DomainError::not_found("Record", id))?;
        record.apply_input(input)?;
        Ok(record.clone())
    }

    /// Removes a record permanently and returns it.
    pub fn delete(&mut self, id: RecordId) -> Result<Record, DomainError> {
        let position = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| DomainError::not_found("Record", id))?;
        Ok(self.records.remove(position))
    }
}
