//! Identifier-keyed, insertion-ordered record set.

use std::collections::HashSet;

use crate::models::ResourceRecord;

/// First-write-wins set of [`ResourceRecord`]s keyed by identifier.
///
/// Identifiers can be claimed without emitting a record, which is how the
/// root project reserves its own identifier.
#[derive(Debug, Default)]
pub struct ResourceSet {
    seen: HashSet<String>,
    records: Vec<ResourceRecord>,
}

impl ResourceSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `identifier` was already claimed.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.seen.contains(identifier)
    }

    /// Claim the record's identifier and, when `emit` is set, append the record.
    ///
    /// Returns `false` (and drops the record) if the identifier was already claimed.
    pub fn insert(&mut self, record: ResourceRecord, emit: bool) -> bool {
        if !self.seen.insert(record.identifier.clone()) {
            return false;
        }
        if emit {
            self.records.push(record);
        }
        true
    }

    /// Number of emitted records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Emitted records in first-insertion order.
    #[must_use]
    pub fn into_records(self) -> Vec<ResourceRecord> {
        self.records
    }
}
