//! Catalog of active file records
//!
//! Insertion-ordered: records appear in creation order and keep their
//! relative order across deletions. Lookup is by exact, case-sensitive
//! name.

use crate::allocator::AllocationKind;
use serde::{Deserialize, Serialize};

/// Metadata for one active file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique among active files
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Strategy that placed this file's blocks
    pub allocation_kind: AllocationKind,
    /// First block of the range or chain
    pub start_block: usize,
    /// Last block of the range or chain
    pub end_block: usize,
}

/// Insertion-ordered collection of active file records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    records: Vec<FileRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record with this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.records.iter().any(|record| record.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&FileRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FileRecord> {
        self.records.iter_mut().find(|record| record.name == name)
    }

    /// Append a record; creation order is catalog order
    pub fn push(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    /// Remove by name, preserving the order of the remaining records
    pub fn remove(&mut self, name: &str) -> Option<FileRecord> {
        let position = self.records.iter().position(|record| record.name == name)?;
        Some(self.records.remove(position))
    }

    /// Records in catalog order
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }
}
