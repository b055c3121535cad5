use crate::error::{CatalogError, Result};
use crate::types::Record;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Immutable id → record index over the whole dataset.
///
/// Records are kept in ascending id order so every consumer iterating the
/// catalog sees the same sequence regardless of how the file was ordered.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    /// Build a catalog from already-decoded records.
    ///
    /// Records with id `0` or an id seen earlier in the input are skipped
    /// with a warning; the first occurrence of an id wins.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut accepted: Vec<Record> = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            if record.id == 0 {
                log::warn!(
                    "Skipping catalog record with invalid id 0 ({})",
                    record.display_name()
                );
                continue;
            }
            if !seen.insert(record.id) {
                log::warn!("Skipping duplicate catalog record {}", record.id);
                continue;
            }
            accepted.push(record);
        }

        accepted.sort_by_key(|r| r.id);
        let by_id = accepted
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.id, idx))
            .collect();

        Self {
            records: accepted,
            by_id,
        }
    }

    /// Parse a JSON array of records
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let records: Vec<Record> = serde_json::from_slice(bytes)?;
        let catalog = Self::from_records(records);
        log::debug!("Loaded catalog with {} records", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CatalogError::InvalidPath(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_json_slice(&bytes)
    }

    pub fn get(&self, id: u32) -> Option<&Record> {
        self.by_id.get(&id).and_then(|&idx| self.records.get(idx))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All records, ascending by id
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.records.iter().map(|r| r.id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
