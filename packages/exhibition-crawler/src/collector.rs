use std::collections::HashSet;

use crate::types::ExhibitionRecord;

/// Ordered, URL-deduplicated collection of exhibition records.
#[derive(Debug, Default)]
pub struct Collector {
    records: Vec<ExhibitionRecord>,
    seen: HashSet<String>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `record` unless its detail URL was already collected.
    pub fn offer(&mut self, record: ExhibitionRecord) -> bool {
        if !self.seen.insert(record.detail_url.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn contains(&self, detail_url: &str) -> bool {
        self.seen.contains(detail_url)
    }

    pub fn records(&self) -> &[ExhibitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ExhibitionRecord> {
        self.records
    }
}
