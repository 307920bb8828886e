// src/characterization/mod.rs — Cache characterization records
//
// One record per characterized cache organisation. Timing and energy are
// optional: a report that lacks a labeled field still yields a record.

pub mod ingest;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::util::CsvRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterizationRecord {
    #[serde(rename = "Level", default)]
    pub level: String,
    #[serde(rename = "Cache Size (KB)")]
    pub size_kb: u64,
    #[serde(rename = "Associativity")]
    pub associativity: u32,
    #[serde(rename = "Block Size (B)")]
    pub block_bytes: u32,
    #[serde(rename = "Access Time (ns)")]
    pub access_time_ns: Option<f64>,
    #[serde(rename = "Read Energy (nJ)")]
    pub read_energy_nj: Option<f64>,
}

impl CsvRow for CharacterizationRecord {
    const HEADERS: &'static [&'static str] = &[
        "Level",
        "Cache Size (KB)",
        "Associativity",
        "Block Size (B)",
        "Access Time (ns)",
        "Read Energy (nJ)",
    ];
}

impl CharacterizationRecord {
    /// Uniqueness key within a level.
    pub fn key(&self) -> (u64, u32, u32) {
        (self.size_kb, self.associativity, self.block_bytes)
    }
}

/// Canonical ordering: by (size, associativity, block size). Stable, so
/// duplicate keys keep their encounter order.
pub fn canonical_order(records: &[CharacterizationRecord]) -> Vec<CharacterizationRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.key());
    sorted
}
