// src/aggregate/split.rs — Per-workload views of the summary table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{metric_value, Observation};
use crate::design::Latency;
use crate::infra::config::AggregateConfig;
use crate::results::SummaryRow;
use crate::util::CsvRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRow {
    #[serde(rename = "Core Number")]
    pub cores: u32,
    #[serde(rename = "L1 Cache Size (KB)")]
    pub small_kb: u64,
    #[serde(rename = "L1 Associativity")]
    pub small_assoc: u32,
    #[serde(rename = "L2 Cache Size (KB)")]
    pub shared_kb: u64,
    #[serde(rename = "L2 Associativity")]
    pub shared_assoc: u32,
    #[serde(rename = "L2 latency (cycles)")]
    pub latency: Latency,
    #[serde(rename = "BCE")]
    pub total_cost: u64,
    #[serde(rename = "Metric")]
    pub value: f64,
}

impl CsvRow for SplitRow {
    const HEADERS: &'static [&'static str] = &[
        "Core Number",
        "L1 Cache Size (KB)",
        "L1 Associativity",
        "L2 Cache Size (KB)",
        "L2 Associativity",
        "L2 latency (cycles)",
        "BCE",
        "Metric",
    ];
}

impl From<&Observation> for SplitRow {
    fn from(o: &Observation) -> Self {
        Self {
            cores: o.identity.cores,
            small_kb: o.identity.small_kb,
            small_assoc: o.identity.small_assoc,
            shared_kb: o.identity.shared_kb,
            shared_assoc: o.identity.shared_assoc,
            latency: o.identity.latency,
            total_cost: o.total_cost,
            value: o.value,
        }
    }
}

/// One table per workload, each sorted by the metric ascending. Only the
/// cost ceiling applies; no workload is excluded.
pub fn split_by_workload(
    rows: &[SummaryRow],
    config: &AggregateConfig,
) -> BTreeMap<String, Vec<SplitRow>> {
    let mut split: BTreeMap<String, Vec<SplitRow>> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.total_cost < config.cost_ceiling) {
        let Some(value) = metric_value(row, config.metric) else {
            continue;
        };
        let o = Observation {
            identity: row.identity(),
            total_cost: row.total_cost,
            workload: row.workload.clone(),
            value,
        };
        split.entry(o.workload.clone()).or_default().push(SplitRow::from(&o));
    }
    for table in split.values_mut() {
        table.sort_by(|a, b| a.value.total_cmp(&b.value));
    }
    split
}
