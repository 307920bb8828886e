// src/aggregate/rank.rs — Replica filtering and ranking
//
// Groups normalized observations by configuration (and workload when ranking
// per workload), keeps only groups with exactly the expected number of
// replicas, and orders them by mean normalized metric, best first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::normalize::normalize;
use super::{admissible, observations, Observation};
use crate::design::{ConfigIdentity, Latency};
use crate::infra::config::{AggregateConfig, RankScope};
use crate::results::SummaryRow;
use crate::util::CsvRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedConfig {
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
    /// Only set when ranking per workload.
    #[serde(rename = "Benchmark")]
    pub workload: Option<String>,
    #[serde(rename = "Replicas")]
    pub replicas: usize,
    #[serde(rename = "Mean (normalized)")]
    pub mean_normalized: f64,
}

impl CsvRow for RankedConfig {
    const HEADERS: &'static [&'static str] = &[
        "Core Number",
        "L1 Cache Size (KB)",
        "L1 Associativity",
        "L2 Cache Size (KB)",
        "L2 Associativity",
        "L2 latency (cycles)",
        "BCE",
        "Benchmark",
        "Replicas",
        "Mean (normalized)",
    ];
}

impl RankedConfig {
    pub fn identity(&self) -> ConfigIdentity {
        ConfigIdentity {
            cores: self.cores,
            small_kb: self.small_kb,
            small_assoc: self.small_assoc,
            shared_kb: self.shared_kb,
            shared_assoc: self.shared_assoc,
            latency: self.latency,
        }
    }
}

type GroupKey = (ConfigIdentity, u64, Option<String>);

fn group_key(o: &Observation, scope: RankScope) -> GroupKey {
    let workload = match scope {
        RankScope::General => None,
        RankScope::PerWorkload => Some(o.workload.clone()),
    };
    (o.identity, o.total_cost, workload)
}

/// Rank configurations from the run summary.
pub fn rank(rows: &[SummaryRow], config: &AggregateConfig) -> Vec<RankedConfig> {
    let kept: Vec<SummaryRow> = admissible(rows, config.cost_ceiling, &config.rank_exclude)
        .cloned()
        .collect();
    let normalized = normalize(&observations(&kept, config.metric));
    rank_normalized(&normalized, config.expected_replicas, config.scope)
}

/// Group, filter on replica count, and sort already-normalized observations.
pub fn rank_normalized(
    normalized: &[Observation],
    expected_replicas: usize,
    scope: RankScope,
) -> Vec<RankedConfig> {
    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    for o in normalized {
        groups.entry(group_key(o, scope)).or_default().push(o.value);
    }

    let total_groups = groups.len();
    let mut ranked: Vec<RankedConfig> = groups
        .into_iter()
        .filter(|(_, values)| values.len() == expected_replicas)
        .map(|((id, cost, workload), values)| RankedConfig {
            cores: id.cores,
            small_kb: id.small_kb,
            small_assoc: id.small_assoc,
            shared_kb: id.shared_kb,
            shared_assoc: id.shared_assoc,
            latency: id.latency,
            total_cost: cost,
            workload,
            replicas: values.len(),
            mean_normalized: values.iter().sum::<f64>() / values.len() as f64,
        })
        .collect();

    tracing::debug!(
        "{} of {} configuration groups have {} replicas",
        ranked.len(),
        total_groups,
        expected_replicas
    );

    ranked.sort_by(|a, b| a.mean_normalized.total_cmp(&b.mean_normalized));
    ranked
}
