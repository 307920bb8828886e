// src/results/collect.rs — Walk run directories and build the summary table

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

use super::run_dir::RunDirName;
use super::stats_report::StatsReport;
use crate::design::budget::total_cost;
use crate::design::{ConfigIdentity, Latency};
use crate::infra::config::BudgetPolicy;
use crate::infra::errors::{require_input, SweepError};
use crate::util::CsvRow;

/// One run directory that left a usable statistics report.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub dir: RunDirName,
    pub stats: StatsReport,
}

/// Scan `results_dir` for run directories. Unrecognised directory names and
/// runs without a report are skipped with a warning. Directories are visited
/// in name order.
pub fn scan_results(results_dir: &Path, stats_file: &Path) -> Result<Vec<RunRecord>, SweepError> {
    require_input(results_dir)?;

    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(results_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();

    let mut records = Vec::new();
    for path in dirs {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let Some(dir) = RunDirName::parse(name) else {
            tracing::warn!("Skipping unrecognised run directory: {}", name);
            continue;
        };

        let stats_path = path.join(stats_file);
        match StatsReport::read(&stats_path) {
            Ok(Some(stats)) => records.push(RunRecord { dir, stats }),
            Ok(None) => tracing::warn!("No statistics in {}", stats_path.display()),
            Err(e) => tracing::warn!("Failed to read {}: {}", stats_path.display(), e),
        }
    }

    Ok(records)
}

/// Flat per-run row consumed by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Core Number")]
    pub cores: u32,
    #[serde(rename = "CPU clock (GHz)")]
    pub clock_ghz: Option<f64>,
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
    #[serde(rename = "Benchmark")]
    pub workload: String,
    #[serde(rename = "BCE")]
    pub total_cost: u64,
    pub sim_ticks: Option<f64>,
    pub sim_seconds: Option<f64>,
    pub sim_insts: Option<f64>,
    #[serde(rename = "L2_overall_accesses")]
    pub l2_overall_accesses: Option<f64>,
    #[serde(rename = "L2_overall_misses")]
    pub l2_overall_misses: Option<f64>,
    #[serde(rename = "L2_demand_miss_rate")]
    pub l2_demand_miss_rate: Option<f64>,
}

impl CsvRow for SummaryRow {
    const HEADERS: &'static [&'static str] = &[
        "Core Number",
        "CPU clock (GHz)",
        "L1 Cache Size (KB)",
        "L1 Associativity",
        "L2 Cache Size (KB)",
        "L2 Associativity",
        "L2 latency (cycles)",
        "Benchmark",
        "BCE",
        "sim_ticks",
        "sim_seconds",
        "sim_insts",
        "L2_overall_accesses",
        "L2_overall_misses",
        "L2_demand_miss_rate",
    ];
}

impl SummaryRow {
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

/// Simulated CPU clock: ticks per second over ticks per cycle.
fn derived_clock_ghz(stats: &StatsReport) -> Option<f64> {
    let freq = stats.get_f64("sim_freq")?;
    let period = stats.get_f64("system.clk_domain.clock")?;
    (freq != 0.0 && period != 0.0).then(|| freq / period / 1e9)
}

pub fn summarize(policy: &BudgetPolicy, records: &[RunRecord]) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = records
        .iter()
        .map(|r| {
            let id = &r.dir.identity;
            SummaryRow {
                cores: id.cores,
                clock_ghz: derived_clock_ghz(&r.stats),
                small_kb: id.small_kb,
                small_assoc: id.small_assoc,
                shared_kb: id.shared_kb,
                shared_assoc: id.shared_assoc,
                latency: id.latency,
                workload: r.dir.workload.clone(),
                total_cost: total_cost(policy, id.cores, id.small_kb, id.shared_kb),
                sim_ticks: r.stats.get_f64("sim_ticks"),
                sim_seconds: r.stats.get_f64("sim_seconds"),
                sim_insts: r.stats.get_f64("sim_insts"),
                l2_overall_accesses: r.stats.get_f64("system.l2.overall_accesses::total"),
                l2_overall_misses: r.stats.get_f64("system.l2.overall_misses::total"),
                l2_demand_miss_rate: r.stats.get_f64("system.l2.demand_miss_rate::total"),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.workload
            .cmp(&b.workload)
            .then_with(|| cmp_missing_last(a.sim_seconds, b.sim_seconds))
    });
    rows
}

fn cmp_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
