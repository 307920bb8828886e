// src/aggregate/variability.rs — Per-workload spread of the raw metric

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{admissible, observations};
use crate::infra::config::AggregateConfig;
use crate::results::SummaryRow;
use crate::util::CsvRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadStats {
    #[serde(rename = "Benchmark")]
    pub workload: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; absent with a single observation.
    pub std: Option<f64>,
    pub min: f64,
    /// Coefficient of variation (std / mean).
    pub cv: Option<f64>,
}

impl CsvRow for WorkloadStats {
    const HEADERS: &'static [&'static str] = &["Benchmark", "count", "mean", "std", "min", "cv"];
}

pub fn workload_stats(workload: &str, values: &[f64]) -> Option<WorkloadStats> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let std = (values.len() > 1).then(|| {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        var.sqrt()
    });
    let cv = std.filter(|_| mean != 0.0).map(|s| s / mean);
    Some(WorkloadStats {
        workload: workload.to_string(),
        count: values.len(),
        mean,
        std,
        min,
        cv,
    })
}

/// Count, mean, std, min and CV of the raw metric per workload, ordered by
/// mean ascending.
pub fn variability(rows: &[SummaryRow], config: &AggregateConfig) -> Vec<WorkloadStats> {
    let kept: Vec<SummaryRow> = admissible(rows, config.cost_ceiling, &config.variability_exclude)
        .cloned()
        .collect();

    let mut by_workload: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for o in observations(&kept, config.metric) {
        by_workload.entry(o.workload).or_default().push(o.value);
    }

    let mut stats: Vec<WorkloadStats> = by_workload
        .iter()
        .filter_map(|(w, values)| workload_stats(w, values))
        .collect();
    stats.sort_by(|a, b| a.mean.total_cmp(&b.mean));
    stats
}
