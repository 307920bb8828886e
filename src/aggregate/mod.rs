// src/aggregate/mod.rs — Aggregation and ranking of run summaries
//
// Every stage here is a pure function over summary rows; the CLI owns the
// file boundaries.

pub mod normalize;
pub mod rank;
pub mod split;
pub mod variability;

use crate::design::ConfigIdentity;
use crate::infra::config::Metric;
use crate::results::SummaryRow;

pub use rank::{rank, RankedConfig};
pub use split::split_by_workload;
pub use variability::{variability, WorkloadStats};

/// One summary row reduced to what aggregation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub identity: ConfigIdentity,
    pub total_cost: u64,
    pub workload: String,
    pub value: f64,
}

/// Rows whose metric is absent cannot be ranked and are dropped here.
pub fn observations(rows: &[SummaryRow], metric: Metric) -> Vec<Observation> {
    rows.iter()
        .filter_map(|row| {
            let Some(value) = metric_value(row, metric) else {
                tracing::debug!(
                    "No {} for {} ({:?}), excluded",
                    metric.key(),
                    row.workload,
                    row.identity()
                );
                return None;
            };
            Some(Observation {
                identity: row.identity(),
                total_cost: row.total_cost,
                workload: row.workload.clone(),
                value,
            })
        })
        .collect()
}

pub fn metric_value(row: &SummaryRow, metric: Metric) -> Option<f64> {
    match metric {
        Metric::SimTicks => row.sim_ticks,
        Metric::SimSeconds => row.sim_seconds,
        Metric::SimInsts => row.sim_insts,
    }
}

/// Workload names match exclusion entries case-insensitively.
pub fn is_excluded(workload: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|e| e.eq_ignore_ascii_case(workload))
}

/// Keep rows strictly under the cost ceiling and outside the exclusion set.
pub fn admissible<'a>(
    rows: &'a [SummaryRow],
    cost_ceiling: u64,
    exclude: &'a [String],
) -> impl Iterator<Item = &'a SummaryRow> + 'a {
    rows.iter()
        .filter(move |r| r.total_cost < cost_ceiling && !is_excluded(&r.workload, exclude))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::design::Latency;
    use crate::results::SummaryRow;

    pub fn row(workload: &str, shared_kb: u64, cost: u64, ticks: Option<f64>) -> SummaryRow {
        SummaryRow {
            cores: 8,
            clock_ghz: Some(0.7),
            small_kb: 16,
            small_assoc: 4,
            shared_kb,
            shared_assoc: 8,
            latency: Latency::Cycles(7),
            workload: workload.into(),
            total_cost: cost,
            sim_ticks: ticks,
            sim_seconds: ticks.map(|t| t / 1e12),
            sim_insts: None,
            l2_overall_accesses: None,
            l2_overall_misses: None,
            l2_demand_miss_rate: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::row;
    use super::*;
    use super::split::SplitRow;
    use super::variability::workload_stats;
    use crate::infra::config::AggregateConfig;
    use crate::util::{serialized_headers, CsvRow};

    #[test]
    fn test_observations_drop_missing_metric() {
        let rows = vec![row("radix", 1024, 48, Some(10.0)), row("radix", 2048, 80, None)];
        let obs = observations(&rows, Metric::SimTicks);
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].value, 10.0);
        assert!(observations(&rows, Metric::SimInsts).is_empty());
    }

    #[test]
    fn test_exclusion_is_exact_name() {
        let ex = vec!["fft".to_string(), "lu".to_string()];
        assert!(is_excluded("FFT", &ex));
        assert!(is_excluded("lu", &ex));
        assert!(!is_excluded("cholesky", &ex));
        assert!(!is_excluded("lu_contig", &ex));
    }

    #[test]
    fn test_cost_ceiling_is_strict() {
        let rows = vec![
            row("radix", 1024, 127, Some(1.0)),
            row("radix", 2048, 128, Some(1.0)),
            row("fft", 1024, 48, Some(1.0)),
        ];
        let ex = vec!["fft".to_string()];
        let kept: Vec<_> = admissible(&rows, 128, &ex).collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].total_cost, 127);
    }

    #[test]
    fn test_table_headers_follow_field_order() {
        let rows = vec![row("radix", 1024, 48, Some(10.0)), row("radix", 2048, 80, Some(12.0))];
        assert_eq!(serialized_headers(&rows[0]), SummaryRow::HEADERS);

        let stats = workload_stats("radix", &[10.0, 12.0]).unwrap();
        assert_eq!(serialized_headers(&stats), WorkloadStats::HEADERS);

        let split = split_by_workload(&rows, &AggregateConfig::default());
        assert_eq!(serialized_headers(&split["radix"][0]), SplitRow::HEADERS);
    }
}
