// src/aggregate/normalize.rs — Per-workload normalization

use std::collections::HashMap;

use super::Observation;

/// Divide every observation by the minimum of its own workload, so the best
/// configuration of each workload sits at exactly 1.0. Workloads whose
/// minimum is not positive cannot be normalized and are dropped.
pub fn normalize(observations: &[Observation]) -> Vec<Observation> {
    let mut minimum: HashMap<&str, f64> = HashMap::new();
    for o in observations {
        minimum
            .entry(o.workload.as_str())
            .and_modify(|m| *m = m.min(o.value))
            .or_insert(o.value);
    }

    for (workload, min) in &minimum {
        if *min <= 0.0 {
            tracing::warn!("Cannot normalize {}: minimum metric is {}", workload, min);
        }
    }

    observations
        .iter()
        .filter_map(|o| {
            let min = minimum[o.workload.as_str()];
            (min > 0.0).then(|| Observation {
                value: o.value / min,
                ..o.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{fixtures::row, observations};
    use crate::infra::config::Metric;

    #[test]
    fn test_minimum_becomes_one() {
        let rows = vec![
            row("radix", 1024, 48, Some(300.0)),
            row("radix", 2048, 80, Some(200.0)),
            row("ocean", 1024, 48, Some(7.0)),
            row("ocean", 2048, 80, Some(21.0)),
        ];
        let norm = normalize(&observations(&rows, Metric::SimTicks));
        assert_eq!(norm.len(), 4);
        assert_eq!(norm[0].value, 1.5);
        assert_eq!(norm[1].value, 1.0);
        assert_eq!(norm[2].value, 1.0);
        assert_eq!(norm[3].value, 3.0);
    }

    #[test]
    fn test_every_workload_has_exact_one() {
        let rows: Vec<_> = [3.3, 1.7, 9.1, 0.3, 2.2]
            .iter()
            .enumerate()
            .map(|(i, v)| row(if i % 2 == 0 { "a" } else { "b" }, 1024, 48, Some(*v)))
            .collect();
        let norm = normalize(&observations(&rows, Metric::SimTicks));
        for w in ["a", "b"] {
            let min = norm
                .iter()
                .filter(|o| o.workload == w)
                .map(|o| o.value)
                .fold(f64::INFINITY, f64::min);
            assert_eq!(min, 1.0);
        }
    }

    #[test]
    fn test_non_positive_minimum_drops_workload() {
        let rows = vec![
            row("idle", 1024, 48, Some(0.0)),
            row("idle", 2048, 80, Some(5.0)),
            row("radix", 1024, 48, Some(5.0)),
        ];
        let norm = normalize(&observations(&rows, Metric::SimTicks));
        assert_eq!(norm.len(), 1);
        assert_eq!(norm[0].workload, "radix");
    }
}
