// src/design/generator.rs — Budget-constrained design-space enumeration
//
// For each core count and small-level record: derive the clock, enumerate
// affordable shared-level sizes, match them against the shared-level table
// and emit one design point per matching shared-level record.

use super::budget::{shared_size_candidates, total_cost};
use super::{ClockGhz, DesignPoint, Latency};
use crate::characterization::CharacterizationRecord;
use crate::infra::config::BudgetPolicy;

/// Enumerate the design space. Output order is deterministic: core counts in
/// policy order, then small-level records in table order, then candidate
/// sizes ascending, then shared-level records in table order.
pub fn generate(
    policy: &BudgetPolicy,
    small: &[CharacterizationRecord],
    shared: &[CharacterizationRecord],
) -> Vec<DesignPoint> {
    let mut points = Vec::new();

    for &cores in &policy.core_counts {
        for l1 in small {
            let clock = ClockGhz::from_access_time(l1.access_time_ns);
            if clock.is_zero() {
                tracing::warn!(
                    "Degenerate clock (0 GHz) for cores={}, L1={}KB/A{}; shared latencies will be infeasible",
                    cores,
                    l1.size_kb,
                    l1.associativity
                );
            }
            let cycle = clock.cycle_time();

            let sizes = shared_size_candidates(policy, cores, l1.size_kb);
            if sizes.is_empty() {
                tracing::warn!(
                    "No shared-level size fits the budget for cores={}, L1={}KB; skipping",
                    cores,
                    l1.size_kb
                );
                continue;
            }

            for shared_kb in sizes {
                let mut matched = false;
                for l2 in shared.iter().filter(|r| r.size_kb == shared_kb) {
                    matched = true;
                    let latency = Latency::from_access_time(l2.access_time_ns, cycle);
                    if !latency.is_feasible() {
                        tracing::warn!(
                            "Infeasible L2 latency: cores={}, L1={}KB/A{}, L2={}KB/A{}",
                            cores,
                            l1.size_kb,
                            l1.associativity,
                            shared_kb,
                            l2.associativity
                        );
                    }

                    let cost = total_cost(policy, cores, l1.size_kb, shared_kb);
                    if cost > policy.total {
                        tracing::warn!(
                            "Cost {} over budget {} for cores={}, L1={}KB, L2={}KB; excluded",
                            cost,
                            policy.total,
                            cores,
                            l1.size_kb,
                            shared_kb
                        );
                        continue;
                    }

                    points.push(DesignPoint {
                        cores,
                        clock,
                        small_kb: l1.size_kb,
                        small_assoc: l1.associativity,
                        shared_kb,
                        shared_assoc: l2.associativity,
                        latency,
                        total_cost: cost,
                    });
                }
                if !matched {
                    tracing::debug!("No shared-level record of {}KB; size dropped", shared_kb);
                }
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(level: &str, size_kb: u64, associativity: u32, access: Option<f64>) -> CharacterizationRecord {
        CharacterizationRecord {
            level: level.into(),
            size_kb,
            associativity,
            block_bytes: 32,
            access_time_ns: access,
            read_energy_nj: None,
        }
    }

    fn policy(cores: Vec<u32>) -> BudgetPolicy {
        BudgetPolicy {
            core_counts: cores,
            ..BudgetPolicy::default()
        }
    }

    #[test]
    fn test_reference_example_point() {
        let small = vec![rec("L1", 16, 4, Some(1.389))];
        let shared = vec![rec("L2", 1024, 8, Some(10.0))];
        let points = generate(&policy(vec![8]), &small, &shared);

        assert_eq!(points.len(), 1);
        let p = &points[0];
        assert_eq!(p.clock.to_string(), "0.7");
        assert_eq!(p.latency, Latency::Cycles(7));
        assert_eq!(p.total_cost, 48);
        assert_eq!(p.shared_assoc, 8);
    }

    #[test]
    fn test_every_shared_associativity_yields_a_point() {
        let small = vec![rec("L1", 16, 4, Some(1.389))];
        let shared = vec![
            rec("L2", 1024, 8, Some(10.0)),
            rec("L2", 1024, 16, Some(11.0)),
            rec("L2", 2048, 8, Some(14.0)),
            rec("L2", 512, 8, Some(6.0)),
        ];
        let points = generate(&policy(vec![8]), &small, &shared);
        let shapes: Vec<_> = points.iter().map(|p| (p.shared_kb, p.shared_assoc)).collect();
        assert_eq!(shapes, vec![(1024, 8), (1024, 16), (2048, 8)]);
        // 14ns / (1/0.7) = 9.8 -> 10
        assert_eq!(points[2].latency, Latency::Cycles(10));
        assert_eq!(points[2].total_cost, 8 + 8 + 64);
    }

    #[test]
    fn test_zero_clock_propagates_infeasible() {
        let small = vec![rec("L1", 16, 4, None)];
        let shared = vec![rec("L2", 1024, 8, Some(10.0))];
        let points = generate(&policy(vec![8]), &small, &shared);
        assert_eq!(points.len(), 1);
        assert!(points[0].clock.is_zero());
        assert_eq!(points[0].latency, Latency::Infeasible);
    }

    #[test]
    fn test_unaffordable_small_level_contributes_nothing() {
        // 32 cores + 140KB leaves 832KB, below the 1024KB floor
        let small = vec![rec("L1", 140, 4, Some(1.0)), rec("L1", 16, 4, Some(1.0))];
        let shared = vec![rec("L2", 1024, 8, Some(10.0))];
        let points = generate(&policy(vec![32]), &small, &shared);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].small_kb, 16);
    }

    #[test]
    fn test_deterministic_and_within_budget() {
        let small: Vec<_> = [2u64, 4, 8, 16, 32, 64, 128]
            .iter()
            .flat_map(|&s| [2u32, 4, 8].map(|a| rec("L1", s, a, Some(0.5 + s as f64 / 100.0))))
            .collect();
        let shared: Vec<_> = [512u64, 1024, 2048, 4096]
            .iter()
            .flat_map(|&s| [8u32, 16].map(|a| rec("L2", s, a, Some(s as f64 / 200.0))))
            .collect();
        let p = BudgetPolicy::default();

        let first = generate(&p, &small, &shared);
        let second = generate(&p, &small, &shared);
        assert_eq!(first, second);
        assert!(!first.is_empty());
        for point in &first {
            assert!(point.total_cost <= p.total);
            if let Latency::Cycles(c) = point.latency {
                let access = point.shared_kb as f64 / 200.0;
                let cycle = 1.0 / point.clock.ghz();
                assert_eq!(c, (access / cycle).ceil() as u64);
            }
        }
    }
}
