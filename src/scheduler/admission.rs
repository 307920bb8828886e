// src/scheduler/admission.rs — Predictive admission gates
//
// A (design point, workload) pair is skipped iff its latency is infeasible,
// its clock is below the configured minimum, or its predicted runtime
// reaches the workload's own threshold. Lack of a baseline never skips.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::design::{ClockGhz, DesignPoint};
use crate::infra::config::{SchedulerConfig, WorkloadConfig};

/// Predicted wall-clock runtime of one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "seconds", rename_all = "snake_case")]
pub enum Prediction {
    /// No baseline for this (workload, core count).
    Unavailable,
    /// Baseline exists but the clock is zero.
    Infinite,
    Seconds(f64),
}

impl Prediction {
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Prediction::Seconds(s) => Some(*s),
            _ => None,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Unavailable => f.write_str("n/a"),
            Prediction::Infinite => f.write_str("inf"),
            Prediction::Seconds(s) => write!(f, "{s:.2}s"),
        }
    }
}

/// Scale the baseline runtime by the clock ratio.
pub fn predict_runtime(
    workload: &WorkloadConfig,
    cores: u32,
    clock: ClockGhz,
    baseline_clock_ghz: f64,
) -> Prediction {
    let Some(baseline) = workload.baseline_for(cores) else {
        return Prediction::Unavailable;
    };
    if clock.is_zero() {
        return Prediction::Infinite;
    }
    Prediction::Seconds(baseline * (baseline_clock_ghz / clock.ghz()))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    InfeasibleLatency,
    ClockBelowMinimum { clock_ghz: f64, minimum_ghz: f64 },
    InfiniteRuntime,
    PredictedTooLong { predicted_seconds: f64, threshold_seconds: f64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InfeasibleLatency => f.write_str("shared-level latency is infinite"),
            SkipReason::ClockBelowMinimum {
                clock_ghz,
                minimum_ghz,
            } => write!(f, "clock too low ({clock_ghz}GHz < {minimum_ghz}GHz)"),
            SkipReason::InfiniteRuntime => f.write_str("clock is 0, runtime predicted infinite"),
            SkipReason::PredictedTooLong {
                predicted_seconds,
                threshold_seconds,
            } => write!(
                f,
                "predicted runtime too long ({predicted_seconds:.2}s >= {threshold_seconds}s)"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    Admit { prediction: Prediction },
    Skip { reason: SkipReason, prediction: Prediction },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admit { .. })
    }

    pub fn prediction(&self) -> Prediction {
        match self {
            Admission::Admit { prediction } | Admission::Skip { prediction, .. } => *prediction,
        }
    }
}

/// Evaluate the gates in order: feasibility, then runtime prediction.
pub fn evaluate(point: &DesignPoint, workload: &WorkloadConfig, config: &SchedulerConfig) -> Admission {
    if !point.latency.is_feasible() {
        return Admission::Skip {
            reason: SkipReason::InfeasibleLatency,
            prediction: Prediction::Unavailable,
        };
    }
    if point.clock.ghz() < config.min_clock_ghz {
        return Admission::Skip {
            reason: SkipReason::ClockBelowMinimum {
                clock_ghz: point.clock.ghz(),
                minimum_ghz: config.min_clock_ghz,
            },
            prediction: Prediction::Unavailable,
        };
    }

    let prediction = predict_runtime(workload, point.cores, point.clock, config.baseline_clock_ghz);
    match prediction {
        Prediction::Infinite => Admission::Skip {
            reason: SkipReason::InfiniteRuntime,
            prediction,
        },
        Prediction::Seconds(predicted) => match workload.skip_threshold_seconds {
            Some(threshold) if predicted >= threshold => Admission::Skip {
                reason: SkipReason::PredictedTooLong {
                    predicted_seconds: predicted,
                    threshold_seconds: threshold,
                },
                prediction,
            },
            _ => Admission::Admit { prediction },
        },
        Prediction::Unavailable => Admission::Admit { prediction },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Latency;
    use crate::infra::config::{Baseline, Config, InvocationShape};

    fn point(cores: u32, tenths: u32, latency: Latency) -> DesignPoint {
        DesignPoint {
            cores,
            clock: ClockGhz::from_tenths(tenths),
            small_kb: 16,
            small_assoc: 4,
            shared_kb: 1024,
            shared_assoc: 8,
            latency,
            total_cost: 48,
        }
    }

    fn toy(threshold: Option<f64>) -> WorkloadConfig {
        WorkloadConfig {
            name: "toy".into(),
            command: "./toy".into(),
            options: "-p{cores}".into(),
            invocation: InvocationShape::Args,
            skip_threshold_seconds: threshold,
            baselines: vec![Baseline {
                cores: 8,
                seconds: 100.0,
            }],
        }
    }

    #[test]
    fn test_prediction_scales_with_clock() {
        let w = toy(None);
        let p = predict_runtime(&w, 8, ClockGhz::from_tenths(9), 0.72);
        assert!((p.seconds().unwrap() - 80.0).abs() < 1e-9);
        assert_eq!(predict_runtime(&w, 16, ClockGhz::from_tenths(9), 0.72), Prediction::Unavailable);
        assert_eq!(predict_runtime(&w, 8, ClockGhz::ZERO, 0.72), Prediction::Infinite);
    }

    #[test]
    fn test_faster_clock_predicts_shorter_runtime() {
        let c = Config::default();
        for w in &c.workloads {
            for b in &w.baselines {
                let slow = predict_runtime(w, b.cores, ClockGhz::from_tenths(7), 0.72);
                let fast = predict_runtime(w, b.cores, ClockGhz::from_tenths(12), 0.72);
                assert!(fast.seconds().unwrap() < slow.seconds().unwrap());
            }
        }
    }

    #[test]
    fn test_infeasible_latency_skips_first() {
        let cfg = SchedulerConfig::default();
        let a = evaluate(&point(8, 0, Latency::Infeasible), &toy(Some(1.0)), &cfg);
        assert!(matches!(
            a,
            Admission::Skip {
                reason: SkipReason::InfeasibleLatency,
                ..
            }
        ));
    }

    #[test]
    fn test_low_clock_skips() {
        let cfg = SchedulerConfig::default();
        let a = evaluate(&point(8, 6, Latency::Cycles(5)), &toy(None), &cfg);
        assert!(matches!(
            a,
            Admission::Skip {
                reason: SkipReason::ClockBelowMinimum { .. },
                ..
            }
        ));
        // exactly at the minimum is admitted
        assert!(evaluate(&point(8, 7, Latency::Cycles(7)), &toy(None), &cfg).is_admitted());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let cfg = SchedulerConfig {
            baseline_clock_ghz: 1.0,
            ..SchedulerConfig::default()
        };
        // 100s * 1.0 / 1.0 = 100s
        let at = evaluate(&point(8, 10, Latency::Cycles(9)), &toy(Some(100.0)), &cfg);
        assert!(matches!(
            at,
            Admission::Skip {
                reason: SkipReason::PredictedTooLong { .. },
                ..
            }
        ));
        let below = evaluate(&point(8, 10, Latency::Cycles(9)), &toy(Some(100.5)), &cfg);
        assert!(below.is_admitted());
        assert_eq!(below.prediction(), Prediction::Seconds(100.0));
    }

    #[test]
    fn test_missing_baseline_never_skips() {
        let cfg = SchedulerConfig::default();
        let a = evaluate(&point(32, 8, Latency::Cycles(9)), &toy(Some(0.0)), &cfg);
        assert_eq!(
            a,
            Admission::Admit {
                prediction: Prediction::Unavailable
            }
        );
    }

    #[test]
    fn test_zero_clock_with_permissive_minimum() {
        let cfg = SchedulerConfig {
            min_clock_ghz: 0.0,
            ..SchedulerConfig::default()
        };
        let a = evaluate(&point(8, 0, Latency::Cycles(3)), &toy(None), &cfg);
        assert!(matches!(
            a,
            Admission::Skip {
                reason: SkipReason::InfiniteRuntime,
                ..
            }
        ));
    }

    #[test]
    fn test_reference_radix_admission() {
        let c = Config::default();
        let radix = c.workload("radix").unwrap();
        // 257.971 * 0.72 / 0.7 = 265.3s < 600s
        let a = evaluate(&point(8, 7, Latency::Cycles(7)), radix, &c.scheduler);
        assert!(a.is_admitted());
        let secs = a.prediction().seconds().unwrap();
        assert!((secs - 265.3416).abs() < 1e-3);

        // cholesky at 16 cores: 1456.641 * 0.72 / 0.7 = 1498.3s < 2400s
        let cholesky = c.workload("cholesky").unwrap();
        assert!(evaluate(&point(16, 7, Latency::Cycles(7)), cholesky, &c.scheduler).is_admitted());

        // fmm at 32 cores: 593.797 * 0.72 / 0.7 = 610.8s < 900s
        let fmm = c.workload("fmm").unwrap();
        assert!(evaluate(&point(32, 7, Latency::Cycles(7)), fmm, &c.scheduler).is_admitted());
    }
}
