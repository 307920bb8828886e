// src/scheduler/mod.rs — Predictive simulation scheduler
//
// Walks every (design point, workload) pair strictly in order: evaluate the
// admission gates, launch the simulator for admitted pairs, wait for it,
// then look for its statistics report. No failure of a single pair stops
// the batch.

pub mod admission;
pub mod run_log;
pub mod runner;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::design::DesignPoint;
use crate::infra::config::{Config, Metric, WorkloadConfig};
use crate::results::{RunDirName, StatsReport};
use crate::util::truncate_str;
use admission::{evaluate, Admission, Prediction, SkipReason};
use runner::{build_invocation, SimulatorRunner};

/// How a single pair ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    Skipped {
        #[serde(flatten)]
        reason: SkipReason,
    },
    /// Admitted, but nothing was launched.
    DryRun,
    /// The process could not be started (or its directory created).
    LaunchFailed { message: String },
    /// The process exited unsuccessfully.
    Failed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// Clean exit without a usable statistics report.
    NoResult,
    Completed { stats: StatsReport },
}

/// One attempted (design point, workload) pair.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub point: DesignPoint,
    pub workload: String,
    pub prediction: Prediction,
    pub run_dir: Option<PathBuf>,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl RunOutcome {
    pub fn admitted(&self) -> bool {
        !matches!(self.status, RunStatus::Skipped { .. })
    }

    pub fn stats(&self) -> Option<&StatsReport> {
        match &self.status {
            RunStatus::Completed { stats } => Some(stats),
            _ => None,
        }
    }

    /// Summary metric of a completed run; absent for every other status.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.stats().and_then(|s| s.get_f64(metric.key()))
    }
}

/// Tallies printed at the end of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub skipped: usize,
    pub completed: usize,
    pub no_result: usize,
    pub failed: usize,
    pub dry_run: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[RunOutcome]) -> Self {
        let mut s = Self {
            attempted: outcomes.len(),
            ..Self::default()
        };
        for o in outcomes {
            match o.status {
                RunStatus::Skipped { .. } => s.skipped += 1,
                RunStatus::DryRun => s.dry_run += 1,
                RunStatus::LaunchFailed { .. } | RunStatus::Failed { .. } => s.failed += 1,
                RunStatus::NoResult => s.no_result += 1,
                RunStatus::Completed { .. } => s.completed += 1,
            }
        }
        s
    }
}

/// Report already present in a run directory. The directory name does not
/// encode block size or clock, so two points can share it and the later run
/// overwrites the earlier report.
pub fn existing_report(out_dir: &Path, stats_file: &Path) -> Option<PathBuf> {
    let path = out_dir.join(stats_file);
    path.is_file().then_some(path)
}

pub struct Scheduler<'a, R: SimulatorRunner> {
    config: &'a Config,
    runner: R,
    dry_run: bool,
}

impl<'a, R: SimulatorRunner> Scheduler<'a, R> {
    pub fn new(config: &'a Config, runner: R) -> Self {
        Self {
            config,
            runner,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run every pair in design-space order, workloads in configured order.
    /// `on_outcome` sees each outcome as soon as its pair finishes.
    pub async fn run<F>(&self, points: &[DesignPoint], mut on_outcome: F) -> Vec<RunOutcome>
    where
        F: FnMut(&RunOutcome),
    {
        let total = points.len() * self.config.workloads.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut index = 0usize;

        for point in points {
            for workload in &self.config.workloads {
                index += 1;
                let outcome = self.run_pair(point, workload, index, total).await;
                on_outcome(&outcome);
                outcomes.push(outcome);
            }
        }

        outcomes
    }

    async fn run_pair(
        &self,
        point: &DesignPoint,
        workload: &WorkloadConfig,
        index: usize,
        total: usize,
    ) -> RunOutcome {
        let started_at = Utc::now();
        let clock = Instant::now();
        let sched = &self.config.scheduler;
        let dir_name = RunDirName::new(point.identity(), workload.name.as_str());

        let finish = |prediction, run_dir, status| RunOutcome {
            point: point.clone(),
            workload: workload.name.clone(),
            prediction,
            run_dir,
            status,
            started_at,
            elapsed_ms: clock.elapsed().as_millis() as u64,
        };

        let prediction = match evaluate(point, workload, sched) {
            Admission::Skip { reason, prediction } => {
                tracing::info!("({}/{}) Skip {}: {}", index, total, dir_name, reason);
                return finish(prediction, None, RunStatus::Skipped { reason });
            }
            Admission::Admit { prediction } => prediction,
        };

        if self.dry_run {
            tracing::info!(
                "({}/{}) Would run {} (predicted {})",
                index,
                total,
                dir_name,
                prediction
            );
            return finish(prediction, None, RunStatus::DryRun);
        }

        let out_dir = sched.results_dir.join(dir_name.to_string());
        if let Err(e) = std::fs::create_dir_all(&out_dir) {
            tracing::warn!("({}/{}) Cannot create {}: {}", index, total, out_dir.display(), e);
            return finish(
                prediction,
                Some(out_dir),
                RunStatus::LaunchFailed {
                    message: e.to_string(),
                },
            );
        }

        if let Some(stale) = existing_report(&out_dir, &sched.stats_file) {
            tracing::warn!(
                "({}/{}) {} already holds {}; this run will overwrite it",
                index,
                total,
                dir_name,
                stale.display()
            );
        }

        let invocation = build_invocation(sched, point, workload, &out_dir);
        tracing::info!(
            "({}/{}) Running {} (predicted {})",
            index,
            total,
            dir_name,
            prediction
        );

        let status = match self.runner.run(&invocation).await {
            Err(e) => {
                tracing::warn!("Launch failed for {}: {}", dir_name, e);
                RunStatus::LaunchFailed {
                    message: e.to_string(),
                }
            }
            Ok(output) if !output.success => {
                tracing::warn!(
                    "Simulation {} exited with {:?}: {}",
                    dir_name,
                    output.exit_code,
                    truncate_str(output.stderr.trim(), 500)
                );
                RunStatus::Failed {
                    exit_code: output.exit_code,
                    stdout: output.stdout,
                    stderr: output.stderr,
                }
            }
            Ok(_) => {
                let stats_path = out_dir.join(&sched.stats_file);
                match StatsReport::read(&stats_path) {
                    Ok(Some(stats)) => RunStatus::Completed { stats },
                    Ok(None) => {
                        tracing::warn!("No statistics produced at {}", stats_path.display());
                        RunStatus::NoResult
                    }
                    Err(e) => {
                        tracing::warn!("Cannot read {}: {}", stats_path.display(), e);
                        RunStatus::NoResult
                    }
                }
            }
        };

        finish(prediction, Some(out_dir), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{ClockGhz, Latency};

    fn outcome(status: RunStatus) -> RunOutcome {
        RunOutcome {
            point: DesignPoint {
                cores: 8,
                clock: ClockGhz::from_tenths(7),
                small_kb: 16,
                small_assoc: 4,
                shared_kb: 1024,
                shared_assoc: 8,
                latency: Latency::Cycles(7),
                total_cost: 48,
            },
            workload: "radix".into(),
            prediction: Prediction::Unavailable,
            run_dir: None,
            status,
            started_at: Utc::now(),
            elapsed_ms: 0,
        }
    }

    #[test]
    fn test_metric_only_for_completed_runs() {
        let stats = StatsReport::parse("sim_ticks 100 # t\n");
        let done = outcome(RunStatus::Completed { stats });
        assert!(done.admitted());
        assert_eq!(done.metric(Metric::SimTicks), Some(100.0));
        assert_eq!(done.metric(Metric::SimSeconds), None);

        let failed = outcome(RunStatus::Failed {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "boom".into(),
        });
        assert!(failed.admitted());
        assert_eq!(failed.metric(Metric::SimTicks), None);

        let skipped = outcome(RunStatus::Skipped {
            reason: SkipReason::InfeasibleLatency,
        });
        assert!(!skipped.admitted());
        assert!(skipped.stats().is_none());
    }

    #[test]
    fn test_batch_summary() {
        let outcomes = vec![
            outcome(RunStatus::NoResult),
            outcome(RunStatus::DryRun),
            outcome(RunStatus::LaunchFailed {
                message: "x".into(),
            }),
            outcome(RunStatus::Skipped {
                reason: SkipReason::InfiniteRuntime,
            }),
        ];
        let s = BatchSummary::from_outcomes(&outcomes);
        assert_eq!(
            s,
            BatchSummary {
                attempted: 4,
                skipped: 1,
                completed: 0,
                no_result: 1,
                failed: 1,
                dry_run: 1,
            }
        );
    }

    #[test]
    fn test_existing_report_detected() {
        let dir = tempfile::tempdir().unwrap();
        let stats = Path::new("stats.txt");
        assert_eq!(existing_report(dir.path(), stats), None);
        std::fs::write(dir.path().join("stats.txt"), "sim_ticks 1 # t\n").unwrap();
        assert_eq!(
            existing_report(dir.path(), stats),
            Some(dir.path().join("stats.txt"))
        );
    }

    #[test]
    fn test_skipped_outcome_json() {
        let o = outcome(RunStatus::Skipped {
            reason: SkipReason::PredictedTooLong {
                predicted_seconds: 700.0,
                threshold_seconds: 600.0,
            },
        });
        let v = serde_json::to_value(&o.status).unwrap();
        assert_eq!(v["status"], "skipped");
        assert_eq!(v["reason"], "predicted_too_long");
        assert_eq!(v["threshold_seconds"], 600.0);
    }
}
