// src/cli/run.rs — `cachesweep run`
//
// Drives the scheduler over a design-space table with real processes and
// records every outcome in the results directory's run log.

use std::path::Path;

use super::progress::{print_summary, terminal_progress};
use crate::design::table::read_table;
use crate::design::DesignPoint;
use crate::infra::config::Config;
use crate::scheduler::run_log::RunLog;
use crate::scheduler::runner::{check_prerequisites, ProcessRunner, SimulatorRunner};
use crate::scheduler::{BatchSummary, RunOutcome, Scheduler};

pub async fn run_schedule(config: &Config, input: &Path, dry_run: bool) -> anyhow::Result<()> {
    let points = read_table(input)?;
    if !dry_run {
        check_prerequisites(&config.scheduler)?;
    }

    tracing::info!(
        "Scheduling {} design point(s) x {} workload(s){}",
        points.len(),
        config.workloads.len(),
        if dry_run { " (dry run)" } else { "" }
    );

    let outcomes = schedule(config, ProcessRunner::new(), &points, dry_run).await?;
    print_summary(&BatchSummary::from_outcomes(&outcomes));
    Ok(())
}

/// Run the batch with any runner, appending to the run log as pairs finish.
/// A dry run leaves the results directory untouched.
pub async fn schedule<R: SimulatorRunner>(
    config: &Config,
    runner: R,
    points: &[DesignPoint],
    dry_run: bool,
) -> anyhow::Result<Vec<RunOutcome>> {
    let mut log = if dry_run {
        None
    } else {
        Some(RunLog::open(&config.scheduler.results_dir)?)
    };

    let mut progress = terminal_progress();
    let mut log_incomplete = false;
    let scheduler = Scheduler::new(config, runner).dry_run(dry_run);
    let outcomes = scheduler
        .run(points, |outcome| {
            progress(outcome);
            if let Some(log) = log.as_mut() {
                if let Err(e) = log.append(outcome) {
                    tracing::warn!("Run log write failed: {}", e);
                    log_incomplete = true;
                }
            }
        })
        .await;

    if let Some(log) = &log {
        if log_incomplete {
            tracing::warn!("Run log {} is incomplete", log.path().display());
        } else {
            tracing::info!("Run log: {}", log.path().display());
        }
    }
    Ok(outcomes)
}
