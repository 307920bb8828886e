// src/cli/progress.rs — Terminal rendering of scheduler outcomes

use crate::scheduler::{BatchSummary, RunOutcome, RunStatus};

/// One-line description of a finished pair, written to stderr so stdout
/// stays clean.
pub fn describe(outcome: &RunOutcome) -> String {
    let p = &outcome.point;
    let config = format!(
        "cores={} L1={}KB/A{} L2={}KB/A{} lat={} {}",
        p.cores, p.small_kb, p.small_assoc, p.shared_kb, p.shared_assoc, p.latency, outcome.workload
    );
    match &outcome.status {
        RunStatus::Skipped { reason } => format!("[skip] {config}: {reason}"),
        RunStatus::DryRun => format!("[plan] {config} (predicted {})", outcome.prediction),
        RunStatus::LaunchFailed { message } => format!("[fail] {config}: {message}"),
        RunStatus::Failed { exit_code, .. } => match exit_code {
            Some(code) => format!("[fail] {config}: exit {code}"),
            None => format!("[fail] {config}: killed by signal"),
        },
        RunStatus::NoResult => format!("[none] {config}: no statistics"),
        RunStatus::Completed { stats } => {
            format!("[done] {config} ({} stats, {}ms)", stats.len(), outcome.elapsed_ms)
        }
    }
}

pub fn terminal_progress() -> impl FnMut(&RunOutcome) {
    |outcome: &RunOutcome| eprintln!("{}", describe(outcome))
}

pub fn print_summary(summary: &BatchSummary) {
    eprintln!(
        "[batch] {} pair(s): {} completed, {} skipped, {} failed, {} without result, {} planned",
        summary.attempted,
        summary.completed,
        summary.skipped,
        summary.failed,
        summary.no_result,
        summary.dry_run,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{ClockGhz, DesignPoint, Latency};
    use crate::results::StatsReport;
    use crate::scheduler::admission::{Prediction, SkipReason};
    use chrono::Utc;

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
            prediction: Prediction::Seconds(265.34),
            run_dir: None,
            status,
            started_at: Utc::now(),
            elapsed_ms: 12,
        }
    }

    #[test]
    fn test_describe_statuses() {
        assert_eq!(
            describe(&outcome(RunStatus::DryRun)),
            "[plan] cores=8 L1=16KB/A4 L2=1024KB/A8 lat=7 radix (predicted 265.34s)"
        );
        assert!(describe(&outcome(RunStatus::Skipped {
            reason: SkipReason::InfeasibleLatency
        }))
        .starts_with("[skip]"));
        assert!(describe(&outcome(RunStatus::Failed {
            exit_code: Some(2),
            stdout: String::new(),
            stderr: String::new(),
        }))
        .ends_with("exit 2"));
        assert!(describe(&outcome(RunStatus::Completed {
            stats: StatsReport::parse("a 1 # x\n")
        }))
        .contains("(1 stats, 12ms)"));
    }
}
