// src/cli/stats.rs — `cachesweep stats`

use std::path::Path;

use crate::aggregate::{split_by_workload, variability};
use crate::infra::config::Config;
use crate::results::read_summary;
use crate::util::write_csv;

pub fn run_stats(
    config: &Config,
    summary: &Path,
    out: &Path,
    split_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let rows = read_summary(summary)?;

    if let Some(dir) = split_dir {
        let split = split_by_workload(&rows, &config.aggregate);
        for (workload, table) in &split {
            let path = dir.join(format!("{workload}_summary.csv"));
            write_csv(&path, table)?;
            tracing::debug!("{} row(s) -> {}", table.len(), path.display());
        }
        tracing::info!("Split {} workload(s) into {}", split.len(), dir.display());
    }

    let stats = variability(&rows, &config.aggregate);
    write_csv(out, &stats)?;
    for s in &stats {
        println!(
            "{:<10} n={:<4} mean={:<14.6e} cv={}",
            s.workload,
            s.count,
            s.mean,
            s.cv.map(|cv| format!("{cv:.4}")).unwrap_or_else(|| "-".into())
        );
    }

    tracing::info!("Statistics for {} workload(s) -> {}", stats.len(), out.display());
    Ok(())
}
