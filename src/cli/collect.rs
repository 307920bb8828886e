// src/cli/collect.rs — `cachesweep collect`

use std::path::Path;

use crate::infra::config::Config;
use crate::results::collect::{scan_results, summarize};
use crate::results::write_summary;

pub fn run_collect(config: &Config, results_dir: Option<&Path>, out: &Path) -> anyhow::Result<()> {
    let results_dir = results_dir.unwrap_or(config.scheduler.results_dir.as_path());
    let records = scan_results(results_dir, &config.scheduler.stats_file)?;
    if records.is_empty() {
        tracing::warn!("No completed runs under {}", results_dir.display());
    }

    let rows = summarize(&config.budget, &records);
    write_summary(out, &rows)?;

    tracing::info!("Collected {} run(s) -> {}", rows.len(), out.display());
    Ok(())
}
