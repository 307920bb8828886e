// src/cli/ingest.rs — `cachesweep ingest`

use std::path::{Path, PathBuf};

use crate::characterization::{ingest::ingest_dir, table::write_tables};

pub fn run_ingest(
    dir: &Path,
    level: &str,
    out: Option<&Path>,
    sorted_out: Option<&Path>,
) -> anyhow::Result<()> {
    let ingested = ingest_dir(dir, level)?;

    let out: PathBuf = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("{level}_cache_results.csv")));
    let sorted_out: PathBuf = sorted_out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("{level}_cache_results_sorted.csv")));

    write_tables(&ingested.records, &out, &sorted_out)?;

    tracing::info!(
        "Ingested {} report(s) ({} skipped) -> {}, {}",
        ingested.records.len(),
        ingested.skipped.len(),
        out.display(),
        sorted_out.display()
    );
    Ok(())
}
