// src/cli/rank.rs — `cachesweep rank`

use std::path::Path;

use crate::aggregate::rank;
use crate::infra::config::Config;
use crate::results::read_summary;
use crate::util::write_csv;

pub fn run_rank(config: &Config, summary: &Path, out: &Path) -> anyhow::Result<()> {
    let rows = read_summary(summary)?;
    let ranked = rank(&rows, &config.aggregate);
    write_csv(out, &ranked)?;

    tracing::info!(
        "Ranked {} configuration(s) with {} replicas -> {}",
        ranked.len(),
        config.aggregate.expected_replicas,
        out.display()
    );
    for (i, r) in ranked.iter().take(5).enumerate() {
        println!(
            "{:>2}. cores={} L1={}KB/A{} L2={}KB/A{} lat={} BCE={}{}  {:.4}",
            i + 1,
            r.cores,
            r.small_kb,
            r.small_assoc,
            r.shared_kb,
            r.shared_assoc,
            r.latency,
            r.total_cost,
            r.workload
                .as_deref()
                .map(|w| format!(" [{w}]"))
                .unwrap_or_default(),
            r.mean_normalized
        );
    }
    Ok(())
}
