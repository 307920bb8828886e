// src/cli/filter.rs — `cachesweep filter`

use std::path::Path;

use crate::design::filter::filter_points;
use crate::design::table::{read_table, write_table};

pub fn run_filter(input: &Path, out: &Path, cores: &[u32], small_sizes: &[u64]) -> anyhow::Result<()> {
    let points = read_table(input)?;
    let kept = filter_points(&points, cores, small_sizes);
    write_table(out, &kept)?;

    tracing::info!(
        "Kept {} of {} design point(s) -> {}",
        kept.len(),
        points.len(),
        out.display()
    );
    Ok(())
}
