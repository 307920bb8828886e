// src/cli/generate.rs — `cachesweep generate`

use std::path::Path;

use crate::characterization::table::read_table as read_characterization;
use crate::design::generator::generate;
use crate::design::table::write_table;
use crate::infra::config::Config;

pub fn run_generate(config: &Config, small: &Path, shared: &Path, out: &Path) -> anyhow::Result<()> {
    let small = read_characterization(small)?;
    let shared = read_characterization(shared)?;

    let points = generate(&config.budget, &small, &shared);
    write_table(out, &points)?;

    tracing::info!("Generated {} design point(s) -> {}", points.len(), out.display());
    Ok(())
}
