// src/results/mod.rs — Result extraction from simulator run directories

pub mod collect;
pub mod run_dir;
pub mod stats_report;

use std::path::Path;

pub use collect::{RunRecord, SummaryRow};
pub use run_dir::RunDirName;
pub use stats_report::{StatValue, StatsReport};

use crate::infra::errors::SweepError;
use crate::util::{read_csv, write_csv};

pub fn read_summary(path: &Path) -> Result<Vec<SummaryRow>, SweepError> {
    read_csv(path)
}

pub fn write_summary(path: &Path, rows: &[SummaryRow]) -> Result<(), SweepError> {
    write_csv(path, rows)
}
