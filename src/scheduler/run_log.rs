// src/scheduler/run_log.rs — Append-only JSON-lines record of a batch
//
// One line per attempted pair, written as soon as the pair finishes, so an
// interrupted batch still leaves a record of everything it got through.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::RunOutcome;
use crate::infra::errors::SweepError;

pub const RUN_LOG_NAME: &str = "run-log.jsonl";

pub struct RunLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RunLog {
    /// Open (creating if needed) the log inside `dir`, appending to any
    /// previous batches.
    pub fn open(dir: &Path) -> Result<Self, SweepError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(RUN_LOG_NAME);
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, outcome: &RunOutcome) -> Result<(), SweepError> {
        let line = serde_json::to_string(outcome).map_err(anyhow::Error::from)?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Read back every entry as loose JSON. Lines that fail to parse are skipped.
pub fn read_log(path: &Path) -> Result<Vec<serde_json::Value>, SweepError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect())
}
