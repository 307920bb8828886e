// src/design/table.rs — Design-space table files

use std::path::Path;

use super::DesignPoint;
use crate::infra::errors::SweepError;
use crate::util::{read_csv, write_csv};

pub fn read_table(path: &Path) -> Result<Vec<DesignPoint>, SweepError> {
    read_csv(path)
}

pub fn write_table(path: &Path, points: &[DesignPoint]) -> Result<(), SweepError> {
    write_csv(path, points)
}
