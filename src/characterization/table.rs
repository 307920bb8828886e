// src/characterization/table.rs — Characterization table files

use std::path::Path;

use super::{canonical_order, CharacterizationRecord};
use crate::infra::errors::SweepError;
use crate::util::{read_csv, write_csv};

/// Load a characterization table written by `write_tables` (or an older
/// table without the level column).
pub fn read_table(path: &Path) -> Result<Vec<CharacterizationRecord>, SweepError> {
    read_csv(path)
}

/// Write the encounter-order table and the canonical-order table.
pub fn write_tables(
    records: &[CharacterizationRecord],
    encounter_path: &Path,
    sorted_path: &Path,
) -> Result<(), SweepError> {
    write_csv(encounter_path, records)?;
    write_csv(sorted_path, &canonical_order(records))?;
    Ok(())
}
