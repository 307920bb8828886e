// src/util.rs — Shared utility functions

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::infra::errors::{require_input, SweepError};

/// Truncate a string for display/logging (UTF-8 safe).
///
/// Returns a substring of at most `max_len` bytes, ensuring the cut
/// point falls on a valid UTF-8 character boundary.
pub fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}

/// Read every row of a headed CSV file.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SweepError> {
    require_input(path)?;
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// A row type with a fixed column order. `HEADERS` must list the serialized
/// field names in declaration order.
pub trait CsvRow: Serialize {
    const HEADERS: &'static [&'static str];
}

/// Write rows to a headed CSV file, creating parent directories. The header
/// line is written even when there are no rows.
pub fn write_csv<T: CsvRow>(path: &Path, rows: &[T]) -> Result<(), SweepError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Header line serde would emit for `row`, for checking `CsvRow::HEADERS`.
#[cfg(test)]
pub(crate) fn serialized_headers<T: Serialize>(row: &T) -> Vec<String> {
    let mut w = csv::Writer::from_writer(vec![]);
    w.serialize(row).unwrap();
    let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
    let header = out.lines().next().unwrap_or_default();
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(header.as_bytes())
        .records()
        .next()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .unwrap_or_default()
}
