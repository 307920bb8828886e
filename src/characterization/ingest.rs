// src/characterization/ingest.rs — Characterization report ingestion
//
// Report files are named `cache_<size>k_a<assoc>_b<block>.txt` and carry
// labeled lines such as `Access time (ns): 1.389`.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::CharacterizationRecord;
use crate::infra::errors::{require_input, SweepError};

fn file_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^cache_(\d+)k_a(\d+)_b(\d+)\.txt$").expect("valid regex"))
}

fn access_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Access time\s*\(ns\):\s*([\d.]+)").expect("valid regex"))
}

fn read_energy_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Read Energy\s*\(nJ\):\s*([\d.]+)").expect("valid regex"))
}

/// Cache organisation encoded in a report file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportName {
    pub size_kb: u64,
    pub associativity: u32,
    pub block_bytes: u32,
}

/// Decode a report file name; `None` for names outside the pattern.
pub fn parse_report_name(file_name: &str) -> Option<ReportName> {
    let caps = file_name_re().captures(file_name)?;
    Some(ReportName {
        size_kb: caps[1].parse().ok()?,
        associativity: caps[2].parse().ok()?,
        block_bytes: caps[3].parse().ok()?,
    })
}

fn labeled_value(re: &Regex, content: &str) -> Option<f64> {
    re.captures(content)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

/// Build a record from a report body. Missing labels become `None`.
pub fn parse_report(level: &str, name: ReportName, content: &str) -> CharacterizationRecord {
    CharacterizationRecord {
        level: level.to_string(),
        size_kb: name.size_kb,
        associativity: name.associativity,
        block_bytes: name.block_bytes,
        access_time_ns: labeled_value(access_time_re(), content),
        read_energy_nj: labeled_value(read_energy_re(), content),
    }
}

/// Result of scanning a report directory.
#[derive(Debug, Default)]
pub struct Ingested {
    /// Records in file-encounter order.
    pub records: Vec<CharacterizationRecord>,
    /// Files that did not match the naming pattern or could not be read.
    pub skipped: Vec<PathBuf>,
}

/// Parse every `*.txt` report under `dir`. Encounter order is the
/// lexicographic path order yielded by the glob walk, so it is reproducible.
pub fn ingest_dir(dir: &Path, level: &str) -> Result<Ingested, SweepError> {
    require_input(dir)?;

    let pattern = dir.join("*.txt");
    let pattern = pattern.to_string_lossy();
    let entries = glob::glob(&pattern)
        .map_err(|e| SweepError::Config(format!("bad report pattern '{pattern}': {e}")))?;

    let mut ingested = Ingested::default();
    for entry in entries {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Unreadable report entry: {}", e);
                continue;
            }
        };

        let Some(name) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_report_name)
        else {
            tracing::debug!("Skipping {} (name outside pattern)", path.display());
            ingested.skipped.push(path);
            continue;
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Skipping unreadable report {}: {}", path.display(), e);
                ingested.skipped.push(path);
                continue;
            }
        };
        let record = parse_report(level, name, &content);
        if record.access_time_ns.is_none() {
            tracing::warn!("{}: no access time found", path.display());
        }
        if record.read_energy_nj.is_none() {
            tracing::warn!("{}: no read energy found", path.display());
        }
        ingested.records.push(record);
    }

    Ok(ingested)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
Cache size                    : 16384
Block size                    : 32
Associativity                 : 4
  Access time (ns): 1.389
  Cycle time (ns):  0.9
  Total dynamic read energy per access (nJ): 0.02
  Read Energy (nJ): 0.0123
";

    #[test]
    fn test_parse_report_name() {
        assert_eq!(
            parse_report_name("cache_16k_a4_b32.txt"),
            Some(ReportName {
                size_kb: 16,
                associativity: 4,
                block_bytes: 32
            })
        );
        assert_eq!(parse_report_name("cache_16k_a4_b32.cfg"), None);
        assert_eq!(parse_report_name("notes.txt"), None);
        assert_eq!(parse_report_name("xcache_16k_a4_b32.txt"), None);
    }

    #[test]
    fn test_parse_report_fields() {
        let name = parse_report_name("cache_16k_a4_b32.txt").unwrap();
        let r = parse_report("L1", name, REPORT);
        assert_eq!(r.level, "L1");
        assert_eq!(r.access_time_ns, Some(1.389));
        assert_eq!(r.read_energy_nj, Some(0.0123));
    }

    #[test]
    fn test_missing_label_is_absent() {
        let name = parse_report_name("cache_2k_a2_b32.txt").unwrap();
        let r = parse_report("L1", name, "ERROR: no valid cache organisation\n");
        assert_eq!(r.access_time_ns, None);
        assert_eq!(r.read_energy_nj, None);
        assert_eq!(r.size_kb, 2);
    }

    #[test]
    fn test_ingest_dir_skips_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cache_8k_a2_b32.txt"), REPORT).unwrap();
        std::fs::write(dir.path().join("cache_4k_a8_b32.txt"), REPORT).unwrap();
        std::fs::write(dir.path().join("readme.txt"), "hello").unwrap();
        std::fs::write(dir.path().join("cache_4k_a8_b32.cfg"), "cfg").unwrap();

        let ingested = ingest_dir(dir.path(), "L1").unwrap();
        let keys: Vec<_> = ingested.records.iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec![(4, 8, 32), (8, 2, 32)]);
        assert_eq!(ingested.skipped.len(), 1);
    }

    #[test]
    fn test_unreadable_report_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cache_16k_a4_b32.txt"), REPORT).unwrap();
        std::fs::write(dir.path().join("cache_8k_a4_b32.txt"), b"Access time \xff\xfe").unwrap();

        let ingested = ingest_dir(dir.path(), "L1").unwrap();
        assert_eq!(ingested.records.len(), 1);
        assert_eq!(ingested.records[0].size_kb, 16);
        assert_eq!(ingested.skipped.len(), 1);
        assert!(ingested.skipped[0].ends_with("cache_8k_a4_b32.txt"));
    }

    #[test]
    fn test_ingest_missing_dir_is_fatal() {
        let err = ingest_dir(Path::new("/definitely/not/here"), "L1").unwrap_err();
        assert!(err.is_missing_input());
    }
}
