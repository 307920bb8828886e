// src/results/stats_report.rs — Simulator statistics report parsing
//
// Lines look like `sim_seconds    0.123456    # Number of seconds simulated`.
// Anything without a trailing `#` comment is ignored.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

fn stat_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\S+)\s+(\S+)\s+#\s*(.*)").expect("valid regex"))
}

/// A single statistic value, coerced from its text form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl StatValue {
    /// Values with a decimal point are floats, other numerals integers,
    /// everything else stays text.
    pub fn coerce(raw: &str) -> Self {
        if raw.contains('.') {
            raw.parse::<f64>()
                .map(StatValue::Float)
                .unwrap_or_else(|_| StatValue::Text(raw.to_string()))
        } else {
            raw.parse::<i64>()
                .map(StatValue::Int)
                .unwrap_or_else(|_| StatValue::Text(raw.to_string()))
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Int(v) => Some(*v as f64),
            StatValue::Float(v) => Some(*v),
            StatValue::Text(_) => None,
        }
    }
}

/// Flat key → value mapping. Later duplicates overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsReport {
    entries: BTreeMap<String, StatValue>,
}

impl StatsReport {
    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in text.lines() {
            if let Some(caps) = stat_line_re().captures(line) {
                entries.insert(caps[1].to_string(), StatValue::coerce(&caps[2]));
            }
        }
        Self { entries }
    }

    /// Read the report at `path`. Absent, empty, or statistic-free reports
    /// are `None`: the run produced no measurable result.
    pub fn read(path: &Path) -> std::io::Result<Option<Self>> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let report = Self::parse(&text);
        Ok((!report.is_empty()).then_some(report))
    }

    pub fn get(&self, key: &str) -> Option<&StatValue> {
        self.entries.get(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(StatValue::as_f64)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
