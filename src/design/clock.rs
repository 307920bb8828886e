// src/design/clock.rs — Derived clock, cycle time and shared-level latency
//
// The clock is held in tenths of a GHz so the one-decimal truncation is
// exact and survives a round trip through a table file. Infeasibility is a
// tagged state, never an f64 infinity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// CPU clock, truncated to one decimal place of GHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockGhz {
    tenths: u32,
}

impl ClockGhz {
    pub const ZERO: ClockGhz = ClockGhz { tenths: 0 };

    pub fn from_tenths(tenths: u32) -> Self {
        Self { tenths }
    }

    /// Reciprocal of the small-level access time, truncated (not rounded)
    /// to one decimal. Absent or non-positive access times give zero.
    pub fn from_access_time(access_ns: Option<f64>) -> Self {
        match access_ns {
            Some(t) if t > 0.0 && t.is_finite() => Self {
                tenths: (10.0 / t).floor() as u32,
            },
            _ => Self::ZERO,
        }
    }

    pub fn tenths(&self) -> u32 {
        self.tenths
    }

    pub fn ghz(&self) -> f64 {
        self.tenths as f64 / 10.0
    }

    pub fn is_zero(&self) -> bool {
        self.tenths == 0
    }

    pub fn cycle_time(&self) -> CycleTime {
        if self.is_zero() {
            CycleTime::Infinite
        } else {
            CycleTime::Finite(1.0 / self.ghz())
        }
    }
}

impl fmt::Display for ClockGhz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

impl FromStr for ClockGhz {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ghz: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid clock '{s}'"))?;
        if !ghz.is_finite() || ghz < 0.0 {
            return Err(format!("invalid clock '{s}'"));
        }
        // Only whole tenths are valid.
        let tenths = ghz * 10.0;
        if (tenths - tenths.round()).abs() > 1e-6 {
            return Err(format!("clock '{s}' is not a whole tenth of a GHz"));
        }
        Ok(Self {
            tenths: tenths.round() as u32,
        })
    }
}

impl Serialize for ClockGhz {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockGhz {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Clock period in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleTime {
    Finite(f64),
    Infinite,
}

/// Shared-level latency in whole cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Latency {
    Cycles(u64),
    Infeasible,
}

impl Latency {
    /// `ceil(access / cycle)`. Infeasible when the cycle time is infinite,
    /// the access time is unknown, or the result would not be positive.
    pub fn from_access_time(access_ns: Option<f64>, cycle: CycleTime) -> Self {
        let (Some(access), CycleTime::Finite(cycle_ns)) = (access_ns, cycle) else {
            return Latency::Infeasible;
        };
        if cycle_ns.is_nan() || cycle_ns <= 0.0 || !access.is_finite() {
            return Latency::Infeasible;
        }
        let cycles = (access / cycle_ns).ceil();
        if cycles >= 1.0 {
            Latency::Cycles(cycles as u64)
        } else {
            Latency::Infeasible
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, Latency::Cycles(_))
    }

    pub fn cycles(&self) -> Option<u64> {
        match self {
            Latency::Cycles(c) => Some(*c),
            Latency::Infeasible => None,
        }
    }
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Latency::Cycles(c) => write!(f, "{c}"),
            Latency::Infeasible => f.write_str("inf"),
        }
    }
}

impl FromStr for Latency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("inf") || s.eq_ignore_ascii_case("infinity") {
            return Ok(Latency::Infeasible);
        }
        if let Ok(c) = s.parse::<u64>() {
            return Ok(Latency::Cycles(c));
        }
        // Tables that mixed integers with the sentinel may carry "7.0".
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => {
                Ok(Latency::Cycles(v as u64))
            }
            _ => Err(format!("invalid latency '{s}'")),
        }
    }
}

impl Serialize for Latency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Latency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
