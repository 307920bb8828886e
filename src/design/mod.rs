// src/design/mod.rs — Design-space generation

pub mod budget;
pub mod clock;
pub mod filter;
pub mod generator;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::util::CsvRow;

pub use clock::{ClockGhz, CycleTime, Latency};

/// One hardware configuration candidate. Never mutated once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPoint {
    #[serde(rename = "Core Number")]
    pub cores: u32,
    #[serde(rename = "CPU clock (GHz)")]
    pub clock: ClockGhz,
    #[serde(rename = "L1 Cache Size (KB)")]
    pub small_kb: u64,
    #[serde(rename = "L1 Associativity")]
    pub small_assoc: u32,
    #[serde(rename = "L2 Cache Size (KB)")]
    pub shared_kb: u64,
    #[serde(rename = "L2 Associativity")]
    pub shared_assoc: u32,
    #[serde(rename = "L2 latency (cycles)")]
    pub latency: Latency,
    #[serde(rename = "Total BCE Cost")]
    pub total_cost: u64,
}

impl CsvRow for DesignPoint {
    const HEADERS: &'static [&'static str] = &[
        "Core Number",
        "CPU clock (GHz)",
        "L1 Cache Size (KB)",
        "L1 Associativity",
        "L2 Cache Size (KB)",
        "L2 Associativity",
        "L2 latency (cycles)",
        "Total BCE Cost",
    ];
}

impl DesignPoint {
    /// Identity fields without the derived clock and cost.
    pub fn identity(&self) -> ConfigIdentity {
        ConfigIdentity {
            cores: self.cores,
            small_kb: self.small_kb,
            small_assoc: self.small_assoc,
            shared_kb: self.shared_kb,
            shared_assoc: self.shared_assoc,
            latency: self.latency,
        }
    }
}

/// Fields that identify a configuration across the run directory round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConfigIdentity {
    #[serde(rename = "Core Number")]
    pub cores: u32,
    #[serde(rename = "L1 Cache Size (KB)")]
    pub small_kb: u64,
    #[serde(rename = "L1 Associativity")]
    pub small_assoc: u32,
    #[serde(rename = "L2 Cache Size (KB)")]
    pub shared_kb: u64,
    #[serde(rename = "L2 Associativity")]
    pub shared_assoc: u32,
    #[serde(rename = "L2 latency (cycles)")]
    pub latency: Latency,
}
