// src/results/run_dir.rs — Run output directory naming
//
// `core<N>_L1-<kb>KB-A<assoc>_L2-<kb>KB-A<assoc>_Lat<cycles|inf>_Bench-<name>`
// is the only place a run's configuration is recorded, so encoding and
// decoding must round-trip exactly.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::design::{ConfigIdentity, Latency};

fn run_dir_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^core(\d+)_L1-(\d+)KB-A(\d+)_L2-(\d+)KB-A(\d+)_Lat(\d+|inf)_Bench-(\w+)$")
            .expect("valid regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunDirName {
    pub identity: ConfigIdentity,
    pub workload: String,
}

impl RunDirName {
    pub fn new(identity: ConfigIdentity, workload: impl Into<String>) -> Self {
        Self {
            identity,
            workload: workload.into(),
        }
    }

    /// Decode a directory name; `None` when it does not follow the pattern.
    pub fn parse(name: &str) -> Option<Self> {
        let caps = run_dir_re().captures(name)?;
        let identity = ConfigIdentity {
            cores: caps[1].parse().ok()?,
            small_kb: caps[2].parse().ok()?,
            small_assoc: caps[3].parse().ok()?,
            shared_kb: caps[4].parse().ok()?,
            shared_assoc: caps[5].parse().ok()?,
            latency: caps[6].parse::<Latency>().ok()?,
        };
        Some(Self::new(identity, &caps[7]))
    }
}

impl fmt::Display for RunDirName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = &self.identity;
        write!(
            f,
            "core{}_L1-{}KB-A{}_L2-{}KB-A{}_Lat{}_Bench-{}",
            id.cores,
            id.small_kb,
            id.small_assoc,
            id.shared_kb,
            id.shared_assoc,
            id.latency,
            self.workload
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(latency: Latency) -> ConfigIdentity {
        ConfigIdentity {
            cores: 8,
            small_kb: 16,
            small_assoc: 4,
            shared_kb: 1024,
            shared_assoc: 8,
            latency,
        }
    }

    #[test]
    fn test_reference_name() {
        let parsed = RunDirName::parse("core8_L1-16KB-A4_L2-1024KB-A8_Lat7_Bench-radix").unwrap();
        assert_eq!(parsed.identity, identity(Latency::Cycles(7)));
        assert_eq!(parsed.workload, "radix");
    }

    #[test]
    fn test_encode_matches_decode() {
        let name = RunDirName::new(identity(Latency::Cycles(12)), "ocean");
        let text = name.to_string();
        assert_eq!(text, "core8_L1-16KB-A4_L2-1024KB-A8_Lat12_Bench-ocean");
        assert_eq!(RunDirName::parse(&text), Some(name));

        let inf = RunDirName::new(identity(Latency::Infeasible), "fmm");
        assert_eq!(RunDirName::parse(&inf.to_string()), Some(inf));
    }

    #[test]
    fn test_foreign_names_rejected() {
        assert!(RunDirName::parse("core8_L1-16KB-A4_L2-1024KB-A8_Lat7").is_none());
        assert!(RunDirName::parse("scratch").is_none());
        assert!(RunDirName::parse("core8_L1-16KB-A4_L2-1024KB-A8_Lat7_Bench-radix.bak").is_none());
    }
}
