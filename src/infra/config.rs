// src/infra/config.rs — Configuration loading (TOML)
//
// Every default reproduces the reference policy, so an empty file behaves
// exactly like no file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::infra::errors::SweepError;
use crate::infra::paths;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub budget: BudgetPolicy,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default = "default_workloads")]
    pub workloads: Vec<WorkloadConfig>,

    #[serde(default)]
    pub aggregate: AggregateConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            budget: BudgetPolicy::default(),
            scheduler: SchedulerConfig::default(),
            workloads: default_workloads(),
            aggregate: AggregateConfig::default(),
        }
    }
}

/// Hardware-cost policy shared by the generator and the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetPolicy {
    /// Ceiling on total cost units per design point.
    pub total: u64,
    /// Cost units per core.
    pub core_cost: u64,
    /// Small-level KB bought by one cost unit.
    pub small_kb_per_unit: u64,
    /// Shared-level KB bought by one cost unit.
    pub shared_kb_per_unit: u64,
    /// Smallest shared-level size ever considered.
    pub shared_floor_kb: u64,
    /// Candidate core counts, in enumeration order.
    pub core_counts: Vec<u32>,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            total: 128,
            core_cost: 1,
            small_kb_per_unit: 2,
            shared_kb_per_unit: 32,
            shared_floor_kb: 1024,
            core_counts: vec![2, 4, 8, 16, 32],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub simulator: PathBuf,
    pub config_script: PathBuf,
    pub results_dir: PathBuf,
    /// Statistics report path relative to each run directory.
    pub stats_file: PathBuf,
    pub cpu_type: String,
    pub mem_type: String,
    /// Pairs whose derived clock is below this are never simulated.
    pub min_clock_ghz: f64,
    /// Clock at which the baseline runtimes were measured.
    pub baseline_clock_ghz: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            simulator: PathBuf::from("./build/ALPHA/gem5.opt"),
            config_script: PathBuf::from("./configs/example/se.py"),
            results_dir: PathBuf::from("./results_simulations"),
            stats_file: PathBuf::from("stats.txt"),
            cpu_type: "detailed".into(),
            mem_type: "SimpleMemory".into(),
            min_clock_ghz: 0.7,
            baseline_clock_ghz: 0.72,
        }
    }
}

/// How the workload's options reach the simulated program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationShape {
    /// Argument vector, options passed through the simulator's `-o` flag.
    Args,
    /// Whole command line handed to a shell so options may redirect stdin.
    Shell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    pub name: String,
    pub command: String,
    /// Options template; `{cores}` expands to the core count.
    #[serde(default)]
    pub options: String,
    #[serde(default = "default_invocation")]
    pub invocation: InvocationShape,
    /// Predicted runtimes at or above this are skipped. Absent means never.
    #[serde(default)]
    pub skip_threshold_seconds: Option<f64>,
    #[serde(default)]
    pub baselines: Vec<Baseline>,
}

fn default_invocation() -> InvocationShape {
    InvocationShape::Args
}

/// Measured runtime of a workload at `cores` cores and the baseline clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub cores: u32,
    pub seconds: f64,
}

impl WorkloadConfig {
    pub fn baseline_for(&self, cores: u32) -> Option<f64> {
        self.baselines
            .iter()
            .find(|b| b.cores == cores)
            .map(|b| b.seconds)
    }

    pub fn render_options(&self, cores: u32) -> String {
        self.options.replace("{cores}", &cores.to_string())
    }
}

/// Summary column used as the ranking metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    SimTicks,
    SimSeconds,
    SimInsts,
}

impl Metric {
    pub fn key(&self) -> &'static str {
        match self {
            Metric::SimTicks => "sim_ticks",
            Metric::SimSeconds => "sim_seconds",
            Metric::SimInsts => "sim_insts",
        }
    }
}

/// Whether ranking groups across workloads or within each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankScope {
    General,
    PerWorkload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    pub metric: Metric,
    pub expected_replicas: usize,
    /// Rows with total cost at or above this are dropped before aggregation.
    pub cost_ceiling: u64,
    pub rank_exclude: Vec<String>,
    pub variability_exclude: Vec<String>,
    pub scope: RankScope,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            metric: Metric::SimTicks,
            expected_replicas: 3,
            cost_ceiling: 128,
            rank_exclude: vec!["fft".into(), "lu".into()],
            variability_exclude: vec!["fft".into()],
            scope: RankScope::General,
        }
    }
}

fn workload(
    name: &str,
    command: &str,
    options: &str,
    invocation: InvocationShape,
    threshold: f64,
    baselines: [(u32, f64); 6],
) -> WorkloadConfig {
    WorkloadConfig {
        name: name.into(),
        command: command.into(),
        options: options.into(),
        invocation,
        skip_threshold_seconds: Some(threshold),
        baselines: baselines
            .iter()
            .map(|&(cores, seconds)| Baseline { cores, seconds })
            .collect(),
    }
}

/// SPLASH-2 reference workloads with their skip thresholds and baselines.
pub fn default_workloads() -> Vec<WorkloadConfig> {
    use InvocationShape::{Args, Shell};
    vec![
        workload(
            "fmm",
            "./splash2/fmm/FMM",
            "< ./splash2/fmm/inputs/input.2048.p{cores}",
            Shell,
            900.0,
            [(1, 309.104), (2, 329.282), (4, 350.246), (8, 394.418), (16, 530.571), (32, 593.797)],
        ),
        workload(
            "ocean",
            "./splash2/ocean/contiguous_partitions/OCEAN",
            "-n130 -p{cores}",
            Args,
            1200.0,
            [(1, 234.342), (2, 247.708), (4, 286.173), (8, 357.542), (16, 450.171), (32, 676.673)],
        ),
        workload(
            "raytrace",
            "./splash2/raytrace/RAYTRACE",
            "-p{cores} ./splash2/raytrace/inputs/teapot.env",
            Args,
            1800.0,
            [(1, 851.609), (2, 885.676), (4, 960.032), (8, 1064.767), (16, 1224.448), (32, 1430.432)],
        ),
        workload(
            "cholesky",
            "./splash2/cholesky/CHOLESKY",
            "-p{cores} ./splash2/cholesky/inputs/d750.O",
            Args,
            2400.0,
            [(1, 1116.745), (2, 841.407), (4, 877.697), (8, 1094.574), (16, 1456.641), (32, 2261.436)],
        ),
        workload(
            "fft",
            "./splash2/fft/FFT",
            "-p{cores}",
            Args,
            60.0,
            [(1, 2.518), (2, 2.724), (4, 3.094), (8, 4.149), (16, 9.150), (32, 37.852)],
        ),
        workload(
            "lu",
            "./splash2/lu/contiguous_blocks/LU",
            "-p{cores}",
            Args,
            1500.0,
            [(1, 788.856), (2, 799.849), (4, 832.486), (8, 908.172), (16, 1039.936), (32, 1257.743)],
        ),
        workload(
            "radix",
            "./splash2/radix/RADIX",
            "-p{cores}",
            Args,
            600.0,
            [(1, 209.293), (2, 223.159), (4, 231.191), (8, 257.971), (16, 301.007), (32, 416.257)],
        ),
    ]
}

impl Config {
    /// Load the first config file found, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        match paths::find_config(&cwd) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        let b = &self.budget;
        if b.small_kb_per_unit == 0 || b.shared_kb_per_unit == 0 {
            return Err(SweepError::Config(
                "budget: KB-per-unit rates must be positive".into(),
            ));
        }
        if b.core_counts.is_empty() {
            return Err(SweepError::Config("budget: core_counts is empty".into()));
        }
        if self.workloads.is_empty() {
            return Err(SweepError::Config("no workloads configured".into()));
        }
        let mut seen = HashSet::new();
        for w in &self.workloads {
            if !seen.insert(w.name.as_str()) {
                return Err(SweepError::Config(format!(
                    "duplicate workload '{}'",
                    w.name
                )));
            }
            if w.name.is_empty() || !w.name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(SweepError::Config(format!(
                    "workload name '{}' must be alphanumeric",
                    w.name
                )));
            }
        }
        if self.aggregate.expected_replicas == 0 {
            return Err(SweepError::Config(
                "aggregate: expected_replicas must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn workload(&self, name: &str) -> Option<&WorkloadConfig> {
        self.workloads.iter().find(|w| w.name == name)
    }
}
