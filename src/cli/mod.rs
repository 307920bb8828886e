// src/cli/mod.rs — CLI definition (clap derive)

pub mod collect;
pub mod filter;
pub mod generate;
pub mod ingest;
pub mod progress;
pub mod rank;
pub mod run;
pub mod stats;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cachesweep",
    about = "Cache/CPU design-space sweep: generate, schedule, and rank simulations",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a characterization table from a directory of cache reports
    Ingest {
        /// Directory holding `cache_<size>k_a<assoc>_b<block>.txt` reports
        #[arg(long)]
        dir: PathBuf,
        /// Level label stored with every record (e.g. L1, L2)
        #[arg(long)]
        level: String,
        /// Table in file-encounter order
        #[arg(long)]
        out: Option<PathBuf>,
        /// Table ordered by (size, associativity, block size)
        #[arg(long)]
        sorted_out: Option<PathBuf>,
    },
    /// Enumerate every design point that fits the budget
    Generate {
        /// Small-level (L1) characterization table
        #[arg(long)]
        small: PathBuf,
        /// Shared-level (L2) characterization table
        #[arg(long)]
        shared: PathBuf,
        #[arg(long, default_value = "data.csv")]
        out: PathBuf,
    },
    /// Narrow a design-space table to selected core counts and L1 sizes
    Filter {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "filtered_data.csv")]
        out: PathBuf,
        /// Core counts to keep (comma separated; empty keeps all)
        #[arg(long, value_delimiter = ',')]
        cores: Vec<u32>,
        /// L1 sizes in KB to keep (comma separated; empty keeps all)
        #[arg(long, value_delimiter = ',')]
        small_sizes: Vec<u64>,
    },
    /// Schedule simulations for every admitted (design point, workload) pair
    Run {
        /// Design-space table to schedule
        #[arg(long)]
        input: PathBuf,
        /// Evaluate admission without launching anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Extract statistics from run directories into a summary table
    Collect {
        /// Defaults to the configured results directory
        #[arg(long)]
        results_dir: Option<PathBuf>,
        #[arg(long, default_value = "simulation_summary.csv")]
        out: PathBuf,
    },
    /// Rank configurations by mean normalized metric
    Rank {
        #[arg(long)]
        summary: PathBuf,
        #[arg(long, default_value = "best_config.csv")]
        out: PathBuf,
    },
    /// Per-workload variability statistics
    Stats {
        #[arg(long)]
        summary: PathBuf,
        #[arg(long, default_value = "benchmark_stats_summary.csv")]
        out: PathBuf,
        /// Also write one `<workload>_summary.csv` per workload here
        #[arg(long)]
        split_dir: Option<PathBuf>,
    },
}
