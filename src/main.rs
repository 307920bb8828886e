// src/main.rs — cachesweep entry point

use clap::Parser;

use cachesweep::cli::{Cli, Commands};
use cachesweep::infra::config::Config;
use cachesweep::infra::logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Respects CACHESWEEP_LOG / RUST_LOG
    logger::init_logging(if cli.verbose { "debug" } else { "info" });

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Falls back to defaults if no config file is found
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Ingest {
            dir,
            level,
            out,
            sorted_out,
        } => cachesweep::cli::ingest::run_ingest(
            &dir,
            &level,
            out.as_deref(),
            sorted_out.as_deref(),
        ),
        Commands::Generate { small, shared, out } => {
            cachesweep::cli::generate::run_generate(&config, &small, &shared, &out)
        }
        Commands::Filter {
            input,
            out,
            cores,
            small_sizes,
        } => cachesweep::cli::filter::run_filter(&input, &out, &cores, &small_sizes),
        Commands::Run { input, dry_run } => {
            cachesweep::cli::run::run_schedule(&config, &input, dry_run).await
        }
        Commands::Collect { results_dir, out } => {
            cachesweep::cli::collect::run_collect(&config, results_dir.as_deref(), &out)
        }
        Commands::Rank { summary, out } => cachesweep::cli::rank::run_rank(&config, &summary, &out),
        Commands::Stats {
            summary,
            out,
            split_dir,
        } => cachesweep::cli::stats::run_stats(&config, &summary, &out, split_dir.as_deref()),
    }
}
