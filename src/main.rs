//! Catena - chain-join evaluation over dictionary-encoded triple data
//!
//! Usage:
//!   catena --input data/100k.txt --output output/results.txt
//!   catena --input data/watdiv.10M.nt --output out.txt --strategy sort_merge_join
//!   catena --config run.toml --compare

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use catena::{engine, Error, RunConfig, Strategy};

#[derive(Parser, Debug)]
#[command(name = "catena")]
#[command(about = "Evaluate a fixed chain join over a dictionary-encoded triple store")]
struct Args {
    /// Input triple file (one whitespace-separated triple per line)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Tracked properties, comma-separated, in chain join order
    #[arg(short, long, default_value = "follows,friendOf,likes,hasReview")]
    properties: String,

    /// Join strategy: hash_join or sort_merge_join
    #[arg(short, long)]
    strategy: Option<String>,

    /// Skip the semi-join reduction pass before the join
    #[arg(long)]
    no_reduction: bool,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rows buffered between output flushes
    #[arg(long)]
    batch_size: Option<usize>,

    /// TOML run configuration; explicit flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run every strategy/reduction combination and verify they agree
    #[arg(long)]
    compare: bool,
}

fn build_config(args: &Args) -> Result<RunConfig, Error> {
    // The strategy name is checked before any data file is touched.
    let strategy = match &args.strategy {
        Some(name) => Some(name.parse::<Strategy>()?),
        None => None,
    };

    let mut config = match &args.config {
        Some(path) => RunConfig::from_toml_file(path)?,
        None => {
            let input = args.input.clone().ok_or_else(|| {
                Error::Config("--input is required unless --config is given".into())
            })?;
            let output = args.output.clone().ok_or_else(|| {
                Error::Config("--output is required unless --config is given".into())
            })?;
            RunConfig {
                input_path: input,
                tracked_properties: split_properties(&args.properties),
                strategy: strategy.unwrap_or(Strategy::HashJoin),
                use_semi_join_reduction: !args.no_reduction,
                output_path: output,
                output_batch_size: args.batch_size,
            }
        }
    };

    if args.config.is_some() {
        if let Some(input) = &args.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &args.output {
            config.output_path = output.clone();
        }
        if args.batch_size.is_some() {
            config.output_batch_size = args.batch_size;
        }
        if args.no_reduction {
            config.use_semi_join_reduction = false;
        }
        if let Some(strategy) = strategy {
            config.strategy = strategy;
        }
    }

    config.validate()?;
    Ok(config)
}

fn split_properties(raw: &str) -> Vec<String> {
    raw.split(',').map(|name| name.trim().to_string()).filter(|name| !name.is_empty()).collect()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.compare {
        match engine::compare(&config) {
            Ok(report) => {
                for (strategy, reduced, survivors) in &report.runs {
                    info!(strategy = %strategy, reduced, survivors, "survivor set");
                }
                if report.agreement {
                    info!("all strategy/reduction combinations agree");
                    ExitCode::SUCCESS
                } else {
                    error!("strategy/reduction combinations disagree on the survivor set");
                    ExitCode::FAILURE
                }
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        }
    } else {
        match engine::run(&config) {
            Ok(report) => {
                info!(
                    strategy = %report.strategy,
                    reduced = report.reduced,
                    survivors = report.survivor_count,
                    rows = report.rows_written,
                    "run complete"
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        }
    }
}
