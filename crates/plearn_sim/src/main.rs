use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use plearn_sim::{run_classifier, run_mover, run_nand, SimConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::{error, info, Level};

#[derive(Parser)]
#[command(name = "plearn")]
#[command(about = "Watch a perceptron learn: line classification, NAND, and a steering mover")]
struct Cli {
    /// Path to a TOML config file (defaults are used when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the config file
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn which side of a line random points fall on
    Classify {
        /// Number of training samples
        #[arg(long)]
        trainers: Option<usize>,
    },
    /// Learn the NAND truth table
    Nand {
        /// Number of training samples
        #[arg(long)]
        trainers: Option<usize>,
    },
    /// Steer a mover toward its targets while its brain learns
    Mover {
        /// Number of simulation ticks
        #[arg(long)]
        ticks: Option<usize>,
    },
    /// Write the effective configuration as TOML
    DumpConfig {
        /// Output file path
        output: PathBuf,
    },
}

fn init_tracing(json: bool, level: Level) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!(e))
}

fn print_report<T: Serialize>(report: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    let mut rng = ChaCha20Rng::seed_from_u64(config.seed);

    info!(seed = config.seed, "Starting plearn");

    match cli.command {
        Commands::Classify { trainers } => {
            if let Some(n) = trainers {
                config.classifier.trainer_count = n;
            }
            let report = run_classifier(&config.classifier, &mut rng)?;
            print_report(&report)
        }
        Commands::Nand { trainers } => {
            if let Some(n) = trainers {
                config.nand.trainer_count = n;
            }
            let report = run_nand(&config.nand, &mut rng)?;
            print_report(&report)
        }
        Commands::Mover { ticks } => {
            if let Some(n) = ticks {
                config.mover.ticks = n;
            }
            let report = run_mover(&config.mover, &mut rng)?;
            print_report(&report)
        }
        Commands::DumpConfig { output } => {
            config.save(&output)?;
            info!(path = %output.display(), "Configuration written");
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.json, cli.log_level) {
        eprintln!("failed to initialise logging: {e}");
    }

    if let Err(e) = run(cli) {
        error!(error = %format!("{e:#}"), "Fatal Error");
        std::process::exit(1);
    }
}
