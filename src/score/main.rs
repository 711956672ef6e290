//! Proximity scoring runner.
//!
//! Loads the GeoJSON inputs, runs one or all scorers and writes the result
//! files named in the configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use accessrate::config::Config;
use accessrate::pipeline::{airport_stage, bus_stage, road_stage, run_all};
use accessrate::results::write_results;

#[derive(Parser, Debug)]
#[command(name = "score")]
#[command(about = "Score cities by proximity to roads, bus stops and airports")]
struct Args {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log per-city details
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    stage: Stage,
}

#[derive(Subcommand, Debug)]
enum Stage {
    /// Score road proximity (parallel per city)
    Roads,
    /// Score bus stop proximity
    Buses,
    /// Score airport proximity
    Airports,
    /// Run every scorer, then aggregate
    All,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load_or_default(args.config.as_deref())?;
    info!("Accessrate scoring: {:?}", args.stage);

    match args.stage {
        Stage::Roads => {
            let progress = progress_bar()?;
            let results = road_stage(&config, &progress)?;
            write_results(&config.outputs.roads, &results)?;
        }
        Stage::Buses => {
            let results = bus_stage(&config)?;
            write_results(&config.outputs.buses, &results)?;
        }
        Stage::Airports => {
            let results = airport_stage(&config)?;
            write_results(&config.outputs.airports, &results)?;
        }
        Stage::All => {
            let progress = progress_bar()?;
            let output = run_all(&config, &progress)?;
            output.write(&config)?;
        }
    }

    Ok(())
}

fn progress_bar() -> Result<ProgressBar> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cities ({per_sec})",
            )?
            .progress_chars("#>-"),
    );
    Ok(pb)
}
