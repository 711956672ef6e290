//! Combines the road, bus and airport result files into the composite rating.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use accessrate::config::Config;
use accessrate::pipeline::aggregate_files;
use accessrate::results::write_results;

#[derive(Parser, Debug)]
#[command(name = "aggregate")]
#[command(about = "Join per-type result files into composite city ratings")]
struct Args {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log cities dropped by the join
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load_or_default(args.config.as_deref())?;
    info!(
        "Aggregating {}, {} and {}",
        config.outputs.roads.display(),
        config.outputs.airports.display(),
        config.outputs.buses.display()
    );

    let composite = aggregate_files(&config)?;
    write_results(&config.outputs.composite, &composite)?;

    Ok(())
}
