//! Stage orchestration shared by the `score` and `aggregate` binaries.
//!
//! Every stage computes its full result set before anything is written, so a
//! failed run leaves no partial output behind.

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing::info;

use crate::config::Config;
use crate::geojson;
use crate::models::{AirportResult, BusResult, CompositeResult, RoadResult};
use crate::results::{read_results, to_pretty_json, StagedFile};
use crate::scoring;

pub fn road_stage(config: &Config, progress: &ProgressBar) -> Result<Vec<RoadResult>> {
    let order = config.inputs.coordinate_order;
    let roads = geojson::load_roads(&config.inputs.roads, order)?;
    let cities = geojson::load_cities(&config.inputs.cities, order)?;

    progress.set_length(cities.len() as u64);
    let results = scoring::score_roads_with_progress(&cities, &roads, &config.scoring, progress)
        .context("Road scoring failed")?;
    progress.finish_and_clear();
    Ok(results)
}

pub fn bus_stage(config: &Config) -> Result<Vec<BusResult>> {
    let order = config.inputs.coordinate_order;
    let stops = geojson::load_bus_stops(&config.inputs.bus_stops, order)?;
    let cities = geojson::load_cities(&config.inputs.cities, order)?;

    scoring::score_buses(&cities, &stops, &config.scoring).context("Bus scoring failed")
}

pub fn airport_stage(config: &Config) -> Result<Vec<AirportResult>> {
    let order = config.inputs.coordinate_order;
    let airports = geojson::load_airports(&config.inputs.airports, order)?;
    let cities = geojson::load_cities(&config.inputs.cities, order)?;

    scoring::score_airports(&cities, &airports, &config.scoring)
        .context("Airport scoring failed")
}

/// Every result set of a full run
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub roads: Vec<RoadResult>,
    pub buses: Vec<BusResult>,
    pub airports: Vec<AirportResult>,
    pub composite: Vec<CompositeResult>,
}

impl RunOutput {
    /// Write all four result files, or none of them.
    ///
    /// Every payload is rendered and staged next to its destination first;
    /// the destinations are only replaced once all four are staged.
    pub fn write(&self, config: &Config) -> Result<()> {
        let outputs = &config.outputs;
        let rendered = [
            (&outputs.roads, to_pretty_json(&self.roads)?, self.roads.len()),
            (&outputs.buses, to_pretty_json(&self.buses)?, self.buses.len()),
            (&outputs.airports, to_pretty_json(&self.airports)?, self.airports.len()),
            (&outputs.composite, to_pretty_json(&self.composite)?, self.composite.len()),
        ];

        let staged = rendered
            .iter()
            .map(|(path, content, records)| StagedFile::new(path, content, *records))
            .collect::<Result<Vec<_>>>()?;
        for file in staged {
            file.commit()?;
        }
        Ok(())
    }
}

/// Run the three scorers and aggregate in-process
pub fn run_all(config: &Config, progress: &ProgressBar) -> Result<RunOutput> {
    let roads = road_stage(config, progress)?;
    let buses = bus_stage(config)?;
    let airports = airport_stage(config)?;
    let composite = scoring::aggregate(&roads, &airports, &buses);

    info!("Full run complete: {} composite ratings", composite.len());
    Ok(RunOutput {
        roads,
        buses,
        airports,
        composite,
    })
}

/// Aggregate the per-type result files named in `config`
pub fn aggregate_files(config: &Config) -> Result<Vec<CompositeResult>> {
    let roads: Vec<RoadResult> = read_results(&config.outputs.roads)?;
    let airports: Vec<AirportResult> = read_results(&config.outputs.airports)?;
    let buses: Vec<BusResult> = read_results(&config.outputs.buses)?;
    Ok(scoring::aggregate(&roads, &airports, &buses))
}
