use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::geojson::CoordinateOrder;
use crate::scoring::ScoringParams;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub inputs: InputConfig,
    pub outputs: OutputConfig,
    pub scoring: ScoringParams,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InputConfig {
    pub roads: PathBuf,
    pub cities: PathBuf,
    pub bus_stops: PathBuf,
    pub airports: PathBuf,
    pub coordinate_order: CoordinateOrder,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            roads: PathBuf::from("../parsing/roads4326.geojson"),
            cities: PathBuf::from("../parsing/cities4326.geojson"),
            bus_stops: PathBuf::from("../parsing/bus4326.geojson"),
            airports: PathBuf::from("../parsing/flight4326.geojson"),
            coordinate_order: CoordinateOrder::LatLon,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub roads: PathBuf,
    pub buses: PathBuf,
    pub airports: PathBuf,
    pub composite: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            roads: PathBuf::from("result_road.json"),
            buses: PathBuf::from("result_bus.json"),
            airports: PathBuf::from("result_airport.json"),
            composite: PathBuf::from("result.json"),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.scoring.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}
