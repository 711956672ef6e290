//! Per-type and composite rating records.
//!
//! Field names match the JSON result files.

use serde::{Deserialize, Serialize};

/// Road proximity score for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadResult {
    pub city: String,
    /// Rating in `0.0..=5.0`
    pub rating: f64,
    /// At least one major road within range
    pub road_nearby: bool,
}

/// Bus stop proximity score for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusResult {
    pub city: String,
    /// Number of stops within range
    pub bus_stations: usize,
    /// Rating in `0.0..=5.0`
    pub rating: f64,
}

/// Airport proximity score for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportResult {
    pub city: String,
    pub airport_nearby: bool,
    /// `1` when an airport is nearby, `0` otherwise
    pub rating: u8,
}

/// Combined accessibility rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub city: String,
    pub rating: f64,
    pub road_nearby: bool,
    pub airport_nearby: bool,
    pub bus_stations: usize,
}
