//! Accessrate - city infrastructure accessibility ratings
//!
//! Scores every city by its proximity to roads, bus stops and airports and
//! combines the three scores into one composite rating.

pub mod config;
pub mod geodesy;
pub mod geojson;
pub mod models;
pub mod pipeline;
pub mod results;
pub mod scoring;

pub use geodesy::{vincenty_km, DistanceError};
pub use models::{
    Airport, AirportResult, BusResult, BusStop, City, CompositeResult, RoadFeature, RoadResult,
};
