//! Proximity scoring engine.
//!
//! Each scorer turns one infrastructure dataset into a per-city result set;
//! [`aggregate`] joins the three sets into the composite rating.

mod airport;
mod aggregate;
mod bus;
mod road;

pub use aggregate::{aggregate, composite_rating};
pub use airport::{score_airports, score_city_airport};
pub use bus::{score_buses, score_city_buses};
pub use road::{score_city_roads, score_roads, score_roads_with_progress, RoadTally};

use anyhow::{bail, Result};
use rayon::prelude::*;
use serde::Deserialize;

use crate::models::City;

/// Distance thresholds and saturation caps used by the scorers
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Road vertices within this distance (inclusive) are matched
    pub road_radius_km: f64,
    /// Saturation cap for the minor-road coverage sum
    pub road_coverage_cap: f64,
    /// Bus stops within this distance (inclusive) are matched
    pub bus_radius_km: f64,
    /// Saturation cap for the bus coverage sum
    pub bus_coverage_cap: f64,
    /// An airport strictly closer than this counts as nearby
    pub airport_radius_km: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            road_radius_km: 6.0,
            road_coverage_cap: 100.0,
            bus_radius_km: 15.0,
            bus_coverage_cap: 10.0,
            airport_radius_km: 15.0,
        }
    }
}

impl ScoringParams {
    /// Reject values that would make a rating undefined
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("road_radius_km", self.road_radius_km),
            ("road_coverage_cap", self.road_coverage_cap),
            ("bus_radius_km", self.bus_radius_km),
            ("bus_coverage_cap", self.bus_coverage_cap),
            ("airport_radius_km", self.airport_radius_km),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                bail!("scoring.{} must be a positive number, got {}", name, value);
            }
        }
        Ok(())
    }
}

/// Localities are never rated
fn is_rateable(city: &City) -> bool {
    !city.is_locality()
}

/// Cities eligible for scoring
fn rateable(cities: &[City]) -> impl Iterator<Item = &City> {
    cities.iter().filter(|city| is_rateable(city))
}

/// Parallel counterpart of [`rateable`], keeping input order on collect
fn par_rateable(cities: &[City]) -> impl ParallelIterator<Item = &City> {
    cities.par_iter().filter(|city| is_rateable(city))
}
