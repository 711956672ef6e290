//! Bus stop proximity scoring.

use tracing::{debug, info};

use super::{rateable, ScoringParams};
use crate::geodesy::{vincenty_km, DistanceError};
use crate::models::{BusResult, BusStop, City};

const MAX_RATING: f64 = 5.0;

pub fn score_city_buses(
    city: &City,
    stops: &[BusStop],
    params: &ScoringParams,
) -> Result<BusResult, DistanceError> {
    let radius = params.bus_radius_km;
    let mut coverage = 0.0;
    let mut bus_stations = 0;

    for stop in stops {
        let km = vincenty_km(city.location, stop.location)?;
        if km <= radius {
            coverage += km / radius;
            bus_stations += 1;
        }
    }

    let cap = params.bus_coverage_cap;
    let coverage = coverage.min(cap);
    let rating = (coverage / cap) * MAX_RATING;
    debug!("{}: {} stops, rating {}", city.name, bus_stations, rating);

    Ok(BusResult {
        city: city.name.clone(),
        bus_stations,
        rating,
    })
}

/// Score all cities sequentially
pub fn score_buses(
    cities: &[City],
    stops: &[BusStop],
    params: &ScoringParams,
) -> Result<Vec<BusResult>, DistanceError> {
    info!(
        "Scoring bus stop proximity for {} cities against {} stops...",
        cities.len(),
        stops.len()
    );

    let results = rateable(cities)
        .map(|city| score_city_buses(city, stops, params))
        .collect::<Result<Vec<_>, _>>()?;

    info!("Bus scoring complete: {} cities", results.len());
    Ok(results)
}
