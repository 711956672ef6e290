//! Airport proximity scoring.

use tracing::{debug, info};

use super::{rateable, ScoringParams};
use crate::geodesy::{vincenty_km, DistanceError};
use crate::models::{Airport, AirportResult, City};

/// Starting value for the nearest-airport search, in km
const NO_AIRPORT_KM: f64 = 10_000_000.0;

pub fn score_city_airport(
    city: &City,
    airports: &[Airport],
    params: &ScoringParams,
) -> Result<AirportResult, DistanceError> {
    let mut nearest_km = NO_AIRPORT_KM;
    let mut nearest: Option<&str> = None;

    for airport in airports {
        let Some(location) = airport.location() else {
            continue;
        };
        let km = vincenty_km(city.location, location)?;
        if km < nearest_km {
            nearest_km = km;
            nearest = Some(airport.name.as_str());
        }
    }

    let airport_nearby = nearest_km < params.airport_radius_km;
    debug!(
        "{}: nearest airport {:?} at {} km",
        city.name, nearest, nearest_km
    );

    Ok(AirportResult {
        city: city.name.clone(),
        airport_nearby,
        rating: u8::from(airport_nearby),
    })
}

/// Score all cities sequentially
pub fn score_airports(
    cities: &[City],
    airports: &[Airport],
    params: &ScoringParams,
) -> Result<Vec<AirportResult>, DistanceError> {
    info!(
        "Scoring airport proximity for {} cities against {} airports...",
        cities.len(),
        airports.len()
    );

    let results = rateable(cities)
        .map(|city| score_city_airport(city, airports, params))
        .collect::<Result<Vec<_>, _>>()?;

    let nearby = results.iter().filter(|r| r.airport_nearby).count();
    info!(
        "Airport scoring complete: {} cities, {} with an airport nearby",
        results.len(),
        nearby
    );
    Ok(results)
}
