//! Join of the per-type result sets into the composite rating.

use hashbrown::HashMap;
use tracing::{debug, info};

use crate::models::{AirportResult, BusResult, CompositeResult, RoadResult};

/// `round(road * (airport + 1) * bus / 5)`.
///
/// A nearby airport doubles the score. Without one the road and bus terms pass
/// through unchanged.
pub fn composite_rating(road: f64, airport: u8, bus: f64) -> f64 {
    (road * (f64::from(airport) + 1.0) * bus / 5.0).round()
}

/// Combine the three result sets, keyed by city name.
///
/// Output follows the order of `roads`. Cities missing from the airport or bus
/// set are dropped silently. For duplicate names the first entry wins.
pub fn aggregate(
    roads: &[RoadResult],
    airports: &[AirportResult],
    buses: &[BusResult],
) -> Vec<CompositeResult> {
    let airport_index = index_by_city(airports, |r| &r.city);
    let bus_index = index_by_city(buses, |r| &r.city);

    let mut results = Vec::with_capacity(roads.len());
    for road in roads {
        let (Some(airport), Some(bus)) = (
            airport_index.get(road.city.as_str()),
            bus_index.get(road.city.as_str()),
        ) else {
            debug!("{}: missing airport or bus result, skipped", road.city);
            continue;
        };

        results.push(CompositeResult {
            city: road.city.clone(),
            rating: composite_rating(road.rating, airport.rating, bus.rating),
            road_nearby: road.road_nearby,
            airport_nearby: airport.airport_nearby,
            bus_stations: bus.bus_stations,
        });
    }

    info!(
        "Aggregated {} of {} cities ({} without a full set of scores)",
        results.len(),
        roads.len(),
        roads.len() - results.len()
    );
    results
}

fn index_by_city<'a, T>(
    records: &'a [T],
    city: impl Fn(&'a T) -> &'a String,
) -> HashMap<&'a str, &'a T> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index.entry(city(record).as_str()).or_insert(record);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn road(city: &str, rating: f64, road_nearby: bool) -> RoadResult {
        RoadResult {
            city: city.to_string(),
            rating,
            road_nearby,
        }
    }

    fn airport(city: &str, rating: u8) -> AirportResult {
        AirportResult {
            city: city.to_string(),
            airport_nearby: rating == 1,
            rating,
        }
    }

    fn bus(city: &str, bus_stations: usize, rating: f64) -> BusResult {
        BusResult {
            city: city.to_string(),
            bus_stations,
            rating,
        }
    }

    #[test]
    fn test_composite_formula() {
        assert_eq!(composite_rating(5.0, 1, 5.0), 10.0);
        assert_eq!(composite_rating(5.0, 0, 5.0), 5.0);
        assert_eq!(composite_rating(2.0, 0, 3.0), 1.0);
        assert_eq!(composite_rating(0.0, 1, 5.0), 0.0);
        // 2.5 rounds away from zero
        assert_eq!(composite_rating(2.5, 0, 5.0), 3.0);
    }

    #[test]
    fn test_composite_is_non_negative() {
        for r in [0.0, 0.3, 1.7, 4.99, 5.0] {
            for a in [0, 1] {
                for b in [0.0, 0.01, 2.5, 5.0] {
                    assert!(composite_rating(r, a, b) >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_full_join() {
        let roads = vec![road("Yakutsk", 5.0, true), road("Mirny", 2.0, false)];
        let airports = vec![airport("Mirny", 1), airport("Yakutsk", 1)];
        let buses = vec![bus("Yakutsk", 40, 5.0), bus("Mirny", 3, 2.5)];

        let out = aggregate(&roads, &airports, &buses);
        assert_eq!(
            out,
            vec![
                CompositeResult {
                    city: "Yakutsk".into(),
                    rating: 10.0,
                    road_nearby: true,
                    airport_nearby: true,
                    bus_stations: 40,
                },
                CompositeResult {
                    city: "Mirny".into(),
                    rating: 2.0,
                    road_nearby: false,
                    airport_nearby: true,
                    bus_stations: 3,
                },
            ]
        );
    }

    #[test]
    fn test_missing_airport_excludes_city() {
        let roads = vec![road("Aldan", 3.0, true), road("Lensk", 3.0, true)];
        let airports = vec![airport("Lensk", 0)];
        let buses = vec![bus("Aldan", 2, 1.0), bus("Lensk", 2, 1.0)];

        let out = aggregate(&roads, &airports, &buses);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].city, "Lensk");
    }

    #[test]
    fn test_missing_bus_excludes_city() {
        let roads = vec![road("Aldan", 3.0, true)];
        let airports = vec![airport("Aldan", 1)];
        let out = aggregate(&roads, &airports, &[]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_cities_only_in_other_sets_are_ignored() {
        let roads = vec![road("Aldan", 3.0, true)];
        let airports = vec![airport("Aldan", 1), airport("Tiksi", 1)];
        let buses = vec![bus("Aldan", 1, 1.0), bus("Tiksi", 9, 5.0)];
        let out = aggregate(&roads, &airports, &buses);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].city, "Aldan");
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let roads = vec![road("Aldan", 5.0, true)];
        let airports = vec![airport("Aldan", 1), airport("Aldan", 0)];
        let buses = vec![bus("Aldan", 7, 5.0), bus("Aldan", 0, 0.0)];
        let out = aggregate(&roads, &airports, &buses);
        assert_eq!(out[0].rating, 10.0);
        assert!(out[0].airport_nearby);
        assert_eq!(out[0].bus_stations, 7);
    }
}
