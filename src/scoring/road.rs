//! Road proximity scoring.
//!
//! Every vertex of every road polyline within `road_radius_km` of a city is a
//! match. Major roads raise a multiplier, minor roads fill a saturating
//! coverage sum, and the rating is their product.

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, info};

use super::{par_rateable, ScoringParams};
use crate::geodesy::{vincenty_km, DistanceError};
use crate::models::{City, HighwayClass, RoadFeature, RoadResult, RoadTier};

/// Major-road count above which the multiplier saturates
const MAJOR_SATURATION: usize = 5;
const MAJOR_SCORE_SATURATED: f64 = 5.0;
/// Applies whether or not any major road was matched
const MAJOR_SCORE_FLOOR: f64 = 4.0;

/// Running totals of road matches around one city
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoadTally {
    pub major_count: usize,
    /// Unclamped sum of `distance / radius` over minor-road matches
    pub coverage: f64,
}

impl RoadTally {
    /// Record one vertex matched at `km` from the city
    pub fn record(&mut self, highway: HighwayClass, km: f64, radius_km: f64) {
        match highway.tier() {
            RoadTier::Major => self.major_count += 1,
            RoadTier::Minor => self.coverage += km / radius_km,
            RoadTier::Ignored => {}
        }
    }

    pub fn clamped_coverage(&self, cap: f64) -> f64 {
        self.coverage.min(cap)
    }

    /// Multiplier and nearby flag derived from the major-road count
    pub fn major_score(&self) -> (f64, bool) {
        if self.major_count > MAJOR_SATURATION {
            (MAJOR_SCORE_SATURATED, true)
        } else if self.major_count > 0 {
            (MAJOR_SCORE_FLOOR, true)
        } else {
            (MAJOR_SCORE_FLOOR, false)
        }
    }

    /// Rating in `0.0..=5.0`
    pub fn rating(&self, cap: f64) -> f64 {
        let (multiplier, _) = self.major_score();
        (self.clamped_coverage(cap) / cap) * multiplier
    }
}

/// Score a single city against every road vertex
pub fn score_city_roads(
    city: &City,
    roads: &[RoadFeature],
    params: &ScoringParams,
) -> Result<RoadResult, DistanceError> {
    let radius = params.road_radius_km;
    let mut tally = RoadTally::default();

    for road in roads {
        for vertex in road.path.points() {
            let km = vincenty_km(city.location, vertex)?;
            if km <= radius {
                tally.record(road.highway, km, radius);
            }
        }
    }

    let (_, road_nearby) = tally.major_score();
    let rating = tally.rating(params.road_coverage_cap);
    debug!(
        "{}: {},{}",
        city.name,
        rating,
        tally.clamped_coverage(params.road_coverage_cap)
    );

    Ok(RoadResult {
        city: city.name.clone(),
        rating,
        road_nearby,
    })
}

/// Score all cities in parallel, one task per city
pub fn score_roads(
    cities: &[City],
    roads: &[RoadFeature],
    params: &ScoringParams,
) -> Result<Vec<RoadResult>, DistanceError> {
    score_roads_with_progress(cities, roads, params, &ProgressBar::hidden())
}

/// Like [`score_roads`], ticking `progress` once per finished city.
///
/// Results keep the input city order. The first distance failure aborts the
/// whole run and no results are returned.
pub fn score_roads_with_progress(
    cities: &[City],
    roads: &[RoadFeature],
    params: &ScoringParams,
    progress: &ProgressBar,
) -> Result<Vec<RoadResult>, DistanceError> {
    info!(
        "Scoring road proximity for {} cities against {} roads...",
        cities.len(),
        roads.len()
    );

    let results = par_rateable(cities)
        .map(|city| {
            let result = score_city_roads(city, roads, params);
            progress.inc(1);
            result
        })
        .collect::<Result<Vec<_>, _>>()?;

    let nearby = results.iter().filter(|r| r.road_nearby).count();
    info!(
        "Road scoring complete: {} cities, {} with a major road nearby",
        results.len(),
        nearby
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Point};

    fn city_at_origin() -> City {
        City::new("C", "town", Point::new(0.0, 0.0))
    }

    fn single_vertex(highway: &str, lon: f64, lat: f64) -> RoadFeature {
        RoadFeature::new(
            HighwayClass::from_tag(highway),
            LineString::from(vec![(lon, lat)]),
        )
    }

    /// About 3 km east of the origin along the equator
    const THREE_KM_LON: f64 = 0.026_949;

    #[test]
    fn test_motorway_and_residential_at_three_km() {
        let city = city_at_origin();
        let roads = vec![
            single_vertex("motorway", THREE_KM_LON, 0.0),
            single_vertex("residential", 0.0, THREE_KM_LON),
        ];
        let params = ScoringParams::default();

        let result = score_city_roads(&city, &roads, &params).unwrap();
        let residential_km = vincenty_km(city.location, Point::new(0.0, THREE_KM_LON)).unwrap();

        assert!(result.road_nearby);
        assert_eq!(result.rating, (residential_km / 6.0 / 100.0) * 4.0);
        assert!((result.rating - 0.02).abs() < 2e-4, "got {}", result.rating);
    }

    #[test]
    fn test_no_major_roads_keeps_floor_multiplier() {
        let city = city_at_origin();
        let roads = vec![single_vertex("tertiary", THREE_KM_LON, 0.0)];

        let result = score_city_roads(&city, &roads, &ScoringParams::default()).unwrap();
        let km = vincenty_km(city.location, Point::new(THREE_KM_LON, 0.0)).unwrap();

        assert!(!result.road_nearby);
        assert_eq!(result.rating, (km / 6.0 / 100.0) * 4.0);
    }

    #[test]
    fn test_major_count_saturates() {
        let mut tally = RoadTally::default();
        for _ in 0..1000 {
            tally.record(HighwayClass::Motorway, 0.5, 6.0);
        }
        assert_eq!(tally.major_count, 1000);
        assert_eq!(tally.major_score(), (5.0, true));
        // majors alone add no coverage
        assert_eq!(tally.rating(100.0), 0.0);
    }

    #[test]
    fn test_major_score_boundaries() {
        let tally = |major_count| RoadTally {
            major_count,
            coverage: 0.0,
        };
        assert_eq!(tally(0).major_score(), (4.0, false));
        assert_eq!(tally(1).major_score(), (4.0, true));
        assert_eq!(tally(5).major_score(), (4.0, true));
        assert_eq!(tally(6).major_score(), (5.0, true));
    }

    #[test]
    fn test_coverage_clamps_at_cap() {
        let mut tally = RoadTally {
            major_count: 6,
            coverage: 0.0,
        };
        for _ in 0..1000 {
            tally.record(HighwayClass::Residential, 5.9, 6.0);
        }
        assert!(tally.coverage > 100.0);
        assert_eq!(tally.clamped_coverage(100.0), 100.0);
        assert_eq!(tally.rating(100.0), 5.0);
    }

    #[test]
    fn test_unrecognized_class_ignored() {
        let city = city_at_origin();
        let roads = vec![
            single_vertex("footway", THREE_KM_LON, 0.0),
            single_vertex("track", 0.0, THREE_KM_LON),
        ];
        let result = score_city_roads(&city, &roads, &ScoringParams::default()).unwrap();
        assert!(!result.road_nearby);
        assert_eq!(result.rating, 0.0);
    }

    #[test]
    fn test_radius_is_inclusive() {
        let city = city_at_origin();
        let vertex = Point::new(THREE_KM_LON, 0.0);
        let km = vincenty_km(city.location, vertex).unwrap();
        let roads = vec![single_vertex("motorway", vertex.x(), vertex.y())];

        let at_edge = ScoringParams {
            road_radius_km: km,
            ..ScoringParams::default()
        };
        assert!(score_city_roads(&city, &roads, &at_edge).unwrap().road_nearby);

        let just_short = ScoringParams {
            road_radius_km: km - 1e-4,
            ..ScoringParams::default()
        };
        assert!(!score_city_roads(&city, &roads, &just_short).unwrap().road_nearby);
    }

    #[test]
    fn test_every_vertex_counts() {
        let city = city_at_origin();
        let roads = vec![RoadFeature::new(
            HighwayClass::Primary,
            LineString::from(vec![
                (0.001, 0.0),
                (0.002, 0.0),
                (0.003, 0.0),
                (0.004, 0.0),
                (0.005, 0.0),
                (0.006, 0.0),
                (1.0, 0.0),
            ]),
        )];
        let result = score_city_roads(&city, &roads, &ScoringParams::default()).unwrap();
        // six vertices in range push the count past saturation
        assert!(result.road_nearby);
        assert_eq!(result.rating, 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let cities: Vec<City> = (0..50)
            .map(|i| City::new(format!("city-{i}"), "town", Point::new(i as f64 * 0.01, 0.0)))
            .collect();
        let roads: Vec<RoadFeature> = (0..20)
            .map(|i| {
                let class = if i % 3 == 0 { "primary" } else { "residential" };
                RoadFeature::new(
                    HighwayClass::from_tag(class),
                    LineString::from(vec![(i as f64 * 0.02, 0.01), (i as f64 * 0.02, -0.01)]),
                )
            })
            .collect();
        let params = ScoringParams::default();

        let parallel = score_roads(&cities, &roads, &params).unwrap();
        let again = score_roads(&cities, &roads, &params).unwrap();
        let sequential: Vec<RoadResult> = cities
            .iter()
            .map(|c| score_city_roads(c, &roads, &params).unwrap())
            .collect();

        assert_eq!(parallel, sequential);
        assert_eq!(parallel, again);
        for (a, b) in parallel.iter().zip(&again) {
            assert_eq!(a.rating.to_bits(), b.rating.to_bits());
        }
        assert!(parallel.iter().all(|r| (0.0..=5.0).contains(&r.rating)));
    }

    #[test]
    fn test_localities_are_skipped() {
        let cities = vec![
            City::new("Town", "town", Point::new(0.0, 0.0)),
            City::new("Spot", "locality", Point::new(0.0, 0.0)),
        ];
        let roads = vec![single_vertex("motorway", THREE_KM_LON, 0.0)];
        let results = score_roads(&cities, &roads, &ScoringParams::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].city, "Town");
    }

    #[test]
    fn test_distance_failure_aborts_run() {
        let cities = vec![
            City::new("Fine", "town", Point::new(10.0, 10.0)),
            City::new("Antipode", "town", Point::new(0.0, 0.0)),
        ];
        // nearly antipodal to the second city
        let roads = vec![single_vertex("motorway", 179.7, 0.5)];
        let err = score_roads(&cities, &roads, &ScoringParams::default()).unwrap_err();
        assert!(matches!(err, DistanceError::NonConvergence { .. }));
    }
}
