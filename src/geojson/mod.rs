//! GeoJSON loaders for the four input datasets.
//!
//! Files may be gzip-compressed (`.gz`). Positions are read in the order given
//! by [`CoordinateOrder`]; the upstream exports are latitude-first.

mod schema;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::{Airport, BusStop, City, HighwayClass, RoadFeature};
use schema::{
    AirportCollection, AreaGeometry, BusStopCollection, CityCollection, LineGeometry, Position,
    RoadCollection,
};

/// Axis order of a GeoJSON position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateOrder {
    /// `[lat, lon]`, as written by the upstream exports
    #[default]
    LatLon,
    /// `[lon, lat]`, RFC 7946
    LonLat,
}

impl CoordinateOrder {
    fn coord(self, position: &[f64]) -> Result<Coord<f64>> {
        let (first, second) = match position {
            [first, second, ..] => (*first, *second),
            _ => bail!("position {:?} needs at least two numbers", position),
        };
        Ok(match self {
            CoordinateOrder::LatLon => Coord {
                x: second,
                y: first,
            },
            CoordinateOrder::LonLat => Coord {
                x: first,
                y: second,
            },
        })
    }

    fn line(self, positions: &[Position]) -> Result<LineString<f64>> {
        positions
            .iter()
            .map(|p| self.coord(p))
            .collect::<Result<Vec<_>>>()
            .map(LineString::new)
    }
}

/// Open a file, transparently decompressing `.gz`
fn open(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(reader)
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<T> {
    info!("Loading {}", path.display());
    let reader = open(path)?;
    serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_roads(path: &Path, order: CoordinateOrder) -> Result<Vec<RoadFeature>> {
    let collection: RoadCollection = read_collection(path)?;
    convert_roads(collection, order)
        .with_context(|| format!("Invalid road in {}", path.display()))
}

/// Load cities, dropping localities
pub fn load_cities(path: &Path, order: CoordinateOrder) -> Result<Vec<City>> {
    let collection: CityCollection = read_collection(path)?;
    convert_cities(collection, order)
        .with_context(|| format!("Invalid city in {}", path.display()))
}

pub fn load_bus_stops(path: &Path, order: CoordinateOrder) -> Result<Vec<BusStop>> {
    let collection: BusStopCollection = read_collection(path)?;
    convert_bus_stops(collection, order)
        .with_context(|| format!("Invalid bus stop in {}", path.display()))
}

/// Load named airports; unnamed entries are discarded
pub fn load_airports(path: &Path, order: CoordinateOrder) -> Result<Vec<Airport>> {
    let collection: AirportCollection = read_collection(path)?;
    convert_airports(collection, order)
        .with_context(|| format!("Invalid airport in {}", path.display()))
}

fn convert_roads(collection: RoadCollection, order: CoordinateOrder) -> Result<Vec<RoadFeature>> {
    let roads = collection
        .features
        .into_iter()
        .map(|feature| -> Result<RoadFeature> {
            let path = match &feature.geometry {
                LineGeometry::LineString { coordinates } => order.line(coordinates)?,
                LineGeometry::MultiLineString { coordinates } => {
                    let mut vertices = Vec::new();
                    for part in coordinates {
                        vertices.extend(order.line(part)?);
                    }
                    LineString::new(vertices)
                }
            };
            let highway = feature
                .properties
                .highway
                .as_deref()
                .map_or(HighwayClass::Unrecognized, HighwayClass::from_tag);
            Ok(RoadFeature {
                highway,
                surface: feature.properties.surface,
                path,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Loaded {} roads", roads.len());
    Ok(roads)
}

fn convert_cities(collection: CityCollection, order: CoordinateOrder) -> Result<Vec<City>> {
    let mut cities = Vec::with_capacity(collection.features.len());
    let mut localities = 0;

    for feature in collection.features {
        let Some(name) = feature.properties.name.filter(|n| !n.is_empty()) else {
            warn!("Skipping city without a name");
            continue;
        };
        let location = order
            .coord(&feature.geometry.coordinates)
            .with_context(|| format!("city {}", name))?;
        let place = feature.properties.place.unwrap_or_default();
        let city = City::new(name, place, location.into());
        if city.is_locality() {
            localities += 1;
            continue;
        }
        cities.push(city);
    }

    info!(
        "Loaded {} cities ({} localities skipped)",
        cities.len(),
        localities
    );
    Ok(cities)
}

fn convert_bus_stops(
    collection: BusStopCollection,
    order: CoordinateOrder,
) -> Result<Vec<BusStop>> {
    let stops = collection
        .features
        .into_iter()
        .map(|feature| -> Result<BusStop> {
            let location = order.coord(&feature.geometry.coordinates)?;
            Ok(BusStop {
                name: feature.properties.name,
                location: location.into(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Loaded {} bus stops", stops.len());
    Ok(stops)
}

fn convert_airports(
    collection: AirportCollection,
    order: CoordinateOrder,
) -> Result<Vec<Airport>> {
    let mut airports = Vec::new();
    let mut unnamed = 0;

    for feature in collection.features {
        let Some(name) = feature.properties.name.filter(|n| !n.is_empty()) else {
            unnamed += 1;
            continue;
        };
        let polygons = match &feature.geometry {
            AreaGeometry::Polygon { coordinates } => vec![polygon(coordinates, order)?],
            AreaGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .map(|rings| polygon(rings, order))
                .collect::<Result<Vec<_>>>()?,
        };
        let airport = Airport::new(name, MultiPolygon::new(polygons));
        if airport.location().is_none() {
            bail!("airport {} has no vertices", airport.name);
        }
        airports.push(airport);
    }

    if unnamed > 0 {
        warn!("Discarded {} airports without a name", unnamed);
    }
    info!("Loaded {} airports", airports.len());
    Ok(airports)
}

fn polygon(rings: &[Vec<Position>], order: CoordinateOrder) -> Result<Polygon<f64>> {
    let mut rings = rings.iter();
    let exterior = match rings.next() {
        Some(ring) => order.line(ring)?,
        None => LineString::new(vec![]),
    };
    let interiors = rings.map(|ring| order.line(ring)).collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}
