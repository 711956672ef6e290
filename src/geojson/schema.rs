//! Serde shapes of the GeoJSON source files.
//!
//! Property keys follow the upstream export (`HIGHWAY`, `NAME`, ...);
//! lowercase keys are accepted as well.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default, G: Deserialize<'de>"))]
pub(crate) struct FeatureCollection<P, G> {
    pub features: Vec<Feature<P, G>>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default, G: Deserialize<'de>"))]
pub(crate) struct Feature<P, G> {
    /// Missing or `null` properties read as all-`None`
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: P,
    pub geometry: G,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RoadProperties {
    #[serde(rename = "HIGHWAY", alias = "highway")]
    pub highway: Option<String>,
    #[serde(rename = "SURFACE", alias = "surface")]
    pub surface: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CityProperties {
    #[serde(rename = "NAME", alias = "name")]
    pub name: Option<String>,
    #[serde(rename = "PLACE", alias = "place")]
    pub place: Option<String>,
}

/// Bus stops and airports only carry a name
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NamedProperties {
    #[serde(rename = "NAME", alias = "name")]
    pub name: Option<String>,
}

pub(crate) type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
pub(crate) struct PointGeometry {
    pub coordinates: Position,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum LineGeometry {
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum AreaGeometry {
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
}

pub(crate) type RoadCollection = FeatureCollection<RoadProperties, LineGeometry>;
pub(crate) type CityCollection = FeatureCollection<CityProperties, PointGeometry>;
pub(crate) type BusStopCollection = FeatureCollection<NamedProperties, PointGeometry>;
pub(crate) type AirportCollection = FeatureCollection<NamedProperties, AreaGeometry>;
