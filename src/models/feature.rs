//! Geographic features consumed by the scorers.

use geo::{LineString, MultiPolygon, Point};

/// OSM `highway=*` classes recognised by the road scorer.
/// See: https://wiki.openstreetmap.org/wiki/Key:highway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighwayClass {
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Unclassified,
    Residential,
    Service,
    Road,
    /// Any other tag value (track, footway, ...) or a missing tag
    Unrecognized,
}

/// How a highway class contributes to the road rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadTier {
    /// Counted towards the major-road multiplier
    Major,
    /// Accumulated into the coverage sum
    Minor,
    /// Not scored at all
    Ignored,
}

impl HighwayClass {
    /// Parse a raw `highway` tag value
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "motorway" => HighwayClass::Motorway,
            "motorway_link" => HighwayClass::MotorwayLink,
            "trunk" => HighwayClass::Trunk,
            "trunk_link" => HighwayClass::TrunkLink,
            "primary" => HighwayClass::Primary,
            "primary_link" => HighwayClass::PrimaryLink,
            "secondary" => HighwayClass::Secondary,
            "secondary_link" => HighwayClass::SecondaryLink,
            "tertiary" => HighwayClass::Tertiary,
            "tertiary_link" => HighwayClass::TertiaryLink,
            "unclassified" => HighwayClass::Unclassified,
            "residential" => HighwayClass::Residential,
            "service" => HighwayClass::Service,
            "road" => HighwayClass::Road,
            _ => HighwayClass::Unrecognized,
        }
    }

    pub fn tier(&self) -> RoadTier {
        match self {
            HighwayClass::Motorway
            | HighwayClass::MotorwayLink
            | HighwayClass::Trunk
            | HighwayClass::TrunkLink
            | HighwayClass::Primary
            | HighwayClass::PrimaryLink => RoadTier::Major,
            HighwayClass::Secondary
            | HighwayClass::SecondaryLink
            | HighwayClass::Tertiary
            | HighwayClass::TertiaryLink
            | HighwayClass::Unclassified
            | HighwayClass::Residential
            | HighwayClass::Service
            | HighwayClass::Road => RoadTier::Minor,
            HighwayClass::Unrecognized => RoadTier::Ignored,
        }
    }
}

/// A settlement to be rated
#[derive(Debug, Clone)]
pub struct City {
    /// Unique name, used as the join key between result sets
    pub name: String,
    /// OSM `place=*` classification (city, town, village, locality, ...)
    pub place: String,
    pub location: Point<f64>,
}

impl City {
    pub fn new(name: impl Into<String>, place: impl Into<String>, location: Point<f64>) -> Self {
        Self {
            name: name.into(),
            place: place.into(),
            location,
        }
    }

    /// Localities are never rated
    pub fn is_locality(&self) -> bool {
        self.place == "locality"
    }
}

/// A road polyline
#[derive(Debug, Clone)]
pub struct RoadFeature {
    pub highway: HighwayClass,
    /// Surface tag, kept for completeness (not scored)
    pub surface: Option<String>,
    pub path: LineString<f64>,
}

impl RoadFeature {
    pub fn new(highway: HighwayClass, path: LineString<f64>) -> Self {
        Self {
            highway,
            surface: None,
            path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BusStop {
    pub name: Option<String>,
    pub location: Point<f64>,
}

impl BusStop {
    pub fn new(location: Point<f64>) -> Self {
        Self {
            name: None,
            location,
        }
    }
}

/// An airport outline
#[derive(Debug, Clone)]
pub struct Airport {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

impl Airport {
    pub fn new(name: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: name.into(),
            geometry,
        }
    }

    /// Representative location: first vertex of the first polygon's exterior ring
    pub fn location(&self) -> Option<Point<f64>> {
        self.geometry
            .0
            .first()
            .and_then(|polygon| polygon.exterior().0.first())
            .map(|coord| Point::from(*coord))
    }
}
