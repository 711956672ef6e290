//! Core data models for the rating engine.

pub mod feature;
pub mod result;

pub use feature::{Airport, BusStop, City, HighwayClass, RoadFeature, RoadTier};
pub use result::{AirportResult, BusResult, CompositeResult, RoadResult};
