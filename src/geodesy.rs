//! Ellipsoidal distance between two geographic points.
//!
//! Inverse Vincenty formula on the WGS-84 ellipsoid, via `geo`. Points follow
//! the `geo` convention: `x` is longitude, `y` is latitude, both in degrees.

use geo::{Point, VincentyDistance};
use thiserror::Error;

/// Failure of the iterative geodesic solver
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DistanceError {
    /// Lambda did not settle, usually for (nearly) antipodal points
    #[error("geodesic solver did not converge between {from:?} and {to:?}")]
    NonConvergence { from: Point<f64>, to: Point<f64> },
}

/// Geodesic distance between `a` and `b` in kilometres.
pub fn vincenty_km(a: Point<f64>, b: Point<f64>) -> Result<f64, DistanceError> {
    a.vincenty_distance(&b)
        .map(|m| m / 1000.0)
        .map_err(|_| DistanceError::NonConvergence { from: a, to: b })
}
