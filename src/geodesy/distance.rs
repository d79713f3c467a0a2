use crate::coord::{Coordinate, round_to};
use crate::geodesy::constants::{
    EARTH_CIRCUMFERENCE_KM, EARTH_RADIUS_KM, KM_PER_NAUTICAL_MILE, MILES_PER_KM,
};
use serde::{Deserialize, Serialize};

/// One distance in three units, each rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResult {
    pub kilometers: f64,
    pub miles: f64,
    pub nautical_miles: f64,
}

impl DistanceResult {
    /// Converts an unrounded kilometre value. Every unit is rounded independently.
    pub fn from_km(km: f64) -> Self {
        Self {
            kilometers: round_to(km, 2),
            miles: round_to(km * MILES_PER_KM, 2),
            nautical_miles: round_to(km / KM_PER_NAUTICAL_MILE, 2),
        }
    }
}

/// Central angle in radians between two points (haversine).
pub(crate) fn central_angle(from: &impl Coordinate, to: &impl Coordinate) -> f64 {
    let phi1 = from.lat().to_radians();
    let phi2 = to.lat().to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = (to.lon() - from.lon()).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * h.sqrt().clamp(0.0, 1.0).asin()
}

/// Unrounded great-circle distance in kilometres.
pub fn distance_km(from: &impl Coordinate, to: &impl Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_KM
}

/// Short-path great-circle distance on a sphere of mean Earth radius.
///
/// # Example
/// ```
/// use qth_locator::distance;
///
/// // Vienna to New York, (lon, lat)
/// let d = distance(&(16.3738, 48.2082), &(-74.0060, 40.7128));
/// assert!((d.kilometers - 6796.34).abs() < 0.5);
/// ```
pub fn distance(from: &impl Coordinate, to: &impl Coordinate) -> DistanceResult {
    DistanceResult::from_km(distance_km(from, to))
}

/// Long-path distance: the rest of the circumference after the short path.
///
/// Assumes a spherical Earth of fixed circumference, good enough for
/// propagation estimates.
pub fn long_path_distance(short_km: f64) -> DistanceResult {
    DistanceResult::from_km(EARTH_CIRCUMFERENCE_KM - short_km)
}
