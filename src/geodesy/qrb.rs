use crate::coord::{Coordinate, Coordinates};
use crate::error::QthError;
use crate::geodesy::bearing::{BearingResult, bearing, long_path_bearing};
use crate::geodesy::distance::{DistanceResult, distance, long_path_distance};
use crate::locator::{LocatorPrecision, decode, encode, normalize, precision_of};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named position: a locator together with the coordinates it stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub locator: String,
    pub coordinates: Coordinates,
    pub precision: LocatorPrecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Location {
    /// Builds a location at the center of a locator's cell.
    pub fn from_locator(locator: &str) -> Result<Self, QthError> {
        let normalized = normalize(locator)?;
        Ok(Self {
            coordinates: decode(&normalized)?,
            precision: precision_of(&normalized)?,
            locator: normalized,
            label: None,
        })
    }

    /// Builds a location that keeps the exact coordinates and their locator.
    pub fn from_coordinates(
        coord: &impl Coordinate,
        precision: LocatorPrecision,
    ) -> Result<Self, QthError> {
        let coordinates = Coordinates::from_coord(coord);
        Ok(Self {
            locator: encode(&coordinates, precision)?,
            coordinates,
            precision,
            label: None,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Coordinate for Location {
    fn lon(&self) -> f64 {
        self.coordinates.longitude
    }
    fn lat(&self) -> f64 {
        self.coordinates.latitude
    }
}

/// Distance and bearing along one direction of the great circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub distance: DistanceResult,
    pub bearing: BearingResult,
}

/// Short and long path between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub from: Location,
    pub to: Location,
    pub short_path: PathResult,
    pub long_path: PathResult,
}

/// Computes QRB (distance) and QTF (bearing) for both paths between two locations.
///
/// The long path is derived from the rounded short-path values.
///
/// # Example
/// ```
/// use qth_locator::{Location, calculate_qrb_qtf};
///
/// # fn main() -> Result<(), qth_locator::QthError> {
/// let from = Location::from_locator("JN88ee")?;
/// let to = Location::from_locator("FN20xr")?;
/// let result = calculate_qrb_qtf(&from, &to);
///
/// let total = result.short_path.distance.kilometers + result.long_path.distance.kilometers;
/// assert!((total - 40075.0).abs() < 0.01);
/// # Ok(())
/// # }
/// ```
pub fn calculate_qrb_qtf(from: &Location, to: &Location) -> CalculationResult {
    let short_distance = distance(from, to);
    let short_bearing = bearing(from, to);

    CalculationResult {
        from: from.clone(),
        to: to.clone(),
        short_path: PathResult {
            distance: short_distance,
            bearing: short_bearing,
        },
        long_path: PathResult {
            distance: long_path_distance(short_distance.kilometers),
            bearing: long_path_bearing(short_bearing.degrees),
        },
    }
}

/// One entry of a multi-point comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub locator: String,
    pub coordinates: Coordinates,
    pub distance: DistanceResult,
    pub bearing: BearingResult,
}

/// Short-path distance and bearing from `base` to each locator, nearest first.
///
/// Locators that fail to normalize are skipped.
pub fn compare_from<S: AsRef<str>>(base: &impl Coordinate, locators: &[S]) -> Vec<Comparison> {
    let mut results: Vec<Comparison> = locators
        .iter()
        .filter_map(|locator| {
            let locator = locator.as_ref();
            match Location::from_locator(locator) {
                Ok(location) => Some(location),
                Err(e) => {
                    debug!(locator, error = %e, "skipping locator in comparison");
                    None
                }
            }
        })
        .map(|location| Comparison {
            distance: distance(base, &location),
            bearing: bearing(base, &location),
            coordinates: location.coordinates,
            locator: location.locator,
        })
        .collect();

    results.sort_by(|a, b| a.distance.kilometers.total_cmp(&b.distance.kilometers));
    results
}
