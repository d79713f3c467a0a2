use crate::error::QthError;
use crate::geodesy::{CalculationResult, Location, PathResult};
use crate::io::batch::BatchRecord;
use serde_json::{Value, json};

fn location_value(location: &Location) -> Value {
    json!({
        "locator": location.locator,
        "latitude": location.coordinates.latitude,
        "longitude": location.coordinates.longitude,
    })
}

fn path_value(path: &PathResult) -> Value {
    json!({
        "distanceKm": path.distance.kilometers,
        "bearingDegrees": path.bearing.degrees,
    })
}

/// Renders a calculation as pretty JSON, reduced to locators, coordinates,
/// kilometers and degrees.
///
/// ```
/// use qth_locator::{Location, calculate_qrb_qtf, calculation_to_json};
///
/// # fn main() -> Result<(), qth_locator::QthError> {
/// let from = Location::from_locator("JN88")?;
/// let result = calculate_qrb_qtf(&from, &Location::from_locator("JO62")?);
/// let json = calculation_to_json(&result)?;
/// assert!(json.contains("\"shortPath\""));
/// # Ok(())
/// # }
/// ```
pub fn calculation_to_json(result: &CalculationResult) -> Result<String, QthError> {
    let value = json!({
        "from": location_value(&result.from),
        "to": location_value(&result.to),
        "shortPath": path_value(&result.short_path),
        "longPath": path_value(&result.long_path),
    });
    serde_json::to_string_pretty(&value).map_err(|e| QthError::SerializationError(e.to_string()))
}

/// Renders every batch record, failures included, as a pretty JSON array.
pub fn batch_to_json(records: &[BatchRecord]) -> Result<String, QthError> {
    serde_json::to_string_pretty(records).map_err(|e| QthError::SerializationError(e.to_string()))
}
