use crate::coord::{Coordinates, parse_coordinate};
use crate::error::QthError;
use crate::locator::{LocatorPrecision, decode, encode, normalize};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchMode {
    /// One locator per line, converted to its cell center
    #[default]
    LocatorToCoordinates,
    /// One `lat, lon` pair per line, converted to a locator
    CoordinatesToLocator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchConfig {
    pub mode: BatchMode,
    pub precision: LocatorPrecision,
}

impl BatchConfig {
    pub fn new(mode: BatchMode) -> Self {
        Self {
            mode,
            precision: LocatorPrecision::default(),
        }
    }

    /// Locator precision used in `CoordinatesToLocator` mode.
    pub fn precision(mut self, precision: LocatorPrecision) -> Self {
        self.precision = precision;
        self
    }
}

/// Outcome of converting one input line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub input: String,
    pub locator: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub error: Option<String>,
}

impl BatchRecord {
    fn converted(input: &str, locator: String, coords: Coordinates) -> Self {
        Self {
            input: input.to_string(),
            locator: Some(locator),
            latitude: Some(coords.latitude),
            longitude: Some(coords.longitude),
            error: None,
        }
    }

    fn failed(input: &str, error: &QthError) -> Self {
        Self {
            input: input.to_string(),
            locator: None,
            latitude: None,
            longitude: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Converts a block of text, one entry per line.
///
/// Blank lines are skipped. A line that fails to convert yields a record carrying the
/// error instead of aborting the batch. Output order follows input order.
///
/// # Example
/// ```
/// use qth_locator::{BatchConfig, BatchMode, convert_batch};
///
/// let config = BatchConfig::new(BatchMode::LocatorToCoordinates);
/// let records = convert_batch("JN88ee\n\nzz99\n", &config);
/// assert_eq!(records.len(), 2);
/// assert!(records[0].is_ok());
/// assert!(!records[1].is_ok());
/// ```
pub fn convert_batch(input: &str, config: &BatchConfig) -> Vec<BatchRecord> {
    let lines: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let records: Vec<BatchRecord> = lines
        .par_iter()
        .map(|line| convert_line(line, config))
        .collect();

    trace!(
        lines = records.len(),
        failed = records.iter().filter(|r| !r.is_ok()).count(),
        "converted batch"
    );
    records
}

/// Converts one trimmed input line.
pub fn convert_line(line: &str, config: &BatchConfig) -> BatchRecord {
    let result = match config.mode {
        BatchMode::LocatorToCoordinates => {
            normalize(line).and_then(|locator| decode(&locator).map(|coords| (locator, coords)))
        }
        BatchMode::CoordinatesToLocator => parse_pair(line).and_then(|coords| {
            coords.validate()?;
            encode(&coords, config.precision).map(|locator| (locator, coords))
        }),
    };

    match result {
        Ok((locator, coords)) => BatchRecord::converted(line, locator, coords),
        Err(e) => BatchRecord::failed(line, &e),
    }
}

/// Parses `lat, lon`, `lat;lon` or `lat lon`.
///
/// With a comma or semicolon present each side may itself contain spaces, as in
/// `48 12 N, 16 22 E`. Otherwise the line must be exactly two bare tokens.
fn parse_pair(line: &str) -> Result<Coordinates, QthError> {
    let parts: Vec<&str> = if line.contains([',', ';']) {
        line.split([',', ';']).map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    };

    match parts.as_slice() {
        [lat, lon] if !lat.is_empty() && !lon.is_empty() => Ok(Coordinates::new_unchecked(
            parse_coordinate(lat)?,
            parse_coordinate(lon)?,
        )),
        _ => Err(QthError::CoordinateParseError(format!(
            "expected 'lat, lon', got '{}'",
            line
        ))),
    }
}
