use thiserror::Error;

/// Error type for qth-locator operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QthError {
    /// The locator has a wrong length or a character of the wrong class.
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),
    /// Latitude is outside -90..=90.
    #[error("Latitude out of range: {0}")]
    LatitudeOutOfRange(f64),
    /// Longitude is outside -180..=180.
    #[error("Longitude out of range: {0}")]
    LongitudeOutOfRange(f64),
    /// A grid index could not be mapped to a locator character.
    #[error("Unresolvable conversion: {0}")]
    UnresolvableConversion(String),
    /// Locator precision is not one of 2, 4, 6, 8 or 10.
    #[error("Invalid precision: {0}")]
    InvalidPrecision(u8),
    /// Grid level is not one of 2, 4 or 6.
    #[error("Invalid grid level: {0}")]
    InvalidGridLevel(u8),
    /// The viewport is missing or cannot be gridded.
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),
    /// Even the coarsest grid level exceeds the cell cap.
    #[error("Too many cells: {cells} exceeds the cap of {max}")]
    TooManyCells { cells: usize, max: usize },
    /// A coordinate string could not be parsed.
    #[error("Coordinate parse error: {0}")]
    CoordinateParseError(String),
    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(String),
    /// JSON or GeoJSON serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
