mod parse;

pub use parse::{Axis, CoordinateFormat, format_coordinate, parse_coordinate};

use crate::error::QthError;
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Trait for types that can provide longitude/latitude in decimal degrees.
///
/// Implemented for `(lon, lat)` tuples, `geo_types::Point<f64>` and [`Coordinates`].
/// Tuples and points follow the x = longitude, y = latitude convention.
pub trait Coordinate {
    /// Returns the longitude in degrees.
    fn lon(&self) -> f64;
    /// Returns the latitude in degrees.
    fn lat(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn lon(&self) -> f64 {
        self.0
    }
    fn lat(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn lon(&self) -> f64 {
        self.x()
    }
    fn lat(&self) -> f64 {
        self.y()
    }
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Creates coordinates after checking latitude and longitude ranges.
    ///
    /// # Example
    /// ```
    /// use qth_locator::{Coordinates, QthError};
    ///
    /// let vienna = Coordinates::new(48.2082, 16.3738)?;
    /// assert!(Coordinates::new(91.0, 0.0).is_err());
    /// # Ok::<(), QthError>(())
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, QthError> {
        let coords = Self::new_unchecked(latitude, longitude);
        coords.validate()?;
        Ok(coords)
    }

    /// Creates coordinates without range checks.
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Copies any [`Coordinate`] into a `Coordinates` value.
    pub fn from_coord(coord: &impl Coordinate) -> Self {
        Self::new_unchecked(coord.lat(), coord.lon())
    }

    /// Checks that latitude is within -90..=90 and longitude within -180..=180.
    ///
    /// NaN fails both checks.
    pub fn validate(&self) -> Result<(), QthError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(QthError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(QthError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl Coordinate for Coordinates {
    fn lon(&self) -> f64 {
        self.longitude
    }
    fn lat(&self) -> f64 {
        self.latitude
    }
}

impl From<Point<f64>> for Coordinates {
    fn from(point: Point<f64>) -> Self {
        Self::new_unchecked(point.y(), point.x())
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coords: Coordinates) -> Self {
        coords.to_point()
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (16.3738, 48.2082);
        assert_eq!(tuple.lon(), 16.3738);
        assert_eq!(tuple.lat(), 48.2082);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(16.3738, 48.2082);
        assert_eq!(Coordinate::lon(&point), 16.3738);
        assert_eq!(Coordinate::lat(&point), 48.2082);
    }

    #[test]
    fn test_same_values_tuple_point_coordinates() {
        let from_tuple = Coordinates::from_coord(&(16.3738, 48.2082));
        let from_point = Coordinates::from(Point::new(16.3738, 48.2082));
        assert_eq!(from_tuple, from_point);
        assert_eq!(from_tuple.to_point(), Point::new(16.3738, 48.2082));
    }

    #[test]
    fn test_new_validates_ranges() -> Result<(), QthError> {
        let coords = Coordinates::new(-90.0, 180.0)?;
        assert_eq!(coords.latitude, -90.0);

        assert_eq!(
            Coordinates::new(90.5, 0.0),
            Err(QthError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            Coordinates::new(0.0, -180.1),
            Err(QthError::LongitudeOutOfRange(-180.1))
        );
        Ok(())
    }

    #[test]
    fn test_nan_is_out_of_range() {
        let result = Coordinates::new(f64::NAN, 0.0);
        assert!(matches!(result, Err(QthError::LatitudeOutOfRange(_))));
    }

    #[test]
    fn test_serializes_camel_case_fields() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&Coordinates::new_unchecked(1.5, -2.25))?;
        assert_eq!(json, r#"{"latitude":1.5,"longitude":-2.25}"#);
        Ok(())
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.125, 1), -0.1);
    }
}
