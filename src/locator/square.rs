use crate::coord::{Coordinate, Coordinates, round_to};
use crate::error::QthError;
use crate::locator::codec::{locate, normalize};
use crate::locator::constants::COORD_DECIMALS;
use crate::locator::precision::LocatorPrecision;
use geo_types::{Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

/// A rectangle in degrees on the equirectangular projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Whole-world bounds.
    pub const fn world() -> Self {
        Self::new(90.0, -90.0, 180.0, -180.0)
    }

    /// Returns `true` when `coord` lies inside or on the edge of these bounds.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        (self.south..=self.north).contains(&coord.lat())
            && (self.west..=self.east).contains(&coord.lon())
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        )
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.max().y, rect.min().y, rect.max().x, rect.min().x)
    }
}

/// The rectangular cell denoted by a locator.
///
/// # Example
///
/// ```
/// use qth_locator::GridSquare;
///
/// # fn main() -> Result<(), qth_locator::QthError> {
/// let square = GridSquare::from_locator("jn88")?;
/// assert_eq!(square.locator, "JN88");
/// assert_eq!(square.bounds.west, 16.0);
/// assert_eq!(square.bounds.north, 49.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSquare {
    /// Canonical locator of the cell
    pub locator: String,
    /// Raw cell edges
    pub bounds: Bounds,
    /// Cell midpoint, equal to what `decode` returns for the locator
    pub center: Coordinates,
}

impl GridSquare {
    /// Builds the grid square for any valid locator.
    pub fn from_locator(locator: &str) -> Result<Self, QthError> {
        grid_bounds(locator)
    }

    /// Builds the grid square containing `coord` at the given precision.
    pub fn from_coord(
        coord: &impl Coordinate,
        precision: LocatorPrecision,
    ) -> Result<Self, QthError> {
        let locator = crate::locator::codec::encode(coord, precision)?;
        grid_bounds(&locator)
    }

    pub fn precision(&self) -> Result<LocatorPrecision, QthError> {
        LocatorPrecision::from_len(self.locator.len())
    }

    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.bounds.contains(coord)
    }

    pub fn to_rect(&self) -> Rect<f64> {
        self.bounds.to_rect()
    }

    /// Converts this square to a closed polygon, suitable for GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

/// Computes the bounds and center of the cell a locator denotes.
pub fn grid_bounds(input: &str) -> Result<GridSquare, QthError> {
    let locator = normalize(input)?;
    let cell = locate(&locator)?;

    let bounds = Bounds {
        north: round_to(cell.south + cell.lat_size, COORD_DECIMALS),
        south: round_to(cell.south, COORD_DECIMALS),
        east: round_to(cell.west + cell.lon_size, COORD_DECIMALS),
        west: round_to(cell.west, COORD_DECIMALS),
    };

    Ok(GridSquare {
        locator,
        bounds,
        center: cell.center(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::codec::{decode, encode};
    use geo::{Centroid, Contains};

    #[test]
    fn test_field_bounds() -> Result<(), QthError> {
        let square = grid_bounds("jn")?;
        assert_eq!(square.locator, "JN");
        assert_eq!(square.bounds, Bounds::new(50.0, 40.0, 20.0, 0.0));
        assert_eq!(square.center, Coordinates::new_unchecked(45.0, 10.0));
        Ok(())
    }

    #[test]
    fn test_subsquare_bounds_size() -> Result<(), QthError> {
        let square = grid_bounds("JN88ee")?;
        let b = square.bounds;
        assert!((b.east - b.west - 2.0 / 24.0).abs() < 1e-7);
        assert!((b.north - b.south - 1.0 / 24.0).abs() < 1e-7);
        assert!((b.west - (16.0 + 4.0 * 2.0 / 24.0)).abs() < 1e-8);
        Ok(())
    }

    #[test]
    fn test_center_matches_decode() -> Result<(), QthError> {
        for locator in ["IO91", "FN20xr", "PM95tq12", "QF56od88ab", "AA", "RR99xx99xx"] {
            assert_eq!(grid_bounds(locator)?.center, decode(locator)?);
        }
        Ok(())
    }

    #[test]
    fn test_decoded_center_lies_in_bounds() -> Result<(), QthError> {
        let points = [(16.3738, 48.2082), (-74.006, 40.7128), (180.0, 90.0), (-180.0, -90.0)];
        for point in points {
            for p in LocatorPrecision::ALL {
                let locator = encode(&point, p)?;
                let square = grid_bounds(&locator)?;
                assert!(square.contains(&decode(&locator)?));
                // The source point is in the same cell, up to the 8-decimal rounding of the edges
                let b = square.bounds;
                assert!(b.south - 1e-8 <= point.1 && point.1 <= b.north + 1e-8);
                assert!(b.west - 1e-8 <= point.0 && point.0 <= b.east + 1e-8);
            }
        }
        Ok(())
    }

    #[test]
    fn test_polygon_agrees_with_geo() -> Result<(), QthError> {
        let square = GridSquare::from_locator("IO91wm")?;
        let polygon = square.to_polygon();
        assert_eq!(polygon.exterior().coords().count(), 5);

        let centroid = polygon.centroid().map(Coordinates::from);
        let centroid = centroid.ok_or_else(|| QthError::InvalidLocator("no centroid".into()))?;
        assert!((centroid.latitude - square.center.latitude).abs() < 1e-7);
        assert!((centroid.longitude - square.center.longitude).abs() < 1e-7);
        assert!(polygon.contains(&square.center.to_point()));
        Ok(())
    }

    #[test]
    fn test_from_coord() -> Result<(), QthError> {
        let square = GridSquare::from_coord(&(13.405, 52.52), LocatorPrecision::Square)?;
        assert_eq!(square.locator, "JO62");
        assert_eq!(square.precision()?, LocatorPrecision::Square);
        assert!(square.contains(&(13.405, 52.52)));
        Ok(())
    }

    #[test]
    fn test_invalid_locator() {
        assert!(grid_bounds("JN8").is_err());
        assert!(GridSquare::from_locator("").is_err());
    }

    #[test]
    fn test_bounds_rect_round_trip() {
        let bounds = Bounds::new(50.0, 40.0, 20.0, 0.0);
        assert_eq!(Bounds::from(bounds.to_rect()), bounds);
        assert!(Bounds::world().contains(&(180.0, -90.0)));
    }
}
