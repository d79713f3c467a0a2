//! # qth-locator
//!
//! Maidenhead (QTH) locators and the geodesy amateur radio operators compute with them.
//! There are currently four main entry points.
//!
//! ### 1. Locator Codec
//!
//! ```
//! use qth_locator::{LocatorPrecision, decode, encode, normalize};
//!
//! # fn main() -> Result<(), qth_locator::QthError> {
//! // (lon, lat) tuples, geo_types points and Coordinates all work
//! let locator = encode(&(16.3738, 48.2082), LocatorPrecision::Subsquare)?;
//! assert_eq!(locator, "JN88ee");
//!
//! let center = decode(&normalize(" jn88EE ")?)?;
//! println!("{}, {}", center.latitude, center.longitude);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `GridSquare` and `GridOverlay` - Cells and Viewports
//!
//! ```
//! use qth_locator::{Bounds, GridLevel, GridOverlay, GridSquare};
//!
//! # fn main() -> Result<(), qth_locator::QthError> {
//! let square = GridSquare::from_locator("JN88ee")?;
//! let polygon = square.to_polygon();
//!
//! let overlay = GridOverlay::builder()
//!     .level(GridLevel::Subsquare)
//!     .bounds(Bounds::new(55.0, 45.0, 20.0, 5.0))
//!     .build()?;
//!
//! // Too many subsquares for the default cap, so the overlay fell back to squares
//! assert_eq!(overlay.level(), GridLevel::Square);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `calculate_qrb_qtf` - Distance and Bearing
//!
//! ```
//! use qth_locator::{Location, calculate_qrb_qtf, great_circle_path};
//!
//! # fn main() -> Result<(), qth_locator::QthError> {
//! let from = Location::from_locator("JN88ee")?;
//! let to = Location::from_locator("FN20xr")?;
//!
//! let result = calculate_qrb_qtf(&from, &to);
//! println!("{} km at {}", result.short_path.distance.kilometers, result.short_path.bearing);
//!
//! let path = great_circle_path(&from, &to, 100);
//! # Ok(())
//! # }
//! ```
//!
//! ### 4. Batch and CSV Conversion
//!
//! ```no_run
//! use qth_locator::{BatchConfig, BatchMode, CsvLocatorConfig, CsvToLocator, convert_batch};
//!
//! let config = BatchConfig::new(BatchMode::CoordinatesToLocator);
//! let records = convert_batch("48.2082, 16.3738\n40.7128, -74.0060", &config);
//!
//! let config = CsvLocatorConfig::from_coords("Latitude", "Longitude").with_bounds();
//! "stations.csv".to_locator_csv("stations_grid.csv", &config).unwrap();
//! ```
//!

pub mod coord;
pub mod error;
pub mod geodesy;
pub mod grid;
pub mod io;
pub mod locator;

pub use coord::{
    Axis, Coordinate, CoordinateFormat, Coordinates, format_coordinate, parse_coordinate,
};
pub use error::QthError;
pub use geodesy::{
    BearingResult, CalculationResult, Cardinal, Comparison, DistanceResult, EARTH_CIRCUMFERENCE_KM,
    EARTH_RADIUS_KM, KM_PER_NAUTICAL_MILE, Location, MILES_PER_KM, PathResult, bearing,
    calculate_qrb_qtf, compare_from, destination_point, distance, distance_km, great_circle_path,
    initial_bearing, long_path_bearing, long_path_distance, midpoint,
};
pub use grid::{
    DEFAULT_MAX_CELLS, GridOverlay, GridOverlayBuilder, count_cells, generate_grids, iter_grids,
};
pub use io::{
    BatchConfig, BatchMode, BatchRecord, CsvLocatorConfig, CsvToLocator, LocatorSource,
    batch_to_json, calculation_to_json, convert_batch, convert_line, csv_to_locator_csv,
    path_to_geojson, square_to_wkt, squares_to_geojson, squares_to_geojson_string,
    write_batch_csv, write_calculation_csv,
};
pub use locator::{
    Bounds, FIELD_CHARS, GridLevel, GridSquare, LEVELS, LocatorPrecision, MAX_LOCATOR_LEN,
    SUBSQUARE_CHARS, decode, encode, grid_bounds, is_valid, normalize, precision_of,
};

pub use geo_types;
