pub mod bearing;
pub mod constants;
pub mod distance;
pub mod path;
pub mod qrb;

pub use bearing::{BearingResult, Cardinal, bearing, initial_bearing, long_path_bearing};
pub use constants::{EARTH_CIRCUMFERENCE_KM, EARTH_RADIUS_KM, KM_PER_NAUTICAL_MILE, MILES_PER_KM};
pub use distance::{DistanceResult, distance, distance_km, long_path_distance};
pub use path::{destination_point, great_circle_path, midpoint};
pub use qrb::{CalculationResult, Comparison, Location, PathResult, calculate_qrb_qtf, compare_from};
