/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Equatorial circumference used for long-path estimates.
pub const EARTH_CIRCUMFERENCE_KM: f64 = 40075.0;

/// Statute miles per kilometre.
pub const MILES_PER_KM: f64 = 0.621371;

/// Kilometres per nautical mile.
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// Degrees covered by one of the 16 compass points.
pub const COMPASS_SECTOR_DEGREES: f64 = 22.5;
