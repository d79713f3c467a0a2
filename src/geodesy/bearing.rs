use crate::coord::{Coordinate, round_to};
use crate::geodesy::constants::COMPASS_SECTOR_DEGREES;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 16 points of the compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Cardinal {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

impl Cardinal {
    /// Clockwise from north.
    pub const ALL: [Cardinal; 16] = [
        Cardinal::N,
        Cardinal::Nne,
        Cardinal::Ne,
        Cardinal::Ene,
        Cardinal::E,
        Cardinal::Ese,
        Cardinal::Se,
        Cardinal::Sse,
        Cardinal::S,
        Cardinal::Ssw,
        Cardinal::Sw,
        Cardinal::Wsw,
        Cardinal::W,
        Cardinal::Wnw,
        Cardinal::Nw,
        Cardinal::Nnw,
    ];

    /// Nearest compass point for a bearing in degrees. Any finite angle is accepted.
    ///
    /// # Example
    /// ```
    /// use qth_locator::Cardinal;
    ///
    /// assert_eq!(Cardinal::from_degrees(300.0), Cardinal::Wnw);
    /// assert_eq!(Cardinal::from_degrees(-10.0), Cardinal::N);
    /// ```
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let index = (normalized / COMPASS_SECTOR_DEGREES).round() as usize % 16;
        Self::ALL[index]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Cardinal::N => "N",
            Cardinal::Nne => "NNE",
            Cardinal::Ne => "NE",
            Cardinal::Ene => "ENE",
            Cardinal::E => "E",
            Cardinal::Ese => "ESE",
            Cardinal::Se => "SE",
            Cardinal::Sse => "SSE",
            Cardinal::S => "S",
            Cardinal::Ssw => "SSW",
            Cardinal::Sw => "SW",
            Cardinal::Wsw => "WSW",
            Cardinal::W => "W",
            Cardinal::Wnw => "WNW",
            Cardinal::Nw => "NW",
            Cardinal::Nnw => "NNW",
        }
    }

    /// German abbreviation, with `O` (Ost) for east.
    pub const fn german_label(self) -> &'static str {
        match self {
            Cardinal::Nne => "NNO",
            Cardinal::Ne => "NO",
            Cardinal::Ene => "ONO",
            Cardinal::E => "O",
            Cardinal::Ese => "OSO",
            Cardinal::Se => "SO",
            Cardinal::Sse => "SSO",
            other => other.label(),
        }
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Initial bearing in `[0, 360)` rounded to 1 decimal place, with its compass point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingResult {
    pub degrees: f64,
    pub cardinal: Cardinal,
}

impl BearingResult {
    /// Normalizes and rounds an arbitrary angle.
    ///
    /// The cardinal is taken from the unrounded angle.
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let mut rounded = round_to(normalized, 1);
        if rounded >= 360.0 {
            rounded -= 360.0;
        }
        Self {
            degrees: rounded,
            cardinal: Cardinal::from_degrees(normalized),
        }
    }
}

impl fmt::Display for BearingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}° ({})", self.degrees, self.cardinal)
    }
}

/// Unrounded initial great-circle bearing in degrees, in `[0, 360)`.
pub fn initial_bearing(from: &impl Coordinate, to: &impl Coordinate) -> f64 {
    let phi1 = from.lat().to_radians();
    let phi2 = to.lat().to_radians();
    let d_lambda = (to.lon() - from.lon()).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Initial bearing along the great circle from `from` toward `to`.
///
/// # Example
/// ```
/// use qth_locator::{Cardinal, bearing};
///
/// let b = bearing(&(0.0, 0.0), &(90.0, 0.0));
/// assert_eq!(b.degrees, 90.0);
/// assert_eq!(b.cardinal, Cardinal::E);
/// ```
pub fn bearing(from: &impl Coordinate, to: &impl Coordinate) -> BearingResult {
    BearingResult::from_degrees(initial_bearing(from, to))
}

/// Long-path bearing: the short-path bearing turned around.
pub fn long_path_bearing(short_degrees: f64) -> BearingResult {
    BearingResult::from_degrees((short_degrees + 180.0) % 360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_sectors() {
        assert_eq!(Cardinal::from_degrees(0.0), Cardinal::N);
        assert_eq!(Cardinal::from_degrees(11.24), Cardinal::N);
        assert_eq!(Cardinal::from_degrees(11.25), Cardinal::Nne);
        assert_eq!(Cardinal::from_degrees(90.0), Cardinal::E);
        assert_eq!(Cardinal::from_degrees(202.5), Cardinal::Ssw);
        assert_eq!(Cardinal::from_degrees(348.75), Cardinal::N);
        assert_eq!(Cardinal::from_degrees(359.9), Cardinal::N);
        assert_eq!(Cardinal::from_degrees(720.0 + 45.0), Cardinal::Ne);
    }

    #[test]
    fn test_cardinal_labels() {
        let labels: Vec<&str> = Cardinal::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            [
                "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W",
                "WNW", "NW", "NNW"
            ]
        );
        assert_eq!(Cardinal::Ene.german_label(), "ONO");
        assert_eq!(Cardinal::Wsw.german_label(), "WSW");
        assert_eq!(Cardinal::Nnw.to_string(), "NNW");
    }

    #[test]
    fn test_cardinal_serializes_as_label() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Cardinal::Wnw)?, r#""WNW""#);
        let c: Cardinal = serde_json::from_str(r#""SSE""#)?;
        assert_eq!(c, Cardinal::Sse);
        Ok(())
    }

    #[test]
    fn test_vienna_to_new_york() {
        let b = bearing(&(16.3738, 48.2082), &(-74.0060, 40.7128));
        assert!(b.degrees > 295.0 && b.degrees < 305.0);
        assert_eq!(b.degrees, 300.0);
        assert_eq!(b.cardinal, Cardinal::Wnw);
    }

    #[test]
    fn test_cardinal_directions_from_origin() {
        assert_eq!(bearing(&(0.0, 0.0), &(0.0, 10.0)).degrees, 0.0);
        assert_eq!(bearing(&(0.0, 0.0), &(10.0, 0.0)).degrees, 90.0);
        assert_eq!(bearing(&(0.0, 10.0), &(0.0, 0.0)).degrees, 180.0);
        assert_eq!(bearing(&(10.0, 0.0), &(0.0, 0.0)).degrees, 270.0);
    }

    #[test]
    fn test_bearing_never_negative_or_360() {
        let b = BearingResult::from_degrees(-0.01);
        assert_eq!(b.degrees, 0.0);
        assert_eq!(b.cardinal, Cardinal::N);

        let b = BearingResult::from_degrees(359.97);
        assert_eq!(b.degrees, 0.0);
    }

    #[test]
    fn test_long_path_is_opposite() {
        for short in [0.0, 45.5, 179.9, 180.0, 300.0, 359.9] {
            let long = long_path_bearing(short);
            let diff = (long.degrees - short).rem_euclid(360.0);
            assert!((diff - 180.0).abs() < 1e-9, "short {} long {}", short, long.degrees);
        }
        assert_eq!(long_path_bearing(300.0).cardinal, Cardinal::Ese);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(initial_bearing(&(0.0, f64::NAN), &(1.0, 1.0)).is_nan());
    }
}
