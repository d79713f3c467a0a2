use crate::coord::{Coordinate, Coordinates, round_to};
use crate::error::QthError;
use crate::locator::constants::{COORD_DECIMALS, LEVELS, MAX_LOCATOR_LEN};
use crate::locator::precision::LocatorPrecision;
use tracing::debug;

/// Validates a locator and returns its canonical form.
///
/// Surrounding whitespace is ignored. The field pair is folded to upper case and the
/// subsquare and extended subsquare pairs to lower case. A single bad pair rejects
/// the whole string.
///
/// # Example
/// ```
/// use qth_locator::normalize;
///
/// assert_eq!(normalize(" jn88FR ").unwrap(), "JN88fr");
/// assert!(normalize("AA1a").is_err());
/// ```
pub fn normalize(input: &str) -> Result<String, QthError> {
    let trimmed = input.trim();
    let chars: Vec<char> = trimmed.chars().collect();
    let len = chars.len();

    if len < 2 || len > MAX_LOCATOR_LEN || len % 2 != 0 {
        debug!(locator = %trimmed, len, "rejected locator length");
        return Err(QthError::InvalidLocator(format!(
            "'{}' must have 2, 4, 6, 8 or 10 characters",
            trimmed
        )));
    }

    let mut normalized = String::with_capacity(len);
    for (pair, level) in chars.chunks(2).zip(LEVELS.iter()) {
        for &c in pair {
            match level.kind.canonical(c) {
                Some(folded) => normalized.push(folded),
                None => {
                    debug!(locator = %trimmed, character = %c, "rejected locator character");
                    return Err(QthError::InvalidLocator(format!(
                        "'{}' has an invalid character '{}'",
                        trimmed, c
                    )));
                }
            }
        }
    }

    Ok(normalized)
}

/// Returns `true` when `input` normalizes to a valid locator.
pub fn is_valid(input: &str) -> bool {
    normalize(input).is_ok()
}

/// Returns the precision of a valid locator.
pub fn precision_of(input: &str) -> Result<LocatorPrecision, QthError> {
    LocatorPrecision::from_len(normalize(input)?.len())
}

/// Encodes a coordinate into a Maidenhead locator.
///
/// Each level takes the integer quotient of the remaining offset by its cell size.
/// Quotients are clamped to the level's range so that the upper edges
/// (latitude 90, longitude 180) land in the last cell instead of overflowing.
///
/// # Example
/// ```
/// use qth_locator::{LocatorPrecision, encode};
///
/// # fn main() -> Result<(), qth_locator::QthError> {
/// // Vienna, as a (lon, lat) tuple
/// let locator = encode(&(16.3738, 48.2082), LocatorPrecision::Subsquare)?;
/// assert_eq!(locator, "JN88ee");
/// # Ok(())
/// # }
/// ```
pub fn encode(coord: &impl Coordinate, precision: LocatorPrecision) -> Result<String, QthError> {
    let coords = Coordinates::from_coord(coord);
    if let Err(e) = coords.validate() {
        debug!(lat = coords.latitude, lon = coords.longitude, "rejected coordinate");
        return Err(e);
    }

    let mut lon = coords.longitude + 180.0;
    let mut lat = coords.latitude + 90.0;
    let mut locator = String::with_capacity(precision.len());

    for level in precision.levels() {
        let max = level.kind.divisions() - 1;
        // `as u32` saturates, so a tiny negative remainder becomes 0
        let lon_idx = ((lon / level.lon_size).floor() as u32).min(max);
        let lat_idx = ((lat / level.lat_size).floor() as u32).min(max);

        for idx in [lon_idx, lat_idx] {
            let symbol = level.kind.symbol(idx).ok_or_else(|| {
                QthError::UnresolvableConversion(format!(
                    "index {} has no {:?} symbol",
                    idx, level.kind
                ))
            })?;
            locator.push(symbol);
        }

        lon -= lon_idx as f64 * level.lon_size;
        lat -= lat_idx as f64 * level.lat_size;
    }

    Ok(locator)
}

/// Decodes a locator into the center of the cell it denotes.
///
/// `encode(&decode(l)?, precision_of(l)?)` always returns `normalize(l)`.
///
/// # Example
/// ```
/// use qth_locator::decode;
///
/// let center = decode("JN88").unwrap();
/// assert_eq!(center.longitude, 17.0);
/// assert_eq!(center.latitude, 48.5);
/// ```
pub fn decode(input: &str) -> Result<Coordinates, QthError> {
    let cell = locate(&normalize(input)?)?;
    Ok(cell.center())
}

/// South-west corner and size of a locator's cell, before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawCell {
    pub west: f64,
    pub south: f64,
    pub lon_size: f64,
    pub lat_size: f64,
}

impl RawCell {
    pub fn center(&self) -> Coordinates {
        Coordinates::new_unchecked(
            round_to(self.south + self.lat_size / 2.0, COORD_DECIMALS),
            round_to(self.west + self.lon_size / 2.0, COORD_DECIMALS),
        )
    }
}

/// Accumulates the cell offsets of an already normalized locator.
pub(crate) fn locate(normalized: &str) -> Result<RawCell, QthError> {
    let chars: Vec<char> = normalized.chars().collect();
    let mut cell = RawCell {
        west: -180.0,
        south: -90.0,
        lon_size: 360.0,
        lat_size: 180.0,
    };

    for (pair, level) in chars.chunks(2).zip(LEVELS.iter()) {
        let index = |c: char| {
            level.kind.index(c).ok_or_else(|| {
                QthError::InvalidLocator(format!("'{}' is not normalized", normalized))
            })
        };
        cell.west += index(pair[0])? as f64 * level.lon_size;
        cell.south += index(pair[1])? as f64 * level.lat_size;
        cell.lon_size = level.lon_size;
        cell.lat_size = level.lat_size;
    }

    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_case() -> Result<(), QthError> {
        assert_eq!(normalize("jn88fr")?, "JN88fr");
        assert_eq!(normalize("JN88FR")?, "JN88fr");
        assert_eq!(normalize("  io91WM  ")?, "IO91wm");
        assert_eq!(normalize("jn88ee49UX")?, "JN88ee49ux");
        assert_eq!(normalize("rr")?, "RR");
        Ok(())
    }

    #[test]
    fn test_normalize_rejects_bad_lengths() {
        for input in ["", " ", "J", "JN8", "JN88e", "JN88ee49uxa", "JN88ee49ux00"] {
            assert!(normalize(input).is_err(), "{:?} should be rejected", input);
        }
    }

    #[test]
    fn test_normalize_rejects_bad_character_classes() {
        for input in [
            "AA1a", "SA", "AS", "JN8x", "JN88ey", "JN88e4", "JN88eea9", "JN88ee49uy", "J188",
            "ÄN88",
        ] {
            assert!(
                matches!(normalize(input), Err(QthError::InvalidLocator(_))),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_is_valid_and_precision_of() -> Result<(), QthError> {
        assert!(is_valid("JO62qm"));
        assert!(!is_valid("JO62q"));
        assert_eq!(precision_of("jo62")?, LocatorPrecision::Square);
        assert_eq!(precision_of("JO62qm48")?, LocatorPrecision::ExtendedSquare);
        assert!(precision_of("XX").is_err());
        Ok(())
    }

    #[test]
    fn test_encode_known_cities() -> Result<(), QthError> {
        let cases = [
            ((16.3738, 48.2082), "JN88ee"),
            ((-0.1278, 51.5074), "IO91wm"),
            ((-74.0060, 40.7128), "FN20xr"),
            ((139.6503, 35.6762), "PM95tq"),
            ((151.2093, -33.8688), "QF56od"),
            ((13.405, 52.52), "JO62qm"),
        ];
        for (coord, expected) in cases {
            assert_eq!(encode(&coord, LocatorPrecision::Subsquare)?, expected);
        }
        Ok(())
    }

    #[test]
    fn test_encode_all_precisions_are_prefixes() -> Result<(), QthError> {
        let full = encode(&(16.3738, 48.2082), LocatorPrecision::ExtendedSubsquare)?;
        assert_eq!(full, "JN88ee49ux");
        for p in LocatorPrecision::ALL {
            let locator = encode(&(16.3738, 48.2082), p)?;
            assert_eq!(locator.len(), p.len());
            assert!(full.starts_with(&locator));
        }
        Ok(())
    }

    #[test]
    fn test_encode_clamps_upper_edges() -> Result<(), QthError> {
        assert_eq!(
            encode(&(180.0, 90.0), LocatorPrecision::ExtendedSubsquare)?,
            "RR99xx99xx"
        );
        assert_eq!(
            encode(&(-180.0, -90.0), LocatorPrecision::ExtendedSubsquare)?,
            "AA00aa00aa"
        );
        Ok(())
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        assert_eq!(
            encode(&(0.0, 90.01), LocatorPrecision::Square),
            Err(QthError::LatitudeOutOfRange(90.01))
        );
        assert_eq!(
            encode(&(-180.5, 0.0), LocatorPrecision::Square),
            Err(QthError::LongitudeOutOfRange(-180.5))
        );
        assert!(encode(&(0.0, f64::NAN), LocatorPrecision::Square).is_err());
    }

    #[test]
    fn test_decode_returns_cell_center() -> Result<(), QthError> {
        let center = decode("JN")?;
        assert_eq!(center, Coordinates::new_unchecked(45.0, 10.0));

        let center = decode("AA00")?;
        assert_eq!(center, Coordinates::new_unchecked(-89.5, -179.0));

        let center = decode("jn88ee")?;
        assert!((center.longitude - (16.0 + 4.5 * 2.0 / 24.0)).abs() < 1e-8);
        assert!((center.latitude - (48.0 + 4.5 / 24.0)).abs() < 1e-8);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_invalid() {
        assert!(decode("").is_err());
        assert!(decode("JN8").is_err());
        assert!(decode("ZZ00").is_err());
    }

    #[test]
    fn test_vienna_decodes_near_input() -> Result<(), QthError> {
        let vienna = Coordinates::new(48.2082, 16.3738)?;
        let center = decode(&encode(&vienna, LocatorPrecision::Subsquare)?)?;

        // Half of the subsquare diagonal at this latitude is roughly 3.5 km
        let dlat_km = (center.latitude - vienna.latitude) * 111.2;
        let dlon_km =
            (center.longitude - vienna.longitude) * 111.2 * vienna.latitude.to_radians().cos();
        assert!((dlat_km * dlat_km + dlon_km * dlon_km).sqrt() < 3.6);
        Ok(())
    }

    #[test]
    fn test_locator_round_trip_is_exact() -> Result<(), QthError> {
        let locators = [
            "AA", "RR", "JN", "JN88", "AA00", "RR99", "JN88ee", "IO91wm", "RR99xx", "AA00aa",
            "JN88ee49", "RR99xx99", "JN88ee49ux", "RR99xx99xx", "AA00aa00aa", "FN20xr55mk",
        ];
        for locator in locators {
            let precision = precision_of(locator)?;
            assert_eq!(encode(&decode(locator)?, precision)?, normalize(locator)?);
        }
        Ok(())
    }

    #[test]
    fn test_round_trip_on_a_global_sweep() -> Result<(), QthError> {
        for lon_step in 0..=72 {
            for lat_step in 0..=36 {
                let coord = (-180.0 + lon_step as f64 * 5.0, -90.0 + lat_step as f64 * 5.0);
                for p in LocatorPrecision::ALL {
                    let locator = encode(&coord, p)?;
                    assert_eq!(encode(&decode(&locator)?, p)?, locator);
                }
            }
        }
        Ok(())
    }
}
