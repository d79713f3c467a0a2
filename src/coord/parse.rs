use crate::error::QthError;

/// Which axis a coordinate value belongs to. Picks the hemisphere letter when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateFormat {
    /// Decimal degrees with six places, e.g. `48.208200`
    #[default]
    Decimal,
    /// Degrees, minutes and seconds, e.g. `48°12'29.5"N`
    Dms,
}

const SEPARATORS: &[char] = &['°', '\'', '"', '′', '″'];

/// Parses a coordinate value in decimal or sexagesimal notation.
///
/// Accepted forms:
/// - decimal: `47.5`, `-47.5`, `47.5N`
/// - degrees/minutes/seconds: `47°30'30"N`, `47 30 30 N`
/// - degrees/decimal minutes: `47°30.5'N`, `47 30.5 N`
///
/// A trailing `S` or `W` always yields a negative value.
///
/// # Example
/// ```
/// use qth_locator::parse_coordinate;
///
/// let lat = parse_coordinate("48°12'30\"N").unwrap();
/// assert!((lat - 48.208333).abs() < 1e-6);
/// assert_eq!(parse_coordinate("16 30 W").unwrap(), -16.5);
/// ```
pub fn parse_coordinate(s: &str) -> Result<f64, QthError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(QthError::CoordinateParseError(
            "Coordinate string is empty".to_string(),
        ));
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        return finite(value, trimmed);
    }

    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (hemisphere, rest) = match rest.chars().last() {
        Some(c) if matches!(c.to_ascii_uppercase(), 'N' | 'S' | 'E' | 'W') => {
            (Some(c.to_ascii_uppercase()), &rest[..rest.len() - c.len_utf8()])
        }
        _ => (None, rest),
    };

    let tokens: Vec<&str> = rest
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|t| !t.is_empty())
        .collect();

    let magnitude = match tokens.as_slice() {
        [deg] => number(deg, trimmed)?,
        [deg, min] => {
            let deg = whole(deg, trimmed)?;
            let min = sexagesimal(number(min, trimmed)?, trimmed)?;
            deg + min / 60.0
        }
        [deg, min, sec] => {
            let deg = whole(deg, trimmed)?;
            let min = sexagesimal(whole(min, trimmed)?, trimmed)?;
            let sec = sexagesimal(number(sec, trimmed)?, trimmed)?;
            deg + min / 60.0 + sec / 3600.0
        }
        _ => {
            return Err(QthError::CoordinateParseError(format!(
                "Unrecognised coordinate format: '{}'",
                trimmed
            )));
        }
    };

    let mut value = if negative { -magnitude } else { magnitude };
    if matches!(hemisphere, Some('S') | Some('W')) {
        value = -value.abs();
    }

    finite(value, trimmed)
}

/// Formats a coordinate value for display.
///
/// # Example
/// ```
/// use qth_locator::{Axis, CoordinateFormat, format_coordinate};
///
/// assert_eq!(format_coordinate(48.2082, Axis::Latitude, CoordinateFormat::Decimal), "48.208200");
/// assert_eq!(format_coordinate(-74.006, Axis::Longitude, CoordinateFormat::Dms), "74°0'21.6\"W");
/// ```
pub fn format_coordinate(value: f64, axis: Axis, format: CoordinateFormat) -> String {
    match format {
        CoordinateFormat::Decimal => format!("{:.6}", value),
        CoordinateFormat::Dms => {
            let absolute = value.abs();
            let degrees = absolute.floor();
            let minutes_float = (absolute - degrees) * 60.0;
            let minutes = minutes_float.floor();
            let seconds = (minutes_float - minutes) * 60.0;

            let direction = match (axis, value >= 0.0) {
                (Axis::Latitude, true) => 'N',
                (Axis::Latitude, false) => 'S',
                (Axis::Longitude, true) => 'E',
                (Axis::Longitude, false) => 'W',
            };

            format!("{}°{}'{:.1}\"{}", degrees, minutes, seconds, direction)
        }
    }
}

fn number(token: &str, input: &str) -> Result<f64, QthError> {
    // Only one leading sign is allowed, and it was already stripped
    if !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(QthError::CoordinateParseError(format!(
            "Invalid number '{}' in '{}'",
            token, input
        )));
    }
    token.parse::<f64>().map_err(|_| {
        QthError::CoordinateParseError(format!("Invalid number '{}' in '{}'", token, input))
    })
}

fn whole(token: &str, input: &str) -> Result<f64, QthError> {
    if !token.chars().all(|c| c.is_ascii_digit()) {
        return Err(QthError::CoordinateParseError(format!(
            "Expected whole number, got '{}' in '{}'",
            token, input
        )));
    }
    number(token, input)
}

fn sexagesimal(value: f64, input: &str) -> Result<f64, QthError> {
    if !(0.0..60.0).contains(&value) {
        return Err(QthError::CoordinateParseError(format!(
            "Minutes and seconds must be below 60 in '{}'",
            input
        )));
    }
    Ok(value)
}

fn finite(value: f64, input: &str) -> Result<f64, QthError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QthError::CoordinateParseError(format!(
            "Coordinate is not finite: '{}'",
            input
        )))
    }
}
