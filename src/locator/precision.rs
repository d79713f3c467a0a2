use crate::error::QthError;
use crate::locator::constants::{LEVELS, Level};
use serde::{Deserialize, Serialize};

/// Number of characters in a Maidenhead locator.
///
/// Always even: one 2-character pair per hierarchical level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum LocatorPrecision {
    /// `JN`
    Field = 2,
    /// `JN88`
    Square = 4,
    /// `JN88ee`
    #[default]
    Subsquare = 6,
    /// `JN88ee49`
    ExtendedSquare = 8,
    /// `JN88ee49ux`
    ExtendedSubsquare = 10,
}

impl LocatorPrecision {
    pub const ALL: [LocatorPrecision; 5] = [
        LocatorPrecision::Field,
        LocatorPrecision::Square,
        LocatorPrecision::Subsquare,
        LocatorPrecision::ExtendedSquare,
        LocatorPrecision::ExtendedSubsquare,
    ];

    /// Precision for a locator of `len` characters.
    pub fn from_len(len: usize) -> Result<Self, QthError> {
        u8::try_from(len)
            .map_err(|_| QthError::InvalidPrecision(u8::MAX))
            .and_then(Self::try_from)
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn len(self) -> usize {
        self as usize
    }

    /// Number of 2-character pairs.
    pub const fn pairs(self) -> usize {
        self.len() / 2
    }

    /// The levels a locator of this precision is built from.
    pub fn levels(self) -> &'static [Level] {
        &LEVELS[..self.pairs()]
    }

    /// Cell size `(lon_degrees, lat_degrees)` at this precision.
    pub fn cell_size(self) -> (f64, f64) {
        let level = LEVELS[self.pairs() - 1];
        (level.lon_size, level.lat_size)
    }
}

impl TryFrom<u8> for LocatorPrecision {
    type Error = QthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(LocatorPrecision::Field),
            4 => Ok(LocatorPrecision::Square),
            6 => Ok(LocatorPrecision::Subsquare),
            8 => Ok(LocatorPrecision::ExtendedSquare),
            10 => Ok(LocatorPrecision::ExtendedSubsquare),
            other => Err(QthError::InvalidPrecision(other)),
        }
    }
}

impl From<LocatorPrecision> for u8 {
    fn from(precision: LocatorPrecision) -> Self {
        precision.as_u8()
    }
}

/// Level of detail for viewport grid overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GridLevel {
    /// 20° x 10° fields
    Field = 2,
    /// 2° x 1° squares
    Square = 4,
    /// 5' x 2.5' subsquares
    Subsquare = 6,
}

impl GridLevel {
    pub const fn precision(self) -> LocatorPrecision {
        match self {
            GridLevel::Field => LocatorPrecision::Field,
            GridLevel::Square => LocatorPrecision::Square,
            GridLevel::Subsquare => LocatorPrecision::Subsquare,
        }
    }

    /// Next coarser level, `None` at `Field`.
    pub const fn coarser(self) -> Option<GridLevel> {
        match self {
            GridLevel::Field => None,
            GridLevel::Square => Some(GridLevel::Field),
            GridLevel::Subsquare => Some(GridLevel::Square),
        }
    }

    pub fn cell_size(self) -> (f64, f64) {
        self.precision().cell_size()
    }

    /// Number of cells covering the globe along `(longitude, latitude)`.
    pub const fn world_cells(self) -> (i64, i64) {
        match self {
            GridLevel::Field => (18, 18),
            GridLevel::Square => (180, 180),
            GridLevel::Subsquare => (4320, 4320),
        }
    }
}

impl TryFrom<u8> for GridLevel {
    type Error = QthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(GridLevel::Field),
            4 => Ok(GridLevel::Square),
            6 => Ok(GridLevel::Subsquare),
            other => Err(QthError::InvalidGridLevel(other)),
        }
    }
}

impl From<GridLevel> for u8 {
    fn from(level: GridLevel) -> Self {
        level as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_valid_and_odd() -> Result<(), QthError> {
        for p in LocatorPrecision::ALL {
            assert_eq!(LocatorPrecision::try_from(p.as_u8())?, p);
        }
        for odd in [0u8, 1, 3, 5, 7, 9, 11, 12] {
            assert_eq!(
                LocatorPrecision::try_from(odd),
                Err(QthError::InvalidPrecision(odd))
            );
        }
        Ok(())
    }

    #[test]
    fn test_from_len() -> Result<(), QthError> {
        assert_eq!(LocatorPrecision::from_len(8)?, LocatorPrecision::ExtendedSquare);
        assert!(LocatorPrecision::from_len(300).is_err());
        Ok(())
    }

    #[test]
    fn test_levels_and_cell_size() {
        assert_eq!(LocatorPrecision::Field.levels().len(), 1);
        assert_eq!(LocatorPrecision::ExtendedSubsquare.levels().len(), 5);
        assert_eq!(LocatorPrecision::Square.cell_size(), (2.0, 1.0));
        assert_eq!(LocatorPrecision::Field.cell_size(), (20.0, 10.0));
    }

    #[test]
    fn test_grid_level_coarser_chain() {
        assert_eq!(GridLevel::Subsquare.coarser(), Some(GridLevel::Square));
        assert_eq!(GridLevel::Square.coarser(), Some(GridLevel::Field));
        assert_eq!(GridLevel::Field.coarser(), None);
    }

    #[test]
    fn test_grid_level_rejects_fine_levels() {
        assert_eq!(GridLevel::try_from(8), Err(QthError::InvalidGridLevel(8)));
    }

    #[test]
    fn test_precision_serde_as_number() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&LocatorPrecision::Subsquare)?, "6");
        let p: LocatorPrecision = serde_json::from_str("10")?;
        assert_eq!(p, LocatorPrecision::ExtendedSubsquare);
        assert!(serde_json::from_str::<LocatorPrecision>("5").is_err());
        Ok(())
    }
}
