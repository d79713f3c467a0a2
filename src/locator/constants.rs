/// Letters used for the field pair (18 divisions).
pub const FIELD_CHARS: &str = "ABCDEFGHIJKLMNOPQR";

/// Letters used for the subsquare and extended subsquare pairs (24 divisions).
pub const SUBSQUARE_CHARS: &str = "abcdefghijklmnopqrstuvwx";

const DIGIT_CHARS: &str = "0123456789";

/// Maximum locator length (five 2-character pairs).
pub const MAX_LOCATOR_LEN: usize = 10;

/// Character class of one locator pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharKind {
    /// `A`-`R`, upper case
    Field,
    /// `0`-`9`
    Digit,
    /// `a`-`x`, lower case
    Letter,
}

impl CharKind {
    /// Symbols of this class in index order.
    pub const fn charset(self) -> &'static str {
        match self {
            CharKind::Field => FIELD_CHARS,
            CharKind::Digit => DIGIT_CHARS,
            CharKind::Letter => SUBSQUARE_CHARS,
        }
    }

    /// Number of divisions per axis at this class.
    pub const fn divisions(self) -> u32 {
        self.charset().len() as u32
    }

    /// Folds `c` into canonical case, or `None` if it is outside this class.
    pub fn canonical(self, c: char) -> Option<char> {
        let folded = match self {
            CharKind::Field => c.to_ascii_uppercase(),
            CharKind::Digit => c,
            CharKind::Letter => c.to_ascii_lowercase(),
        };
        self.index(folded).map(|_| folded)
    }

    /// Index of a canonical character within this class.
    pub fn index(self, c: char) -> Option<u32> {
        // Charsets are ASCII, so byte offsets are indices
        self.charset().find(c).map(|i| i as u32)
    }

    /// Character for `index`, or `None` if the index has no symbol.
    pub fn symbol(self, index: u32) -> Option<char> {
        self.charset().chars().nth(usize::try_from(index).ok()?)
    }
}

/// One hierarchical level of the Maidenhead system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    pub kind: CharKind,
    /// Cell width in degrees of longitude
    pub lon_size: f64,
    /// Cell height in degrees of latitude
    pub lat_size: f64,
}

/// Field, square, subsquare, extended square, extended subsquare.
pub const LEVELS: [Level; 5] = [
    Level {
        kind: CharKind::Field,
        lon_size: 20.0,
        lat_size: 10.0,
    },
    Level {
        kind: CharKind::Digit,
        lon_size: 2.0,
        lat_size: 1.0,
    },
    Level {
        kind: CharKind::Letter,
        lon_size: 2.0 / 24.0,
        lat_size: 1.0 / 24.0,
    },
    Level {
        kind: CharKind::Digit,
        lon_size: 2.0 / 240.0,
        lat_size: 1.0 / 240.0,
    },
    Level {
        kind: CharKind::Letter,
        lon_size: 2.0 / 240.0 / 24.0,
        lat_size: 1.0 / 240.0 / 24.0,
    },
];

/// Decimal places kept on decoded centers and bounds.
pub(crate) const COORD_DECIMALS: i32 = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charsets_match_divisions() {
        assert_eq!(FIELD_CHARS.len() as u32, CharKind::Field.divisions());
        assert_eq!(SUBSQUARE_CHARS.len() as u32, CharKind::Letter.divisions());

        for (i, c) in FIELD_CHARS.chars().enumerate() {
            assert_eq!(CharKind::Field.symbol(i as u32), Some(c));
            assert_eq!(CharKind::Field.index(c), Some(i as u32));
        }
        for (i, c) in SUBSQUARE_CHARS.chars().enumerate() {
            assert_eq!(CharKind::Letter.symbol(i as u32), Some(c));
            assert_eq!(CharKind::Letter.index(c), Some(i as u32));
        }
        assert_eq!(CharKind::Digit.divisions(), 10);
    }

    #[test]
    fn test_symbol_out_of_range() {
        assert_eq!(CharKind::Field.symbol(18), None);
        assert_eq!(CharKind::Digit.symbol(10), None);
        assert_eq!(CharKind::Letter.symbol(24), None);
    }

    #[test]
    fn test_canonical_folds_case() {
        assert_eq!(CharKind::Field.canonical('j'), Some('J'));
        assert_eq!(CharKind::Letter.canonical('F'), Some('f'));
        assert_eq!(CharKind::Field.canonical('S'), None);
        assert_eq!(CharKind::Letter.canonical('y'), None);
        assert_eq!(CharKind::Digit.canonical('a'), None);
        assert_eq!(CharKind::Field.index('a'), None);
        assert_eq!(CharKind::Letter.index('A'), None);
    }

    #[test]
    fn test_each_level_subdivides_the_previous() {
        for pair in LEVELS.windows(2) {
            let divisions = pair[1].kind.divisions() as f64;
            assert!((pair[0].lon_size / pair[1].lon_size - divisions).abs() < 1e-9);
            assert!((pair[0].lat_size / pair[1].lat_size - divisions).abs() < 1e-9);
        }
    }
}
