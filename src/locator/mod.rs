pub mod codec;
pub mod constants;
pub mod precision;
pub mod square;

pub use codec::{decode, encode, is_valid, normalize, precision_of};
pub use constants::{FIELD_CHARS, LEVELS, MAX_LOCATOR_LEN, SUBSQUARE_CHARS};
pub use precision::{GridLevel, LocatorPrecision};
pub use square::{Bounds, GridSquare, grid_bounds};
