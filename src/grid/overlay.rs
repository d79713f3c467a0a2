use crate::coord::Coordinate;
use crate::error::QthError;
use crate::grid::generate::{count_cells, generate_grids};
use crate::locator::{Bounds, GridLevel, GridSquare, encode};
use geo_types::{Point, Polygon, Rect};
use tracing::debug;

/// Default cap on the number of squares in one overlay.
pub const DEFAULT_MAX_CELLS: usize = 2500;

/// A capped set of grid squares for one map viewport.
///
/// The overlay owns the cell cap: when the requested level would produce more than
/// `max_cells` squares it falls back to coarser levels, down to fields.
///
/// # Example
///
/// ```
/// use qth_locator::{Bounds, GridLevel, GridOverlay};
///
/// # fn main() -> Result<(), qth_locator::QthError> {
/// // All of Europe at subsquare level is far too many cells
/// let overlay = GridOverlay::builder()
///     .level(GridLevel::Subsquare)
///     .bounds(Bounds::new(70.0, 35.0, 40.0, -10.0))
///     .build()?;
///
/// assert_eq!(overlay.level(), GridLevel::Square);
/// assert!(overlay.len() <= 2500);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GridOverlay {
    squares: Vec<GridSquare>,
    bounds: Bounds,
    level: GridLevel,
    requested_level: GridLevel,
}

impl GridOverlay {
    pub fn builder() -> GridOverlayBuilder {
        GridOverlayBuilder::new()
    }

    pub fn new(bounds: Bounds, level: GridLevel, max_cells: usize) -> Result<Self, QthError> {
        let mut effective = level;
        loop {
            let cells = count_cells(&bounds, effective);
            if cells <= max_cells {
                break;
            }
            match effective.coarser() {
                Some(coarser) => {
                    debug!(
                        from = ?effective,
                        to = ?coarser,
                        cells,
                        max_cells,
                        "downgrading grid level"
                    );
                    effective = coarser;
                }
                None => {
                    debug!(cells, max_cells, "viewport exceeds cell cap at field level");
                    return Err(QthError::TooManyCells {
                        cells,
                        max: max_cells,
                    });
                }
            }
        }

        Ok(Self {
            squares: generate_grids(&bounds, effective),
            bounds,
            level: effective,
            requested_level: level,
        })
    }

    pub fn from_rect(rect: &Rect<f64>, level: GridLevel) -> Result<Self, QthError> {
        Self::new(Bounds::from(*rect), level, DEFAULT_MAX_CELLS)
    }

    /// The level the squares were generated at.
    pub fn level(&self) -> GridLevel {
        self.level
    }

    pub fn requested_level(&self) -> GridLevel {
        self.requested_level
    }

    pub fn was_downgraded(&self) -> bool {
        self.level != self.requested_level
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn squares(&self) -> &[GridSquare] {
        &self.squares
    }

    pub fn into_squares(self) -> Vec<GridSquare> {
        self.squares
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridSquare> {
        self.squares.iter()
    }

    /// Returns the square containing `coord`, if it is part of this overlay.
    pub fn get_square_at(&self, coord: &impl Coordinate) -> Option<&GridSquare> {
        let locator = encode(coord, self.level.precision()).ok()?;
        self.squares.iter().find(|square| square.locator == locator)
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.squares.iter().map(|square| square.to_polygon()).collect()
    }

    pub fn centers(&self) -> Vec<Point<f64>> {
        self.squares.iter().map(|square| square.center.to_point()).collect()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&GridSquare>
    where
        F: Fn(&GridSquare) -> bool,
    {
        self.squares.iter().filter(|square| predicate(square)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct GridOverlayBuilder {
    level: GridLevel,
    bounds: Option<Bounds>,
    max_cells: usize,
}

impl Default for GridOverlayBuilder {
    fn default() -> Self {
        Self {
            level: GridLevel::Square,
            bounds: None,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl GridOverlayBuilder {
    /// Starts a builder at square level with the default cell cap.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: GridLevel) -> Self {
        self.level = level;
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn rect(mut self, rect: &Rect<f64>) -> Self {
        self.bounds = Some(Bounds::from(*rect));
        self
    }

    pub fn max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    pub fn build(self) -> Result<GridOverlay, QthError> {
        let bounds = self
            .bounds
            .ok_or_else(|| QthError::InvalidViewport("bounds must be set".to_string()))?;
        GridOverlay::new(bounds, self.level, self.max_cells)
    }
}
