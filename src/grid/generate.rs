use crate::locator::{Bounds, GridLevel, GridSquare, encode, grid_bounds};
use std::ops::Range;
use tracing::trace;

// Absorbs float noise when a viewport edge sits exactly on a cell edge
const EDGE_EPSILON: f64 = 1e-9;

/// Column and row index ranges of the cells overlapping `bounds`, clipped to the globe.
fn index_ranges(bounds: &Bounds, level: GridLevel) -> (Range<i64>, Range<i64>) {
    let (lon_size, lat_size) = level.cell_size();
    let (cols, rows) = level.world_cells();

    // Also rejects NaN edges
    if !(bounds.north >= bounds.south && bounds.east >= bounds.west) {
        return (0..0, 0..0);
    }

    let first = |edge: f64, size: f64, max: i64| {
        ((edge / size + EDGE_EPSILON).floor() as i64).clamp(0, max)
    };
    let last = |edge: f64, size: f64, max: i64| {
        ((edge / size - EDGE_EPSILON).ceil() as i64).clamp(0, max)
    };

    let col_range =
        first(bounds.west + 180.0, lon_size, cols)..last(bounds.east + 180.0, lon_size, cols);
    let row_range =
        first(bounds.south + 90.0, lat_size, rows)..last(bounds.north + 90.0, lat_size, rows);

    (col_range, row_range)
}

/// Number of cells [`generate_grids`] would return for `bounds` at `level`.
pub fn count_cells(bounds: &Bounds, level: GridLevel) -> usize {
    let (cols, rows) = index_ranges(bounds, level);
    cols.count() * rows.count()
}

/// Lazily yields every grid square overlapping `bounds` at `level`.
///
/// The viewport is widened outward to whole cells. Cells off the globe are skipped.
/// Iterates columns west to east and, within each column, rows south to north.
/// There is no cell cap here; see [`GridOverlay`](crate::GridOverlay) for a capped variant.
pub fn iter_grids(bounds: &Bounds, level: GridLevel) -> impl Iterator<Item = GridSquare> {
    let (cols, rows) = index_ranges(bounds, level);
    let (lon_size, lat_size) = level.cell_size();
    let precision = level.precision();

    cols.flat_map(move |col| rows.clone().map(move |row| (col, row)))
        .filter_map(move |(col, row)| {
            let center = (
                col as f64 * lon_size - 180.0 + lon_size / 2.0,
                row as f64 * lat_size - 90.0 + lat_size / 2.0,
            );
            let locator = encode(&center, precision).ok()?;
            grid_bounds(&locator).ok()
        })
}

/// Generates every grid square overlapping `bounds` at `level`.
///
/// # Example
/// ```
/// use qth_locator::{Bounds, GridLevel, generate_grids};
///
/// let grids = generate_grids(&Bounds::new(50.0, 40.0, 20.0, 0.0), GridLevel::Field);
/// assert_eq!(grids.len(), 1);
/// assert_eq!(grids[0].locator, "JN");
/// ```
pub fn generate_grids(bounds: &Bounds, level: GridLevel) -> Vec<GridSquare> {
    let grids: Vec<GridSquare> = iter_grids(bounds, level).collect();
    trace!(level = ?level, cells = grids.len(), "generated grid squares");
    grids
}
