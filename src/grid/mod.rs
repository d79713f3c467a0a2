mod generate;
mod overlay;

pub use generate::{count_cells, generate_grids, iter_grids};
pub use overlay::{DEFAULT_MAX_CELLS, GridOverlay, GridOverlayBuilder};
