pub mod batch;
pub mod csv;
pub mod geojson;
pub mod json;

pub use batch::{BatchConfig, BatchMode, BatchRecord, convert_batch, convert_line};
pub use self::csv::{
    CsvLocatorConfig, CsvToLocator, LocatorSource, csv_to_locator_csv, write_batch_csv,
    write_calculation_csv,
};
pub use self::geojson::{
    path_to_geojson, square_to_wkt, squares_to_geojson, squares_to_geojson_string,
};
pub use json::{batch_to_json, calculation_to_json};
