use crate::coord::{Coordinates, parse_coordinate};
use crate::error::QthError;
use crate::geodesy::CalculationResult;
use crate::io::batch::{BatchMode, BatchRecord};
use crate::locator::{GridSquare, LocatorPrecision, decode, encode, normalize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

enum SourceIndices {
    Locator(usize),
    Coordinates { lat_idx: usize, lon_idx: usize },
}

/// Where a CSV row's position is read from.
#[derive(Debug, Clone)]
pub enum LocatorSource {
    /// A column holding Maidenhead locators
    LocatorColumn(String),
    /// Separate latitude and longitude columns in decimal or DMS notation
    CoordinateColumns {
        lat_column: String,
        lon_column: String,
    },
}

#[derive(Debug, Clone)]
pub struct CsvLocatorConfig {
    pub source: LocatorSource,
    pub exclude_columns: Vec<String>,
    pub precision: LocatorPrecision,
    pub include_bounds: bool,
}

impl CsvLocatorConfig {
    /// Config for a CSV with a locator column. Output gains `latitude` and `longitude`.
    ///
    /// # Example
    /// ```
    /// use qth_locator::CsvLocatorConfig;
    ///
    /// let config = CsvLocatorConfig::from_locators("Locator");
    /// ```
    pub fn from_locators(locator_column: impl Into<String>) -> Self {
        Self {
            source: LocatorSource::LocatorColumn(locator_column.into()),
            exclude_columns: Vec::new(),
            precision: LocatorPrecision::default(),
            include_bounds: false,
        }
    }

    /// Config for a CSV with latitude and longitude columns. Output gains `locator`.
    ///
    /// # Example
    /// ```
    /// use qth_locator::{CsvLocatorConfig, LocatorPrecision};
    ///
    /// let config = CsvLocatorConfig::from_coords("Latitude", "Longitude")
    ///     .precision(LocatorPrecision::Square);
    /// ```
    pub fn from_coords(lat_column: impl Into<String>, lon_column: impl Into<String>) -> Self {
        Self {
            source: LocatorSource::CoordinateColumns {
                lat_column: lat_column.into(),
                lon_column: lon_column.into(),
            },
            exclude_columns: Vec::new(),
            precision: LocatorPrecision::default(),
            include_bounds: false,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn precision(mut self, precision: LocatorPrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Adds `north`, `south`, `east` and `west` columns for each row's grid square.
    pub fn with_bounds(mut self) -> Self {
        self.include_bounds = true;
        self
    }
}

pub trait CsvToLocator {
    fn to_locator_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvLocatorConfig,
    ) -> Result<(), QthError>;
}

impl<P: AsRef<Path>> CsvToLocator for P {
    fn to_locator_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvLocatorConfig,
    ) -> Result<(), QthError> {
        csv_to_locator_csv(self, output_path, config)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, role: &str) -> Result<usize, QthError> {
    if name.is_empty() {
        return Err(QthError::CsvError(format!("{} column name cannot be empty", role)));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| QthError::CsvError(format!("{} column '{}' not found", role, name)))
}

fn field<'r>(record: &'r csv::StringRecord, idx: usize, role: &str) -> Result<&'r str, QthError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| QthError::CsvError(format!("Missing {} column at index {}", role, idx)))
}

/// Converts a CSV file of locators or coordinates, adding the other representation.
///
/// Rows are streamed. The source columns are dropped from the output; any row that
/// fails to convert aborts the conversion with its error.
///
/// ```no_run
/// use qth_locator::{CsvLocatorConfig, csv_to_locator_csv};
///
/// let config = CsvLocatorConfig::from_coords("lat", "lon").with_bounds();
/// csv_to_locator_csv("stations.csv", "stations_grid.csv", &config).unwrap();
/// ```
pub fn csv_to_locator_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvLocatorConfig,
) -> Result<(), QthError> {
    let file = File::open(csv_path).map_err(|e| QthError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| QthError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        LocatorSource::LocatorColumn(col) => {
            let idx = column_index(&headers, col, "Locator")?;
            (SourceIndices::Locator(idx), HashSet::from([idx]))
        }
        LocatorSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            let lon_idx = column_index(&headers, lon_column, "Longitude")?;
            (
                SourceIndices::Coordinates { lat_idx, lon_idx },
                HashSet::from([lat_idx, lon_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| QthError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["locator", "latitude", "longitude"];
    if config.include_bounds {
        header_row.extend(["north", "south", "east", "west"]);
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| QthError::CsvError(e.to_string()))?;

    for result in reader.records() {
        let record = result.map_err(|e| QthError::CsvError(e.to_string()))?;

        let (locator, coords) = match &source_indices {
            SourceIndices::Locator(idx) => {
                let locator = normalize(field(&record, *idx, "locator")?)?;
                let coords = decode(&locator)?;
                (locator, coords)
            }
            SourceIndices::Coordinates { lat_idx, lon_idx } => {
                let lat = parse_coordinate(field(&record, *lat_idx, "latitude")?)?;
                let lon = parse_coordinate(field(&record, *lon_idx, "longitude")?)?;
                let coords = Coordinates::new(lat, lon)?;
                (encode(&coords, config.precision)?, coords)
            }
        };

        let mut row: Vec<String> = vec![
            locator.clone(),
            coords.latitude.to_string(),
            coords.longitude.to_string(),
        ];

        if config.include_bounds {
            let b = GridSquare::from_locator(&locator)?.bounds;
            row.extend([b.north, b.south, b.east, b.west].map(|v| v.to_string()));
        }

        for (i, value) in record.iter().enumerate() {
            if !exclude_indices.contains(&i) {
                row.push(value.to_string());
            }
        }
        writer
            .write_record(&row)
            .map_err(|e| QthError::CsvError(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| QthError::IoError(e.to_string()))?;

    Ok(())
}

/// Writes the successful records of a batch as CSV.
///
/// Locator mode writes `locator,latitude,longitude`; coordinate mode adds the
/// original `input` in front.
pub fn write_batch_csv<W: Write>(
    records: &[BatchRecord],
    mode: BatchMode,
    writer: W,
) -> Result<(), QthError> {
    let mut writer = csv::Writer::from_writer(writer);

    let header: &[&str] = match mode {
        BatchMode::LocatorToCoordinates => &["locator", "latitude", "longitude"],
        BatchMode::CoordinatesToLocator => &["input", "locator", "latitude", "longitude"],
    };
    writer
        .write_record(header)
        .map_err(|e| QthError::CsvError(e.to_string()))?;

    for record in records.iter().filter(|r| r.is_ok()) {
        let mut row = Vec::with_capacity(4);
        if mode == BatchMode::CoordinatesToLocator {
            row.push(record.input.clone());
        }
        row.push(record.locator.clone().unwrap_or_default());
        row.push(record.latitude.map(|v| v.to_string()).unwrap_or_default());
        row.push(record.longitude.map(|v| v.to_string()).unwrap_or_default());
        writer
            .write_record(&row)
            .map_err(|e| QthError::CsvError(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| QthError::IoError(e.to_string()))
}

/// Writes a QRB/QTF calculation as four CSV rows: from, to, short and long path.
pub fn write_calculation_csv<W: Write>(
    result: &CalculationResult,
    writer: W,
) -> Result<(), QthError> {
    let mut writer = csv::Writer::from_writer(writer);

    let rows: [[String; 6]; 5] = [
        ["type", "locator", "latitude", "longitude", "distance_km", "bearing_deg"]
            .map(String::from),
        [
            "from".to_string(),
            result.from.locator.clone(),
            result.from.coordinates.latitude.to_string(),
            result.from.coordinates.longitude.to_string(),
            String::new(),
            String::new(),
        ],
        [
            "to".to_string(),
            result.to.locator.clone(),
            result.to.coordinates.latitude.to_string(),
            result.to.coordinates.longitude.to_string(),
            String::new(),
            String::new(),
        ],
        [
            "short_path".to_string(),
            String::new(),
            String::new(),
            String::new(),
            result.short_path.distance.kilometers.to_string(),
            result.short_path.bearing.degrees.to_string(),
        ],
        [
            "long_path".to_string(),
            String::new(),
            String::new(),
            String::new(),
            result.long_path.distance.kilometers.to_string(),
            result.long_path.bearing.degrees.to_string(),
        ],
    ];

    for row in &rows {
        writer
            .write_record(row)
            .map_err(|e| QthError::CsvError(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| QthError::IoError(e.to_string()))
}
