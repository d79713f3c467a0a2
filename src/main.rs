use clap::{Parser, Subcommand, ValueEnum};
use qth_locator::{
    BatchConfig, BatchMode, Bounds, GridLevel, GridOverlay, Location, LocatorPrecision, QthError,
    calculate_qrb_qtf, calculation_to_json, convert_batch, decode, grid_bounds, normalize,
    parse_coordinate, squares_to_geojson_string, write_batch_csv,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "qth", version, about = "Maidenhead locator and QRB/QTF calculator")]
#[command(allow_negative_numbers = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Locator for a latitude and longitude (decimal or DMS)
    Encode {
        latitude: String,
        longitude: String,
        #[arg(long, default_value_t = 6, help = "Locator length: 2, 4, 6, 8 or 10")]
        precision: u8,
    },
    /// Cell center and bounds of a locator
    Decode { locator: String },
    /// Distance and bearing between two locators
    Qrb {
        from: String,
        to: String,
        #[arg(long, default_value_t = false, help = "Output machine-readable JSON")]
        json: bool,
    },
    /// Grid squares covering a viewport, as GeoJSON
    Grid {
        #[arg(long)]
        north: f64,
        #[arg(long)]
        south: f64,
        #[arg(long)]
        east: f64,
        #[arg(long)]
        west: f64,
        #[arg(long, default_value_t = 4, help = "Grid level: 2, 4 or 6")]
        level: u8,
        #[arg(long, default_value_t = qth_locator::DEFAULT_MAX_CELLS)]
        max_cells: usize,
    },
    /// Converts a file with one locator or coordinate pair per line
    Batch {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = ModeArg::Locators)]
        mode: ModeArg,
        #[arg(long, default_value_t = 6)]
        precision: u8,
        #[arg(long, help = "Write CSV here instead of stdout")]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Locators,
    Coords,
}

impl From<ModeArg> for BatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Locators => BatchMode::LocatorToCoordinates,
            ModeArg::Coords => BatchMode::CoordinatesToLocator,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), QthError> {
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Encode {
            latitude,
            longitude,
            precision,
        } => {
            let lat = parse_coordinate(&latitude)?;
            let lon = parse_coordinate(&longitude)?;
            let precision = LocatorPrecision::try_from(precision)?;
            let locator = qth_locator::encode(&(lon, lat), precision)?;
            writeln!(stdout, "{}", locator).map_err(|e| QthError::IoError(e.to_string()))?;
        }
        Commands::Decode { locator } => {
            let locator = normalize(&locator)?;
            let center = decode(&locator)?;
            let square = grid_bounds(&locator)?;
            let b = square.bounds;
            writeln!(
                stdout,
                "{}\ncenter {}, {}\nbounds N {} S {} E {} W {}",
                locator, center.latitude, center.longitude, b.north, b.south, b.east, b.west
            )
            .map_err(|e| QthError::IoError(e.to_string()))?;
        }
        Commands::Qrb { from, to, json } => {
            let from = Location::from_locator(&from)?;
            let to = Location::from_locator(&to)?;
            let result = calculate_qrb_qtf(&from, &to);
            if json {
                writeln!(stdout, "{}", calculation_to_json(&result)?)
                    .map_err(|e| QthError::IoError(e.to_string()))?;
            } else {
                let (short, long) = (&result.short_path, &result.long_path);
                writeln!(
                    stdout,
                    "{} -> {}\n\
                     short path {} km / {} mi / {} nm, {}\n\
                     long path  {} km / {} mi / {} nm, {}",
                    result.from.locator,
                    result.to.locator,
                    short.distance.kilometers,
                    short.distance.miles,
                    short.distance.nautical_miles,
                    short.bearing,
                    long.distance.kilometers,
                    long.distance.miles,
                    long.distance.nautical_miles,
                    long.bearing,
                )
                .map_err(|e| QthError::IoError(e.to_string()))?;
            }
        }
        Commands::Grid {
            north,
            south,
            east,
            west,
            level,
            max_cells,
        } => {
            let overlay = GridOverlay::builder()
                .bounds(Bounds::new(north, south, east, west))
                .level(GridLevel::try_from(level)?)
                .max_cells(max_cells)
                .build()?;
            if overlay.was_downgraded() {
                warn!(
                    requested = ?overlay.requested_level(),
                    level = ?overlay.level(),
                    "viewport too large, using a coarser grid"
                );
            }
            writeln!(stdout, "{}", squares_to_geojson_string(overlay.squares())?)
                .map_err(|e| QthError::IoError(e.to_string()))?;
        }
        Commands::Batch {
            file,
            mode,
            precision,
            output,
        } => {
            let input =
                std::fs::read_to_string(&file).map_err(|e| QthError::IoError(e.to_string()))?;
            let config =
                BatchConfig::new(mode.into()).precision(LocatorPrecision::try_from(precision)?);
            let records = convert_batch(&input, &config);

            for record in records.iter().filter(|r| !r.is_ok()) {
                warn!(
                    input = %record.input,
                    error = record.error.as_deref().unwrap_or_default(),
                    "skipping line"
                );
            }

            match output {
                Some(path) => {
                    let file = File::create(path).map_err(|e| QthError::IoError(e.to_string()))?;
                    write_batch_csv(&records, config.mode, file)?;
                }
                None => write_batch_csv(&records, config.mode, &mut stdout)?,
            }
        }
    }

    Ok(())
}
