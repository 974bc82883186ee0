use clap::{Parser, Subcommand};

/// Which reference a tile's distance is measured to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
    /// Nearest boundary of the bounding volume (0 inside)
    Boundary,
    /// Representative centre of the bounding volume
    Center,
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceMetric::Boundary => write!(f, "boundary"),
            DistanceMetric::Center => write!(f, "center"),
        }
    }
}

/// Tile selection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionConfig {
    /// Search radius in metres.
    pub radius: f64,
    pub metric: DistanceMetric,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            metric: DistanceMetric::Boundary,
        }
    }
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "tile-proximity",
    about = "WGS84 coordinate transforms and point-to-tile distances",
    version
)]
pub struct CliArgs {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert latitude/longitude/altitude to ECEF (EPSG:4978)
    Ecef {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Altitude in metres
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        alt: f64,
    },
    /// Convert ECEF coordinates to latitude/longitude/altitude
    Geodetic {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, allow_negative_numbers = true)]
        z: f64,
    },
    /// Great-circle distance between two points given as LAT,LON in degrees
    GroundDistance {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        from: Vec<f64>,
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        to: Vec<f64>,
    },
    /// Distances from a point to a tile's bounding volume
    Tile(TileArgs),
}

/// Point and bounding volume for the `tile` command.
#[derive(clap::Args, Debug)]
pub struct TileArgs {
    /// Latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
    /// Altitude in metres
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub alt: f64,

    /// Region: west,south,east,north (radians),min_height,max_height
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        conflicts_with_all = ["obb", "sphere"],
        required_unless_present_any = ["obb", "sphere"]
    )]
    pub region: Option<Vec<f64>>,

    /// Box: centre x,y,z followed by three half-axis vectors (12 values)
    #[arg(
        long = "box",
        value_delimiter = ',',
        allow_hyphen_values = true,
        conflicts_with = "sphere"
    )]
    pub obb: Option<Vec<f64>>,

    /// Sphere: centre x,y,z,radius
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    pub sphere: Option<Vec<f64>>,
}
