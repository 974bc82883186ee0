use std::fmt;

use anyhow::{Context, bail};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use tile_proximity::config::{CliArgs, Command, TileArgs};
use tile_proximity::transform::haversine_distance;
use tile_proximity::{
    BoundingVolume, CartesianPoint, GeographicPoint, ProximityError, Tile, distance_to_boundary,
    distance_to_center,
};

/// Result of one subcommand, printed as text or as JSON.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Output {
    Ecef(CartesianPoint),
    Geodetic(GeographicPoint),
    GroundDistance { distance: f64 },
    Tile(TileReport),
}

#[derive(Debug, Serialize)]
struct TileReport {
    tile: Tile,
    center_distance: f64,
    boundary_distance: BoundaryDistance,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum BoundaryDistance {
    Metres(f64),
    Unsupported { unsupported: String },
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Ecef(p) => write!(f, "{} {} {}", p.x, p.y, p.z),
            Output::Geodetic(g) => write!(f, "{}° {}° {}", g.latitude, g.longitude, g.altitude),
            Output::GroundDistance { distance } => write!(f, "{distance}"),
            Output::Tile(report) => {
                writeln!(f, "volume: {}", report.tile.bounding_volume.kind())?;
                writeln!(f, "center_distance: {}", report.center_distance)?;
                match &report.boundary_distance {
                    BoundaryDistance::Metres(d) => write!(f, "boundary_distance: {d}"),
                    BoundaryDistance::Unsupported { unsupported } => {
                        write!(f, "boundary_distance: unsupported: {unsupported}")
                    }
                }
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Init tracing
    let filter = if args.verbose {
        EnvFilter::new("tile_proximity=debug")
    } else {
        EnvFilter::new("tile_proximity=info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let output = match run(args.command) {
        Ok(output) => output,
        Err(e) => {
            error!(%e, "Command failed");
            return Err(e);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{output}");
    }
    Ok(())
}

fn run(command: Command) -> anyhow::Result<Output> {
    match command {
        Command::Ecef { lat, lon, alt } => {
            let geo = GeographicPoint::new(lat, lon)
                .with_altitude(alt)
                .validate()
                .context("invalid coordinates")?;
            Ok(Output::Ecef(geo.to_cartesian()))
        }
        Command::Geodetic { x, y, z } => {
            let geo = CartesianPoint::new(x, y, z)
                .to_geographic()
                .context("ECEF to geodetic conversion failed")?;
            Ok(Output::Geodetic(geo))
        }
        Command::GroundDistance { from, to } => {
            let a = lat_lon_pair(&from, "--from")?;
            let b = lat_lon_pair(&to, "--to")?;
            let metres = haversine_distance(
                a.latitude.to_radians(),
                a.longitude.to_radians(),
                b.latitude.to_radians(),
                b.longitude.to_radians(),
            );
            Ok(Output::GroundDistance { distance: metres })
        }
        Command::Tile(args) => tile_report(args).map(Output::Tile),
    }
}

fn lat_lon_pair(values: &[f64], flag: &str) -> anyhow::Result<GeographicPoint> {
    let [lat, lon] = values else {
        bail!("{flag} expects LAT,LON, got {} values", values.len());
    };
    GeographicPoint::new(*lat, *lon)
        .validate()
        .with_context(|| format!("invalid {flag} coordinates"))
}

fn tile_report(args: TileArgs) -> anyhow::Result<TileReport> {
    let point = GeographicPoint::new(args.lat, args.lon)
        .with_altitude(args.alt)
        .validate()
        .context("invalid coordinates")?;

    let volume = match (&args.region, &args.obb, &args.sphere) {
        (Some(v), _, _) => BoundingVolume::region_from_slice(v),
        (_, Some(v), _) => BoundingVolume::box_from_slice(v),
        (_, _, Some(v)) => BoundingVolume::sphere_from_slice(v),
        (None, None, None) => bail!("one of --region, --box or --sphere is required"),
    }
    .context("invalid bounding volume")?;
    debug!(kind = volume.kind(), "Parsed bounding volume");

    let ecef = point.to_cartesian();
    let tile = Tile::new(volume);

    let center = distance_to_center(ecef, &tile.bounding_volume)
        .context("centre distance failed")?;
    let boundary = match distance_to_boundary(ecef, &tile) {
        Ok(d) => BoundaryDistance::Metres(d),
        Err(ProximityError::UnsupportedGeometry(reason)) => {
            BoundaryDistance::Unsupported { unsupported: reason }
        }
        Err(e) => return Err(e).context("boundary distance failed"),
    };

    Ok(TileReport {
        tile,
        center_distance: center,
        boundary_distance: boundary,
    })
}
