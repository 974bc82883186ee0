use glam::DVec3;
use tracing::{trace, warn};

use crate::error::{ProximityError, Result};

/// WGS84 semi-major axis in metres.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 first eccentricity squared: e² = (2 - f)·f
pub const WGS84_E2: f64 = (2.0 - WGS84_F) * WGS84_F;

/// Latitude step below which the inversion is considered converged.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-12;
/// Hard cap on inversion iterations.
pub const MAX_ITERATIONS: u32 = 64;

/// Radius of curvature in the prime vertical.
fn prime_vertical_radius(sin_lat: f64) -> f64 {
    WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt()
}

/// Ellipsoidal height of a point at horizontal distance `p` and height `z`
/// for a given geodetic latitude.
///
/// Above 45° the `p / cos(lat)` form loses precision, so the equivalent
/// `z / sin(lat)` form is used there.
fn ellipsoidal_height(p: f64, z: f64, lat: f64) -> f64 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let n = prime_vertical_radius(sin_lat);
    if cos_lat.abs() >= sin_lat.abs() {
        p / cos_lat - n
    } else {
        z / sin_lat - n * (1.0 - WGS84_E2)
    }
}

/// Convert geodetic (latitude, longitude, altitude) to ECEF XYZ.
///
/// Inputs are in **degrees** and metres.  Returns `[X, Y, Z]` in metres.
pub fn geodetic_to_ecef(lat_deg: f64, lon_deg: f64, alt_m: f64) -> [f64; 3] {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();

    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    let n = prime_vertical_radius(sin_lat);

    let x = (n + alt_m) * cos_lat * cos_lon;
    let y = (n + alt_m) * cos_lat * sin_lon;
    let z = ((1.0 - WGS84_E2) * n + alt_m) * sin_lat;

    [x, y, z]
}

/// Convert ECEF XYZ to geodetic `(latitude, longitude, altitude)`.
///
/// Latitude and longitude are returned in **radians**, altitude in metres.
/// The latitude is refined by fixed-point iteration until successive
/// estimates differ by less than [`CONVERGENCE_TOLERANCE`]; if that takes
/// more than [`MAX_ITERATIONS`] steps (or the input is not finite) the call
/// fails with [`ProximityError::NonConvergent`].
pub fn ecef_to_geodetic_radians(ecef: [f64; 3]) -> Result<(f64, f64, f64)> {
    let [x, y, z] = ecef;

    let lon = y.atan2(x);
    let p = (x * x + y * y).sqrt();
    let mut lat = z.atan2(p * (1.0 - WGS84_E2));

    let mut last_step = f64::INFINITY;
    for iteration in 1..=MAX_ITERATIONS {
        let n = prime_vertical_radius(lat.sin());
        let h = ellipsoidal_height(p, z, lat);
        let next = z.atan2(p * (1.0 - WGS84_E2 * n / (n + h)));

        last_step = (next - lat).abs();
        lat = next;

        if last_step < CONVERGENCE_TOLERANCE {
            trace!(iteration, "Geodetic inversion converged");
            let alt = ellipsoidal_height(p, z, lat);
            return Ok((lat, lon, alt));
        }
    }

    warn!(x, y, z, last_step, "Geodetic inversion did not converge");
    Err(ProximityError::NonConvergent {
        iterations: MAX_ITERATIONS,
        last_step,
    })
}

/// East, North and Up unit vectors (in ECEF) at a geodetic point given in degrees.
pub fn enu_basis(lat_deg: f64, lon_deg: f64) -> [DVec3; 3] {
    let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();

    let east = DVec3::new(-sin_lon, cos_lon, 0.0);
    let north = DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let up = DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

    [east, north, up]
}
