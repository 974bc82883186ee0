use std::f64::consts::{PI, TAU};

use super::ecef::WGS84_A;

/// Great-circle distance in metres between two points given in **radians**.
///
/// Uses the Haversine formula on a sphere of radius [`WGS84_A`]; flattening
/// is ignored.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let half_dlat = (lat2 - lat1) * 0.5;
    let half_dlon = (lon2 - lon1) * 0.5;

    let a = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    WGS84_A * c
}

/// Signed difference `to - from` between two angles in radians, wrapped to (-π, π].
pub fn angular_difference(to: f64, from: f64) -> f64 {
    let diff = (to - from).rem_euclid(TAU);
    if diff > PI { diff - TAU } else { diff }
}
