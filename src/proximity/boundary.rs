use tracing::trace;

use crate::error::{ProximityError, Result};
use crate::transform::ground::{angular_difference, haversine_distance};
use crate::types::{BoundingRegion, BoundingVolume, CartesianPoint, OrientedBox, Tile};

/// Ground distance in metres from `point` to the nearest boundary of the
/// tile's bounding volume, or `0.0` when the point lies inside it.
///
/// Sphere bounding volumes are not supported and yield
/// [`ProximityError::UnsupportedGeometry`].
pub fn distance_to_boundary(point: CartesianPoint, tile: &Tile) -> Result<f64> {
    match &tile.bounding_volume {
        BoundingVolume::Box(b) => box_boundary_distance(point, b),
        BoundingVolume::Region(r) => region_boundary_distance(point, r),
        BoundingVolume::Sphere(_) => Err(ProximityError::UnsupportedGeometry(
            "sphere bounding volumes are not supported for boundary distance".into(),
        )),
    }
}

fn box_boundary_distance(point: CartesianPoint, b: &OrientedBox) -> Result<f64> {
    if b.contains(point) {
        return Ok(0.0);
    }

    let boundary = b.closest_point(point);
    trace!(?boundary, "Closest point on box surface");

    let (lat1, lon1, _) = point.to_geodetic_radians()?;
    let (lat2, lon2, _) = boundary.to_geodetic_radians()?;
    Ok(haversine_distance(lat1, lon1, lat2, lon2))
}

fn region_boundary_distance(point: CartesianPoint, region: &BoundingRegion) -> Result<f64> {
    let (lat1, lon1, _) = point.to_geodetic_radians()?;

    // Nearest latitude within [south, north]
    let (lat2, inside_lat) = if lat1 > region.north {
        (region.north, false)
    } else if lat1 < region.south {
        (region.south, false)
    } else {
        (lat1, true)
    };

    // Nearest longitude, taking the shorter way round the globe
    let (lon2, inside_lon) = if region.contains_longitude(lon1) {
        (lon1, true)
    } else {
        let east_diff = angular_difference(region.east, lon1);
        let west_diff = angular_difference(region.west, lon1);
        if east_diff.abs() < west_diff.abs() {
            (region.east, false)
        } else {
            (region.west, false)
        }
    };

    if inside_lat && inside_lon {
        return Ok(0.0);
    }
    Ok(haversine_distance(lat1, lon1, lat2, lon2))
}
