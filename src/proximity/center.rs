use crate::error::Result;
use crate::transform::ground::haversine_distance;
use crate::types::{BoundingVolume, CartesianPoint};

/// Ground distance in metres from `point` to the representative centre of `volume`.
///
/// Boxes and spheres use their ECEF centre. Regions use the numeric midpoint
/// of their bounds, which is not corrected for antimeridian wraparound.
pub fn distance_to_center(point: CartesianPoint, volume: &BoundingVolume) -> Result<f64> {
    let (center_lat, center_lon) = match volume {
        BoundingVolume::Box(b) => {
            let (lat, lon, _) = b.center.to_geodetic_radians()?;
            (lat, lon)
        }
        BoundingVolume::Sphere(s) => {
            let (lat, lon, _) = s.center.to_geodetic_radians()?;
            (lat, lon)
        }
        BoundingVolume::Region(r) => r.representative_center(),
    };

    let (lat, lon, _) = point.to_geodetic_radians()?;
    Ok(haversine_distance(center_lat, center_lon, lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::ecef::WGS84_A;
    use crate::types::{BoundingRegion, GeographicPoint, OrientedBox};
    use approx::assert_abs_diff_eq;

    fn deg(v: f64) -> f64 {
        v.to_radians()
    }

    #[test]
    fn box_center_distance_ignores_extent() {
        let center = GeographicPoint::new(0.0, 0.0);
        let small = BoundingVolume::Box(OrientedBox::east_north_up(center, [1.0, 1.0, 1.0]));
        let large = BoundingVolume::Box(OrientedBox::east_north_up(center, [1e5, 1e5, 1e3]));
        let point = GeographicPoint::new(0.0, 1.0).to_cartesian();

        let d_small = distance_to_center(point, &small).unwrap();
        let d_large = distance_to_center(point, &large).unwrap();
        assert_abs_diff_eq!(d_small, WGS84_A * deg(1.0), epsilon = 1e-3);
        assert_abs_diff_eq!(d_small, d_large, epsilon = 1e-9);
    }

    #[test]
    fn sphere_center_distance_ignores_radius_and_height() {
        let center = GeographicPoint::new(10.0, 20.0).with_altitude(5_000.0);
        let sphere = BoundingVolume::from_sphere_array([
            center.to_cartesian().x,
            center.to_cartesian().y,
            center.to_cartesian().z,
            1e6,
        ])
        .unwrap();
        let point = GeographicPoint::new(10.0, 20.0).to_cartesian();
        assert_abs_diff_eq!(distance_to_center(point, &sphere).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn region_center_is_bounds_midpoint() {
        let region = BoundingVolume::Region(BoundingRegion {
            west: deg(-10.0),
            south: deg(-10.0),
            east: deg(10.0),
            north: deg(10.0),
            min_height: 0.0,
            max_height: 100.0,
        });
        let at_center = GeographicPoint::new(0.0, 0.0).to_cartesian();
        assert_abs_diff_eq!(distance_to_center(at_center, &region).unwrap(), 0.0, epsilon = 1e-6);

        let east = GeographicPoint::new(0.0, 5.0).to_cartesian();
        assert_abs_diff_eq!(
            distance_to_center(east, &region).unwrap(),
            WGS84_A * deg(5.0),
            epsilon = 1e-3
        );
    }

    #[test]
    fn wrapping_region_center_is_not_corrected() {
        // Spans 170°E..170°W across the antimeridian, but the plain midpoint
        // of the bounds is longitude 0.
        let region = BoundingVolume::Region(BoundingRegion {
            west: deg(170.0),
            south: 0.0,
            east: deg(-170.0),
            north: 0.0,
            min_height: 0.0,
            max_height: 0.0,
        });
        let on_meridian = GeographicPoint::new(0.0, 0.0).to_cartesian();
        assert_abs_diff_eq!(distance_to_center(on_meridian, &region).unwrap(), 0.0, epsilon = 1e-6);

        let on_antimeridian = GeographicPoint::new(0.0, 180.0).to_cartesian();
        let d = distance_to_center(on_antimeridian, &region).unwrap();
        assert_abs_diff_eq!(d, WGS84_A * std::f64::consts::PI, epsilon = 1e-3);
    }
}
