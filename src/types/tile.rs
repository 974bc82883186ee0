use std::f64::consts::PI;

use glam::DVec3;
use serde::Serialize;

use crate::error::{ProximityError, Result};
use crate::transform::ecef::enu_basis;

use super::point::{CartesianPoint, GeographicPoint};

/// Distance in metres within which a point counts as lying on a flat box.
pub const FLAT_TOLERANCE: f64 = 1e-6;

/// Oriented box: a centre plus three half-axis vectors, all in ECEF metres.
///
/// The half-axes are expected to be mutually orthogonal, as in the 3D Tiles
/// `boundingVolume.box` layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrientedBox {
    pub center: CartesianPoint,
    pub half_axes: [[f64; 3]; 3],
}

impl OrientedBox {
    pub fn new(center: CartesianPoint, half_axes: [DVec3; 3]) -> Self {
        Self {
            center,
            half_axes: half_axes.map(|a| a.to_array()),
        }
    }

    /// Axis-aligned box spanning `min..max` in ECEF.
    pub fn axis_aligned(min: [f64; 3], max: [f64; 3]) -> Self {
        let center = [
            (min[0] + max[0]) * 0.5,
            (min[1] + max[1]) * 0.5,
            (min[2] + max[2]) * 0.5,
        ];
        let half = [
            (max[0] - min[0]) * 0.5,
            (max[1] - min[1]) * 0.5,
            (max[2] - min[2]) * 0.5,
        ];
        Self::new(
            center.into(),
            [
                DVec3::X * half[0],
                DVec3::Y * half[1],
                DVec3::Z * half[2],
            ],
        )
    }

    /// Box aligned with the local East-North-Up frame at `center`.
    ///
    /// `half_extents` are the east, north and up half-sizes in metres.
    pub fn east_north_up(center: GeographicPoint, half_extents: [f64; 3]) -> Self {
        let [east, north, up] = enu_basis(center.latitude, center.longitude);
        Self::new(
            center.to_cartesian(),
            [
                east * half_extents[0],
                north * half_extents[1],
                up * half_extents[2],
            ],
        )
    }

    fn axes(&self) -> [DVec3; 3] {
        self.half_axes.map(DVec3::from_array)
    }

    /// Whether `point` lies inside or on the surface of the box.
    ///
    /// A zero-length half-axis collapses the box onto a plane (or line), and a
    /// point is only contained when it lies within [`FLAT_TOLERANCE`] of it.
    pub fn contains(&self, point: CartesianPoint) -> bool {
        let offset = point.as_dvec3() - self.center.as_dvec3();
        let mut residual = offset;
        let mut flat = false;
        for axis in self.axes() {
            let len2 = axis.length_squared();
            if len2 == 0.0 {
                flat = true;
                continue;
            }
            // Coordinate along this axis, with ±1 at the faces.
            let t = offset.dot(axis) / len2;
            if t.abs() > 1.0 {
                return false;
            }
            residual -= axis * t;
        }
        // Whatever the remaining axes cannot reach lies along the collapsed directions.
        !flat || residual.length() <= FLAT_TOLERANCE
    }

    /// Closest point to `point` on or inside the box.
    ///
    /// For points outside the box this lies on the surface.
    pub fn closest_point(&self, point: CartesianPoint) -> CartesianPoint {
        let center = self.center.as_dvec3();
        let offset = point.as_dvec3() - center;

        let mut closest = center;
        for axis in self.axes() {
            let extent = axis.length();
            if extent == 0.0 {
                continue;
            }
            let dir = axis / extent;
            let t = offset.dot(dir).clamp(-extent, extent);
            closest += dir * t;
        }
        closest.into()
    }
}

/// Sphere bounding volume in ECEF metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingSphere {
    pub center: CartesianPoint,
    pub radius: f64,
}

/// Geographic region: longitude/latitude bounds in radians plus a height range in metres.
///
/// `west > east` means the region crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingRegion {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl BoundingRegion {
    pub fn wraps_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Whether a longitude (radians, within [-π, π]) falls inside the west/east span.
    pub fn contains_longitude(&self, lon: f64) -> bool {
        if self.wraps_antimeridian() {
            (self.west..=PI).contains(&lon) || (-PI..=self.east).contains(&lon)
        } else {
            (self.west..=self.east).contains(&lon)
        }
    }

    /// Numeric midpoint `(lat, lon)` of the bounds, in radians.
    ///
    /// Not corrected for antimeridian wraparound: a wrapping region's midpoint
    /// lands on the far side of the globe.
    pub fn representative_center(&self) -> (f64, f64) {
        (
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

/// Spatial extent of a tile: exactly one of box, sphere or region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundingVolume {
    Box(OrientedBox),
    Sphere(BoundingSphere),
    Region(BoundingRegion),
}

impl BoundingVolume {
    /// Build from the 12-float `box` layout: centre followed by the X, Y and Z half-axes.
    pub fn from_box_array(v: [f64; 12]) -> Self {
        BoundingVolume::Box(OrientedBox {
            center: CartesianPoint::new(v[0], v[1], v[2]),
            half_axes: [[v[3], v[4], v[5]], [v[6], v[7], v[8]], [v[9], v[10], v[11]]],
        })
    }

    /// Build from the 4-float `sphere` layout: centre then radius.
    pub fn from_sphere_array(v: [f64; 4]) -> Result<Self> {
        if v[3].is_nan() || v[3] < 0.0 {
            return Err(ProximityError::InvalidInput(format!(
                "sphere radius {} must be non-negative",
                v[3]
            )));
        }
        Ok(BoundingVolume::Sphere(BoundingSphere {
            center: CartesianPoint::new(v[0], v[1], v[2]),
            radius: v[3],
        }))
    }

    /// Build from the 6-float `region` layout: west, south, east, north (radians),
    /// minimum and maximum height (metres).
    pub fn from_region_array(v: [f64; 6]) -> Self {
        BoundingVolume::Region(BoundingRegion {
            west: v[0],
            south: v[1],
            east: v[2],
            north: v[3],
            min_height: v[4],
            max_height: v[5],
        })
    }

    pub fn box_from_slice(v: &[f64]) -> Result<Self> {
        Ok(Self::from_box_array(fixed_len(v, "box")?))
    }

    pub fn sphere_from_slice(v: &[f64]) -> Result<Self> {
        Self::from_sphere_array(fixed_len(v, "sphere")?)
    }

    pub fn region_from_slice(v: &[f64]) -> Result<Self> {
        Ok(Self::from_region_array(fixed_len(v, "region")?))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BoundingVolume::Box(_) => "box",
            BoundingVolume::Sphere(_) => "sphere",
            BoundingVolume::Region(_) => "region",
        }
    }
}

fn fixed_len<const N: usize>(v: &[f64], kind: &str) -> Result<[f64; N]> {
    <[f64; N]>::try_from(v).map_err(|_| {
        ProximityError::InvalidInput(format!(
            "{kind} bounding volume needs {N} values, got {}",
            v.len()
        ))
    })
}

/// A node of a tiled dataset, reduced to its spatial extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tile {
    pub bounding_volume: BoundingVolume,
}

impl Tile {
    pub fn new(bounding_volume: BoundingVolume) -> Self {
        Self { bounding_volume }
    }
}

impl From<BoundingVolume> for Tile {
    fn from(bounding_volume: BoundingVolume) -> Self {
        Self::new(bounding_volume)
    }
}
