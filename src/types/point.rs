use glam::DVec3;
use serde::Serialize;

use crate::error::{ProximityError, Result};
use crate::transform::ecef::{ecef_to_geodetic_radians, geodetic_to_ecef};

/// A point on or above the WGS84 ellipsoid, in degrees and metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeographicPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeographicPoint {
    /// Ground-level point at the given latitude/longitude (degrees).
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: 0.0,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    /// Check the coordinate ranges and normalise a longitude of -180° to 180°.
    pub fn validate(self) -> Result<Self> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ProximityError::InvalidInput(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ProximityError::InvalidInput(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        if !self.altitude.is_finite() {
            return Err(ProximityError::InvalidInput(format!(
                "altitude {} is not finite",
                self.altitude
            )));
        }

        let longitude = if self.longitude == -180.0 {
            180.0
        } else {
            self.longitude
        };
        Ok(Self { longitude, ..self })
    }

    pub fn to_cartesian(&self) -> CartesianPoint {
        geodetic_to_ecef(self.latitude, self.longitude, self.altitude).into()
    }
}

/// Earth-centred, Earth-fixed position (EPSG:4978), in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Geodetic `(latitude, longitude, altitude)` with angles in radians.
    pub fn to_geodetic_radians(&self) -> Result<(f64, f64, f64)> {
        ecef_to_geodetic_radians([self.x, self.y, self.z])
    }

    /// Geodetic position in degrees.
    pub fn to_geographic(&self) -> Result<GeographicPoint> {
        let (lat, lon, alt) = self.to_geodetic_radians()?;
        Ok(GeographicPoint::new(lat.to_degrees(), lon.to_degrees()).with_altitude(alt))
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for CartesianPoint {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<DVec3> for CartesianPoint {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<CartesianPoint> for DVec3 {
    fn from(p: CartesianPoint) -> Self {
        p.as_dvec3()
    }
}
