//! Coordinate transforms between geodetic and Earth-centred frames, and
//! ground distances between geodetic points.

pub mod ecef;
pub mod ground;

pub use ecef::{ecef_to_geodetic_radians, enu_basis, geodetic_to_ecef};
pub use ground::{angular_difference, haversine_distance};
