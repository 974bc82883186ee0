//! Distances from a point to the bounding volumes of tiles.
//!
//! Both measures are ground distances: the point and the reference location
//! are projected onto the ellipsoid surface and compared with the Haversine
//! formula, so height differences do not contribute.

pub mod boundary;
pub mod center;

pub use boundary::distance_to_boundary;
pub use center::distance_to_center;
