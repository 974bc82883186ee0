pub mod point;
pub mod tile;

pub use point::{CartesianPoint, GeographicPoint};
pub use tile::{BoundingRegion, BoundingSphere, BoundingVolume, OrientedBox, Tile};
