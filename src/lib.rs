pub mod config;
pub mod error;
pub mod proximity;
pub mod selection;
pub mod transform;
pub mod types;

pub use config::{DistanceMetric, SelectionConfig};
pub use error::{ProximityError, Result};
pub use proximity::{distance_to_boundary, distance_to_center};
pub use selection::{PointOfInterest, SelectionReport, rank_tiles, select_tiles};
pub use types::{BoundingVolume, CartesianPoint, GeographicPoint, Tile};
