//! Point-of-interest entry and proximity ranking of tiles.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{DistanceMetric, SelectionConfig};
use crate::error::{ProximityError, Result};
use crate::proximity::{distance_to_boundary, distance_to_center};
use crate::types::{CartesianPoint, GeographicPoint, Tile};

/// A validated location plus a search radius in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfInterest {
    pub location: GeographicPoint,
    /// `false` when the altitude was left blank and ground level was assumed.
    pub altitude_specified: bool,
    pub radius: f64,
}

impl PointOfInterest {
    /// Parse user-entered text fields.
    ///
    /// An empty (or whitespace-only) altitude means ground level.
    pub fn parse(latitude: &str, longitude: &str, altitude: &str, radius: &str) -> Result<Self> {
        let lat = parse_field("latitude", latitude)?;
        let lon = parse_field("longitude", longitude)?;

        let altitude_specified = !altitude.trim().is_empty();
        let alt = if altitude_specified {
            parse_field("altitude", altitude)?
        } else {
            0.0
        };

        let radius = parse_field("radius", radius)?;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ProximityError::InvalidInput(format!(
                "radius {radius} must be a non-negative distance in metres"
            )));
        }

        let location = GeographicPoint::new(lat, lon).with_altitude(alt).validate()?;
        Ok(Self {
            location,
            altitude_specified,
            radius,
        })
    }

    pub fn to_cartesian(&self) -> CartesianPoint {
        self.location.to_cartesian()
    }

    pub fn selection_config(&self, metric: DistanceMetric) -> SelectionConfig {
        SelectionConfig {
            radius: self.radius,
            metric,
        }
    }
}

fn parse_field(name: &str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| ProximityError::InvalidInput(format!("{name} {text:?}: {e}")))
}

/// One tile with its measured distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedTile {
    /// Index into the input slice.
    pub index: usize,
    pub distance: f64,
}

/// Outcome of ranking a set of tiles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionReport {
    /// Nearest first; ties keep input order.
    pub ranked: Vec<RankedTile>,
    /// Tiles whose geometry the metric cannot measure.
    pub skipped: Vec<usize>,
}

impl SelectionReport {
    pub fn nearest(&self) -> Option<&RankedTile> {
        self.ranked.first()
    }
}

/// Measure a single tile with the given metric.
pub fn measure(point: CartesianPoint, tile: &Tile, metric: DistanceMetric) -> Result<f64> {
    match metric {
        DistanceMetric::Boundary => distance_to_boundary(point, tile),
        DistanceMetric::Center => distance_to_center(point, &tile.bounding_volume),
    }
}

/// Rank every tile by distance from `point`.
///
/// Tiles with unsupported geometry are skipped and listed in the report; any
/// other failure aborts the ranking.
pub fn rank_tiles(
    point: CartesianPoint,
    tiles: &[Tile],
    metric: DistanceMetric,
) -> Result<SelectionReport> {
    let measured: Vec<(usize, Result<f64>)> = tiles
        .par_iter()
        .enumerate()
        .map(|(index, tile)| (index, measure(point, tile, metric)))
        .collect();

    let mut report = SelectionReport::default();
    for (index, result) in measured {
        match result {
            Ok(distance) => report.ranked.push(RankedTile { index, distance }),
            Err(ProximityError::UnsupportedGeometry(reason)) => {
                warn!(index, %metric, %reason, "Skipping tile");
                report.skipped.push(index);
            }
            Err(e) => return Err(e),
        }
    }

    // Stable sort: equal distances stay in input order.
    report
        .ranked
        .sort_by(|a, b| a.distance.total_cmp(&b.distance));

    debug!(
        ranked = report.ranked.len(),
        skipped = report.skipped.len(),
        %metric,
        "Ranked tiles"
    );
    Ok(report)
}

/// Rank tiles and keep those within the configured radius.
pub fn select_tiles(
    point: CartesianPoint,
    tiles: &[Tile],
    config: &SelectionConfig,
) -> Result<SelectionReport> {
    let mut report = rank_tiles(point, tiles, config.metric)?;
    report.ranked.retain(|t| t.distance <= config.radius);
    debug!(
        selected = report.ranked.len(),
        radius = config.radius,
        "Selected tiles within radius"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoundingRegion, BoundingVolume, OrientedBox};

    fn region_deg(west: f64, south: f64, east: f64, north: f64) -> Tile {
        Tile::new(BoundingVolume::Region(BoundingRegion {
            west: west.to_radians(),
            south: south.to_radians(),
            east: east.to_radians(),
            north: north.to_radians(),
            min_height: 0.0,
            max_height: 100.0,
        }))
    }

    fn sphere() -> Tile {
        Tile::new(BoundingVolume::from_sphere_array([6_378_137.0, 0.0, 0.0, 10.0]).unwrap())
    }

    #[test]
    fn parse_point_of_interest() {
        let poi = PointOfInterest::parse(" 51.5 ", "-0.12", "35", "200").unwrap();
        assert_eq!(poi.location.latitude, 51.5);
        assert_eq!(poi.location.longitude, -0.12);
        assert_eq!(poi.location.altitude, 35.0);
        assert!(poi.altitude_specified);
        assert_eq!(poi.radius, 200.0);
    }

    #[test]
    fn blank_altitude_means_ground_level() {
        let poi = PointOfInterest::parse("10", "20", "  ", "50").unwrap();
        assert_eq!(poi.location.altitude, 0.0);
        assert!(!poi.altitude_specified);
    }

    #[test]
    fn parse_rejects_bad_fields() {
        let err = PointOfInterest::parse("abc", "0", "", "1").unwrap_err();
        assert!(err.to_string().contains("latitude"));

        let err = PointOfInterest::parse("95", "0", "", "1").unwrap_err();
        assert!(err.to_string().contains("latitude"));

        let err = PointOfInterest::parse("0", "200", "", "1").unwrap_err();
        assert!(err.to_string().contains("longitude"));

        let err = PointOfInterest::parse("0", "0", "high", "1").unwrap_err();
        assert!(err.to_string().contains("altitude"));

        let err = PointOfInterest::parse("0", "0", "", "").unwrap_err();
        assert!(err.to_string().contains("radius"));

        let err = PointOfInterest::parse("0", "0", "", "-5").unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn rank_by_boundary_distance() {
        let tiles = [
            region_deg(20.0, -1.0, 21.0, 1.0),
            region_deg(-1.0, -1.0, 1.0, 1.0),
            region_deg(5.0, -1.0, 6.0, 1.0),
        ];
        let point = GeographicPoint::new(0.0, 0.0).to_cartesian();
        let report = rank_tiles(point, &tiles, DistanceMetric::Boundary).unwrap();

        let order: Vec<usize> = report.ranked.iter().map(|t| t.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(report.nearest().unwrap().distance, 0.0);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn spheres_are_skipped_for_boundary_metric() {
        let tiles = [sphere(), region_deg(-1.0, -1.0, 1.0, 1.0)];
        let point = GeographicPoint::new(0.0, 0.0).to_cartesian();
        let report = rank_tiles(point, &tiles, DistanceMetric::Boundary).unwrap();
        assert_eq!(report.skipped, vec![0]);
        assert_eq!(report.ranked.len(), 1);
        assert_eq!(report.ranked[0].index, 1);
    }

    #[test]
    fn spheres_are_ranked_for_center_metric() {
        let tiles = [sphere(), region_deg(9.0, -1.0, 11.0, 1.0)];
        let point = GeographicPoint::new(0.0, 0.0).to_cartesian();
        let report = rank_tiles(point, &tiles, DistanceMetric::Center).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.ranked[0].index, 0);
        assert!(report.ranked[0].distance < 1e-6);
    }

    #[test]
    fn ties_keep_input_order() {
        let tiles = [
            region_deg(-1.0, -1.0, 1.0, 1.0),
            region_deg(-2.0, -2.0, 2.0, 2.0),
            region_deg(-3.0, -3.0, 3.0, 3.0),
        ];
        let point = GeographicPoint::new(0.0, 0.0).to_cartesian();
        let report = rank_tiles(point, &tiles, DistanceMetric::Boundary).unwrap();
        let order: Vec<usize> = report.ranked.iter().map(|t| t.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn non_convergent_input_aborts_ranking() {
        let tiles = [region_deg(-1.0, -1.0, 1.0, 1.0)];
        let point = CartesianPoint::new(f64::NAN, 0.0, 0.0);
        let err = rank_tiles(point, &tiles, DistanceMetric::Boundary).unwrap_err();
        assert!(matches!(err, ProximityError::NonConvergent { .. }));
    }

    #[test]
    fn select_within_radius() {
        let center = GeographicPoint::new(45.0, 10.0);
        let near = OrientedBox::east_north_up(center, [100.0, 100.0, 50.0]);
        let far = OrientedBox::east_north_up(GeographicPoint::new(45.1, 10.0), [100.0, 100.0, 50.0]);
        let tiles = [
            Tile::new(BoundingVolume::Box(far)),
            Tile::new(BoundingVolume::Box(near)),
        ];

        let poi = PointOfInterest::parse("45.0", "10.0", "", "200").unwrap();
        let config = poi.selection_config(DistanceMetric::Boundary);
        let report = select_tiles(poi.to_cartesian(), &tiles, &config).unwrap();

        assert_eq!(report.ranked.len(), 1);
        assert_eq!(report.ranked[0].index, 1);
    }
}
