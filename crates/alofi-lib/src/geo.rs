//! Great-circle distance and nearest-node snapping.
//!
//! Snapping is an exhaustive scan over the graph's nodes. For the network
//! sizes this crate targets (a few thousand nodes) that is fast enough for
//! interactive use and, unlike most spatial indexes, gives a simple stable
//! tie-break: the first node in graph iteration order wins.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Coordinate, Graph, NodeId};

/// Mean Earth radius in meters used for great-circle distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_009.0;

/// Great-circle distance between two coordinates in meters.
///
/// Uses the arctangent form of the spherical law of cosines, which stays
/// accurate for both very short and near-antipodal separations.
pub fn great_circle_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_lat2, cos_lat2) = lat2.sin_cos();
    let (sin_delta, cos_delta) = delta_lon.sin_cos();

    let y = ((cos_lat2 * sin_delta).powi(2)
        + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_delta).powi(2))
    .sqrt();
    let x = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_delta;

    EARTH_RADIUS_METERS * y.atan2(x)
}

/// Result of snapping a coordinate onto a graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnappedNode {
    pub node: NodeId,
    /// Distance from the query point to the node in meters.
    pub distance: f64,
}

/// Find the node closest to `coordinate`, reporting its distance.
pub fn nearest_node(graph: &Graph, coordinate: Coordinate) -> Result<SnappedNode> {
    coordinate.validate()?;

    let mut best: Option<SnappedNode> = None;
    for node in graph.nodes() {
        let distance = great_circle_distance(coordinate, node.coordinate);
        match best {
            Some(current) if current.distance <= distance => {}
            _ => {
                best = Some(SnappedNode {
                    node: node.id,
                    distance,
                })
            }
        }
    }

    let snapped = best.ok_or_else(|| Error::EmptyGraph {
        network: graph.name().to_string(),
    })?;
    debug!(
        network = graph.name(),
        node = snapped.node,
        distance_m = snapped.distance,
        "snapped coordinate to node"
    );
    Ok(snapped)
}

/// Resolve a latitude/longitude pair to the identifier of the closest node.
pub fn resolve_nearest_node(graph: &Graph, latitude: f64, longitude: f64) -> Result<NodeId> {
    nearest_node(graph, Coordinate::new(latitude, longitude)).map(|snapped| snapped.node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn distance_between_identical_points_is_zero() {
        let point = Coordinate::new(48.21315, 16.36005);
        assert_eq!(great_circle_distance(point, point), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let distance = great_circle_distance(a, b);
        assert!((distance - 111_195.0).abs() < 10.0, "got {distance}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(48.21315, 16.36005);
        let b = Coordinate::new(48.21052, 16.37081);
        let ab = great_circle_distance(a, b);
        let ba = great_circle_distance(b, a);
        assert!((ab - ba).abs() < 1e-9);
        assert!(ab > 800.0 && ab < 900.0, "got {ab}");
    }

    #[test]
    fn empty_graph_reports_not_found() {
        let graph = GraphBuilder::new("G_empty").build();
        let err = resolve_nearest_node(&graph, 48.2, 16.3).expect_err("no nodes");
        assert!(matches!(err, Error::EmptyGraph { ref network } if network == "G_empty"));
    }

    #[test]
    fn invalid_coordinates_fail_fast() {
        let mut builder = GraphBuilder::new("g");
        builder.add_node(1, Coordinate::new(0.0, 0.0)).unwrap();
        let graph = builder.build();
        let err = resolve_nearest_node(&graph, 123.0, 0.0).expect_err("latitude out of range");
        assert!(matches!(err, Error::InvalidCoordinate { .. }));
    }

    #[test]
    fn equidistant_nodes_resolve_to_first_inserted() {
        let mut builder = GraphBuilder::new("g");
        builder.add_node(7, Coordinate::new(0.0, 0.001)).unwrap();
        builder.add_node(3, Coordinate::new(0.0, -0.001)).unwrap();
        let graph = builder.build();

        assert_eq!(resolve_nearest_node(&graph, 0.0, 0.0).unwrap(), 7);
    }
}
