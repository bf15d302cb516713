//! Per-route aggregation and sustainability scoring.
//!
//! The route score is the **sum** of clamped per-edge scores, so it grows
//! with the number of edges and is only comparable between routes of similar
//! edge count. This is kept for compatibility with existing score tables.

use serde::Serialize;
use tracing::warn;

use crate::cost::CostModel;
use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, NodeId};
use crate::routing::Route;

/// Weight of one gram of CO₂ in the per-edge score.
pub const CO2_SCORE_WEIGHT: f64 = 0.05;
/// Weight of one ventilation-penalty point in the per-edge score.
pub const VENTILATION_SCORE_WEIGHT: f64 = 10.0;

/// Sustainability contribution of a single edge, clamped to `0..=100`.
pub fn edge_score(co2_grams: f64, ventilation: u8) -> f64 {
    let raw = 100.0
        - CO2_SCORE_WEIGHT * co2_grams
        - VENTILATION_SCORE_WEIGHT * f64::from(ventilation);
    raw.clamp(0.0, 100.0)
}

/// Full-precision totals for one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub node_count: usize,
    /// Total length in meters.
    pub distance: f64,
    /// Total base travel time in seconds.
    pub travel_time: f64,
    pub co2_grams: f64,
    pub total_ventilation: f64,
    /// Total ventilation divided by the hop count (0 for one-node routes).
    pub mean_ventilation: f64,
    pub sustainability_score: f64,
    /// Node pairs without a matching edge; they contribute nothing to the totals.
    pub skipped_pairs: usize,
}

impl RouteSummary {
    pub fn travel_time_minutes(&self) -> f64 {
        self.travel_time / 60.0
    }

    /// Values rounded the way route tables display them.
    pub fn display(&self) -> RouteSummaryDisplay {
        RouteSummaryDisplay {
            nodes: self.node_count,
            distance_m: round_to(self.distance, 1),
            travel_time_min: round_to(self.travel_time_minutes(), 1),
            co2_g: round_to(self.co2_grams, 2),
            ventilation_penalty: round_to(self.mean_ventilation, 2),
            sustainability_score: round_to(self.sustainability_score, 2),
        }
    }
}

/// Rounded, presentation-ready view of a [`RouteSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummaryDisplay {
    pub nodes: usize,
    pub distance_m: f64,
    pub travel_time_min: f64,
    pub co2_g: f64,
    pub ventilation_penalty: f64,
    pub sustainability_score: f64,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Summarize a route with the default emission rate.
pub fn summarize_route(graph: &Graph, route: &Route) -> Result<RouteSummary> {
    summarize_route_with(graph, route, &CostModel::default())
}

/// Fold every hop of `route` into totals using `model`.
///
/// Hops recorded by the planner use the exact edge that was traversed; other
/// hops use [`Graph::edge_between`]. Pairs of known nodes with no edge are
/// skipped and logged. An empty route or a node outside `graph` is an error.
pub fn summarize_route_with(
    graph: &Graph,
    route: &Route,
    model: &CostModel,
) -> Result<RouteSummary> {
    if route.nodes().is_empty() {
        return Err(Error::InvalidParameter {
            name: "route",
            message: "must contain at least one node".to_string(),
        });
    }
    if let Some(&node) = route.nodes().iter().find(|&&node| !graph.contains(node)) {
        return Err(Error::UnknownNode { node });
    }

    let mut summary = RouteSummary {
        node_count: route.nodes().len(),
        distance: 0.0,
        travel_time: 0.0,
        co2_grams: 0.0,
        total_ventilation: 0.0,
        mean_ventilation: 0.0,
        sustainability_score: 0.0,
        skipped_pairs: 0,
    };

    for (index, pair) in route.nodes().windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        let edge = resolve_hop(graph, route, index, from, to).and_then(|id| graph.edge(id));
        let Some(edge) = edge else {
            summary.skipped_pairs += 1;
            warn!(
                network = graph.name(),
                from,
                to,
                "route references a node pair without edge data; skipping"
            );
            continue;
        };

        let cost = model.edge_cost(edge);
        summary.distance += edge.length;
        summary.travel_time += edge.travel_time;
        summary.co2_grams += cost.co2_grams;
        summary.total_ventilation += f64::from(cost.ventilation);
        summary.sustainability_score += edge_score(cost.co2_grams, cost.ventilation);
    }

    let hops = route.hop_count();
    if hops > 0 {
        summary.mean_ventilation = summary.total_ventilation / hops as f64;
    }

    Ok(summary)
}

fn resolve_hop(
    graph: &Graph,
    route: &Route,
    index: usize,
    from: NodeId,
    to: NodeId,
) -> Option<EdgeId> {
    route
        .recorded_edge(index)
        .filter(|&id| {
            graph
                .edge(id)
                .is_some_and(|edge| edge.source == from && edge.target == to)
        })
        .or_else(|| graph.edge_between(from, to))
}
