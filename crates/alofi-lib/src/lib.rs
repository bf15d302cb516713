//! Alofi library entry points.
//!
//! This crate loads named road-network variants into memory, snaps
//! coordinates to network nodes, plans several diverse routes between them
//! by iterative edge penalization, and scores each route for CO₂ output and
//! ventilation exposure. Higher-level consumers (the CLI) should only depend
//! on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod cost;
pub mod dataset;
pub mod db;
pub mod error;
pub mod geo;
pub mod graph;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;
pub mod scoring;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use cost::{
    calculate_co2, estimate_ventilation, CostModel, EdgeCost, DEFAULT_EMISSION_RATE_G_PER_KM,
};
pub use dataset::{default_dataset_path, resolve_dataset};
pub use db::{create_schema, load_networks, SCHEMA_SQL};
pub use error::{Error, Result};
pub use geo::{great_circle_distance, nearest_node, resolve_nearest_node, SnappedNode};
pub use graph::{normalize_highway_tag, Coordinate, Edge, EdgeId, Graph, GraphBuilder, NodeId};
pub use network::{Network, NetworkCatalog};
pub use output::{RouteRenderMode, RouteReport, RouteRow};
pub use path::{
    find_route_dijkstra, EdgeWeights, SearchLimits, SearchOutcome, ShortestPath, TravelTime,
    WeightOverlay,
};
pub use routing::{
    plan_diverse_routes, plan_diverse_routes_with, plan_route, PlannedRoute, PlannerConfig, Route,
    RoutePlan, RouteRequest, RouteSet, DEFAULT_PENALTY, DEFAULT_ROUTE_COUNT,
};
pub use scoring::{
    edge_score, summarize_route, summarize_route_with, RouteSummary, RouteSummaryDisplay,
};
