//! Route planning for Alofi networks.
//!
//! This module provides:
//! - [`plan_diverse_routes`] - iterative penalized shortest-path search between two nodes
//! - [`RouteRequest`] - coordinate-level query against a named network variant
//! - [`RoutePlan`] - snapped endpoints plus every route with its summary
//! - [`plan_route`] - main entry point tying snapping, planning and scoring together
//!
//! # Example
//!
//! ```ignore
//! use alofi_lib::{load_networks, plan_route, Coordinate, RouteRequest};
//!
//! let catalog = load_networks("networks.db".as_ref())?;
//! let request = RouteRequest::new(
//!     "G_base",
//!     Coordinate::new(48.21315, 16.36005),
//!     Coordinate::new(48.21052, 16.37081),
//! );
//! let plan = plan_route(&catalog, &request)?;
//! println!("{} routes", plan.routes.len());
//! ```

mod planner;

pub use planner::{
    plan_diverse_routes, plan_diverse_routes_with, PlannerConfig, Route, RouteSet,
    DEFAULT_DUPLICATE_RETRIES, DEFAULT_PENALTY, DEFAULT_ROUTE_COUNT,
};

use serde::Serialize;
use tracing::info;

use crate::cost::CostModel;
use crate::error::Result;
use crate::geo::{nearest_node, SnappedNode};
use crate::graph::Coordinate;
use crate::network::NetworkCatalog;
use crate::scoring::{summarize_route_with, RouteSummary};

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    /// Network variant name (or label) to route on.
    pub network: String,
    pub start: Coordinate,
    pub goal: Coordinate,
    pub planner: PlannerConfig,
    pub cost: CostModel,
}

impl RouteRequest {
    /// Request with default route count, penalty and emission rate.
    pub fn new(network: impl Into<String>, start: Coordinate, goal: Coordinate) -> Self {
        Self {
            network: network.into(),
            start,
            goal,
            planner: PlannerConfig::default(),
            cost: CostModel::default(),
        }
    }

    pub fn with_planner(mut self, planner: PlannerConfig) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_cost_model(mut self, cost: CostModel) -> Self {
        self.cost = cost;
        self
    }
}

/// A discovered route together with its aggregated totals.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedRoute {
    /// Display label, "Route 1", "Route 2", ... in discovery order.
    pub label: String,
    pub route: Route,
    pub summary: RouteSummary,
}

/// Planned routes returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub network: String,
    pub network_label: String,
    pub start: SnappedNode,
    pub goal: SnappedNode,
    pub requested: usize,
    pub routes: Vec<PlannedRoute>,
}

impl RoutePlan {
    /// True when fewer routes were found than requested.
    pub fn is_partial(&self) -> bool {
        self.routes.len() < self.requested
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Compute diverse, scored routes for a coordinate-level request.
///
/// This is the main entry point for route planning. It:
/// 1. Validates the planner and cost parameters
/// 2. Selects the requested network variant
/// 3. Snaps both coordinates to their nearest nodes
/// 4. Plans diverse routes between the snapped nodes
/// 5. Summarizes every route
///
/// Disconnected endpoints produce a plan without routes rather than an error.
pub fn plan_route(catalog: &NetworkCatalog, request: &RouteRequest) -> Result<RoutePlan> {
    request.planner.validate()?;
    request.cost.validate()?;

    let network = catalog.get(&request.network)?;
    let graph = network.graph.as_ref();

    let start = nearest_node(graph, request.start)?;
    let goal = nearest_node(graph, request.goal)?;

    let set = plan_diverse_routes_with(graph, start.node, goal.node, &request.planner)?;
    info!(
        network = %network.name,
        start = start.node,
        goal = goal.node,
        found = set.len(),
        requested = set.requested,
        "planned diverse routes"
    );

    let requested = set.requested;
    let routes = set
        .into_iter()
        .enumerate()
        .map(|(index, route)| {
            let summary = summarize_route_with(graph, &route, &request.cost)?;
            Ok(PlannedRoute {
                label: format!("Route {}", index + 1),
                route,
                summary,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RoutePlan {
        network: network.name.clone(),
        network_label: network.label.clone(),
        start,
        goal,
        requested,
        routes,
    })
}
