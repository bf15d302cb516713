//! Diverse route generation by iterative edge penalization.
//!
//! Each iteration runs a plain shortest-path search on the current working
//! weights, records the route and multiplies the weight of every edge it used
//! by the configured penalty. Edges reused by later routes keep compounding,
//! so heavily shared corridors become progressively less attractive. The
//! result is a cheap, deterministic approximation of "k diverse routes"; the
//! routes are not guaranteed to be edge-disjoint.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, NodeId};
use crate::path::{find_route_dijkstra, SearchLimits, SearchOutcome, WeightOverlay};

/// Number of routes requested when the caller does not specify one.
pub const DEFAULT_ROUTE_COUNT: usize = 5;

/// Weight multiplier applied to edges of each discovered route by default.
pub const DEFAULT_PENALTY: f64 = 2.0;

/// Consecutive repeated routes tolerated before the planner gives up.
pub const DEFAULT_DUPLICATE_RETRIES: usize = 16;

/// Parameters for [`plan_diverse_routes_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Maximum number of routes to return.
    pub route_count: usize,
    /// Multiplier applied to the working weight of every edge a route uses.
    pub penalty: f64,
    /// Settled-node budget for each individual shortest-path search.
    pub max_expansions: Option<usize>,
    /// Consecutive searches returning an already-found route before stopping.
    pub max_duplicate_retries: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            route_count: DEFAULT_ROUTE_COUNT,
            penalty: DEFAULT_PENALTY,
            max_expansions: None,
            max_duplicate_retries: DEFAULT_DUPLICATE_RETRIES,
        }
    }
}

impl PlannerConfig {
    pub fn new(route_count: usize, penalty: f64) -> Self {
        Self {
            route_count,
            penalty,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.penalty.is_finite() || self.penalty <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "penalty",
                message: format!("must be finite and greater than zero, got {}", self.penalty),
            });
        }
        if self.max_expansions == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_expansions",
                message: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }

    fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
        }
    }
}

/// Connected walk through a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    nodes: Vec<NodeId>,
    #[serde(skip)]
    edges: Vec<EdgeId>,
    /// Cost of the route under the working weights it was discovered with.
    #[serde(skip)]
    cost: f64,
}

impl Route {
    /// Route described only by its node sequence.
    ///
    /// Edges are looked up by node pair when the route is summarized.
    pub fn from_nodes(nodes: Vec<NodeId>) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
            cost: 0.0,
        }
    }

    fn discovered(nodes: Vec<NodeId>, edges: Vec<EdgeId>, cost: f64) -> Self {
        Self { nodes, edges, cost }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn goal(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Penalized search cost at discovery time (0 for routes built from nodes).
    pub fn discovery_cost(&self) -> f64 {
        self.cost
    }

    /// Edge used for hop `index`, if the planner recorded it.
    pub(crate) fn recorded_edge(&self, index: usize) -> Option<EdgeId> {
        if self.edges.len() == self.hop_count() {
            self.edges.get(index).copied()
        } else {
            None
        }
    }

    /// Edges traversed by the route; empty for routes built from nodes.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// Ordered routes returned by the planner.
///
/// Holding fewer routes than requested is a normal outcome: the search ran
/// out of paths, or hit its expansion budget, before reaching the count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSet {
    pub requested: usize,
    pub routes: Vec<Route>,
}

impl RouteSet {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// True when fewer routes were found than requested.
    pub fn is_partial(&self) -> bool {
        self.routes.len() < self.requested
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }
}

impl IntoIterator for RouteSet {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

impl<'a> IntoIterator for &'a RouteSet {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Plan up to `count` diverse routes between two nodes.
pub fn plan_diverse_routes(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    count: usize,
    penalty: f64,
) -> Result<RouteSet> {
    plan_diverse_routes_with(graph, start, goal, &PlannerConfig::new(count, penalty))
}

/// Plan diverse routes using a full [`PlannerConfig`].
///
/// Unknown endpoints and invalid parameters are rejected up front. The base
/// graph is only read; penalties live in a [`WeightOverlay`] dropped on return.
///
/// A search that returns a route already in the set still penalizes its
/// edges but is not added again. After `max_duplicate_retries` consecutive
/// repeats the planner concludes no further alternative exists and stops.
pub fn plan_diverse_routes_with(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    config: &PlannerConfig,
) -> Result<RouteSet> {
    config.validate()?;
    for node in [start, goal] {
        if !graph.contains(node) {
            return Err(Error::UnknownNode { node });
        }
    }

    let mut overlay = WeightOverlay::new();
    let mut routes: Vec<Route> = Vec::new();
    let mut repeats = 0usize;
    let mut searches = 0usize;

    while routes.len() < config.route_count {
        searches += 1;
        let iteration = routes.len() + 1;
        let path = match find_route_dijkstra(graph, start, goal, &overlay, config.limits()) {
            SearchOutcome::Found(path) => path,
            SearchOutcome::Unreachable => {
                warn!(
                    network = graph.name(),
                    start,
                    goal,
                    iteration,
                    "no path found for route {iteration}"
                );
                break;
            }
            SearchOutcome::BudgetExhausted { expansions } => {
                warn!(
                    network = graph.name(),
                    start,
                    goal,
                    iteration,
                    expansions,
                    "search budget exhausted for route {iteration}"
                );
                break;
            }
        };

        for &edge in &path.edges {
            overlay.penalize(edge, config.penalty);
        }

        if routes.iter().any(|route| route.edges == path.edges) {
            repeats += 1;
            debug!(
                network = graph.name(),
                iteration, repeats, "search repeated an earlier route"
            );
            if repeats > config.max_duplicate_retries || path.edges.is_empty() {
                break;
            }
            continue;
        }

        debug!(
            network = graph.name(),
            iteration,
            hops = path.edges.len(),
            cost = path.cost,
            "discovered route"
        );
        repeats = 0;
        routes.push(Route::discovered(path.nodes, path.edges, path.cost));
    }

    debug!(
        network = graph.name(),
        searches,
        found = routes.len(),
        penalized_edges = overlay.len(),
        "finished diverse route search"
    );

    Ok(RouteSet {
        requested: config.route_count,
        routes,
    })
}
