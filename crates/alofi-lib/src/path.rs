use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::graph::{EdgeId, Graph, NodeId};

/// Source of non-negative traversal costs for a shortest-path search.
pub trait EdgeWeights {
    fn weight(&self, graph: &Graph, edge: EdgeId) -> f64;
}

/// Unmodified `travel_time` of each edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct TravelTime;

impl EdgeWeights for TravelTime {
    fn weight(&self, graph: &Graph, edge: EdgeId) -> f64 {
        graph.edge(edge).map(|e| e.travel_time).unwrap_or(f64::INFINITY)
    }
}

/// Per-query penalty layer over the graph's base travel times.
///
/// Only penalized edges are stored, so creating an overlay is free and the
/// underlying [`Graph`] is never written to.
#[derive(Debug, Clone, Default)]
pub struct WeightOverlay {
    multipliers: HashMap<EdgeId, f64>,
}

impl WeightOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiply the working weight of `edge` by `factor`, compounding earlier penalties.
    pub fn penalize(&mut self, edge: EdgeId, factor: f64) {
        *self.multipliers.entry(edge).or_insert(1.0) *= factor;
    }

    /// Accumulated multiplier for `edge` (1.0 when untouched).
    pub fn multiplier(&self, edge: EdgeId) -> f64 {
        self.multipliers.get(&edge).copied().unwrap_or(1.0)
    }

    /// Number of edges carrying a penalty.
    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

impl EdgeWeights for WeightOverlay {
    fn weight(&self, graph: &Graph, edge: EdgeId) -> f64 {
        TravelTime.weight(graph, edge) * self.multiplier(edge)
    }
}

/// Limits applied to a single search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    /// Maximum number of settled nodes before the search gives up.
    pub max_expansions: Option<usize>,
}

/// Shortest path found by [`find_route_dijkstra`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub nodes: Vec<NodeId>,
    /// Edges traversed between consecutive `nodes`.
    pub edges: Vec<EdgeId>,
    pub cost: f64,
}

/// Outcome of a single shortest-path search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(ShortestPath),
    Unreachable,
    BudgetExhausted { expansions: usize },
}

/// Run Dijkstra's algorithm from `start` to `goal` under `weights`.
///
/// The search is deterministic: queue ties are broken by node insertion
/// order, neighbours are relaxed in edge insertion order and only strictly
/// cheaper labels replace existing ones. Unknown endpoints are unreachable.
pub fn find_route_dijkstra<W: EdgeWeights>(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    weights: &W,
    limits: SearchLimits,
) -> SearchOutcome {
    let (Some(start_pos), Some(goal_pos)) = (graph.position(start), graph.position(goal)) else {
        return SearchOutcome::Unreachable;
    };

    if start_pos == goal_pos {
        return SearchOutcome::Found(ShortestPath {
            nodes: vec![start],
            edges: Vec::new(),
            cost: 0.0,
        });
    }

    let node_count = graph.node_count();
    let mut distances = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<EdgeId>> = vec![None; node_count];
    let mut settled = vec![false; node_count];
    let mut queue = BinaryHeap::new();
    let mut expansions = 0usize;

    distances[start_pos] = 0.0;
    queue.push(QueueEntry::new(start_pos, 0.0));

    while let Some(entry) = queue.pop() {
        let current = entry.position;
        if settled[current] {
            continue;
        }
        settled[current] = true;

        if current == goal_pos {
            return SearchOutcome::Found(reconstruct_path(
                graph,
                &parents,
                start_pos,
                goal_pos,
                distances[goal_pos],
            ));
        }

        expansions += 1;
        if let Some(limit) = limits.max_expansions {
            if expansions > limit {
                return SearchOutcome::BudgetExhausted { expansions: limit };
            }
        }

        let current_distance = distances[current];
        for &edge_id in graph.outgoing(graph.node_at(current)) {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let Some(next) = graph.position(edge.target) else {
                continue;
            };
            if settled[next] {
                continue;
            }

            let next_cost = current_distance + weights.weight(graph, edge_id);
            if next_cost < distances[next] {
                distances[next] = next_cost;
                parents[next] = Some(edge_id);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    SearchOutcome::Unreachable
}

fn reconstruct_path(
    graph: &Graph,
    parents: &[Option<EdgeId>],
    start: usize,
    goal: usize,
    cost: f64,
) -> ShortestPath {
    let mut nodes = vec![graph.node_at(goal)];
    let mut edges = Vec::new();
    let mut current = goal;

    while current != start {
        let Some(edge_id) = parents[current] else {
            break;
        };
        let Some(edge) = graph.edge(edge_id) else {
            break;
        };
        let Some(previous) = graph.position(edge.source) else {
            break;
        };
        edges.push(edge_id);
        nodes.push(edge.source);
        current = previous;
    }

    nodes.reverse();
    edges.reverse();
    ShortestPath { nodes, edges, cost }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    position: usize,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(position: usize, cost: f64) -> Self {
        Self {
            position,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
