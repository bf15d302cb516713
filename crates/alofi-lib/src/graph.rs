use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// Opaque node identifier, unique within a single [`Graph`].
pub type NodeId = i64;

/// Position of an edge inside its owning [`Graph`].
pub type EdgeId = usize;

/// WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Reject non-finite values and values outside the latitude/longitude ranges.
    pub fn validate(&self) -> Result<()> {
        let valid = self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);

        if valid {
            Ok(())
        } else {
            Err(Error::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Graph vertex with its geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub coordinate: Coordinate,
}

/// Directed road segment.
///
/// `highway` holds the already-normalized road class; list-valued tags are
/// reduced to their first element when the dataset is loaded (see
/// [`normalize_highway_tag`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Segment length in meters.
    pub length: f64,
    /// Base traversal time in seconds.
    pub travel_time: f64,
    pub highway: Option<String>,
    /// Precomputed ventilation penalty; derived from `highway` when absent.
    pub ventilation_penalty: Option<u8>,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, length: f64, travel_time: f64) -> Self {
        Self {
            source,
            target,
            length,
            travel_time,
            highway: None,
            ventilation_penalty: None,
        }
    }

    pub fn with_highway(mut self, highway: impl Into<String>) -> Self {
        self.highway = Some(highway.into());
        self
    }

    pub fn with_ventilation_penalty(mut self, penalty: u8) -> Self {
        self.ventilation_penalty = Some(penalty);
        self
    }

    fn reversed(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            ..self.clone()
        }
    }
}

/// Immutable road network variant.
///
/// Nodes keep the order in which they were added; that order is the iteration
/// order used for nearest-node tie-breaks. Outgoing edges of a node are visited
/// in insertion order by the shortest-path search.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    nodes: Vec<Node>,
    positions: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// Name of the network variant this graph was built for.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.positions.contains_key(&node)
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.positions.get(&node).map(|&index| &self.nodes[index])
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&Edge> {
        self.edges.get(edge)
    }

    /// Dense index of a node, usable for per-query arrays sized by `node_count`.
    pub(crate) fn position(&self, node: NodeId) -> Option<usize> {
        self.positions.get(&node).copied()
    }

    pub(crate) fn node_at(&self, position: usize) -> NodeId {
        self.nodes[position].id
    }

    /// Outgoing edge identifiers for a node, empty when the node is unknown.
    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        self.positions
            .get(&node)
            .map(|&index| self.outgoing[index].as_slice())
            .unwrap_or(&[])
    }

    /// Pick the edge connecting `from` to `to`.
    ///
    /// Parallel edges resolve to the one with the lowest base travel time; the
    /// earliest inserted edge wins ties.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        let mut best: Option<EdgeId> = None;
        for &candidate in self.outgoing(from) {
            let edge = &self.edges[candidate];
            if edge.target != to {
                continue;
            }
            match best {
                Some(current) if self.edges[current].travel_time <= edge.travel_time => {}
                _ => best = Some(candidate),
            }
        }
        best
    }
}

/// Incremental, validating constructor for [`Graph`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    name: String,
    nodes: Vec<Node>,
    positions: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl GraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            positions: HashMap::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn add_node(&mut self, id: NodeId, coordinate: Coordinate) -> Result<()> {
        if self.positions.contains_key(&id) {
            return Err(Error::DuplicateNode { node: id });
        }
        self.positions.insert(id, self.nodes.len());
        self.nodes.push(Node { id, coordinate });
        self.outgoing.push(Vec::new());
        Ok(())
    }

    /// Add a directed edge after checking its endpoints and weights.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId> {
        let invalid = |message: &str| Error::InvalidEdge {
            from: edge.source,
            to: edge.target,
            message: message.to_string(),
        };

        if !edge.length.is_finite() || edge.length < 0.0 {
            return Err(invalid("length must be finite and non-negative"));
        }
        if !edge.travel_time.is_finite() || edge.travel_time < 0.0 {
            return Err(invalid("travel_time must be finite and non-negative"));
        }
        let Some(&source) = self.positions.get(&edge.source) else {
            return Err(invalid("source node is not part of the graph"));
        };
        if !self.positions.contains_key(&edge.target) {
            return Err(invalid("target node is not part of the graph"));
        }

        let id = self.edges.len();
        self.edges.push(edge);
        self.outgoing[source].push(id);
        Ok(id)
    }

    /// Add an edge in both directions with identical attributes.
    pub fn add_bidirectional(&mut self, edge: Edge) -> Result<(EdgeId, EdgeId)> {
        let reverse = edge.reversed();
        let forward = self.add_edge(edge)?;
        let backward = self.add_edge(reverse)?;
        Ok((forward, backward))
    }

    pub fn build(self) -> Graph {
        Graph {
            name: self.name,
            nodes: self.nodes,
            positions: self.positions,
            edges: self.edges,
            outgoing: self.outgoing,
        }
    }
}

/// Reduce a raw highway tag to a single road class.
///
/// Datasets exported from list-valued tags store them as JSON arrays such as
/// `["primary","secondary"]`; only the first element is kept. Blank tags and
/// empty lists yield `None`.
pub fn normalize_highway_tag(raw: &str) -> Result<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.starts_with('[') {
        let values: Vec<String> =
            serde_json::from_str(trimmed).map_err(|_| Error::InvalidHighwayTag {
                value: raw.to_string(),
            })?;
        return Ok(values
            .into_iter()
            .next()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()));
    }

    Ok(Some(trimmed.to_string()))
}
