//! Common test utilities and fixture helpers.
//!
//! Integration tests build small SQLite datasets on the fly instead of
//! shipping binary fixtures, so every scenario states its own topology.

use std::path::PathBuf;

use alofi_lib::{create_schema, Coordinate, Edge, Graph, GraphBuilder, NodeId};
use rusqlite::{params, Connection};
use tempfile::TempDir;

/// Row for the `edges` table.
#[allow(dead_code)]
pub struct EdgeRow<'a> {
    pub source: NodeId,
    pub target: NodeId,
    pub length: f64,
    pub travel_time: f64,
    pub highway: Option<&'a str>,
    pub ventilation_penalty: Option<i64>,
    pub oneway: bool,
}

#[allow(dead_code)]
impl<'a> EdgeRow<'a> {
    pub fn two_way(source: NodeId, target: NodeId, length: f64, travel_time: f64) -> Self {
        Self {
            source,
            target,
            length,
            travel_time,
            highway: None,
            ventilation_penalty: None,
            oneway: false,
        }
    }

    pub fn one_way(source: NodeId, target: NodeId, length: f64, travel_time: f64) -> Self {
        Self {
            oneway: true,
            ..Self::two_way(source, target, length, travel_time)
        }
    }

    pub fn highway(mut self, highway: &'a str) -> Self {
        self.highway = Some(highway);
        self
    }

    pub fn ventilation(mut self, penalty: i64) -> Self {
        self.ventilation_penalty = Some(penalty);
        self
    }
}

/// Temporary dataset file with the Alofi schema.
///
/// The directory is removed when the value is dropped.
#[allow(dead_code)]
pub struct TempDataset {
    dir: TempDir,
    pub path: PathBuf,
    connection: Connection,
}

#[allow(dead_code)]
impl TempDataset {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("networks.db");
        let connection = Connection::open(&path).expect("open dataset");
        create_schema(&connection).expect("create schema");
        Self {
            dir,
            path,
            connection,
        }
    }

    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn network(&self, name: &str, label: Option<&str>) -> &Self {
        self.connection
            .execute(
                "INSERT INTO networks (name, label) VALUES (?1, ?2)",
                params![name, label],
            )
            .expect("insert network");
        self
    }

    pub fn nodes(&self, network: &str, nodes: &[(NodeId, f64, f64)]) -> &Self {
        for &(id, lat, lon) in nodes {
            self.connection
                .execute(
                    "INSERT INTO nodes (network, node_id, lat, lon) VALUES (?1, ?2, ?3, ?4)",
                    params![network, id, lat, lon],
                )
                .expect("insert node");
        }
        self
    }

    pub fn edges(&self, network: &str, edges: &[EdgeRow<'_>]) -> &Self {
        for edge in edges {
            self.connection
                .execute(
                    "INSERT INTO edges \
                     (network, source, target, length, travel_time, highway, ventilation_penalty, oneway) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        network,
                        edge.source,
                        edge.target,
                        edge.length,
                        edge.travel_time,
                        edge.highway,
                        edge.ventilation_penalty,
                        i64::from(edge.oneway),
                    ],
                )
                .expect("insert edge");
        }
        self
    }
}

/// Nodes of a small grid-like street block around Vienna's Ringstraße.
#[allow(dead_code)]
pub const VIENNA_NODES: &[(NodeId, f64, f64)] = &[
    (101, 48.2100, 16.3600),
    (102, 48.2100, 16.3700),
    (103, 48.2100, 16.3800),
    (104, 48.2050, 16.3600),
    (105, 48.2050, 16.3700),
    (106, 48.2050, 16.3800),
];

/// Populate `network` with a 2x3 block where the northern street is a
/// motorway and the southern street is residential.
#[allow(dead_code)]
pub fn seed_vienna_block(dataset: &TempDataset, network: &str, label: Option<&str>) {
    dataset.network(network, label).nodes(network, VIENNA_NODES).edges(
        network,
        &[
            EdgeRow::two_way(101, 102, 740.0, 40.0).highway("motorway"),
            EdgeRow::two_way(102, 103, 740.0, 40.0).highway("motorway"),
            EdgeRow::two_way(104, 105, 740.0, 70.0).highway("residential"),
            EdgeRow::two_way(105, 106, 740.0, 70.0).highway("[\"residential\", \"service\"]"),
            EdgeRow::two_way(101, 104, 560.0, 45.0).highway("secondary"),
            EdgeRow::two_way(102, 105, 560.0, 45.0).highway("tertiary"),
            EdgeRow::two_way(103, 106, 560.0, 45.0).highway("secondary"),
        ],
    );
}

/// Directed graph with `branches` parallel two-hop corridors from node 1 to
/// node 2. Corridor `i` passes through node `10 + i` and costs
/// `branch_costs[i]` split evenly over its two edges.
#[allow(dead_code)]
pub fn branching_graph(branch_costs: &[f64]) -> Graph {
    let mut builder = GraphBuilder::new("G_branches");
    builder
        .add_node(1, Coordinate::new(0.0, 0.0))
        .expect("start node");
    builder
        .add_node(2, Coordinate::new(0.0, 0.1))
        .expect("goal node");
    for (index, &cost) in branch_costs.iter().enumerate() {
        let via = 10 + index as NodeId;
        builder
            .add_node(via, Coordinate::new(0.01 * (index as f64 + 1.0), 0.05))
            .expect("via node");
        builder
            .add_edge(Edge::new(1, via, 500.0, cost / 2.0))
            .expect("first half");
        builder
            .add_edge(Edge::new(via, 2, 500.0, cost / 2.0))
            .expect("second half");
    }
    builder.build()
}
