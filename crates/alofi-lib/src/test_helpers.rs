// Test-only graph fixtures for `alofi-lib` unit tests
#![allow(dead_code)]

use crate::graph::{Coordinate, Edge, Graph, GraphBuilder, NodeId};

fn add_nodes(builder: &mut GraphBuilder, nodes: &[(NodeId, f64, f64)]) {
    for &(id, latitude, longitude) in nodes {
        builder
            .add_node(id, Coordinate::new(latitude, longitude))
            .expect("fixture nodes are unique");
    }
}

/// Four nodes in a line, 1 - 2 - 3 - 4, joined by bidirectional residential
/// edges of 1000 m and 100 s.
pub fn line_graph() -> Graph {
    let mut builder = GraphBuilder::new("G_line");
    add_nodes(
        &mut builder,
        &[
            (1, 48.2100, 16.3600),
            (2, 48.2100, 16.3735),
            (3, 48.2100, 16.3870),
            (4, 48.2100, 16.4005),
        ],
    );
    for (from, to) in [(1, 2), (2, 3), (3, 4)] {
        builder
            .add_bidirectional(Edge::new(from, to, 1000.0, 100.0).with_highway("residential"))
            .expect("fixture edges are valid");
    }
    builder.build()
}

/// Directed diamond: 1 -> 2 -> 4 costs 20 s, 1 -> 3 -> 4 costs 30 s.
pub fn diamond_graph() -> Graph {
    let mut builder = GraphBuilder::new("G_diamond");
    add_nodes(
        &mut builder,
        &[
            (1, 48.2000, 16.3600),
            (2, 48.2010, 16.3650),
            (3, 48.1990, 16.3650),
            (4, 48.2000, 16.3700),
        ],
    );
    let edges = [
        Edge::new(1, 2, 400.0, 10.0).with_highway("primary"),
        Edge::new(2, 4, 400.0, 10.0).with_highway("motorway"),
        Edge::new(1, 3, 450.0, 15.0).with_highway("residential"),
        Edge::new(3, 4, 450.0, 15.0),
    ];
    for edge in edges {
        builder.add_edge(edge).expect("fixture edges are valid");
    }
    builder.build()
}

/// Two components: 1 <-> 2 and 3 <-> 4.
pub fn disconnected_graph() -> Graph {
    let mut builder = GraphBuilder::new("G_split");
    add_nodes(
        &mut builder,
        &[
            (1, 48.20, 16.36),
            (2, 48.21, 16.36),
            (3, 48.30, 16.50),
            (4, 48.31, 16.50),
        ],
    );
    builder
        .add_bidirectional(Edge::new(1, 2, 1100.0, 80.0))
        .expect("fixture edges are valid");
    builder
        .add_bidirectional(Edge::new(3, 4, 1100.0, 80.0))
        .expect("fixture edges are valid");
    builder.build()
}
