mod common;

use std::sync::Arc;
use std::thread;

use alofi_lib::{
    find_route_dijkstra, great_circle_distance, load_networks, nearest_node, plan_diverse_routes,
    plan_route, resolve_nearest_node, Coordinate, Edge, Error, GraphBuilder, PlannerConfig,
    RouteRequest, SearchLimits, SearchOutcome, WeightOverlay,
};
use common::{branching_graph, seed_vienna_block, TempDataset};

fn line_graph() -> alofi_lib::Graph {
    let mut builder = GraphBuilder::new("G_line");
    for (id, lon) in [(1, 16.3600), (2, 16.3735), (3, 16.3870), (4, 16.4005)] {
        builder
            .add_node(id, Coordinate::new(48.21, lon))
            .expect("unique node");
    }
    for (from, to) in [(1, 2), (2, 3), (3, 4)] {
        builder
            .add_bidirectional(Edge::new(from, to, 1000.0, 100.0).with_highway("residential"))
            .expect("valid edge");
    }
    builder.build()
}

#[test]
fn line_graph_without_alternative_returns_one_route() {
    let graph = line_graph();
    let routes = plan_diverse_routes(&graph, 1, 4, 2, 2.0).expect("valid request");
    assert_eq!(routes.len(), 1);
    assert_eq!(routes.routes[0].nodes(), &[1, 2, 3, 4]);
    assert!(routes.is_partial());
}

#[test]
fn each_route_is_shortest_under_accumulated_penalties() {
    let graph = branching_graph(&[20.0, 30.0, 50.0]);
    let penalty = 3.0;
    let routes = plan_diverse_routes(&graph, 1, 2, 3, penalty).expect("valid request");

    let vias: Vec<_> = routes.iter().map(|route| route.nodes()[1]).collect();
    assert_eq!(vias, vec![10, 11, 12], "every corridor is used once");

    let mut overlay = WeightOverlay::new();
    for route in &routes {
        let expected = match find_route_dijkstra(&graph, 1, 2, &overlay, SearchLimits::default()) {
            SearchOutcome::Found(path) => path,
            other => panic!("expected a path, got {other:?}"),
        };
        assert_eq!(route.edges(), expected.edges.as_slice());
        assert_eq!(route.discovery_cost(), expected.cost);
        for &edge in route.edges() {
            overlay.penalize(edge, penalty);
        }
    }
}

#[test]
fn never_returns_more_than_requested() {
    let graph = branching_graph(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
    for count in 0..=6 {
        let routes = plan_diverse_routes(&graph, 1, 2, count, 2.0).expect("valid request");
        assert!(routes.len() <= count);
    }
}

#[test]
fn planning_is_idempotent() {
    let graph = branching_graph(&[20.0, 20.0, 25.0]);
    let first = plan_diverse_routes(&graph, 1, 2, 5, 1.5).expect("valid request");
    let second = plan_diverse_routes(&graph, 1, 2, 5, 1.5).expect("valid request");
    assert_eq!(first, second);
    // Equal-cost corridors resolve to the one inserted first.
    assert_eq!(first.routes[0].nodes(), &[1, 10, 2]);
}

#[test]
fn base_graph_is_untouched_by_planning() {
    let graph = branching_graph(&[20.0, 30.0]);
    let before: Vec<f64> = graph.edges().iter().map(|edge| edge.travel_time).collect();
    plan_diverse_routes(&graph, 1, 2, 5, 10.0).expect("valid request");
    let after: Vec<f64> = graph.edges().iter().map(|edge| edge.travel_time).collect();
    assert_eq!(before, after);
}

#[test]
fn disconnected_endpoints_return_empty_list() {
    let mut builder = GraphBuilder::new("G_split");
    builder.add_node(1, Coordinate::new(0.0, 0.0)).unwrap();
    builder.add_node(2, Coordinate::new(0.0, 0.01)).unwrap();
    let graph = builder.build();

    let routes = plan_diverse_routes(&graph, 1, 2, 5, 2.0).expect("not an error");
    assert!(routes.is_empty());
}

#[test]
fn unknown_node_fails_fast() {
    let graph = line_graph();
    let err = plan_diverse_routes(&graph, 42, 4, 2, 2.0).expect_err("unknown start");
    assert!(matches!(err, Error::UnknownNode { node: 42 }));
}

#[test]
fn nearest_node_is_exact_minimum() {
    let graph = line_graph();
    let queries = [
        (48.2150, 16.3500),
        (48.2080, 16.3800),
        (48.2100, 16.3935),
        (48.2300, 16.4200),
    ];
    for (lat, lon) in queries {
        let query = Coordinate::new(lat, lon);
        let snapped = nearest_node(&graph, query).expect("graph has nodes");
        let best = graph
            .nodes()
            .iter()
            .map(|node| great_circle_distance(query, node.coordinate))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(snapped.distance, best);
    }
}

#[test]
fn nearest_node_ties_go_to_first_node() {
    let mut builder = GraphBuilder::new("G_tie");
    builder.add_node(7, Coordinate::new(0.0, 0.01)).unwrap();
    builder.add_node(3, Coordinate::new(0.0, -0.01)).unwrap();
    let graph = builder.build();
    assert_eq!(resolve_nearest_node(&graph, 0.0, 0.0).unwrap(), 7);
}

#[test]
fn empty_graph_has_no_nearest_node() {
    let graph = GraphBuilder::new("G_empty").build();
    let err = resolve_nearest_node(&graph, 48.2, 16.37).expect_err("no nodes");
    assert!(matches!(err, Error::EmptyGraph { .. }));
}

#[test]
fn plan_route_on_loaded_dataset_prefers_fast_motorway_first() {
    let dataset = TempDataset::new();
    seed_vienna_block(&dataset, "G_base", None);
    let catalog = load_networks(&dataset.path).expect("dataset loads");

    let request = RouteRequest::new(
        "G_base",
        Coordinate::new(48.2101, 16.3601),
        Coordinate::new(48.2049, 16.3801),
    )
    .with_planner(PlannerConfig::new(3, 2.0));
    let plan = plan_route(&catalog, &request).expect("plan");

    assert_eq!(plan.start.node, 101);
    assert_eq!(plan.goal.node, 106);
    assert_eq!(plan.network_label, "Base Network");
    assert_eq!(plan.routes[0].route.nodes(), &[101, 102, 103, 106]);
    assert!(plan.routes.len() >= 2);
    assert_ne!(plan.routes[0].route.nodes(), plan.routes[1].route.nodes());
    // Motorway hops carry the poor ventilation class.
    assert!(plan.routes[0].summary.total_ventilation >= 6.0);
}

#[test]
fn concurrent_queries_share_one_graph() {
    let dataset = TempDataset::new();
    seed_vienna_block(&dataset, "G_base", None);
    let catalog = Arc::new(load_networks(&dataset.path).expect("dataset loads"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                let graph = catalog.graph("G_base").expect("network present");
                plan_diverse_routes(&graph, 101, 106, 3, 2.0).expect("valid request")
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread finished"))
        .collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}
