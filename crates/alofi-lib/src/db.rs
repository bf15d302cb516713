use std::path::Path;

use rusqlite::{params, Connection, Row};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::{normalize_highway_tag, Coordinate, Edge, Graph, GraphBuilder, NodeId};
use crate::network::NetworkCatalog;

/// SQL creating the dataset layout understood by [`load_networks`].
///
/// `highway` may hold a plain road class or a JSON array of classes;
/// `oneway = 0` marks segments that are traversable in both directions.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS networks (
    name TEXT PRIMARY KEY,
    label TEXT
);
CREATE TABLE IF NOT EXISTS nodes (
    network TEXT NOT NULL,
    node_id INTEGER NOT NULL,
    lat REAL NOT NULL,
    lon REAL NOT NULL
);
CREATE TABLE IF NOT EXISTS edges (
    network TEXT NOT NULL,
    source INTEGER NOT NULL,
    target INTEGER NOT NULL,
    length REAL,
    travel_time REAL,
    highway TEXT,
    ventilation_penalty INTEGER,
    oneway INTEGER
);
";

const NETWORK_COLUMNS: &[&str] = &["name", "label"];
const NODE_COLUMNS: &[&str] = &["network", "node_id", "lat", "lon"];
const EDGE_COLUMNS: &[&str] = &[
    "network",
    "source",
    "target",
    "length",
    "travel_time",
    "highway",
    "ventilation_penalty",
    "oneway",
];

/// Create the dataset tables on an open connection.
pub fn create_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Raw edge record as stored in the dataset.
#[derive(Debug, Clone)]
struct EdgeRecord {
    source: NodeId,
    target: NodeId,
    length: Option<f64>,
    travel_time: Option<f64>,
    highway: Option<String>,
    ventilation_penalty: Option<i64>,
    oneway: Option<i64>,
}

/// Load every network variant from a dataset into memory.
///
/// Rows are read in insertion (`rowid`) order so node iteration order, and
/// with it nearest-node tie-breaks and shortest-path tie-breaks, is stable
/// across loads. Highway tags are normalized once here. Edges whose endpoints
/// are missing from their network are dropped with a warning; edges with
/// negative or non-finite weights fail the load.
pub fn load_networks(db_path: &Path) -> Result<NetworkCatalog> {
    let connection = Connection::open(db_path)?;
    verify_schema(&connection)?;
    debug!(path = %db_path.display(), "loading networks");

    let mut catalog = NetworkCatalog::new();
    for (name, label) in load_network_names(&connection)? {
        let graph = load_graph(&connection, &name)?;
        info!(
            network = %name,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "loaded network"
        );
        catalog.insert(label, graph);
    }

    Ok(catalog)
}

fn verify_schema(connection: &Connection) -> Result<()> {
    for (table, columns) in [
        ("networks", NETWORK_COLUMNS),
        ("nodes", NODE_COLUMNS),
        ("edges", EDGE_COLUMNS),
    ] {
        if !table_exists(connection, table)? || !table_has_columns(connection, table, columns)? {
            debug!(table, "dataset table missing or incomplete");
            return Err(Error::UnsupportedSchema);
        }
    }
    Ok(())
}

fn load_network_names(connection: &Connection) -> Result<Vec<(String, Option<String>)>> {
    let mut stmt = connection.prepare("SELECT name, label FROM networks ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut names = Vec::new();
    for row in rows {
        names.push(row?);
    }
    Ok(names)
}

fn load_graph(connection: &Connection, network: &str) -> Result<Graph> {
    let mut builder = GraphBuilder::new(network);

    let mut stmt = connection
        .prepare("SELECT node_id, lat, lon FROM nodes WHERE network = ?1 ORDER BY rowid")?;
    let rows = stmt.query_map(params![network], |row| {
        Ok((row.get::<_, NodeId>(0)?, row.get::<_, f64>(1)?, row.get::<_, f64>(2)?))
    })?;
    for row in rows {
        let (id, latitude, longitude) = row?;
        let coordinate = Coordinate::new(latitude, longitude);
        coordinate.validate()?;
        builder.add_node(id, coordinate)?;
    }

    let mut stmt = connection.prepare(
        "SELECT source, target, length, travel_time, highway, ventilation_penalty, oneway \
         FROM edges WHERE network = ?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![network], row_to_edge)?;

    let mut skipped_edges = 0usize;
    for row in rows {
        let record = row?;
        if !builder.contains(record.source) || !builder.contains(record.target) {
            skipped_edges += 1;
            continue;
        }

        let bidirectional = record.oneway == Some(0);
        let edge = record_to_edge(record)?;
        if bidirectional {
            builder.add_bidirectional(edge)?;
        } else {
            builder.add_edge(edge)?;
        }
    }

    if skipped_edges > 0 {
        warn!(
            network,
            skipped_edges, "ignored edges referencing unknown nodes",
        );
    }

    Ok(builder.build())
}

fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<EdgeRecord> {
    Ok(EdgeRecord {
        source: row.get(0)?,
        target: row.get(1)?,
        length: row.get(2)?,
        travel_time: row.get(3)?,
        highway: row.get(4)?,
        ventilation_penalty: row.get(5)?,
        oneway: row.get(6)?,
    })
}

fn record_to_edge(record: EdgeRecord) -> Result<Edge> {
    let highway = match record.highway.as_deref() {
        Some(raw) => normalize_highway_tag(raw)?,
        None => None,
    };

    let ventilation_penalty = record
        .ventilation_penalty
        .map(|value| {
            u8::try_from(value).map_err(|_| Error::InvalidEdge {
                from: record.source,
                to: record.target,
                message: format!("ventilation_penalty {value} is out of range"),
            })
        })
        .transpose()?;

    Ok(Edge {
        source: record.source,
        target: record.target,
        length: record.length.unwrap_or(0.0),
        travel_time: record.travel_time.unwrap_or(0.0),
        highway,
        ventilation_penalty,
    })
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}
