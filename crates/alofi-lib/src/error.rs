use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the Alofi library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the network dataset")]
    ProjectDirsUnavailable,

    /// Raised when attempting to load a schema that is not supported.
    #[error("unsupported dataset schema; expected networks/nodes/edges tables")]
    UnsupportedSchema,

    /// Raised when a network variant name could not be found in the catalog.
    #[error("unknown network: {name}{}", format_suggestions(.suggestions))]
    UnknownNetwork {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a nearest-node lookup runs against a graph without nodes.
    #[error("network {network} has no nodes to snap to")]
    EmptyGraph { network: String },

    /// Raised when a coordinate is not finite or falls outside WGS84 bounds.
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Raised when a node identifier is not part of the selected graph.
    #[error("unknown node identifier: {node}")]
    UnknownNode { node: NodeId },

    /// Raised when a planning or scoring parameter is out of range.
    #[error("invalid {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Raised while building a graph from an edge with unusable attributes.
    #[error("invalid edge {from} -> {to}: {message}")]
    InvalidEdge {
        from: NodeId,
        to: NodeId,
        message: String,
    },

    /// Raised when a node identifier appears twice in the same graph.
    #[error("duplicate node identifier: {node}")]
    DuplicateNode { node: NodeId },

    /// Raised when a highway tag cannot be normalized to a single class.
    #[error("invalid highway tag: {value}")]
    InvalidHighwayTag { value: String },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
