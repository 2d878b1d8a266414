//! Graph-subsystem error type.

use thiserror::Error;

use strides_core::OsmId;

/// Errors produced by `strides-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Graph integrity failure: the extract is malformed.
    #[error("way {way} references node {node}, which is not in the extract")]
    UnknownNode { way: i64, node: OsmId },

    /// A dense index or CSR offset would overflow `u32`.
    #[error("too many {what} for a street graph: {count}")]
    TooLarge { what: &'static str, count: usize },

    #[error("malformed element data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
