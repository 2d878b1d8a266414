use strides_core::{CoreError, OsmId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The path end has no neighbors, so no extension exists.
    #[error("no route possible from node {0}: it has no neighbors")]
    Disconnected(OsmId),

    #[error("start node {0} is not in the street graph")]
    UnknownStart(OsmId),

    #[error("street graph has no nodes")]
    EmptyGraph,

    #[error("invalid route configuration: {0}")]
    Config(#[from] CoreError),
}

pub type SearchResult<T> = Result<T, SearchError>;
