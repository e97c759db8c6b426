//! Network-subsystem error type.

use thiserror::Error;

/// Errors produced by `tp-network`.
///
/// "No path" is not an error: searches return an empty path or an infinite
/// travel time instead.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0} not found in graph")]
    UnknownNode(String),

    #[error("road {from}-{to} references unknown node {missing}")]
    InvalidEdgeReference {
        from:    String,
        to:      String,
        missing: String,
    },

    #[error("duplicate node {0}")]
    DuplicateNode(String),

    #[error("invalid node {key}: {reason}")]
    InvalidNode { key: String, reason: String },

    #[error("invalid road {from}-{to}: {reason}")]
    InvalidRoad {
        from:   String,
        to:     String,
        reason: String,
    },

    #[error("traffic table already has a sample for road {0:?}")]
    DuplicateTrafficSample(String),

    #[error("invalid traffic sample for road {road:?}: {reason}")]
    InvalidTrafficSample { road: String, reason: String },

    #[error("road name {0:?} does not name two known nodes")]
    UnknownRoadName(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
