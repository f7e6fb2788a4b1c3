//! Error types for topology lookups and configuration.

use thiserror::Error;

use crate::types::{NodeId, PoolId};

/// Result type alias for topology queries.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// A referenced entity could not be resolved by the topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("logical pool not found: {0}")]
    PoolNotFound(PoolId),

    #[error("logical pool {pool} has invalid standard zone count {count}, should be > 0")]
    InvalidZoneCount { pool: PoolId, count: u32 },
}

/// Invalid scheduling configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("min scatter width must be > 0")]
    ZeroMinScatterWidth,

    #[error("scatter width range percent must be a finite value >= 0, got {0}")]
    InvalidRangePercent(f64),
}
