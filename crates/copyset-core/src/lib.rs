//! copyset-core: shared types for copyset scheduling.
//!
//! Provides the snapshot data model (nodes, zones, pools, copysets), the
//! [`Topology`] trait the scheduling core queries, an in-memory topology
//! for tests and tooling, and the TOML scheduling configuration.

pub mod config;
pub mod error;
pub mod topology;
pub mod types;

pub use config::{ScatterWidthLimits, ScheduleConfig};
pub use error::{ConfigError, TopologyError, TopologyResult};
pub use topology::{ClusterSnapshot, InMemoryTopology, Topology};
pub use types::*;
