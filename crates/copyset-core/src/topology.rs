//! Read-only topology view consumed by the scheduling core.
//!
//! [`Topology`] is the seam to whatever store tracks node, zone and
//! copyset membership. [`InMemoryTopology`] implements it over a
//! [`ClusterSnapshot`], which is what tests and `copysetctl` use.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{TopologyError, TopologyResult};
use crate::types::{CopysetId, CopysetInfo, NodeId, NodeInfo, PoolId, PoolInfo, ScatterMap};

/// Queries the scheduling core needs from the cluster topology.
///
/// Implementations must be cheap, synchronous, in-memory reads. Callers
/// sharing one topology across threads rely on the implementation for
/// its own consistency.
pub trait Topology {
    /// Resolve a node's zone and liveness.
    fn node_info(&self, id: NodeId) -> TopologyResult<NodeInfo>;

    /// Partner → co-hosted copyset count for `id`. Unknown nodes have an
    /// empty map.
    fn scatter_map(&self, id: NodeId) -> ScatterMap;

    /// Minimum number of distinct zones a copyset in `pool` must span.
    /// Always `> 0` on success.
    fn standard_zone_count(&self, pool: PoolId) -> TopologyResult<u32>;

    /// Every copyset in the cluster.
    fn copysets(&self) -> Vec<CopysetInfo>;
}

/// Flat, serializable description of a cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub nodes: Vec<NodeInfo>,
    #[serde(default)]
    pub pools: Vec<PoolInfo>,
    #[serde(default)]
    pub copysets: Vec<CopysetInfo>,
}

impl ClusterSnapshot {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: ClusterSnapshot = toml::from_str(&content)?;
        Ok(snapshot)
    }
}

/// Indexed, immutable [`Topology`] built from a [`ClusterSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTopology {
    nodes: BTreeMap<NodeId, NodeInfo>,
    pools: BTreeMap<PoolId, PoolInfo>,
    copysets: Vec<CopysetInfo>,
    scatter: BTreeMap<NodeId, ScatterMap>,
}

impl InMemoryTopology {
    pub fn new(snapshot: ClusterSnapshot) -> Self {
        let mut nodes = BTreeMap::new();
        for node in snapshot.nodes {
            if let Some(prev) = nodes.insert(node.id, node) {
                warn!(node = prev.id, "duplicate node in snapshot, keeping the last entry");
            }
        }
        let pools = snapshot.pools.into_iter().map(|p| (p.id, p)).collect();

        let mut scatter: BTreeMap<NodeId, ScatterMap> = BTreeMap::new();
        for copyset in &snapshot.copysets {
            for peer in &copyset.peers {
                let map = scatter.entry(peer.id).or_default();
                for other in copyset.peers.iter().filter(|o| o.id != peer.id) {
                    *map.entry(other.id).or_insert(0) += 1;
                }
            }
        }

        Self {
            nodes,
            pools,
            copysets: snapshot.copysets,
            scatter,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeInfo> {
        self.nodes.values()
    }

    /// Roster of every known node, online or not.
    pub fn node_list(&self) -> Vec<NodeInfo> {
        self.nodes.values().cloned().collect()
    }

    pub fn copyset(&self, id: CopysetId) -> Option<&CopysetInfo> {
        self.copysets.iter().find(|c| c.id == id)
    }
}

impl From<ClusterSnapshot> for InMemoryTopology {
    fn from(snapshot: ClusterSnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl Topology for InMemoryTopology {
    fn node_info(&self, id: NodeId) -> TopologyResult<NodeInfo> {
        self.nodes
            .get(&id)
            .cloned()
            .ok_or(TopologyError::NodeNotFound(id))
    }

    fn scatter_map(&self, id: NodeId) -> ScatterMap {
        self.scatter.get(&id).cloned().unwrap_or_default()
    }

    fn standard_zone_count(&self, pool: PoolId) -> TopologyResult<u32> {
        let info = self.pools.get(&pool).ok_or(TopologyError::PoolNotFound(pool))?;
        if info.standard_zone_count == 0 {
            return Err(TopologyError::InvalidZoneCount {
                pool,
                count: info.standard_zone_count,
            });
        }
        Ok(info.standard_zone_count)
    }

    fn copysets(&self) -> Vec<CopysetInfo> {
        self.copysets.clone()
    }
}
