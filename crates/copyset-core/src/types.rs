//! Domain types for copyset placement.
//!
//! These are read-only snapshots of cluster state: storage nodes, the
//! failure zones they live in, logical pools, and the copysets (replica
//! groups) placed across them. All types are serializable so a snapshot
//! can be loaded from disk and results printed as JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a storage node.
pub type NodeId = u32;

/// Unique identifier for a failure zone.
pub type ZoneId = u32;

/// Unique identifier for a logical pool.
pub type PoolId = u32;

/// Identifier of a copyset within its logical pool.
pub type CopysetKey = u32;

/// Partner node → number of copysets co-hosted with that partner.
pub type ScatterMap = BTreeMap<NodeId, u32>;

/// Scatter width of a node: the number of distinct partners in its map,
/// not the total number of co-hosted copysets.
pub fn scatter_width(map: &ScatterMap) -> u32 {
    map.len() as u32
}

// ── Copyset ───────────────────────────────────────────────────────

/// Globally unique copyset identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CopysetId {
    pub pool_id: PoolId,
    pub key: CopysetKey,
}

impl CopysetId {
    pub fn new(pool_id: PoolId, key: CopysetKey) -> Self {
        Self { pool_id, key }
    }
}

impl fmt::Display for CopysetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.pool_id, self.key)
    }
}

/// One replica placement within a copyset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerInfo {
    pub id: NodeId,
    pub zone_id: ZoneId,
}

impl PeerInfo {
    pub fn new(id: NodeId, zone_id: ZoneId) -> Self {
        Self { id, zone_id }
    }
}

/// A copyset and the replicas currently hosting it.
///
/// The replica count is implied by the copyset's pool; `peers` is never
/// empty for a copyset known to the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopysetInfo {
    pub id: CopysetId,
    pub peers: Vec<PeerInfo>,
}

impl CopysetInfo {
    pub fn new(id: CopysetId, peers: Vec<PeerInfo>) -> Self {
        Self { id, peers }
    }

    /// Whether `node` hosts a replica of this copyset.
    pub fn has_peer(&self, node: NodeId) -> bool {
        self.peers.iter().any(|p| p.id == node)
    }

    /// The replica hosted on `node`, if any.
    pub fn peer(&self, node: NodeId) -> Option<&PeerInfo> {
        self.peers.iter().find(|p| p.id == node)
    }
}

// ── Node ──────────────────────────────────────────────────────────

/// Liveness of a storage node as last reported by heartbeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    #[default]
    Online,
    Offline,
}

/// A storage node and the zone it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: NodeId,
    pub zone_id: ZoneId,
    #[serde(default)]
    pub status: NodeStatus,
}

impl NodeInfo {
    pub fn new(id: NodeId, zone_id: ZoneId, status: NodeStatus) -> Self {
        Self { id, zone_id, status }
    }

    pub fn online(id: NodeId, zone_id: ZoneId) -> Self {
        Self::new(id, zone_id, NodeStatus::Online)
    }

    pub fn offline(id: NodeId, zone_id: ZoneId) -> Self {
        Self::new(id, zone_id, NodeStatus::Offline)
    }

    pub fn is_offline(&self) -> bool {
        self.status == NodeStatus::Offline
    }
}

// ── Pool ──────────────────────────────────────────────────────────

/// Placement policy of a logical pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub id: PoolId,
    /// Minimum number of distinct zones every copyset must span.
    pub standard_zone_count: u32,
}

// ── Migration impact ─────────────────────────────────────────────

/// Scatter width of one node before and after a hypothetical migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScatterWidthChange {
    pub before: u32,
    pub after: u32,
}

impl ScatterWidthChange {
    /// Signed change in scatter width (`after - before`).
    pub fn delta(&self) -> i64 {
        i64::from(self.after) - i64::from(self.before)
    }
}

/// Every node touched by a migration, with its before/after scatter width.
pub type MigrationImpact = BTreeMap<NodeId, ScatterWidthChange>;
