//! Which copysets live on which online node.

use std::collections::BTreeMap;

use copyset_core::{CopysetInfo, NodeId, NodeInfo};
use tracing::debug;

/// Online node → copysets it hosts a replica of.
pub type CopysetDistribution = BTreeMap<NodeId, Vec<CopysetInfo>>;

/// Group `copysets` by hosting node, restricted to the online members of
/// `nodes`.
///
/// Offline nodes are dropped even if they host copysets. Every online node
/// in the roster gets an entry, idle ones with an empty list. Nodes that
/// host copysets but are missing from the roster are kept as-is.
pub fn build_online_distribution(
    copysets: &[CopysetInfo],
    nodes: &[NodeInfo],
) -> CopysetDistribution {
    let mut distribution = CopysetDistribution::new();
    for copyset in copysets {
        for peer in &copyset.peers {
            distribution
                .entry(peer.id)
                .or_default()
                .push(copyset.clone());
        }
    }

    for node in nodes {
        if node.is_offline() {
            if let Some(hosted) = distribution.remove(&node.id) {
                debug!(node = node.id, copysets = hosted.len(), "excluding offline node");
            }
            continue;
        }
        distribution.entry(node.id).or_default();
    }

    distribution
}
