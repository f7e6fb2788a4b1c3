//! Migration impact simulation.
//!
//! Moving one replica of copyset `{A, B, C}` from `C` (source) to `D`
//! (target) changes the partner sets of every node involved:
//!
//! ```text
//! A: -C, +D
//! B: -C, +D
//! C: -A, -B
//! D: +A, +B
//! ```
//!
//! Only those nodes' scatter maps are fetched and adjusted; nothing else
//! in the cluster is recomputed.

use copyset_core::{
    CopysetInfo, MigrationImpact, NodeId, ScatterMap, ScatterWidthChange, Topology, scatter_width,
};
use tracing::trace;

/// Record one more co-hosted copyset with `partner`.
fn acquire(map: &mut ScatterMap, partner: NodeId) {
    *map.entry(partner).or_insert(0) += 1;
}

/// Drop one co-hosted copyset with `partner`, forgetting the partner
/// once the count reaches zero.
fn release(map: &mut ScatterMap, partner: NodeId) {
    if let Some(count) = map.get_mut(&partner) {
        if *count <= 1 {
            map.remove(&partner);
        } else {
            *count -= 1;
        }
    }
}

/// Simulate moving one replica of `copyset` from `source` to `target`.
///
/// Either side may be `None` to model an add-only or remove-only change.
/// The result has exactly one entry for the target, the source, and each
/// other peer of the copyset.
pub fn compute_migration_impact<T: Topology + ?Sized>(
    copyset: &CopysetInfo,
    source: Option<NodeId>,
    target: Option<NodeId>,
    topology: &T,
) -> MigrationImpact {
    let mut impact = MigrationImpact::new();

    let mut target_side = target.map(|id| {
        let map = topology.scatter_map(id);
        impact.entry(id).or_default().before = scatter_width(&map);
        (id, map)
    });
    let mut source_side = source.map(|id| {
        let map = topology.scatter_map(id);
        impact.entry(id).or_default().before = scatter_width(&map);
        (id, map)
    });

    for peer in copyset.peers.iter().filter(|p| Some(p.id) != source) {
        let mut peer_map = topology.scatter_map(peer.id);
        let before = scatter_width(&peer_map);

        if let Some((target_id, target_map)) = target_side.as_mut() {
            acquire(target_map, peer.id);
            acquire(&mut peer_map, *target_id);
        }
        if let Some((source_id, source_map)) = source_side.as_mut() {
            release(&mut peer_map, *source_id);
            release(source_map, peer.id);
        }

        let change = ScatterWidthChange {
            before,
            after: scatter_width(&peer_map),
        };
        trace!(
            copyset = %copyset.id,
            node = peer.id,
            before = change.before,
            after = change.after,
            "peer scatter width after migration"
        );
        impact.insert(peer.id, change);
    }

    for (id, map) in [target_side, source_side].into_iter().flatten() {
        let entry = impact.entry(id).or_default();
        entry.after = scatter_width(&map);
        trace!(
            copyset = %copyset.id,
            node = id,
            before = entry.before,
            after = entry.after,
            "scatter width after migration"
        );
    }

    impact
}
