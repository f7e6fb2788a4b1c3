//! Candidate ordering with randomized tie-breaking.
//!
//! Each ranking shuffles its input with the caller's generator and then
//! applies a stable sort, so candidates with equal keys come out in a
//! different order on every pass instead of always favoring low ids.
//! Only the sort key order is guaranteed.

use std::collections::BTreeMap;

use copyset_core::{CopysetInfo, NodeId, NodeInfo, Topology};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::distribution::CopysetDistribution;

/// Order nodes by number of hosted copysets, most first, shuffling each
/// node's copyset list as well. Used to pick migration sources.
pub fn rank_by_distribution_size_desc<R: Rng + ?Sized>(
    distribution: CopysetDistribution,
    rng: &mut R,
) -> Vec<(NodeId, Vec<CopysetInfo>)> {
    let mut ranked = Vec::with_capacity(distribution.len());
    for (node, mut copysets) in distribution {
        copysets.shuffle(rng);
        ranked.push((node, copysets));
    }

    ranked.shuffle(rng);
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    ranked
}

/// Count how many copysets each node currently hosts a replica of.
pub fn copyset_count_by_node(copysets: &[CopysetInfo]) -> BTreeMap<NodeId, usize> {
    let mut counts = BTreeMap::new();
    for copyset in copysets {
        for peer in &copyset.peers {
            *counts.entry(peer.id).or_insert(0) += 1;
        }
    }
    counts
}

/// Order `nodes` by number of hosted copysets, fewest first. Used to
/// pick migration targets. Nodes hosting nothing count as zero.
pub fn rank_nodes_by_copyset_count_asc<T: Topology + ?Sized, R: Rng + ?Sized>(
    nodes: &mut [NodeInfo],
    topology: &T,
    rng: &mut R,
) {
    let counts = copyset_count_by_node(&topology.copysets());

    nodes.shuffle(rng);
    nodes.sort_by_key(|node| counts.get(&node.id).copied().unwrap_or(0));
}

/// Order `(target, affected)` candidates by aggregate scatter-width
/// change, smallest first.
pub fn rank_by_affected_scatter_width_asc<R: Rng + ?Sized>(
    candidates: &mut [(NodeId, i64)],
    rng: &mut R,
) {
    candidates.shuffle(rng);
    candidates.sort_by_key(|&(_, affected)| affected);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use copyset_core::{ClusterSnapshot, CopysetId, InMemoryTopology, PeerInfo};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn make_copyset(key: u32, peers: &[NodeId]) -> CopysetInfo {
        CopysetInfo::new(
            CopysetId::new(1, key),
            peers.iter().map(|&id| PeerInfo::new(id, id)).collect(),
        )
    }

    #[test]
    fn distribution_sorted_by_size_desc() {
        let mut distribution = CopysetDistribution::new();
        distribution.insert(1, vec![make_copyset(1, &[1])]);
        distribution.insert(2, (1..=3).map(|k| make_copyset(k, &[2])).collect());
        distribution.insert(3, Vec::new());
        distribution.insert(4, (1..=3).map(|k| make_copyset(k, &[4])).collect());

        let mut rng = StdRng::seed_from_u64(7);
        let ranked = rank_by_distribution_size_desc(distribution, &mut rng);

        let sizes: Vec<usize> = ranked.iter().map(|(_, c)| c.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1, 0]);
        let nodes: BTreeSet<NodeId> = ranked.iter().map(|(n, _)| *n).collect();
        assert_eq!(nodes, BTreeSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn distribution_keeps_each_nodes_copysets() {
        let mut distribution = CopysetDistribution::new();
        distribution.insert(9, (1..=5).map(|k| make_copyset(k, &[9])).collect());

        let mut rng = StdRng::seed_from_u64(1);
        let ranked = rank_by_distribution_size_desc(distribution, &mut rng);

        let keys: BTreeSet<u32> = ranked[0].1.iter().map(|c| c.id.key).collect();
        assert_eq!(keys, BTreeSet::from([1, 2, 3, 4, 5]));
    }

    #[test]
    fn counts_copysets_per_node() {
        let counts = copyset_count_by_node(&[
            make_copyset(1, &[1, 2, 3]),
            make_copyset(2, &[1, 2, 4]),
            make_copyset(3, &[1, 5, 6]),
        ]);
        assert_eq!(counts[&1], 3);
        assert_eq!(counts[&2], 2);
        assert_eq!(counts[&6], 1);
        assert!(!counts.contains_key(&7));
    }

    #[test]
    fn nodes_sorted_by_copyset_count_asc() {
        let topo = InMemoryTopology::new(ClusterSnapshot {
            nodes: Vec::new(),
            pools: Vec::new(),
            copysets: vec![
                make_copyset(1, &[1, 2, 3]),
                make_copyset(2, &[1, 2, 4]),
                make_copyset(3, &[1, 3, 4]),
            ],
        });
        let mut nodes: Vec<NodeInfo> = (1..=5).map(|id| NodeInfo::online(id, 1)).collect();

        let mut rng = StdRng::seed_from_u64(3);
        rank_nodes_by_copyset_count_asc(&mut nodes, &topo, &mut rng);

        let counts = copyset_count_by_node(&topo.copysets());
        let ranked: Vec<usize> = nodes
            .iter()
            .map(|n| counts.get(&n.id).copied().unwrap_or(0))
            .collect();
        assert!(ranked.windows(2).all(|w| w[0] <= w[1]), "{ranked:?}");
        assert_eq!(nodes[0].id, 5); // hosts nothing
        assert_eq!(nodes[4].id, 1); // hosts everything
        assert_eq!(nodes.len(), 5);
    }

    #[test]
    fn affected_sorted_asc() {
        let mut candidates = vec![(1, 3), (2, -2), (3, 0), (4, -2), (5, 7)];

        let mut rng = StdRng::seed_from_u64(11);
        rank_by_affected_scatter_width_asc(&mut candidates, &mut rng);

        let keys: Vec<i64> = candidates.iter().map(|c| c.1).collect();
        assert_eq!(keys, vec![-2, -2, 0, 3, 7]);
        let ids: BTreeSet<NodeId> = candidates.iter().map(|c| c.0).collect();
        assert_eq!(ids, BTreeSet::from([1, 2, 3, 4, 5]));
    }

    #[test]
    fn ties_rotate_across_passes() {
        let mut leaders = BTreeSet::new();
        for seed in 0..32 {
            let mut candidates: Vec<(NodeId, i64)> = (1..=4).map(|id| (id, 0)).collect();
            let mut rng = StdRng::seed_from_u64(seed);
            rank_by_affected_scatter_width_asc(&mut candidates, &mut rng);
            leaders.insert(candidates[0].0);
        }
        assert!(leaders.len() > 1, "tie order never changed: {leaders:?}");
    }
}
