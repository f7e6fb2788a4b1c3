use copyset_core::{CopysetId, NodeId, NodeInfo, Topology, ZoneId};
use copyset_schedule::{
    build_online_distribution, copyset_count_by_node, rank_by_distribution_size_desc,
    rank_nodes_by_copyset_count_asc,
};
use serde::Serialize;

use super::Context;

#[derive(Debug, Serialize)]
struct SourceCandidate {
    node: NodeId,
    copysets: Vec<CopysetId>,
}

#[derive(Debug, Serialize)]
struct TargetCandidate {
    node: NodeId,
    zone: ZoneId,
    copysets: usize,
}

pub fn distribution(ctx: &mut Context) -> anyhow::Result<()> {
    let distribution =
        build_online_distribution(&ctx.topology.copysets(), &ctx.topology.node_list());
    let ranked = rank_by_distribution_size_desc(distribution, &mut ctx.rng);

    let out: Vec<SourceCandidate> = ranked
        .into_iter()
        .map(|(node, copysets)| SourceCandidate {
            node,
            copysets: copysets.into_iter().map(|c| c.id).collect(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub fn targets(ctx: &mut Context) -> anyhow::Result<()> {
    let mut nodes: Vec<NodeInfo> = ctx
        .topology
        .nodes()
        .filter(|n| !n.is_offline())
        .cloned()
        .collect();
    rank_nodes_by_copyset_count_asc(&mut nodes, &ctx.topology, &mut ctx.rng);

    let counts = copyset_count_by_node(&ctx.topology.copysets());
    let out: Vec<TargetCandidate> = nodes
        .into_iter()
        .map(|n| TargetCandidate {
            node: n.id,
            zone: n.zone_id,
            copysets: counts.get(&n.id).copied().unwrap_or(0),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
