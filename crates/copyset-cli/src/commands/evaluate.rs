use anyhow::Context as _;
use copyset_core::{CopysetId, CopysetInfo, InMemoryTopology, NodeId};
use copyset_schedule::{compute_migration_impact, evaluate_migration};
use tracing::info;

use super::Context;

fn find_copyset(topology: &InMemoryTopology, pool: u32, key: u32) -> anyhow::Result<&CopysetInfo> {
    let id = CopysetId::new(pool, key);
    topology
        .copyset(id)
        .with_context(|| format!("copyset {id} not found in snapshot"))
}

pub fn impact(
    ctx: &Context,
    pool: u32,
    key: u32,
    source: Option<NodeId>,
    target: Option<NodeId>,
) -> anyhow::Result<()> {
    if source.is_none() && target.is_none() {
        anyhow::bail!("at least one of --source or --target is required");
    }
    let copyset = find_copyset(&ctx.topology, pool, key)?;

    let impact = compute_migration_impact(copyset, source, target, &ctx.topology);
    println!("{}", serde_json::to_string_pretty(&impact)?);
    Ok(())
}

pub fn check(
    ctx: &Context,
    pool: u32,
    key: u32,
    source: Option<NodeId>,
    target: NodeId,
) -> anyhow::Result<()> {
    let copyset = find_copyset(&ctx.topology, pool, key)?;

    let verdict = evaluate_migration(&ctx.topology, target, source, copyset, &ctx.limits)?;
    info!(
        copyset = %copyset.id,
        ?source,
        target,
        admitted = verdict.admitted(),
        "evaluated migration"
    );
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}
