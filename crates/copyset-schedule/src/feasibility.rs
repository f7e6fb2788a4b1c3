//! Migration admission: zone diversity plus scatter-width limits.
//!
//! A migration is admitted only if, afterwards, the copyset still spans
//! the pool's standard number of zones *and* every node whose scatter
//! width changes satisfies [`satisfies_scatter_width`].

use std::collections::BTreeMap;

use copyset_core::{
    CopysetId, CopysetInfo, NodeId, ScatterWidthLimits, Topology, TopologyResult, ZoneId,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::impact::compute_migration_impact;
use crate::scatter::satisfies_scatter_width;

/// Outcome of the scatter-width part of a feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScatterWidthCheck {
    /// Every evaluated node stays within policy.
    pub all_satisfied: bool,
    /// Net change in scatter width summed over every evaluated node,
    /// including nodes that failed the policy.
    pub affected: i64,
}

/// Check the scatter-width effect of moving a replica of `copyset` from
/// `source` to `target`.
///
/// `ignore` excludes one node from both the policy check and the
/// `affected` sum, typically an offline source whose post-migration
/// width no longer matters. Every other node is evaluated even after a
/// violation is found so that `affected` always covers the whole impact.
pub fn check_scatter_width_feasible<T: Topology + ?Sized>(
    copyset: &CopysetInfo,
    source: Option<NodeId>,
    target: Option<NodeId>,
    ignore: Option<NodeId>,
    topology: &T,
    limits: &ScatterWidthLimits,
) -> ScatterWidthCheck {
    let impact = compute_migration_impact(copyset, source, target, topology);

    let mut check = ScatterWidthCheck {
        all_satisfied: true,
        affected: 0,
    };
    for (&node, change) in &impact {
        if Some(node) == ignore {
            continue;
        }

        let is_target = Some(node) == target;
        if !satisfies_scatter_width(is_target, change.before, change.after, limits) {
            debug!(
                copyset = %copyset.id,
                node,
                is_target,
                before = change.before,
                after = change.after,
                min = limits.min_scatter_width,
                max = limits.max_scatter_width(),
                "scatter width out of policy after migration"
            );
            check.all_satisfied = false;
        }
        check.affected += change.delta();
    }

    check
}

/// Number of distinct zones `copyset` would span after replacing the
/// replica on `source` with one in `target_zone`.
pub fn zones_after_migration(
    copyset: &CopysetInfo,
    source: Option<NodeId>,
    target_zone: ZoneId,
) -> usize {
    let mut histogram: BTreeMap<ZoneId, u32> = BTreeMap::new();
    for peer in &copyset.peers {
        *histogram.entry(peer.zone_id).or_insert(0) += 1;
    }

    let source_zone = source.and_then(|id| copyset.peer(id)).map(|p| p.zone_id);
    if let Some(zone) = source_zone {
        if let Some(count) = histogram.get_mut(&zone) {
            if *count <= 1 {
                histogram.remove(&zone);
            } else {
                *count -= 1;
            }
        }
    }
    *histogram.entry(target_zone).or_insert(0) += 1;

    histogram.len()
}

/// Full admission decision for one candidate migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationVerdict {
    pub copyset: CopysetId,
    pub source: Option<NodeId>,
    pub target: NodeId,
    pub standard_zone_count: u32,
    pub zones_after: usize,
    /// Not evaluated when the zone check already rejected the migration.
    pub scatter_width: Option<ScatterWidthCheck>,
}

impl MigrationVerdict {
    pub fn zone_satisfied(&self) -> bool {
        self.zones_after >= self.standard_zone_count as usize
    }

    pub fn admitted(&self) -> bool {
        self.zone_satisfied() && self.scatter_width.is_some_and(|c| c.all_satisfied)
    }
}

/// Evaluate zone diversity and scatter width for moving a replica of
/// `copyset` from `source` to `target`.
///
/// Fails only when the target node or the pool's standard zone count
/// cannot be resolved; policy rejections are reported in the verdict.
pub fn evaluate_migration<T: Topology + ?Sized>(
    topology: &T,
    target: NodeId,
    source: Option<NodeId>,
    copyset: &CopysetInfo,
    limits: &ScatterWidthLimits,
) -> TopologyResult<MigrationVerdict> {
    let target_info = topology.node_info(target)?;
    let standard_zone_count = topology.standard_zone_count(copyset.id.pool_id)?;

    let zones_after = zones_after_migration(copyset, source, target_info.zone_id);
    let mut verdict = MigrationVerdict {
        copyset: copyset.id,
        source,
        target,
        standard_zone_count,
        zones_after,
        scatter_width: None,
    };

    if !verdict.zone_satisfied() {
        debug!(
            copyset = %copyset.id,
            ?source,
            target,
            zones_after,
            standard_zone_count,
            "migration would leave copyset in too few zones"
        );
        return Ok(verdict);
    }

    verdict.scatter_width = Some(check_scatter_width_feasible(
        copyset,
        source,
        Some(target),
        None,
        topology,
        limits,
    ));
    Ok(verdict)
}

/// Boolean admission check for the scheduling loop.
///
/// Lookup failures are logged and treated as a rejection so a single
/// unresolvable candidate never aborts a scheduling pass.
pub fn check_zone_and_scatter_width_feasible<T: Topology + ?Sized>(
    topology: &T,
    target: NodeId,
    source: Option<NodeId>,
    copyset: &CopysetInfo,
    limits: &ScatterWidthLimits,
) -> bool {
    match evaluate_migration(topology, target, source, copyset, limits) {
        Ok(verdict) => verdict.admitted(),
        Err(e) => {
            error!(copyset = %copyset.id, target, error = %e, "copyset scheduler lookup failed");
            false
        }
    }
}
