//! copyset-schedule: copyset migration admission and ranking.
//!
//! Decides whether moving one replica of a copyset from a source node to
//! a target node keeps the cluster within its scatter-width band and
//! zone-diversity requirement, and ranks candidates for the outer
//! scheduler. It never mutates cluster state and never decides *which*
//! copyset to move.
//!
//! # Components
//!
//! - **`scatter`**: per-node scatter-width acceptance policy
//! - **`impact`**: before/after scatter width of every node a move touches
//! - **`feasibility`**: zone + scatter-width admission, aggregate delta
//! - **`ranker`**: shuffled, stably sorted candidate orderings
//! - **`distribution`**: copysets grouped by online node
//!
//! # Flow
//!
//! ```text
//! scheduler
//!   ├── build_online_distribution / rank_* (pick source, target, copyset)
//!   └── check_zone_and_scatter_width_feasible
//!         └── check_scatter_width_feasible
//!               ├── compute_migration_impact (Topology::scatter_map)
//!               └── satisfies_scatter_width (per node)
//! ```

pub mod distribution;
pub mod feasibility;
pub mod impact;
pub mod ranker;
pub mod scatter;

pub use distribution::{CopysetDistribution, build_online_distribution};
pub use feasibility::{
    MigrationVerdict, ScatterWidthCheck, check_scatter_width_feasible,
    check_zone_and_scatter_width_feasible, evaluate_migration, zones_after_migration,
};
pub use impact::compute_migration_impact;
pub use ranker::{
    copyset_count_by_node, rank_by_affected_scatter_width_asc, rank_by_distribution_size_desc,
    rank_nodes_by_copyset_count_asc,
};
pub use scatter::satisfies_scatter_width;
