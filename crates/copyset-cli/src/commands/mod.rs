pub mod evaluate;
pub mod rank;

use std::path::Path;

use anyhow::Context as _;
use copyset_core::{ClusterSnapshot, InMemoryTopology, ScatterWidthLimits, ScheduleConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub min_scatter_width: Option<u32>,
    pub range_percent: Option<f64>,
    pub seed: Option<u64>,
}

/// Everything a subcommand needs: the topology, the limits to check
/// against, and this invocation's shuffling generator.
pub struct Context {
    pub topology: InMemoryTopology,
    pub limits: ScatterWidthLimits,
    pub rng: StdRng,
}

impl Context {
    pub fn load(
        snapshot: &Path,
        config: Option<&Path>,
        overrides: &Overrides,
    ) -> anyhow::Result<Self> {
        let snapshot = ClusterSnapshot::from_file(snapshot)
            .with_context(|| format!("loading cluster snapshot {}", snapshot.display()))?;
        let config = match config {
            Some(path) => ScheduleConfig::from_file(path)
                .with_context(|| format!("loading schedule config {}", path.display()))?,
            None => ScheduleConfig::default(),
        };
        let config = resolve_config(config, overrides)?;

        debug!(
            nodes = snapshot.nodes.len(),
            copysets = snapshot.copysets.len(),
            min = config.scatter_width.min_scatter_width,
            max = config.scatter_width.max_scatter_width(),
            "loaded cluster snapshot"
        );

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            topology: InMemoryTopology::new(snapshot),
            limits: config.scatter_width,
            rng,
        })
    }
}

/// Apply command-line overrides and re-validate.
pub fn resolve_config(
    mut config: ScheduleConfig,
    overrides: &Overrides,
) -> anyhow::Result<ScheduleConfig> {
    if let Some(min) = overrides.min_scatter_width {
        config.scatter_width.min_scatter_width = min;
    }
    if let Some(range) = overrides.range_percent {
        config.scatter_width.range_percent = range;
    }
    if overrides.seed.is_some() {
        config.seed = overrides.seed;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn overrides_take_precedence() {
        let config = ScheduleConfig::from_toml_str(
            r#"
seed = 1

[scatter_width]
min = 5
range_percent = 0.2
"#,
        )
        .unwrap();
        let overrides = Overrides {
            min_scatter_width: Some(8),
            range_percent: None,
            seed: Some(9),
        };

        let resolved = resolve_config(config, &overrides).unwrap();

        assert_eq!(resolved.scatter_width, ScatterWidthLimits::new(8, 0.2));
        assert_eq!(resolved.seed, Some(9));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let overrides = Overrides {
            min_scatter_width: Some(0),
            ..Overrides::default()
        };
        assert!(resolve_config(ScheduleConfig::default(), &overrides).is_err());
    }

    #[test]
    fn loads_context_from_files() {
        let mut snapshot = tempfile::NamedTempFile::new().unwrap();
        snapshot
            .write_all(
                br#"
[[nodes]]
id = 1
zone_id = 1

[[pools]]
id = 1
standard_zone_count = 1
"#,
            )
            .unwrap();
        let mut config = tempfile::NamedTempFile::new().unwrap();
        config
            .write_all(b"[scatter_width]\nmin = 3\nrange_percent = 1.0\n")
            .unwrap();

        let ctx = Context::load(snapshot.path(), Some(config.path()), &Overrides::default())
            .unwrap();

        assert_eq!(ctx.limits.max_scatter_width(), 6);
        assert_eq!(ctx.topology.node_list().len(), 1);
    }

    #[test]
    fn demo_snapshot_admits_same_zone_move() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        let ctx = Context::load(
            &demos.join("cluster.toml"),
            Some(&demos.join("schedule.toml")),
            &Overrides::default(),
        )
        .unwrap();
        let copyset = ctx.topology.copyset(copyset_core::CopysetId::new(1, 1)).unwrap();

        let verdict =
            copyset_schedule::evaluate_migration(&ctx.topology, 4, Some(1), copyset, &ctx.limits)
                .unwrap();
        assert!(verdict.admitted(), "{verdict:?}");

        let cross_zone =
            copyset_schedule::evaluate_migration(&ctx.topology, 5, Some(1), copyset, &ctx.limits)
                .unwrap();
        assert!(!cross_zone.zone_satisfied());
    }

    #[test]
    fn missing_snapshot_reports_path() {
        let err = Context::load(
            Path::new("/nonexistent/cluster.toml"),
            None,
            &Overrides::default(),
        )
        .err()
        .unwrap();
        assert!(format!("{err:#}").contains("/nonexistent/cluster.toml"));
    }
}
