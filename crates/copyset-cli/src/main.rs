use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "copysetctl",
    about = "Evaluate copyset migrations against a cluster snapshot",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Cluster snapshot (TOML: [[nodes]], [[pools]], [[copysets]])
    #[arg(short, long, global = true, default_value = "cluster.toml")]
    snapshot: PathBuf,
    /// Scheduling config (TOML with a [scatter_width] table)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Override the configured minimum scatter width
    #[arg(long, global = true)]
    min_scatter_width: Option<u32>,
    /// Override the configured scatter width range percent
    #[arg(long, global = true)]
    range_percent: Option<f64>,
    /// Seed for candidate shuffling (default: fresh entropy)
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the before/after scatter width of every node a move touches
    Impact {
        #[arg(long)]
        pool: u32,
        #[arg(long)]
        copyset: u32,
        /// Node losing the replica (omit for an add-only change)
        #[arg(long)]
        source: Option<u32>,
        /// Node gaining the replica (omit for a remove-only change)
        #[arg(long)]
        target: Option<u32>,
    },
    /// Decide whether a move satisfies zone and scatter-width limits
    Check {
        #[arg(long)]
        pool: u32,
        #[arg(long)]
        copyset: u32,
        #[arg(long)]
        source: Option<u32>,
        #[arg(long)]
        target: u32,
    },
    /// Rank online nodes by hosted copysets, most first (source candidates)
    Distribution,
    /// Rank online nodes by hosted copysets, fewest first (target candidates)
    Targets,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("copysetctl=info".parse()?)
                .add_directive("copyset_schedule=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let overrides = commands::Overrides {
        min_scatter_width: cli.min_scatter_width,
        range_percent: cli.range_percent,
        seed: cli.seed,
    };
    let mut ctx = commands::Context::load(&cli.snapshot, cli.config.as_deref(), &overrides)?;

    match cli.command {
        Commands::Impact {
            pool,
            copyset,
            source,
            target,
        } => commands::evaluate::impact(&ctx, pool, copyset, source, target),
        Commands::Check {
            pool,
            copyset,
            source,
            target,
        } => commands::evaluate::check(&ctx, pool, copyset, source, target),
        Commands::Distribution => commands::rank::distribution(&mut ctx),
        Commands::Targets => commands::rank::targets(&mut ctx),
    }
}
