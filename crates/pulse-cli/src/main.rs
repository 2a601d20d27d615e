//! Pulse CLI - Cross-domain marketing recommendations
//!
//! Usage:
//!   pulse recommend --snapshot snapshot.json          Ranked recommendations
//!   pulse recommend --module content --high            Filtered view
//!   pulse insights --snapshot snapshot.json           Cross-domain insights
//!   pulse signals --write --merge replace              Merge executive signals

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let snapshot_arg = cli.snapshot.as_deref();
    let now = commands::parse_now(cli.now.as_deref())?;

    match cli.command {
        Commands::Recommend {
            module,
            high,
            cross,
        } => {
            let snapshot = commands::open_snapshot(snapshot_arg)?;
            let filter = commands::RecommendFilter {
                module: module.as_deref(),
                high,
                cross,
            };
            commands::cmd_recommend(&snapshot, now, &filter, cli.format)
        }
        Commands::Insights { cross } => {
            let snapshot = commands::open_snapshot(snapshot_arg)?;
            commands::cmd_insights(&snapshot, now, cross, cli.format)
        }
        Commands::Summary { by } => {
            let snapshot = commands::open_snapshot(snapshot_arg)?;
            commands::cmd_summary(&snapshot, now, by, cli.format)
        }
        Commands::Signals { write, merge } => {
            let path = commands::resolve_snapshot_path(snapshot_arg)?;
            commands::cmd_signals(&path, now, write, &merge, cli.format)
        }
        Commands::Rules => commands::cmd_rules(cli.format),
    }
}
