//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Pulse - Cross-domain marketing recommendations
#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Evaluate a marketing data snapshot into ranked recommendations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot JSON file ("-" reads stdin)
    ///
    /// Falls back to the PULSE_SNAPSHOT environment variable when omitted.
    #[arg(short, long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Evaluation time (RFC 3339 or YYYY-MM-DD), defaults to the current time
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Grouping for `pulse summary --by`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    Priority,
    Source,
    Module,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List ranked recommendations
    Recommend {
        /// Only recommendations relevant to this domain
        #[arg(short, long)]
        module: Option<String>,

        /// Only high-priority recommendations
        #[arg(long)]
        high: bool,

        /// Only cross-module recommendations
        #[arg(long)]
        cross: bool,
    },

    /// List cross-domain insights
    Insights {
        /// Only insights spanning two or more domains
        #[arg(long)]
        cross: bool,
    },

    /// Show recommendation counts by priority and source
    Summary {
        /// List recommendation titles grouped by priority, source or module
        #[arg(long, value_enum)]
        by: Option<GroupBy>,
    },

    /// Show executive signals derived from the snapshot
    Signals {
        /// Merge the signals into executive.signals and write the snapshot back
        #[arg(long)]
        write: bool,

        /// Merge mode: append (repeats duplicate), replace (one per source)
        #[arg(long, default_value = "append")]
        merge: String,
    },

    /// List registered rules in evaluation order
    Rules,
}
