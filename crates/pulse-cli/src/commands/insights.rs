//! Insight and executive signal commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pulse_core::{Insight, RecommendationEngine, Signal, SignalMerge, SignalType, Snapshot};

use super::{is_stdin, load_snapshot, print_json};
use crate::cli::OutputFormat;

pub fn render_insights(insights: &[&Insight]) -> String {
    if insights.is_empty() {
        return "  No insights.\n".to_string();
    }

    let mut out = String::new();
    for insight in insights {
        let modules: Vec<&str> = insight.modules.iter().map(|d| d.as_str()).collect();
        out.push_str(&format!(
            "  • {} ({}) [{}]\n",
            insight.title,
            insight.impact,
            modules.join(" ↔ ")
        ));
        out.push_str(&format!("    {}\n", insight.description));
    }
    out
}

pub fn render_signals(signals: &[Signal]) -> String {
    if signals.is_empty() {
        return "  No signals.\n".to_string();
    }

    let mut out = String::new();
    for signal in signals {
        let icon = match signal.kind {
            SignalType::Positive => "📈",
            SignalType::Warning => "⚠️ ",
            SignalType::Info => "ℹ️ ",
        };
        out.push_str(&format!(
            "  {} {} ({}, from {})\n",
            icon, signal.title, signal.kind, signal.source
        ));
        out.push_str(&format!("     {}\n", signal.description));
    }
    out
}

pub fn cmd_insights(
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    cross_only: bool,
    format: OutputFormat,
) -> Result<()> {
    let computation = RecommendationEngine::new().compute_at(snapshot, now);
    let insights: Vec<&Insight> = if cross_only {
        computation.cross_module_insights()
    } else {
        computation.insights.iter().collect()
    };

    match format {
        OutputFormat::Json => print_json(&insights)?,
        OutputFormat::Text => {
            println!();
            println!("🔗 Insights ({})", insights.len());
            println!("   ─────────────────────────────────────────────────────────────");
            print!("{}", render_insights(&insights));
            println!();
        }
    }

    Ok(())
}

/// Derive executive signals; with `write`, merge them into the snapshot file
pub fn cmd_signals(
    path: &Path,
    now: DateTime<Utc>,
    write: bool,
    merge: &str,
    format: OutputFormat,
) -> Result<()> {
    let merge: SignalMerge = merge
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Invalid --merge value (use append or replace)")?;

    let mut snapshot = load_snapshot(path)?;
    let engine = RecommendationEngine::new();

    let computation = if write {
        let computation = engine.compute_and_inject(&mut snapshot, merge, now);
        let json = serde_json::to_string_pretty(&snapshot)
            .context("Failed to serialize snapshot to JSON")?;
        if is_stdin(path) {
            println!("{}", json);
            return Ok(());
        }
        fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot file: {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            signals = computation.derived_signals.len(),
            "Merged signals into snapshot"
        );
        computation
    } else {
        engine.compute_at(&snapshot, now)
    };

    match format {
        OutputFormat::Json => print_json(&computation.derived_signals)?,
        OutputFormat::Text => {
            println!();
            println!("📡 Executive signals ({})", computation.derived_signals.len());
            println!("   ─────────────────────────────────────────────────────────────");
            print!("{}", render_signals(&computation.derived_signals));
            if write {
                println!("   ✅ Written to {}", path.display());
            }
            println!();
        }
    }

    Ok(())
}
