//! Recommendation listing command

use anyhow::Result;
use chrono::{DateTime, Utc};
use pulse_core::{Priority, Recommendation, RecommendationEngine, Snapshot};

use super::{print_json, truncate};
use crate::cli::OutputFormat;

/// Filters for `pulse recommend`; all set filters must match
#[derive(Debug, Default)]
pub struct RecommendFilter<'a> {
    pub module: Option<&'a str>,
    pub high: bool,
    pub cross: bool,
}

/// Apply the filter on top of the engine's queries, keeping ranked order
pub fn select<'c>(
    computation: &'c pulse_core::Computation,
    filter: &RecommendFilter<'_>,
) -> Vec<&'c Recommendation> {
    let mut recs: Vec<&Recommendation> = match filter.module {
        Some(module) => computation.for_module_name(module),
        None => computation.all().iter().collect(),
    };
    if filter.high {
        recs.retain(|r| r.priority == Priority::High);
    }
    if filter.cross {
        recs.retain(|r| r.source.is_cross_module());
    }
    recs
}

fn priority_badge(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "⚪",
    }
}

/// Render recommendations as a text table
pub fn render_recommendations(recs: &[&Recommendation]) -> String {
    if recs.is_empty() {
        return "  No recommendations.\n".to_string();
    }

    let mut out = String::new();
    for rec in recs {
        let modules: Vec<&str> = rec.modules.iter().map(|d| d.as_str()).collect();
        out.push_str(&format!(
            "  {} {:<6} {:<40} [{}]\n",
            priority_badge(rec.priority),
            rec.priority,
            truncate(&rec.title, 40),
            rec.source
        ));
        out.push_str(&format!("           {}\n", rec.description));
        out.push_str(&format!("           modules: {}\n", modules.join(", ")));
    }
    out
}

pub fn cmd_recommend(
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    filter: &RecommendFilter<'_>,
    format: OutputFormat,
) -> Result<()> {
    if let Some(module) = filter.module {
        if module.parse::<pulse_core::Domain>().is_err() {
            tracing::warn!(module, "Unknown module; only unscoped recommendations will match");
        }
    }

    let engine = RecommendationEngine::new();
    let computation = engine.compute_at(snapshot, now);
    let recs = select(&computation, filter);

    match format {
        OutputFormat::Json => print_json(&recs)?,
        OutputFormat::Text => {
            println!();
            println!("📋 Recommendations ({})", recs.len());
            println!("   ─────────────────────────────────────────────────────────────");
            print!("{}", render_recommendations(&recs));
            if !computation.rule_failures.is_empty() {
                println!();
                println!(
                    "   ⚠️  {} rule(s) skipped due to malformed data (use --verbose for details)",
                    computation.rule_failures.len()
                );
            }
            println!();
        }
    }

    Ok(())
}
