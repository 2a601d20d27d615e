//! Summary and rule listing commands

use anyhow::Result;
use chrono::{DateTime, Utc};
use pulse_core::{Computation, Recommendation, RecommendationEngine, Snapshot};
use serde::Serialize;

use super::{print_json, truncate};
use crate::cli::{GroupBy, OutputFormat};

/// One labelled bucket of recommendations
#[derive(Debug, Serialize)]
pub struct RecommendationGroup<'a> {
    pub group: String,
    pub recommendations: Vec<&'a Recommendation>,
}

/// Bucket the ranked recommendations; each bucket keeps ranked order
pub fn group_recommendations(computation: &Computation, by: GroupBy) -> Vec<RecommendationGroup<'_>> {
    match by {
        GroupBy::Priority => computation
            .group_by_priority()
            .into_iter()
            .map(|(priority, recommendations)| RecommendationGroup {
                group: priority.to_string(),
                recommendations,
            })
            .collect(),
        GroupBy::Source => computation
            .group_by_source()
            .into_iter()
            .map(|(source, recommendations)| RecommendationGroup {
                group: source.to_string(),
                recommendations,
            })
            .collect(),
        GroupBy::Module => computation
            .group_by_module()
            .into_iter()
            .map(|(domain, recommendations)| RecommendationGroup {
                group: domain.to_string(),
                recommendations,
            })
            .collect(),
    }
}

pub fn render_groups(groups: &[RecommendationGroup<'_>]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("  {} ({})\n", group.group, group.recommendations.len()));
        for rec in &group.recommendations {
            out.push_str(&format!("    - {}\n", truncate(&rec.title, 50)));
        }
    }
    out
}

pub fn cmd_summary(
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    by: Option<GroupBy>,
    format: OutputFormat,
) -> Result<()> {
    let computation = RecommendationEngine::new().compute_at(snapshot, now);
    let summary = computation.summary();
    let groups = by.map(|by| group_recommendations(&computation, by));

    if format == OutputFormat::Json {
        return match groups {
            Some(groups) => print_json(&groups),
            None => print_json(&summary),
        };
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           📊 Pulse Summary              │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Recommendations: {}", summary.total);
    println!("    High:          {}", summary.high);
    println!("    Medium:        {}", summary.medium);
    println!("    Low:           {}", summary.low);
    println!("  Cross-module:    {}", summary.cross_module);
    println!("  Insights:        {}", summary.insights);
    println!("  Signals:         {}", summary.signals);

    match groups {
        Some(groups) => {
            println!();
            print!("{}", render_groups(&groups));
        }
        None => {
            let by_source = computation.group_by_source();
            if !by_source.is_empty() {
                println!();
                println!("  By source:");
                for (source, recs) in by_source {
                    println!("    {:<14} {}", source.as_str(), recs.len());
                }
            }
        }
    }

    if summary.failed_rules > 0 {
        println!();
        println!("  ⚠️  Skipped rules:");
        for failure in &computation.rule_failures {
            println!("    {} - {}", failure.rule, failure.error);
        }
    }

    println!();
    Ok(())
}

pub fn cmd_rules(format: OutputFormat) -> Result<()> {
    let engine = RecommendationEngine::new();
    let ids = engine.rule_ids();

    if format == OutputFormat::Json {
        return print_json(&ids);
    }

    println!();
    println!("🧩 Registered rules ({})", ids.len());
    for id in ids {
        println!("   {}", id);
    }
    println!();
    Ok(())
}
