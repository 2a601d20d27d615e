//! Intelligence rules
//!
//! Passes through upstream recommendations and reacts to the top competitor and
//! high-impact market trends.

use crate::domain::Domain;
use crate::engine::{Rule, RuleContext};
use crate::recommendation::{Priority, RawRecommendation, Recommendation};
use crate::snapshot::{Competitor, Trend};
use crate::Result;

use super::FnRule;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        FnRule::boxed("intelligence.passthrough", Domain::Intelligence, passthrough),
        FnRule::boxed(
            "intelligence.competitive_strategy",
            Domain::Intelligence,
            competitive_strategy,
        ),
        FnRule::boxed(
            "intelligence.trend_response",
            Domain::Intelligence,
            trend_response,
        ),
    ]
}

/// Upstream `recommendations[]`, defaulted to the intelligence domain
fn passthrough(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let raw: Vec<RawRecommendation> = ctx
        .snapshot
        .list(Domain::Intelligence, "recommendations")?;

    let mut recs = Vec::with_capacity(raw.len());
    for entry in raw {
        match entry.into_recommendation() {
            Some(rec) => recs.push(rec),
            None => tracing::debug!("Skipping upstream recommendation without a title"),
        }
    }
    Ok(recs)
}

fn competitive_strategy(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let competitors: Vec<Competitor> = ctx.snapshot.list(Domain::Intelligence, "competitors")?;
    let Some(top) = competitors.first() else {
        return Ok(vec![]);
    };

    let rec = Recommendation::new(
        "Competitive Strategy",
        format!(
            "{} is your top competitor. Review their positioning and sharpen the messaging that sets you apart.",
            top.display_name()
        ),
        Priority::High,
        Domain::Intelligence,
    )
    .with_modules(&[Domain::Intelligence, Domain::Executive]);

    Ok(vec![rec])
}

/// One recommendation per high-impact trend
fn trend_response(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let trends: Vec<Trend> = ctx.snapshot.list(Domain::Intelligence, "trends")?;

    Ok(trends
        .iter()
        .filter(|t| t.is_high_impact())
        .map(|trend| {
            let name = trend.name.as_deref().unwrap_or("Unnamed trend");
            let description = trend.description.clone().unwrap_or_else(|| {
                format!("{} is a high-impact trend. Plan a response across channels.", name)
            });
            Recommendation::new(
                format!("Trend Response: {}", name),
                description,
                Priority::High,
                Domain::Intelligence,
            )
            .with_modules(&[Domain::Intelligence, Domain::Executive, Domain::Content])
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::Source;
    use crate::rules::test_support::run;
    use crate::snapshot::Snapshot;
    use serde_json::json;

    #[test]
    fn test_passthrough_defaults_source_and_modules() {
        let snapshot = Snapshot::new().with(
            Domain::Intelligence,
            json!({"recommendations": [
                {"title": "Enter wholesale", "priority": "high"},
                {"title": "Refresh pricing", "source": "shopify", "modules": ["shopify"]},
                {"description": "no title"}
            ]}),
        );

        let recs = run(passthrough, &snapshot);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].source, Source::Domain(Domain::Intelligence));
        assert_eq!(recs[0].modules, vec![Domain::Intelligence]);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].source, Source::Domain(Domain::Shopify));
    }

    #[test]
    fn test_competitive_strategy_names_top_competitor() {
        let snapshot = Snapshot::new().with(
            Domain::Intelligence,
            json!({"competitors": [{"name": "Acme"}, {"name": "Globex"}]}),
        );

        let recs = run(competitive_strategy, &snapshot);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Competitive Strategy");
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].description.contains("Acme"));
        assert_eq!(recs[0].modules, vec![Domain::Intelligence, Domain::Executive]);
    }

    #[test]
    fn test_no_competitors_no_recommendation() {
        let snapshot = Snapshot::new().with(Domain::Intelligence, json!({"competitors": []}));
        assert!(run(competitive_strategy, &snapshot).is_empty());
    }

    #[test]
    fn test_trend_response_only_for_high_impact() {
        let snapshot = Snapshot::new().with(
            Domain::Intelligence,
            json!({"trends": [
                {"name": "Short video", "impact": "high", "description": "Video is eating reach"},
                {"name": "Podcasts", "impact": "medium"},
                {"name": "AR try-on", "impact": "high"}
            ]}),
        );

        let recs = run(trend_response, &snapshot);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "Trend Response: Short video");
        assert_eq!(recs[0].description, "Video is eating reach");
        assert_eq!(recs[1].title, "Trend Response: AR try-on");
        assert_eq!(
            recs[1].modules,
            vec![Domain::Intelligence, Domain::Executive, Domain::Content]
        );
    }
}
