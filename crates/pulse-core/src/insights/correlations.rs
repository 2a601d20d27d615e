//! Built-in cross-domain insight rules
//!
//! - Content and sales: does the top content coincide with growth or decline?
//! - Campaign alignment: campaign work running while a top competitor is known
//! - Sentiment signal: social sentiment surfaced to the executive dashboard

use crate::domain::Domain;
use crate::engine::{InsightRule, RuleContext};
use crate::rules::content::performance;
use crate::rules::cross::{campaign_project_count, top_competitor};
use crate::rules::shopify::revenue_growth;
use crate::rules::social::overall_sentiment;
use crate::Result;

use super::types::{Impact, Insight, InsightOutput, Signal, SignalType};

/// Sentiment beyond this magnitude is called out as positive or negative
const SENTIMENT_SIGNAL_THRESHOLD: f64 = 0.2;

type InsightFn = fn(&RuleContext<'_>) -> Result<InsightOutput>;

struct FnInsightRule {
    id: &'static str,
    eval: InsightFn,
}

impl InsightRule for FnInsightRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<InsightOutput> {
        (self.eval)(ctx)
    }
}

fn boxed(id: &'static str, eval: InsightFn) -> Box<dyn InsightRule> {
    Box::new(FnInsightRule { id, eval })
}

/// Built-in insight rules, in evaluation order
pub fn rules() -> Vec<Box<dyn InsightRule>> {
    vec![
        boxed("insight.content_sales", content_sales),
        boxed("insight.campaign_alignment", campaign_alignment),
        boxed("insight.sentiment_signal", sentiment_signal),
    ]
}

fn content_sales(ctx: &RuleContext<'_>) -> Result<InsightOutput> {
    let items = performance(ctx)?;
    let (Some(top), Some(growth)) = (items.first(), revenue_growth(ctx)?) else {
        return Ok(InsightOutput::none());
    };
    let title = top.display_title();

    let insight = if growth > 0.0 {
        Insight::new(
            "Content Driving Sales",
            format!(
                "\"{}\" leads content performance while revenue is up {:.1}%.",
                title, growth
            ),
            Impact::Positive,
            &[Domain::Content, Domain::Shopify],
        )
    } else if growth < 0.0 {
        Insight::new(
            "Content-Sales Disconnect",
            format!(
                "\"{}\" leads content performance but revenue is down {:.1}%. Engagement is not converting.",
                title,
                growth.abs()
            ),
            Impact::Negative,
            &[Domain::Content, Domain::Shopify],
        )
    } else {
        Insight::new(
            "Content Impact Unclear",
            format!(
                "\"{}\" leads content performance while revenue is flat.",
                title
            ),
            Impact::Neutral,
            &[Domain::Content, Domain::Shopify],
        )
    };

    Ok(InsightOutput::insight(insight))
}

fn campaign_alignment(ctx: &RuleContext<'_>) -> Result<InsightOutput> {
    if !ctx.has_all(&[Domain::Intelligence, Domain::Agency]) {
        return Ok(InsightOutput::none());
    }

    let Some(competitor) = top_competitor(ctx)? else {
        return Ok(InsightOutput::none());
    };
    let campaigns = campaign_project_count(ctx)?;
    if campaigns == 0 {
        return Ok(InsightOutput::none());
    }

    Ok(InsightOutput::insight(Insight::new(
        "Campaign Competitive Positioning",
        format!(
            "{} campaign project(s) are in flight while {} leads the competitive landscape.",
            campaigns,
            competitor.display_name()
        ),
        Impact::Strategic,
        &[Domain::Intelligence, Domain::Agency],
    )))
}

fn sentiment_signal(ctx: &RuleContext<'_>) -> Result<InsightOutput> {
    if !ctx.has_all(&[Domain::Social, Domain::Executive]) {
        return Ok(InsightOutput::none());
    }

    let Some(overall) = overall_sentiment(ctx)? else {
        return Ok(InsightOutput::none());
    };
    let percent = overall * 100.0;

    let (impact, kind, title, description) = if overall > SENTIMENT_SIGNAL_THRESHOLD {
        (
            Impact::Positive,
            SignalType::Positive,
            "Positive Social Sentiment",
            format!("Social sentiment is strong at {:.1}%.", percent),
        )
    } else if overall < -SENTIMENT_SIGNAL_THRESHOLD {
        (
            Impact::Negative,
            SignalType::Warning,
            "Negative Social Sentiment",
            format!("Social sentiment has dropped to {:.1}%.", percent),
        )
    } else {
        (
            Impact::Neutral,
            SignalType::Info,
            "Stable Social Sentiment",
            format!("Social sentiment is steady at {:.1}%.", percent),
        )
    };

    let insight = Insight::new(
        title,
        description.clone(),
        impact,
        &[Domain::Social, Domain::Executive],
    );
    let signal = Signal {
        title: title.to_string(),
        description,
        kind,
        source: Domain::Social,
    };

    Ok(InsightOutput::insight(insight).with_signal(signal))
}
