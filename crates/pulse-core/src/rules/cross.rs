//! Cross-domain correlation rules
//!
//! Each rule fires only when every domain it correlates is present in the
//! snapshot. Output overlaps with the per-domain rules on purpose: a falling
//! revenue figure yields both "Sales Decline Alert" and "Content-Sales Strategy".

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Domain;
use crate::engine::{Rule, RuleContext};
use crate::recommendation::{Priority, Recommendation, Source};
use crate::snapshot::{Competitor, Customer, Project, Trend};
use crate::Result;

use super::shopify::revenue_growth;
use super::social::overall_sentiment;
use super::FnRule;

/// Project names that mark campaign or marketing work
const CAMPAIGN_PATTERN: &str = r"(?i)campaign|marketing";

static CAMPAIGN_RE: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(CAMPAIGN_PATTERN));

/// Bucket for customers without a segment
const UNKNOWN_SEGMENT: &str = "unknown";

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        FnRule::boxed("cross.content_sales", Source::CrossModule, content_sales),
        FnRule::boxed(
            "cross.competitive_campaign",
            Source::CrossModule,
            competitive_campaign,
        ),
        FnRule::boxed(
            "cross.content_sentiment",
            Source::CrossModule,
            content_sentiment,
        ),
        FnRule::boxed(
            "cross.content_targeting",
            Source::CrossModule,
            content_targeting,
        ),
        FnRule::boxed(
            "cross.strategic_trends",
            Source::CrossModule,
            strategic_trends,
        ),
    ]
}

/// First entry of `intelligence.competitors[]`
pub(crate) fn top_competitor(ctx: &RuleContext<'_>) -> Result<Option<Competitor>> {
    let competitors: Vec<Competitor> = ctx.snapshot.list(Domain::Intelligence, "competitors")?;
    Ok(competitors.into_iter().next())
}

/// Number of agency projects whose name mentions campaign or marketing work
pub(crate) fn campaign_project_count(ctx: &RuleContext<'_>) -> Result<usize> {
    let pattern = CAMPAIGN_RE.as_ref().map_err(|e| e.clone())?;
    let projects: Vec<Project> = ctx.snapshot.list(Domain::Agency, "projects")?;

    Ok(projects
        .iter()
        .filter_map(|p| p.name.as_deref())
        .filter(|name| pattern.is_match(name))
        .count())
}

/// Most common customer segment and its count.
///
/// Ties go to the segment that reached the winning count first.
pub fn top_segment(customers: &[Customer]) -> Option<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut top: Option<(&str, usize)> = None;

    for customer in customers {
        let segment = customer.segment.as_deref().unwrap_or(UNKNOWN_SEGMENT);
        let count = counts.entry(segment).or_insert(0);
        *count += 1;

        if top.map_or(true, |(_, best)| *count > best) {
            top = Some((segment, *count));
        }
    }

    top.map(|(segment, count)| (segment.to_string(), count))
}

fn content_sales(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    if !ctx.has_all(&[Domain::Shopify, Domain::Content]) {
        return Ok(vec![]);
    }

    match revenue_growth(ctx)? {
        Some(growth) if growth < 0.0 => {
            let rec = Recommendation::new(
                "Content-Sales Strategy",
                format!(
                    "Revenue is down {:.1}%. Shift content toward conversion: product stories, reviews and offers.",
                    growth.abs()
                ),
                Priority::High,
                Source::CrossModule,
            )
            .with_modules(&[Domain::Shopify, Domain::Content, Domain::Executive]);
            Ok(vec![rec])
        }
        _ => Ok(vec![]),
    }
}

fn competitive_campaign(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    if !ctx.has_all(&[Domain::Intelligence, Domain::Agency]) {
        return Ok(vec![]);
    }

    let Some(competitor) = top_competitor(ctx)? else {
        return Ok(vec![]);
    };
    let campaigns = campaign_project_count(ctx)?;
    if campaigns == 0 {
        return Ok(vec![]);
    }

    let rec = Recommendation::new(
        "Competitive Campaign Alignment",
        format!(
            "{} active campaign project(s) should be positioned against {}.",
            campaigns,
            competitor.display_name()
        ),
        Priority::Medium,
        Source::CrossModule,
    )
    .with_modules(&[Domain::Intelligence, Domain::Agency, Domain::Content]);

    Ok(vec![rec])
}

fn content_sentiment(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    if !ctx.has_all(&[Domain::Social, Domain::Content]) {
        return Ok(vec![]);
    }

    match overall_sentiment(ctx)? {
        Some(overall) if overall < -0.1 => {
            let rec = Recommendation::new(
                "Content-Sentiment Strategy",
                format!(
                    "Social sentiment is {:.1}%. Plan content that addresses the concerns behind it.",
                    overall * 100.0
                ),
                Priority::High,
                Source::CrossModule,
            )
            .with_modules(&[Domain::Social, Domain::Content]);
            Ok(vec![rec])
        }
        _ => Ok(vec![]),
    }
}

fn content_targeting(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    if !ctx.has_all(&[Domain::Shopify, Domain::Content]) {
        return Ok(vec![]);
    }

    let customers: Vec<Customer> = ctx.snapshot.list(Domain::Shopify, "customers")?;
    let Some((segment, count)) = top_segment(&customers) else {
        return Ok(vec![]);
    };

    let rec = Recommendation::new(
        "Content Targeting Strategy",
        format!(
            "Your largest customer segment is \"{}\" ({} customers). Tailor upcoming content to it.",
            segment, count
        ),
        Priority::Medium,
        Source::CrossModule,
    )
    .with_modules(&[Domain::Shopify, Domain::Content]);

    Ok(vec![rec])
}

fn strategic_trends(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    if !ctx.has_all(&[Domain::Intelligence, Domain::Executive]) {
        return Ok(vec![]);
    }

    let trends: Vec<Trend> = ctx.snapshot.list(Domain::Intelligence, "trends")?;
    let high_impact = trends.iter().filter(|t| t.is_high_impact()).count();
    if high_impact == 0 {
        return Ok(vec![]);
    }

    let rec = Recommendation::new(
        "Strategic Trend Response",
        format!(
            "{} high-impact market trend(s) need an executive-level response plan.",
            high_impact
        ),
        Priority::High,
        Source::CrossModule,
    )
    .with_modules(&[Domain::Intelligence, Domain::Executive]);

    Ok(vec![rec])
}
