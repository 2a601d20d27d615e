//! Content rules: top performer and under-performing pieces

use crate::domain::Domain;
use crate::engine::{Rule, RuleContext};
use crate::recommendation::{Priority, Recommendation};
use crate::snapshot::ContentItem;
use crate::Result;

use super::FnRule;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        FnRule::boxed("content.strategy", Domain::Content, strategy),
        FnRule::boxed("content.optimization", Domain::Content, optimization),
    ]
}

/// `performance[]`, best performer first
pub(crate) fn performance(ctx: &RuleContext<'_>) -> Result<Vec<ContentItem>> {
    ctx.snapshot.list(Domain::Content, "performance")
}

fn strategy(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let items = performance(ctx)?;
    let Some(top) = items.first() else {
        return Ok(vec![]);
    };

    let rec = Recommendation::new(
        "Content Strategy",
        format!(
            "\"{}\" is your best performing content. Brief the agency on more pieces in the same format.",
            top.display_title()
        ),
        Priority::Medium,
        Domain::Content,
    )
    .with_modules(&[Domain::Content, Domain::Agency]);

    Ok(vec![rec])
}

fn optimization(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let weak = performance(ctx)?
        .iter()
        .filter(|item| item.engagement_rate.is_some_and(|r| r < 1.0))
        .count();

    if weak == 0 {
        return Ok(vec![]);
    }

    let rec = Recommendation::new(
        "Content Optimization",
        format!(
            "{} piece(s) of content have engagement below 1%. Refresh or retire them.",
            weak
        ),
        Priority::Low,
        Domain::Content,
    );

    Ok(vec![rec])
}
