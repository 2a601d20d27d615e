//! Social rules: sentiment and engagement

use crate::domain::Domain;
use crate::engine::{Rule, RuleContext};
use crate::recommendation::{Priority, Recommendation};
use crate::snapshot::{Engagement, Sentiment};
use crate::Result;

use super::FnRule;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        FnRule::boxed("social.sentiment", Domain::Social, sentiment),
        FnRule::boxed("social.engagement", Domain::Social, engagement),
    ]
}

/// Current `sentiment.overall`, if reported
pub(crate) fn overall_sentiment(ctx: &RuleContext<'_>) -> Result<Option<f64>> {
    Ok(ctx
        .snapshot
        .field::<Sentiment>(Domain::Social, &["sentiment"])?
        .and_then(|s| s.overall))
}

fn sentiment(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let Some(overall) = overall_sentiment(ctx)? else {
        return Ok(vec![]);
    };

    if overall < -0.2 {
        let rec = Recommendation::new(
            "Address Negative Sentiment",
            format!(
                "Overall social sentiment is {:.1}%. Respond to critical feedback and adjust content tone.",
                overall * 100.0
            ),
            Priority::High,
            Domain::Social,
        )
        .with_modules(&[Domain::Social, Domain::Content, Domain::Executive]);
        return Ok(vec![rec]);
    }

    if overall > 0.5 {
        let rec = Recommendation::new(
            "Leverage Positive Sentiment",
            format!(
                "Overall social sentiment is {:.1}%. Feature customer voices and testimonials in upcoming content.",
                overall * 100.0
            ),
            Priority::Medium,
            Domain::Social,
        )
        .with_modules(&[Domain::Social, Domain::Content]);
        return Ok(vec![rec]);
    }

    Ok(vec![])
}

fn engagement(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let rate = ctx
        .snapshot
        .field::<Engagement>(Domain::Social, &["engagement"])?
        .and_then(|e| e.rate);

    match rate {
        Some(rate) if rate < 1.0 => {
            let rec = Recommendation::new(
                "Boost Engagement",
                format!(
                    "Engagement rate is {:.1}%. Test more interactive formats and posting times.",
                    rate
                ),
                Priority::Medium,
                Domain::Social,
            )
            .with_modules(&[Domain::Social, Domain::Content]);
            Ok(vec![rec])
        }
        _ => Ok(vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::run;
    use crate::snapshot::Snapshot;
    use serde_json::json;

    fn social(payload: serde_json::Value) -> Snapshot {
        Snapshot::new().with(Domain::Social, payload)
    }

    #[test]
    fn test_negative_sentiment() {
        let recs = run(sentiment, &social(json!({"sentiment": {"overall": -0.25}})));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Address Negative Sentiment");
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].description.contains("-25.0%"));
        assert_eq!(
            recs[0].modules,
            vec![Domain::Social, Domain::Content, Domain::Executive]
        );
    }

    #[test]
    fn test_positive_sentiment() {
        let recs = run(sentiment, &social(json!({"sentiment": {"overall": 0.72}})));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Leverage Positive Sentiment");
        assert_eq!(recs[0].modules, vec![Domain::Social, Domain::Content]);
    }

    #[test]
    fn test_neutral_sentiment_is_quiet() {
        assert!(run(sentiment, &social(json!({"sentiment": {"overall": -0.2}}))).is_empty());
        assert!(run(sentiment, &social(json!({"sentiment": {"overall": 0.5}}))).is_empty());
        assert!(run(sentiment, &social(json!({}))).is_empty());
    }

    #[test]
    fn test_low_engagement() {
        let recs = run(engagement, &social(json!({"engagement": {"rate": 0.84}})));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Boost Engagement");
        assert!(recs[0].description.contains("0.8%"));

        assert!(run(engagement, &social(json!({"engagement": {"rate": 1.0}}))).is_empty());
    }
}
