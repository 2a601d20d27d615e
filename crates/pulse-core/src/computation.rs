//! The result of one engine evaluation and the queries over it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::insights::{Insight, Signal};
use crate::recommendation::{Priority, Recommendation, Source};

/// A rule that failed and was skipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFailure {
    pub rule: String,
    pub error: String,
}

impl RuleFailure {
    pub fn new(rule: &str, error: &crate::Error) -> Self {
        Self {
            rule: rule.to_string(),
            error: error.to_string(),
        }
    }
}

/// Everything produced by one evaluation of a snapshot.
///
/// `recommendations` is sorted by priority (high first) and stable within a
/// priority. A fresh value is produced on every evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Computation {
    pub recommendations: Vec<Recommendation>,
    pub insights: Vec<Insight>,
    /// Signals for the executive domain, not yet merged into any snapshot
    pub derived_signals: Vec<Signal>,
    pub rule_failures: Vec<RuleFailure>,
    pub evaluated_at: DateTime<Utc>,
}

/// Counts for dashboard headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub cross_module: usize,
    pub insights: usize,
    pub signals: usize,
    pub failed_rules: usize,
}

impl Default for Computation {
    fn default() -> Self {
        Self::empty()
    }
}

impl Computation {
    /// A computation with no output
    pub fn empty() -> Self {
        Self {
            recommendations: vec![],
            insights: vec![],
            derived_signals: vec![],
            rule_failures: vec![],
            evaluated_at: Utc::now(),
        }
    }

    /// All recommendations, in ranked order
    pub fn all(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Recommendations relevant to `domain` (including those with no module list)
    pub fn for_module(&self, domain: Domain) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.is_relevant_to(domain))
            .collect()
    }

    /// Like [`for_module`](Self::for_module), by name. An unrecognized name only
    /// matches recommendations with no module list.
    pub fn for_module_name(&self, name: &str) -> Vec<&Recommendation> {
        match name.parse::<Domain>() {
            Ok(domain) => self.for_module(domain),
            Err(_) => self
                .recommendations
                .iter()
                .filter(|r| r.modules.is_empty())
                .collect(),
        }
    }

    pub fn with_priority(&self, priority: Priority) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.priority == priority)
            .collect()
    }

    pub fn high_priority(&self) -> Vec<&Recommendation> {
        self.with_priority(Priority::High)
    }

    pub fn cross_module_recommendations(&self) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.source.is_cross_module())
            .collect()
    }

    /// Insights spanning at least two domains
    pub fn cross_module_insights(&self) -> Vec<&Insight> {
        self.insights
            .iter()
            .filter(|i| i.is_cross_module())
            .collect()
    }

    /// Recommendations bucketed by priority, high to low; empty buckets are kept
    pub fn group_by_priority(&self) -> Vec<(Priority, Vec<&Recommendation>)> {
        Priority::ALL
            .iter()
            .map(|p| (*p, self.with_priority(*p)))
            .collect()
    }

    /// Recommendations bucketed by source, in order of first appearance
    pub fn group_by_source(&self) -> Vec<(Source, Vec<&Recommendation>)> {
        let mut groups: Vec<(Source, Vec<&Recommendation>)> = vec![];
        for rec in &self.recommendations {
            match groups.iter_mut().find(|(source, _)| *source == rec.source) {
                Some((_, recs)) => recs.push(rec),
                None => groups.push((rec.source, vec![rec])),
            }
        }
        groups
    }

    /// Recommendations per domain view; a recommendation may appear under several domains
    pub fn group_by_module(&self) -> Vec<(Domain, Vec<&Recommendation>)> {
        Domain::ALL
            .iter()
            .map(|d| (*d, self.for_module(*d)))
            .filter(|(_, recs)| !recs.is_empty())
            .collect()
    }

    pub fn summary(&self) -> ComputationSummary {
        ComputationSummary {
            total: self.recommendations.len(),
            high: self.with_priority(Priority::High).len(),
            medium: self.with_priority(Priority::Medium).len(),
            low: self.with_priority(Priority::Low).len(),
            cross_module: self.cross_module_recommendations().len(),
            insights: self.insights.len(),
            signals: self.derived_signals.len(),
            failed_rules: self.rule_failures.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Impact;

    fn sample() -> Computation {
        let mut open = Recommendation::new("Open", "", Priority::Low, Domain::Agency);
        open.modules.clear();

        Computation {
            recommendations: vec![
                Recommendation::new("A", "", Priority::High, Domain::Shopify)
                    .with_modules(&[Domain::Shopify, Domain::Executive]),
                Recommendation::new("B", "", Priority::High, Source::CrossModule)
                    .with_modules(&[Domain::Social, Domain::Content]),
                Recommendation::new("C", "", Priority::Medium, Domain::Shopify),
                open,
            ],
            insights: vec![
                Insight::new("I1", "", Impact::Strategic, &[Domain::Intelligence, Domain::Agency]),
                Insight::new("I2", "", Impact::Neutral, &[Domain::Social]),
            ],
            ..Computation::empty()
        }
    }

    fn titles(recs: &[&Recommendation]) -> Vec<String> {
        recs.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_for_module_includes_match_all() {
        let c = sample();
        assert_eq!(titles(&c.for_module(Domain::Executive)), vec!["A", "Open"]);
        assert_eq!(titles(&c.for_module(Domain::Content)), vec!["B", "Open"]);
        assert_eq!(titles(&c.for_module_name("Shopify")), vec!["A", "C", "Open"]);
        assert_eq!(titles(&c.for_module_name("crm")), vec!["Open"]);
    }

    #[test]
    fn test_priority_and_source_filters() {
        let c = sample();
        assert_eq!(titles(&c.high_priority()), vec!["A", "B"]);
        assert_eq!(titles(&c.cross_module_recommendations()), vec!["B"]);
        assert_eq!(c.cross_module_insights().len(), 1);
    }

    #[test]
    fn test_grouping() {
        let c = sample();

        let by_priority = c.group_by_priority();
        assert_eq!(by_priority.len(), 3);
        assert_eq!(by_priority[0].1.len(), 2);
        assert_eq!(by_priority[2].0, Priority::Low);

        let by_source = c.group_by_source();
        assert_eq!(by_source[0].0, Source::Domain(Domain::Shopify));
        assert_eq!(titles(&by_source[0].1), vec!["A", "C"]);
        assert_eq!(by_source[1].0, Source::CrossModule);

        let by_module = c.group_by_module();
        assert!(by_module.iter().all(|(_, recs)| !recs.is_empty()));
        assert_eq!(by_module.len(), Domain::ALL.len());
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample().summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.medium, 1);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.cross_module, 1);
        assert_eq!(summary.insights, 2);
    }

    #[test]
    fn test_empty_computation() {
        let c = Computation::default();
        assert!(c.all().is_empty());
        assert_eq!(c.summary(), ComputationSummary::default());
    }
}
