//! Recommendation Engine - evaluates rules over a snapshot and ranks the output

use chrono::{DateTime, Utc};

use crate::computation::{Computation, RuleFailure};
use crate::domain::Domain;
use crate::insights::{self, Insight, InsightOutput, SignalMerge};
use crate::recommendation::{Recommendation, Source};
use crate::rules;
use crate::snapshot::Snapshot;
use crate::Result;

/// Context provided to every rule
pub struct RuleContext<'a> {
    /// Snapshot being evaluated
    pub snapshot: &'a Snapshot,
    /// Evaluation instant, used by date-relative rules
    pub now: DateTime<Utc>,
}

impl<'a> RuleContext<'a> {
    pub fn new(snapshot: &'a Snapshot, now: DateTime<Utc>) -> Self {
        Self { snapshot, now }
    }

    /// True if every listed domain has a payload
    pub fn has_all(&self, domains: &[Domain]) -> bool {
        domains.iter().all(|d| self.snapshot.payload(*d).is_some())
    }
}

/// A single isolated recommendation rule
pub trait Rule: Send + Sync {
    /// Unique identifier (e.g., "shopify.revenue")
    fn id(&self) -> &'static str;

    /// Domain that owns the rule, or cross-module
    fn source(&self) -> Source;

    /// Inspect the snapshot and produce recommendations
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>>;
}

/// A rule that derives cross-domain insights (and possibly executive signals)
pub trait InsightRule: Send + Sync {
    fn id(&self) -> &'static str;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<InsightOutput>;
}

/// The main engine: an ordered registry of rules
pub struct RecommendationEngine {
    rules: Vec<Box<dyn Rule>>,
    insight_rules: Vec<Box<dyn InsightRule>>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Create an engine with the built-in rules registered in evaluation order
    pub fn new() -> Self {
        let mut engine = Self::empty();

        for domain in Domain::extraction_order() {
            for rule in rules::for_domain(domain) {
                engine.register_rule(rule);
            }
        }
        for rule in rules::cross::rules() {
            engine.register_rule(rule);
        }
        for rule in insights::rules() {
            engine.register_insight_rule(rule);
        }

        engine
    }

    /// Create an engine with no rules registered
    pub fn empty() -> Self {
        Self {
            rules: vec![],
            insight_rules: vec![],
        }
    }

    /// Register a recommendation rule; it runs after those already registered
    pub fn register_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Register an insight rule
    pub fn register_insight_rule(&mut self, rule: Box<dyn InsightRule>) {
        self.insight_rules.push(rule);
    }

    /// Identifiers of every registered rule, in evaluation order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .map(|r| r.id())
            .chain(self.insight_rules.iter().map(|r| r.id()))
            .collect()
    }

    /// Evaluate the snapshot as of now
    pub fn compute(&self, snapshot: &Snapshot) -> Computation {
        self.compute_at(snapshot, Utc::now())
    }

    /// Evaluate the snapshot as of `now`.
    ///
    /// A failing rule is logged and contributes nothing; it never aborts the
    /// remaining rules. Recommendations are stable-sorted by priority, so equal
    /// priorities keep rule evaluation order.
    pub fn compute_at(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> Computation {
        let ctx = RuleContext::new(snapshot, now);
        let mut recommendations = vec![];
        let mut failures = vec![];

        for rule in &self.rules {
            match rule.evaluate(&ctx) {
                Ok(recs) => {
                    tracing::debug!(
                        rule = rule.id(),
                        source = rule.source().as_str(),
                        count = recs.len(),
                        "Rule evaluated"
                    );
                    recommendations.extend(recs);
                }
                Err(e) => {
                    tracing::warn!(rule = rule.id(), error = %e, "Rule evaluation failed");
                    failures.push(RuleFailure::new(rule.id(), &e));
                }
            }
        }

        let mut insights: Vec<Insight> = vec![];
        let mut derived_signals = vec![];

        for rule in &self.insight_rules {
            match rule.evaluate(&ctx) {
                Ok(output) => {
                    tracing::debug!(
                        rule = rule.id(),
                        insights = output.insights.len(),
                        signals = output.signals.len(),
                        "Insight rule evaluated"
                    );
                    insights.extend(output.insights);
                    derived_signals.extend(output.signals);
                }
                Err(e) => {
                    tracing::warn!(rule = rule.id(), error = %e, "Insight rule evaluation failed");
                    failures.push(RuleFailure::new(rule.id(), &e));
                }
            }
        }

        recommendations.extend(insights.iter().map(Insight::to_recommendation));

        // Vec::sort_by is stable
        recommendations.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));

        tracing::info!(
            recommendations = recommendations.len(),
            insights = insights.len(),
            signals = derived_signals.len(),
            failed_rules = failures.len(),
            "Recommendation computation complete"
        );

        Computation {
            recommendations,
            insights,
            derived_signals,
            rule_failures: failures,
            evaluated_at: now,
        }
    }

    /// Evaluate and merge the derived signals into `executive.signals`.
    ///
    /// With [`SignalMerge::Append`] this is not idempotent: running it twice on
    /// the same snapshot appends the signals twice. A snapshot whose executive
    /// payload cannot take signals is logged and left unchanged.
    pub fn compute_and_inject(
        &self,
        snapshot: &mut Snapshot,
        merge: SignalMerge,
        now: DateTime<Utc>,
    ) -> Computation {
        let computation = self.compute_at(snapshot, now);

        if !computation.derived_signals.is_empty() {
            match snapshot.inject_signals(&computation.derived_signals, merge) {
                Ok(total) => {
                    tracing::debug!(total, "Merged derived signals into executive domain")
                }
                Err(e) => tracing::warn!(error = %e, "Failed to merge derived signals"),
            }
        }

        computation
    }
}
