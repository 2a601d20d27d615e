//! Cross-domain insights and executive signals
//!
//! Insights are observations spanning two or more domains. Each one also
//! becomes a cross-module recommendation (negative → high, positive → medium,
//! anything else → low), and the sentiment rule derives a [`Signal`] for the
//! executive dashboard.
//!
//! Signals are returned, not written into the snapshot. Callers merge them with
//! [`Snapshot::inject_signals`](crate::Snapshot::inject_signals) or
//! [`RecommendationEngine::compute_and_inject`](crate::RecommendationEngine::compute_and_inject).

pub mod correlations;
pub mod types;

pub use correlations::rules;
pub use types::{Impact, Insight, InsightOutput, Signal, SignalMerge, SignalType};
