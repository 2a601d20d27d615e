//! Pulse Core Library
//!
//! Cross-domain recommendation and insight engine for the Pulse marketing
//! command center:
//! - Typed, absence-tolerant views over per-domain JSON snapshots
//! - Per-domain recommendation rules (intelligence, shopify, social, content, agency)
//! - Cross-domain correlation rules
//! - Insight generation with executive signal derivation
//! - Stable priority ranking and the queries dashboards read from
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_core::{RecommendationEngine, Snapshot};
//!
//! let snapshot = Snapshot::from_json(&json)?;
//! let engine = RecommendationEngine::new();
//! let computation = engine.compute(&snapshot);
//! for rec in computation.high_priority() {
//!     println!("{}: {}", rec.title, rec.description);
//! }
//! ```

pub mod computation;
pub mod domain;
pub mod engine;
pub mod error;
pub mod insights;
pub mod recommendation;
pub mod rules;
pub mod snapshot;

/// Snapshot fixtures for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use computation::{Computation, ComputationSummary, RuleFailure};
pub use domain::Domain;
pub use engine::{InsightRule, RecommendationEngine, Rule, RuleContext};
pub use error::{Error, Result};
pub use insights::{Impact, Insight, Signal, SignalMerge, SignalType};
pub use recommendation::{Priority, Recommendation, Source};
pub use snapshot::Snapshot;
