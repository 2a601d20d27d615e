//! Built-in recommendation rules
//!
//! ## Per-domain extractors
//!
//! - **intelligence** - upstream recommendations, top competitor, high-impact trends
//! - **shopify** - revenue growth, low inventory
//! - **social** - sentiment, engagement rate
//! - **content** - top performer, under-performing pieces
//! - **agency** - projects behind schedule, imminent deliverables
//!
//! ## Cross-domain correlations
//!
//! - **cross** - rules that read two or more domains jointly; their output is
//!   sourced `cross_module` and is never merged with per-domain output
//!
//! Each rule is its own failure boundary: a malformed field fails that rule
//! only, and every other rule still runs.

pub mod agency;
pub mod content;
pub mod cross;
pub mod intelligence;
pub mod shopify;
pub mod social;

use crate::domain::Domain;
use crate::engine::{Rule, RuleContext};
use crate::recommendation::{Recommendation, Source};
use crate::Result;

/// Signature shared by the built-in rule functions
pub type RuleFn = fn(&RuleContext<'_>) -> Result<Vec<Recommendation>>;

/// A [`Rule`] backed by a plain function
pub struct FnRule {
    id: &'static str,
    source: Source,
    eval: RuleFn,
}

impl FnRule {
    pub fn new(id: &'static str, source: impl Into<Source>, eval: RuleFn) -> Self {
        Self {
            id,
            source: source.into(),
            eval,
        }
    }

    pub fn boxed(id: &'static str, source: impl Into<Source>, eval: RuleFn) -> Box<dyn Rule> {
        Box::new(Self::new(id, source, eval))
    }
}

impl Rule for FnRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn source(&self) -> Source {
        self.source
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
        (self.eval)(ctx)
    }
}

/// Per-domain rules for `domain`, in evaluation order
pub fn for_domain(domain: Domain) -> Vec<Box<dyn Rule>> {
    match domain {
        Domain::Intelligence => intelligence::rules(),
        Domain::Shopify => shopify::rules(),
        Domain::Social => social::rules(),
        Domain::Content => content::rules(),
        Domain::Agency => agency::rules(),
        Domain::Executive => vec![],
    }
}
