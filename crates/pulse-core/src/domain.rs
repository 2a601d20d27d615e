//! The six fixed business domains the engine reads from

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A business area whose JSON payload is part of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Competitive intelligence: competitors, market trends
    Intelligence,
    /// Storefront sales, products and customers
    Shopify,
    /// Social sentiment and engagement
    Social,
    /// Content performance
    Content,
    /// Executive dashboard signals
    Executive,
    /// Agency projects and deliverables
    Agency,
}

impl Domain {
    /// Every domain, in snapshot key order
    pub const ALL: [Domain; 6] = [
        Domain::Intelligence,
        Domain::Shopify,
        Domain::Social,
        Domain::Content,
        Domain::Executive,
        Domain::Agency,
    ];

    /// Order in which per-domain rules are evaluated.
    ///
    /// Executive carries no recommendation rules of its own.
    pub fn extraction_order() -> [Domain; 5] {
        [
            Domain::Intelligence,
            Domain::Shopify,
            Domain::Social,
            Domain::Content,
            Domain::Agency,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Intelligence => "intelligence",
            Domain::Shopify => "shopify",
            Domain::Social => "social",
            Domain::Content => "content",
            Domain::Executive => "executive",
            Domain::Agency => "agency",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "intelligence" => Ok(Domain::Intelligence),
            "shopify" => Ok(Domain::Shopify),
            "social" => Ok(Domain::Social),
            "content" => Ok(Domain::Content),
            "executive" => Ok(Domain::Executive),
            "agency" => Ok(Domain::Agency),
            _ => Err(Error::UnknownDomain(s.to_string())),
        }
    }
}
