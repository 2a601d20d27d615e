//! Recommendation records produced by the engine

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::Domain;

/// How urgently a recommendation should be acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Ordinal for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// What triggered a recommendation: a single domain, or a correlation across domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Domain(Domain),
    CrossModule,
}

impl Source {
    pub const CROSS_MODULE: &'static str = "cross_module";

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Domain(domain) => domain.as_str(),
            Source::CrossModule => Self::CROSS_MODULE,
        }
    }

    pub fn is_cross_module(&self) -> bool {
        matches!(self, Source::CrossModule)
    }
}

impl From<Domain> for Source {
    fn from(domain: Domain) -> Self {
        Source::Domain(domain)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Source {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == Self::CROSS_MODULE {
            Ok(Source::CrossModule)
        } else {
            s.parse().map(Source::Domain)
        }
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A prioritized, human-readable suggestion tied to one or more domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Short label (e.g., "Sales Decline Alert")
    pub title: String,
    /// Rationale, may embed computed figures
    pub description: String,
    pub priority: Priority,
    pub source: Source,
    /// Domains this recommendation is relevant to, in display order
    #[serde(default)]
    pub modules: Vec<Domain>,
}

impl Recommendation {
    /// Create a recommendation relevant to its own source domain
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        source: impl Into<Source>,
    ) -> Self {
        let source = source.into();
        let modules = match source {
            Source::Domain(domain) => vec![domain],
            Source::CrossModule => Vec::new(),
        };
        Self {
            title: title.into(),
            description: description.into(),
            priority,
            source,
            modules,
        }
    }

    /// Replace the relevant domains, dropping repeats but keeping first-seen order
    pub fn with_modules(mut self, modules: &[Domain]) -> Self {
        self.modules.clear();
        for domain in modules {
            if !self.modules.contains(domain) {
                self.modules.push(*domain);
            }
        }
        self
    }

    /// Whether this belongs on `domain`'s view. An empty module list matches every domain.
    pub fn is_relevant_to(&self, domain: Domain) -> bool {
        self.modules.is_empty() || self.modules.contains(&domain)
    }
}

/// A recommendation as supplied upstream in `intelligence.recommendations[]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecommendation {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub source: Option<String>,
    pub modules: Option<Vec<String>>,
}

impl RawRecommendation {
    /// Normalize into a [`Recommendation`], filling intelligence defaults.
    ///
    /// Returns `None` when the entry has no usable title.
    pub fn into_recommendation(self) -> Option<Recommendation> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;

        let priority = self
            .priority
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(Priority::Medium);

        let source = self
            .source
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Source::Domain(Domain::Intelligence));

        let modules: Vec<Domain> = self
            .modules
            .unwrap_or_default()
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();

        let rec = Recommendation::new(
            title,
            self.description.unwrap_or_default(),
            priority,
            source,
        );

        if modules.is_empty() {
            Some(rec.with_modules(&[Domain::Intelligence]))
        } else {
            Some(rec.with_modules(&modules))
        }
    }
}
