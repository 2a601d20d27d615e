//! Core types for cross-domain insights and executive signals

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::Domain;
use crate::recommendation::{Priority, Recommendation, Source};

/// Direction or nature of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
    Strategic,
    Operational,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Positive => "positive",
            Impact::Negative => "negative",
            Impact::Neutral => "neutral",
            Impact::Strategic => "strategic",
            Impact::Operational => "operational",
        }
    }

    /// Priority of the recommendation derived from an insight with this impact
    pub fn priority(&self) -> Priority {
        match self {
            Impact::Negative => Priority::High,
            Impact::Positive => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A derived cross-domain observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub impact: Impact,
    /// Domains the observation spans
    pub modules: Vec<Domain>,
}

impl Insight {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        impact: Impact,
        modules: &[Domain],
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            impact,
            modules: modules.to_vec(),
        }
    }

    /// True if the insight spans two or more domains
    pub fn is_cross_module(&self) -> bool {
        self.modules.len() >= 2
    }

    /// Cross-module recommendation carrying this insight, prioritized by impact
    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation::new(
            self.title.clone(),
            self.description.clone(),
            self.impact.priority(),
            Source::CrossModule,
        )
        .with_modules(&self.modules)
    }
}

/// Kind of executive signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    Positive,
    Warning,
    Info,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Positive => "positive",
            SignalType::Warning => "warning",
            SignalType::Info => "info",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An entry destined for the executive domain's `signals[]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SignalType,
    pub source: Domain,
}

/// How derived signals are merged into `executive.signals`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignalMerge {
    /// Append every time; repeated merges duplicate entries
    #[default]
    Append,
    /// Drop existing signals from the same source before appending
    ReplaceBySource,
}

impl FromStr for SignalMerge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "append" => Ok(SignalMerge::Append),
            "replace" | "replace_by_source" => Ok(SignalMerge::ReplaceBySource),
            _ => Err(format!("Unknown signal merge mode: {}", s)),
        }
    }
}

/// What one insight rule produced
#[derive(Debug, Clone, Default)]
pub struct InsightOutput {
    pub insights: Vec<Insight>,
    pub signals: Vec<Signal>,
}

impl InsightOutput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn insight(insight: Insight) -> Self {
        Self {
            insights: vec![insight],
            signals: vec![],
        }
    }

    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signals.push(signal);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_priority_mapping() {
        assert_eq!(Impact::Negative.priority(), Priority::High);
        assert_eq!(Impact::Positive.priority(), Priority::Medium);
        assert_eq!(Impact::Neutral.priority(), Priority::Low);
        assert_eq!(Impact::Strategic.priority(), Priority::Low);
        assert_eq!(Impact::Operational.priority(), Priority::Low);
    }

    #[test]
    fn test_insight_to_recommendation() {
        let insight = Insight::new(
            "Content-Sales Disconnect",
            "Top content is not converting",
            Impact::Negative,
            &[Domain::Content, Domain::Shopify],
        );
        let rec = insight.to_recommendation();

        assert_eq!(rec.source, Source::CrossModule);
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.modules, vec![Domain::Content, Domain::Shopify]);
        assert!(insight.is_cross_module());
    }

    #[test]
    fn test_signal_serializes_type_field() {
        let signal = Signal {
            title: "Sentiment".to_string(),
            description: "Up".to_string(),
            kind: SignalType::Positive,
            source: Domain::Social,
        };
        let value = serde_json::to_value(&signal).unwrap();
        assert_eq!(value["type"], "positive");
        assert_eq!(value["source"], "social");
    }

    #[test]
    fn test_signal_merge_parse() {
        assert_eq!("append".parse::<SignalMerge>().unwrap(), SignalMerge::Append);
        assert_eq!(
            "replace".parse::<SignalMerge>().unwrap(),
            SignalMerge::ReplaceBySource
        );
        assert!("merge".parse::<SignalMerge>().is_err());
    }
}
