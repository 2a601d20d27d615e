//! Domain snapshot and typed payload views
//!
//! A [`Snapshot`] is the complete set of per-domain JSON payloads handed to one
//! computation. Payloads are loosely structured: every field may be missing, and
//! rules read them through small typed views (`Sales`, `Project`, ...) with
//! [`Snapshot::field`] and [`Snapshot::list`].
//!
//! Absence is never an error. A value that is present but has the wrong shape
//! yields [`Error::Malformed`], which the engine isolates to the rule that asked.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::insights::{Signal, SignalMerge};

/// Per-domain payloads for one computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopify: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency: Option<Value>,
}

impl Snapshot {
    /// Create an empty snapshot (no domains present)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payload for a domain
    pub fn with(mut self, domain: Domain, payload: Value) -> Self {
        *self.slot_mut(domain) = Some(payload);
        self
    }

    /// Parse a snapshot from the aggregator's JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True if no domain payload is present
    pub fn is_empty(&self) -> bool {
        Domain::ALL.iter().all(|d| self.payload(*d).is_none())
    }

    /// Raw payload for a domain, treating JSON `null` as absent
    pub fn payload(&self, domain: Domain) -> Option<&Value> {
        let slot = match domain {
            Domain::Intelligence => &self.intelligence,
            Domain::Shopify => &self.shopify,
            Domain::Social => &self.social,
            Domain::Content => &self.content,
            Domain::Executive => &self.executive,
            Domain::Agency => &self.agency,
        };
        slot.as_ref().filter(|v| !v.is_null())
    }

    fn slot_mut(&mut self, domain: Domain) -> &mut Option<Value> {
        match domain {
            Domain::Intelligence => &mut self.intelligence,
            Domain::Shopify => &mut self.shopify,
            Domain::Social => &mut self.social,
            Domain::Content => &mut self.content,
            Domain::Executive => &mut self.executive,
            Domain::Agency => &mut self.agency,
        }
    }

    /// Read a nested field from a domain payload.
    ///
    /// Returns `Ok(None)` when the domain, any key along `path`, or the value
    /// itself is missing or `null`.
    pub fn field<T: DeserializeOwned>(&self, domain: Domain, path: &[&str]) -> Result<Option<T>> {
        let Some(mut current) = self.payload(domain) else {
            return Ok(None);
        };

        for (depth, key) in path.iter().enumerate() {
            match current {
                Value::Object(map) => match map.get(*key) {
                    Some(value) if !value.is_null() => current = value,
                    _ => return Ok(None),
                },
                other => {
                    return Err(Error::malformed(
                        domain.as_str(),
                        dotted(&path[..depth]),
                        format!("expected an object, found {}", json_kind(other)),
                    ));
                }
            }
        }

        T::deserialize(current)
            .map(Some)
            .map_err(|e| Error::malformed(domain.as_str(), dotted(path), e.to_string()))
    }

    /// Read a top-level array from a domain payload; absent means empty
    pub fn list<T: DeserializeOwned>(&self, domain: Domain, key: &str) -> Result<Vec<T>> {
        Ok(self.field::<Vec<T>>(domain, &[key])?.unwrap_or_default())
    }

    /// Current `executive.signals` entries, as raw JSON.
    ///
    /// Entries written upstream need not match [`Signal`] and are returned unchanged.
    pub fn executive_signals(&self) -> Result<Vec<Value>> {
        self.list(Domain::Executive, "signals")
    }

    /// Merge derived signals into `executive.signals`.
    ///
    /// Creates the executive payload and its `signals` array when missing. With
    /// [`SignalMerge::Append`] repeated calls append duplicates; with
    /// [`SignalMerge::ReplaceBySource`] earlier signals from the same source are
    /// dropped first. On a shape error the snapshot is left untouched.
    /// Returns the resulting number of executive signals.
    pub fn inject_signals(&mut self, signals: &[Signal], merge: SignalMerge) -> Result<usize> {
        let encoded = signals
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let executive = self.slot_mut(Domain::Executive);
        if executive.as_ref().map_or(true, Value::is_null) {
            *executive = Some(Value::Object(Default::default()));
        }

        let Some(Value::Object(map)) = executive.as_mut() else {
            return Err(Error::malformed(
                Domain::Executive.as_str(),
                "(root)",
                "expected an object",
            ));
        };

        let entry = map
            .entry("signals")
            .or_insert_with(|| Value::Array(Vec::new()));
        if entry.is_null() {
            *entry = Value::Array(Vec::new());
        }
        let list = match entry {
            Value::Array(list) => list,
            other => {
                return Err(Error::malformed(
                    Domain::Executive.as_str(),
                    "signals",
                    format!("expected an array, found {}", json_kind(other)),
                ));
            }
        };

        if merge == SignalMerge::ReplaceBySource {
            for signal in signals {
                let source = signal.source.as_str();
                list.retain(|existing| existing.get("source").and_then(Value::as_str) != Some(source));
            }
        }
        list.extend(encoded);

        Ok(list.len())
    }
}

fn dotted(path: &[&str]) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.join(".")
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC)
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| Error::InvalidDate(raw.to_string()))
}

// ========== Typed payload views ==========

/// `intelligence.competitors[]` entry; the first one is the top competitor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Competitor {
    pub name: Option<String>,
}

impl Competitor {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("top competitor")
    }
}

/// `intelligence.trends[]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Trend {
    pub name: Option<String>,
    pub description: Option<String>,
    /// One of `low`, `medium`, `high`
    pub impact: Option<String>,
}

impl Trend {
    pub fn is_high_impact(&self) -> bool {
        self.impact.as_deref() == Some("high")
    }
}

/// `shopify.sales`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sales {
    /// Signed percentage
    pub revenue_growth: Option<f64>,
}

/// `shopify.products[]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub inventory_quantity: Option<f64>,
}

/// `shopify.customers[]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub segment: Option<String>,
}

/// `social.sentiment`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sentiment {
    /// Roughly in [-1, 1]
    pub overall: Option<f64>,
}

/// `social.engagement`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Engagement {
    /// Percentage
    pub rate: Option<f64>,
}

/// `content.performance[]` entry, ordered best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentItem {
    pub title: Option<String>,
    pub engagement_rate: Option<f64>,
}

impl ContentItem {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("top content")
    }
}

/// `agency.projects[]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: Option<String>,
    /// 0-100
    pub progress: Option<f64>,
    pub end_date: Option<String>,
}

/// `agency.deliverables[]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Deliverable {
    pub due_date: Option<String>,
}
