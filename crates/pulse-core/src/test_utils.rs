//! Test utilities for pulse-core
//!
//! Snapshot fixtures shared by unit tests, integration tests and the CLI tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

use crate::domain::Domain;
use crate::snapshot::Snapshot;

/// Fixed evaluation instant used across tests
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
}

/// RFC 3339 timestamp `days` after [`fixed_now`]
pub fn days_from_now(days: i64) -> String {
    (fixed_now() + Duration::days(days)).to_rfc3339()
}

pub fn shopify(revenue_growth: f64) -> Value {
    json!({
        "sales": {"revenue_growth": revenue_growth},
        "products": [
            {"title": "Canvas Tote", "inventory_quantity": 4},
            {"title": "Linen Shirt", "inventory_quantity": 120}
        ],
        "customers": [
            {"segment": "loyal"},
            {"segment": "new"},
            {"segment": "loyal"}
        ]
    })
}

pub fn social(overall: f64, engagement_rate: f64) -> Value {
    json!({
        "sentiment": {"overall": overall},
        "engagement": {"rate": engagement_rate}
    })
}

pub fn content() -> Value {
    json!({
        "performance": [
            {"title": "Autumn Lookbook", "engagement_rate": 5.4},
            {"title": "Care Guide", "engagement_rate": 0.6}
        ]
    })
}

pub fn intelligence() -> Value {
    json!({
        "competitors": [{"name": "Acme"}, {"name": "Globex"}],
        "trends": [
            {"name": "Resale", "impact": "high", "description": "Secondhand demand is rising"},
            {"name": "Live shopping", "impact": "low"}
        ]
    })
}

pub fn agency() -> Value {
    json!({
        "projects": [
            {"name": "Fall Campaign", "progress": 30, "end_date": days_from_now(5)},
            {"name": "Site refresh", "progress": 90, "end_date": days_from_now(30)}
        ],
        "deliverables": [
            {"due_date": days_from_now(2)},
            {"due_date": days_from_now(10)}
        ]
    })
}

pub fn executive() -> Value {
    json!({"signals": []})
}

/// A snapshot with every domain populated and most rules firing
pub fn full_snapshot() -> Snapshot {
    Snapshot::new()
        .with(Domain::Intelligence, intelligence())
        .with(Domain::Shopify, shopify(-12.345))
        .with(Domain::Social, social(-0.25, 0.8))
        .with(Domain::Content, content())
        .with(Domain::Executive, executive())
        .with(Domain::Agency, agency())
}
