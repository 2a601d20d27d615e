//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use pulse_core::test_utils::{self, fixed_now};
use pulse_core::{Domain, Priority, RecommendationEngine, Snapshot};
use tempfile::TempDir;

use crate::cli::{GroupBy, OutputFormat};
use crate::commands::{self, truncate, RecommendFilter};

/// Write a snapshot into a fresh temp dir, returning (dir guard, file path)
fn write_snapshot(snapshot: &Snapshot) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(&path, serde_json::to_string_pretty(snapshot).unwrap()).unwrap();
    (dir, path)
}

fn executive_signal_count(path: &Path) -> usize {
    let snapshot = commands::load_snapshot(path).unwrap();
    snapshot.executive_signals().unwrap().len()
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer title", 10), "a much ...");
    assert_eq!(truncate("ünïcödé títle", 8), "ünïcö...");
}

#[test]
fn test_resolve_snapshot_path_prefers_argument() {
    let path = commands::resolve_snapshot_path(Some(Path::new("data/today.json"))).unwrap();
    assert_eq!(path, PathBuf::from("data/today.json"));
}

#[test]
fn test_parse_now() {
    let now = commands::parse_now(Some("2026-10-19")).unwrap();
    assert_eq!(now.to_rfc3339(), "2026-10-19T00:00:00+00:00");

    assert!(commands::parse_now(Some("yesterday")).is_err());
    assert!(commands::parse_now(None).is_ok());
}

// ========== Snapshot Loading Tests ==========

#[test]
fn test_load_snapshot_from_file() {
    let (_dir, path) = write_snapshot(&test_utils::full_snapshot());
    let snapshot = commands::load_snapshot(&path).unwrap();

    for domain in Domain::ALL {
        assert!(snapshot.payload(domain).is_some(), "missing {}", domain);
    }
}

#[test]
fn test_load_snapshot_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::load_snapshot(&dir.path().join("absent.json"));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[test]
fn test_load_snapshot_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = commands::load_snapshot(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse snapshot"));
}

// ========== Recommend Command Tests ==========

#[test]
fn test_select_filters_compose() {
    let computation = RecommendationEngine::new().compute_at(&test_utils::full_snapshot(), fixed_now());

    let all = commands::select(&computation, &RecommendFilter::default());
    assert_eq!(all.len(), computation.all().len());

    let filter = RecommendFilter {
        module: Some("content"),
        high: true,
        cross: true,
    };
    let selected = commands::select(&computation, &filter);
    assert!(!selected.is_empty());
    assert!(selected.iter().all(|r| r.priority == Priority::High
        && r.source.is_cross_module()
        && r.is_relevant_to(Domain::Content)));
}

#[test]
fn test_render_recommendations() {
    let computation = RecommendationEngine::new().compute_at(&test_utils::full_snapshot(), fixed_now());
    let high = computation.high_priority();

    let text = commands::render_recommendations(&high);
    assert!(text.contains("Sales Decline Alert"));
    assert!(text.contains("cross_module"));
    assert!(text.contains("modules: shopify, content, executive"));

    assert_eq!(commands::render_recommendations(&[]), "  No recommendations.\n");
}

#[test]
fn test_cmd_recommend() {
    let snapshot = test_utils::full_snapshot();
    let filter = RecommendFilter {
        module: Some("agency"),
        ..Default::default()
    };

    assert!(commands::cmd_recommend(&snapshot, fixed_now(), &filter, OutputFormat::Text).is_ok());
    assert!(commands::cmd_recommend(&snapshot, fixed_now(), &filter, OutputFormat::Json).is_ok());
}

#[test]
fn test_cmd_recommend_empty_snapshot() {
    let result = commands::cmd_recommend(
        &Snapshot::new(),
        fixed_now(),
        &RecommendFilter::default(),
        OutputFormat::Text,
    );
    assert!(result.is_ok());
}

// ========== Insight / Signal Command Tests ==========

#[test]
fn test_render_insights_and_signals() {
    let computation = RecommendationEngine::new().compute_at(&test_utils::full_snapshot(), fixed_now());

    let insights = computation.cross_module_insights();
    let text = commands::render_insights(&insights);
    assert!(text.contains("Content-Sales Disconnect (negative)"));
    assert!(text.contains("content ↔ shopify"));

    let signals = commands::render_signals(&computation.derived_signals);
    assert!(signals.contains("Negative Social Sentiment (warning, from social)"));
}

#[test]
fn test_cmd_insights() {
    let snapshot = test_utils::full_snapshot();
    assert!(commands::cmd_insights(&snapshot, fixed_now(), false, OutputFormat::Text).is_ok());
    assert!(commands::cmd_insights(&snapshot, fixed_now(), true, OutputFormat::Json).is_ok());
}

#[test]
fn test_cmd_signals_without_write_leaves_file() {
    let (_dir, path) = write_snapshot(&test_utils::full_snapshot());
    let before = fs::read_to_string(&path).unwrap();

    commands::cmd_signals(&path, fixed_now(), false, "append", OutputFormat::Text).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_cmd_signals_write_append_accumulates() {
    let (_dir, path) = write_snapshot(&test_utils::full_snapshot());

    commands::cmd_signals(&path, fixed_now(), true, "append", OutputFormat::Text).unwrap();
    assert_eq!(executive_signal_count(&path), 1);

    commands::cmd_signals(&path, fixed_now(), true, "append", OutputFormat::Json).unwrap();
    assert_eq!(executive_signal_count(&path), 2);
}

#[test]
fn test_cmd_signals_write_replace_is_idempotent() {
    let (_dir, path) = write_snapshot(&test_utils::full_snapshot());

    for _ in 0..3 {
        commands::cmd_signals(&path, fixed_now(), true, "replace", OutputFormat::Text).unwrap();
    }
    assert_eq!(executive_signal_count(&path), 1);
}

#[test]
fn test_cmd_signals_invalid_merge_mode() {
    let (_dir, path) = write_snapshot(&test_utils::full_snapshot());
    let result = commands::cmd_signals(&path, fixed_now(), true, "upsert", OutputFormat::Text);
    assert!(result.is_err());
    assert_eq!(executive_signal_count(&path), 0);
}

// ========== Summary / Rules Command Tests ==========

#[test]
fn test_cmd_summary() {
    let snapshot = test_utils::full_snapshot();
    assert!(commands::cmd_summary(&snapshot, fixed_now(), None, OutputFormat::Text).is_ok());
    assert!(commands::cmd_summary(&snapshot, fixed_now(), None, OutputFormat::Json).is_ok());
}

#[test]
fn test_group_recommendations_by_priority_and_module() {
    let computation = RecommendationEngine::new().compute_at(&test_utils::full_snapshot(), fixed_now());

    let by_priority = commands::group_recommendations(&computation, GroupBy::Priority);
    let labels: Vec<&str> = by_priority.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(labels, vec!["high", "medium", "low"]);
    assert_eq!(by_priority[0].recommendations.len(), computation.high_priority().len());

    let by_module = commands::group_recommendations(&computation, GroupBy::Module);
    let agency = by_module.iter().find(|g| g.group == "agency").unwrap();
    assert!(agency
        .recommendations
        .iter()
        .any(|r| r.title == "Project Timeline Alert"));

    let text = commands::render_groups(&by_module);
    assert!(text.contains("agency ("));
    assert!(text.contains("    - Upcoming Deadlines"));
}

#[test]
fn test_cmd_summary_grouped() {
    let snapshot = test_utils::full_snapshot();
    for by in [GroupBy::Priority, GroupBy::Source, GroupBy::Module] {
        assert!(commands::cmd_summary(&snapshot, fixed_now(), Some(by), OutputFormat::Text).is_ok());
        assert!(commands::cmd_summary(&snapshot, fixed_now(), Some(by), OutputFormat::Json).is_ok());
    }
}

#[test]
fn test_cmd_summary_reports_skipped_rules() {
    let snapshot = Snapshot::new().with(
        Domain::Shopify,
        serde_json::json!({"products": "unavailable", "sales": {"revenue_growth": 30}}),
    );
    let computation = RecommendationEngine::new().compute_at(&snapshot, fixed_now());
    assert_eq!(computation.summary().failed_rules, 1);

    assert!(commands::cmd_summary(&snapshot, fixed_now(), None, OutputFormat::Text).is_ok());
}

#[test]
fn test_cmd_rules() {
    assert!(commands::cmd_rules(OutputFormat::Text).is_ok());
    assert!(commands::cmd_rules(OutputFormat::Json).is_ok());
}
