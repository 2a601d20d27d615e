//! Shared command utilities
//!
//! This module contains:
//! - `resolve_snapshot_path` / `load_snapshot` / `open_snapshot` - snapshot input
//! - `parse_now` - evaluation time from `--now`
//! - `print_json` - JSON output for `--format json`

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pulse_core::snapshot::parse_timestamp;
use pulse_core::Snapshot;
use serde::Serialize;

/// Environment variable naming the snapshot file when --snapshot is omitted
pub const SNAPSHOT_ENV: &str = "PULSE_SNAPSHOT";

/// Path argument that reads the snapshot from stdin
pub const STDIN_PATH: &str = "-";

/// Snapshot path from --snapshot, falling back to $PULSE_SNAPSHOT
pub fn resolve_snapshot_path(arg: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path.to_path_buf());
    }
    match std::env::var(SNAPSHOT_ENV) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => anyhow::bail!(
            "No snapshot given. Pass --snapshot <FILE> or set {}",
            SNAPSHOT_ENV
        ),
    }
}

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Read and parse a snapshot file ("-" reads stdin)
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let json = if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read snapshot from stdin")?;
        buf
    } else {
        if !path.exists() {
            anyhow::bail!("Snapshot file not found: {}", path.display());
        }
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?
    };

    let snapshot = Snapshot::from_json(&json).context("Failed to parse snapshot as JSON")?;
    if snapshot.is_empty() {
        tracing::warn!(path = %path.display(), "Snapshot contains no domain payloads");
    }
    Ok(snapshot)
}

/// Resolve and load in one step
pub fn open_snapshot(arg: Option<&Path>) -> Result<Snapshot> {
    let path = resolve_snapshot_path(arg)?;
    load_snapshot(&path)
}

/// Evaluation instant from --now, defaulting to the current time
pub fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_timestamp(raw)
            .with_context(|| format!("Invalid --now value: {} (use RFC 3339 or YYYY-MM-DD)", raw)),
        None => Ok(Utc::now()),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
