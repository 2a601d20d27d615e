//! CLI command implementations
//!
//! Commands are organized by output:
//! - `core` - Shared utilities (snapshot loading, --now parsing, JSON output)
//! - `insights` - Insight listing and executive signal merging
//! - `recommend` - Ranked, filterable recommendation listing
//! - `summary` - Summary counts and the rule registry

pub mod core;
pub mod insights;
pub mod recommend;
pub mod summary;

// Re-export command functions for main.rs
pub use self::core::*;
pub use insights::*;
pub use recommend::*;
pub use summary::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
