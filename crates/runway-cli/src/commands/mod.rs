//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `context` - Shared utilities (engine loading, reference date, input files)
//! - `forecast` - Month-end forecast and dashboard commands
//! - `afford` - Purchase affordability command
//! - `insights` - Cohort comparison and micro-insight commands
//! - `config` - Configuration inspection command

pub mod afford;
pub mod config;
pub mod context;
pub mod forecast;
pub mod insights;

// Re-export command functions for main.rs
pub use afford::*;
pub use config::*;
pub use context::*;
pub use forecast::*;
pub use insights::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
