//! Runway Core Library
//!
//! Cash-flow forecasting and spending insights over caller-supplied data:
//! - Rolling variable-spend burn rate and recurring payment projection
//! - End-of-month forecast ("energy bar") with risk tags
//! - Affordability verdicts for wishlist purchases
//! - Peer cohort comparison and micro-insights
//! - Category rule table for labelling imported transactions
//! - CSV/JSON/TOML import of transactions, recurrings, wishlists and peer stats
//!
//! Every engine function is pure: it reads borrowed slices plus an injected
//! `today`/`now` and never touches the wall clock.

pub mod affordability;
pub mod categorize;
pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod import;
pub mod insights;
pub mod models;

/// Fixture builders for transactions and recurrings
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use affordability::{can_i_afford_it, Affordability, Suggestion, SuggestionKind, Verdict};
pub use categorize::{CategoryRule, CategoryRules, PatternType};
pub use config::{ConfigSource, EngineConfig};
pub use engine::{Dashboard, Engine};
pub use error::{Error, Result};
pub use forecast::{
    energy_bar, project_recurring, recurring_schedule, rolling_daily_burn, ForecastResult,
    RecurringProjection, RiskTag,
};
pub use insights::{
    compare_to_cohort, generate_micro_insights, month_over_month, CategorySpend, CohortInsight,
    CohortInsightKind, MicroInsight, MicroInsightKind, PeerStats,
};
pub use models::{Cadence, Recurring, Transaction, WishItem, WishTiming};
