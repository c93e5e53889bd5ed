//! Spending insights
//!
//! Heuristic, text-producing analyses layered on top of the forecast:
//!
//! - **Cohort Comparator** - per-category spend against peer medians and
//!   month-over-month trend
//! - **Micro-Insights** - unused subscriptions, round-up potential and
//!   weekend/weekday skew
//! - **Category Spend** - monthly per-category totals that feed the comparator
//!
//! Results are returned in discovery order and capped, not ranked.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use runway_core::insights::{generate_micro_insights, MicroInsightGenerator};
//!
//! let generator = MicroInsightGenerator::new();
//! let tips = generator.generate(&txns, now, &config.micro);
//! ```

pub mod cohort;
pub mod micro;
pub mod spend;
pub mod types;

pub use cohort::compare_to_cohort;
pub use micro::{
    generate_micro_insights, MicroHeuristic, MicroInsightGenerator, RoundUps,
    UnusedSubscriptions, WeekendSkew,
};
pub use spend::month_over_month;
pub use types::{
    CategorySpend, CohortInsight, CohortInsightKind, MicroInsight, MicroInsightKind, PeerStats,
};
