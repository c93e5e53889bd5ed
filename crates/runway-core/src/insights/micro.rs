//! Micro-insight generator
//!
//! Small, pluggable heuristics run in a fixed order. The generator keeps the
//! first `max_insights` results; later heuristics are not consulted once the
//! cap is reached.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc, Weekday};
use tracing::debug;

use crate::config::MicroConfig;
use crate::models::Transaction;

use super::types::{MicroInsight, MicroInsightKind};

/// A single micro-insight heuristic
pub trait MicroHeuristic: Send + Sync {
    fn kind(&self) -> MicroInsightKind;

    fn evaluate(
        &self,
        txns: &[Transaction],
        now: DateTime<Utc>,
        config: &MicroConfig,
    ) -> Vec<MicroInsight>;
}

/// Runs registered heuristics in order and caps the output
pub struct MicroInsightGenerator {
    heuristics: Vec<Box<dyn MicroHeuristic>>,
}

impl Default for MicroInsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MicroInsightGenerator {
    /// Generator with the built-in heuristics: subscriptions, round-ups, weekend skew
    pub fn new() -> Self {
        let mut generator = Self {
            heuristics: Vec::new(),
        };

        generator.register(Box::new(UnusedSubscriptions));
        generator.register(Box::new(RoundUps));
        generator.register(Box::new(WeekendSkew));

        generator
    }

    /// Append a heuristic after the existing ones
    pub fn register(&mut self, heuristic: Box<dyn MicroHeuristic>) {
        self.heuristics.push(heuristic);
    }

    pub fn kinds(&self) -> Vec<MicroInsightKind> {
        self.heuristics.iter().map(|h| h.kind()).collect()
    }

    pub fn generate(
        &self,
        txns: &[Transaction],
        now: DateTime<Utc>,
        config: &MicroConfig,
    ) -> Vec<MicroInsight> {
        let mut insights = Vec::new();

        for heuristic in &self.heuristics {
            if insights.len() >= config.max_insights {
                break;
            }
            let found = heuristic.evaluate(txns, now, config);
            debug!(
                heuristic = heuristic.kind().as_str(),
                count = found.len(),
                "Micro-insight heuristic complete"
            );
            insights.extend(found);
        }

        insights.truncate(config.max_insights);
        insights
    }
}

/// Run the built-in heuristics
pub fn generate_micro_insights(
    txns: &[Transaction],
    now: DateTime<Utc>,
    config: &MicroConfig,
) -> Vec<MicroInsight> {
    MicroInsightGenerator::new().generate(txns, now, config)
}

/// Subscriptions whose merchant hasn't seen a regular purchase in a while
pub struct UnusedSubscriptions;

impl MicroHeuristic for UnusedSubscriptions {
    fn kind(&self) -> MicroInsightKind {
        MicroInsightKind::UnusedSubscription
    }

    fn evaluate(
        &self,
        txns: &[Transaction],
        now: DateTime<Utc>,
        config: &MicroConfig,
    ) -> Vec<MicroInsight> {
        // Most recent non-subscription activity per merchant
        let mut last_used: HashMap<&str, DateTime<Utc>> = HashMap::new();
        for t in txns.iter().filter(|t| !t.is_subscription) {
            if let Some(merchant) = t.merchant.as_deref() {
                let entry = last_used.entry(merchant).or_insert(t.date);
                if t.date > *entry {
                    *entry = t.date;
                }
            }
        }

        // One tip per subscription charge
        txns.iter()
            .filter(|t| t.is_subscription)
            .filter_map(|t| {
                let days = t
                    .merchant
                    .as_deref()
                    .and_then(|m| last_used.get(m))
                    .map(|last| (now - *last).num_days())
                    .unwrap_or(config.missing_usage_days);

                (days > config.unused_subscription_days).then(|| {
                    MicroInsight::new(
                        self.kind(),
                        format!(
                            "You haven't used {} in {} days. Consider cancelling it.",
                            t.display_name(),
                            days
                        ),
                    )
                })
            })
            .collect()
    }
}

/// Spare change that rounding each purchase up to a whole unit would sweep
pub struct RoundUps;

impl RoundUps {
    /// Sum of `1 - (|amount| mod 1)` over outflows
    pub fn roundable(txns: &[Transaction]) -> f64 {
        txns.iter()
            .filter(|t| t.is_outflow())
            .map(|t| 1.0 - (t.amount.abs() % 1.0))
            .sum()
    }
}

impl MicroHeuristic for RoundUps {
    fn kind(&self) -> MicroInsightKind {
        MicroInsightKind::RoundUp
    }

    fn evaluate(
        &self,
        txns: &[Transaction],
        _now: DateTime<Utc>,
        config: &MicroConfig,
    ) -> Vec<MicroInsight> {
        let roundable = Self::roundable(txns);
        if roundable > config.round_up_threshold {
            vec![MicroInsight::new(
                self.kind(),
                format!(
                    "Rounding up your purchases could have saved {:.2}.",
                    roundable
                ),
            )]
        } else {
            vec![]
        }
    }
}

/// Weekend outflow well above weekday outflow
pub struct WeekendSkew;

impl WeekendSkew {
    /// Total (weekend, weekday) outflow, by UTC calendar day
    pub fn split(txns: &[Transaction]) -> (f64, f64) {
        txns.iter()
            .filter(|t| t.is_outflow())
            .fold((0.0, 0.0), |(weekend, weekday), t| {
                match t.date.weekday() {
                    Weekday::Sat | Weekday::Sun => (weekend + t.outflow(), weekday),
                    _ => (weekend, weekday + t.outflow()),
                }
            })
    }
}

impl MicroHeuristic for WeekendSkew {
    fn kind(&self) -> MicroInsightKind {
        MicroInsightKind::WeekendSkew
    }

    fn evaluate(
        &self,
        txns: &[Transaction],
        _now: DateTime<Utc>,
        config: &MicroConfig,
    ) -> Vec<MicroInsight> {
        let (weekend, weekday) = Self::split(txns);
        if weekday > 0.0 && weekend > weekday * config.weekend_ratio {
            let ratio = (weekend / weekday * 100.0).round();
            vec![MicroInsight::new(
                self.kind(),
                format!(
                    "Your weekend spending is {:.0}% of your weekday spending.",
                    ratio
                ),
            )]
        } else {
            vec![]
        }
    }
}
