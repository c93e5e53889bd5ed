//! Affordability layer
//!
//! Answers "can I afford this wishlist?" by forecasting the month with and
//! without the purchase. Every item is treated as an immediate debit, whatever
//! its `when` says.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::forecast::{energy_bar, ForecastResult};
use crate::models::{Recurring, Transaction, WishItem};

/// Three-level affordability classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Projected month-end balance stays above the buffer
    Green,
    /// Still positive, but inside the buffer
    Amber,
    /// Projected to end the month at or below zero
    Red,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
        }
    }

    /// Classify a projected month-end balance against a buffer
    pub fn classify(projected_eom: f64, min_buffer: f64) -> Self {
        if projected_eom > min_buffer {
            Self::Green
        } else if projected_eom > 0.0 {
            Self::Amber
        } else {
            Self::Red
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    DelayToMonthEnd,
    SplitPayment,
    SavingsPot,
}

/// A heuristic tip attached to a verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
}

impl Suggestion {
    fn new(kind: SuggestionKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of an affordability check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affordability {
    /// Forecast at the current balance
    pub before: ForecastResult,
    /// Forecast after paying for every item now
    pub after: ForecastResult,
    /// Sum of item prices
    pub total: f64,
    pub verdict: Verdict,
    pub suggestions: Vec<Suggestion>,
}

/// Evaluate buying `items` immediately
///
/// `min_buffer` overrides the configured buffer for this call.
pub fn can_i_afford_it(
    balance: f64,
    txns: &[Transaction],
    recurrings: &[Recurring],
    items: &[WishItem],
    min_buffer: Option<f64>,
    today: DateTime<Utc>,
    config: &EngineConfig,
) -> Affordability {
    let rules = &config.affordability;
    let min_buffer = min_buffer.unwrap_or(rules.min_buffer);
    let total: f64 = items.iter().map(|i| i.price).sum();

    let before = energy_bar(balance, txns, recurrings, today, &config.forecast);
    let after = energy_bar(balance - total, txns, recurrings, today, &config.forecast);
    let verdict = Verdict::classify(after.projected_eom, min_buffer);

    let mut suggestions = Vec::new();

    if verdict != Verdict::Green {
        // Deferral is modelled by re-forecasting the untouched inputs and
        // paying afterwards, which leaves the same month-end balance as `after`.
        let delayed = energy_bar(balance, txns, recurrings, today, &config.forecast);
        let gain = (delayed.projected_eom - total) - after.projected_eom;
        if gain > rules.delay_gain {
            suggestions.push(Suggestion::new(
                SuggestionKind::DelayToMonthEnd,
                format!(
                    "Wait until month-end to keep about {:.0} more in your buffer",
                    gain
                ),
            ));
        }
    }

    if total > rules.split_threshold {
        suggestions.push(Suggestion::new(
            SuggestionKind::SplitPayment,
            format!(
                "Split the {:.2} total into two payments of {:.2}",
                total,
                total / 2.0
            ),
        ));
    }

    if verdict != Verdict::Green {
        let shortfall = (min_buffer - after.projected_eom).max(0.0);
        suggestions.push(Suggestion::new(
            SuggestionKind::SavingsPot,
            format!(
                "Create a savings pot and set aside {:.2} to rebuild your {:.0} buffer",
                shortfall, min_buffer
            ),
        ));
    }

    debug!(
        total,
        verdict = verdict.as_str(),
        projected_eom = after.projected_eom,
        suggestions = suggestions.len(),
        "Evaluated affordability"
    );

    Affordability {
        before,
        after,
        total,
        verdict,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cadence;
    use crate::test_utils::{at, date, recurring, txn, wish};

    fn kinds(result: &Affordability) -> Vec<SuggestionKind> {
        result.suggestions.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_verdict_classification() {
        assert_eq!(Verdict::classify(100.01, 100.0), Verdict::Green);
        assert_eq!(Verdict::classify(100.0, 100.0), Verdict::Amber);
        assert_eq!(Verdict::classify(0.01, 100.0), Verdict::Amber);
        assert_eq!(Verdict::classify(0.0, 100.0), Verdict::Red);
        assert_eq!(Verdict::classify(-50.0, 100.0), Verdict::Red);
    }

    #[test]
    fn test_spending_everything_is_red() {
        let config = EngineConfig::default();
        let result = can_i_afford_it(
            1000.0,
            &[],
            &[],
            &[wish("Laptop", 1000.0)],
            Some(100.0),
            at(2024, 5, 10),
            &config,
        );

        assert!(result.after.projected_eom <= 0.0);
        assert_eq!(result.verdict, Verdict::Red);
        assert_eq!(result.total, 1000.0);
        assert_eq!(
            kinds(&result),
            vec![SuggestionKind::SplitPayment, SuggestionKind::SavingsPot]
        );
    }

    #[test]
    fn test_small_purchase_is_green() {
        let config = EngineConfig::default();
        let result = can_i_afford_it(
            5000.0,
            &[],
            &[],
            &[wish("Headphones", 100.0)],
            None,
            at(2024, 5, 10),
            &config,
        );

        assert!(result.after.projected_eom > 100.0);
        assert_eq!(result.verdict, Verdict::Green);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_amber_inside_buffer() {
        let config = EngineConfig::default();
        let result = can_i_afford_it(
            300.0,
            &[],
            &[],
            &[wish("Shoes", 250.0)],
            None,
            at(2024, 5, 10),
            &config,
        );

        assert_eq!(result.after.projected_eom, 50.0);
        assert_eq!(result.verdict, Verdict::Amber);
        assert_eq!(
            kinds(&result),
            vec![SuggestionKind::SplitPayment, SuggestionKind::SavingsPot]
        );
        assert!(result.suggestions[1].message.contains("50.00"));
    }

    #[test]
    fn test_empty_wishlist() {
        let config = EngineConfig::default();
        let result = can_i_afford_it(500.0, &[], &[], &[], None, at(2024, 5, 10), &config);

        assert_eq!(result.total, 0.0);
        assert_eq!(result.verdict, Verdict::Green);
        assert_eq!(result.before, result.after);
    }

    #[test]
    fn test_split_suggested_for_green_basket() {
        let config = EngineConfig::default();
        let result = can_i_afford_it(
            5000.0,
            &[],
            &[],
            &[wish("Chair", 120.0), wish("Lamp", 40.0)],
            None,
            at(2024, 5, 10),
            &config,
        );

        assert_eq!(result.verdict, Verdict::Green);
        assert_eq!(kinds(&result), vec![SuggestionKind::SplitPayment]);
        assert!(result.suggestions[0].message.contains("80.00"));
    }

    #[test]
    fn test_delay_suggestion_never_fires_for_same_inputs() {
        // The delayed forecast re-uses the unchanged balance and subtracts the
        // total afterwards, which lands exactly on `after`: zero gain.
        let config = EngineConfig::default();
        let today = at(2024, 5, 10);
        let txns = vec![txn("a", at(2024, 5, 3), -600.0, "Groceries")];
        let recurrings = vec![recurring("Rent", -800.0, Cadence::Monthly, date(2024, 5, 25))];

        let result = can_i_afford_it(
            1200.0,
            &txns,
            &recurrings,
            &[wish("Phone", 400.0)],
            None,
            today,
            &config,
        );

        assert_eq!(result.verdict, Verdict::Red);
        assert!(!kinds(&result).contains(&SuggestionKind::DelayToMonthEnd));
    }

    #[test]
    fn test_when_field_does_not_change_timing() {
        let config = EngineConfig::default();
        let today = at(2024, 5, 10);
        let mut later = wish("Bike", 700.0);
        later.when = Some(crate::models::WishTiming::Monthend);

        let now = can_i_afford_it(900.0, &[], &[], &[wish("Bike", 700.0)], None, today, &config);
        let deferred = can_i_afford_it(900.0, &[], &[], &[later], None, today, &config);
        assert_eq!(now.after, deferred.after);
        assert_eq!(now.verdict, deferred.verdict);
    }

    #[test]
    fn test_min_buffer_override() {
        let config = EngineConfig::default();
        let result = can_i_afford_it(
            1000.0,
            &[],
            &[],
            &[wish("Desk", 100.0)],
            Some(1000.0),
            at(2024, 5, 10),
            &config,
        );
        assert_eq!(result.verdict, Verdict::Amber);
    }
}
