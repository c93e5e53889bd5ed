//! Forecast aggregator ("energy bar")
//!
//! Combines the current balance, committed recurring flows and projected
//! variable burn into an end-of-month projection plus risk tags.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ForecastConfig;
use crate::models::{Recurring, Transaction};

use super::burn::{outflow_between, rolling_daily_burn};
use super::recurring::{days_in_month, project_recurring};

/// Risk flags raised by the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTag {
    /// Committed bills eat a large share of the balance
    HeavyBills,
    /// The last week's spend is well above the week before
    OverspendTrend,
}

impl RiskTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeavyBills => "heavy_bills",
            Self::OverspendTrend => "overspend_trend",
        }
    }
}

impl fmt::Display for RiskTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// End-of-month projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Amount available without breaching committed and projected spend (never negative)
    pub safe_to_spend: f64,
    /// Balance projected to the last day of the month
    pub projected_eom: f64,
    /// Signed sum of recurring projections through month end
    pub committed: f64,
    /// Projected variable spend through month end (never positive)
    pub variable_to_month_end: f64,
    pub days_left: u32,
    pub risk: BTreeSet<RiskTag>,
}

impl ForecastResult {
    pub fn has_risk(&self, tag: RiskTag) -> bool {
        self.risk.contains(&tag)
    }
}

/// Project `balance` to the end of `today`'s month
pub fn energy_bar(
    balance: f64,
    txns: &[Transaction],
    recurrings: &[Recurring],
    today: DateTime<Utc>,
    config: &ForecastConfig,
) -> ForecastResult {
    let day = today.date_naive();
    let days_left = days_in_month(day) - day.day();

    let daily_burn = rolling_daily_burn(txns, today, config.burn_window_days);
    let variable_to_month_end = -(daily_burn * days_left as f64);

    let committed: f64 = recurrings.iter().map(|r| project_recurring(r, day)).sum();

    let projected_eom = balance + committed + variable_to_month_end;
    let safe_to_spend = (balance - (committed + variable_to_month_end).abs()).max(0.0);

    let mut risk = BTreeSet::new();
    if committed < 0.0 && committed.abs() > balance * config.heavy_bills_ratio {
        risk.insert(RiskTag::HeavyBills);
    }
    if is_overspend_trend(txns, today, config) {
        risk.insert(RiskTag::OverspendTrend);
    }

    debug!(
        balance,
        committed,
        variable_to_month_end,
        projected_eom,
        days_left,
        risk = ?risk,
        "Computed energy bar"
    );

    ForecastResult {
        safe_to_spend,
        projected_eom,
        committed,
        variable_to_month_end,
        days_left,
        risk,
    }
}

/// Latest window's outflow beats the previous window by more than the growth margin
fn is_overspend_trend(txns: &[Transaction], now: DateTime<Utc>, config: &ForecastConfig) -> bool {
    let window = Duration::days(config.trend_window_days);
    let latest_start = now - window;
    let previous_start = latest_start - window;

    let latest = outflow_between(txns, latest_start, None);
    let previous = outflow_between(txns, previous_start, Some(latest_start));

    previous > 0.0 && latest > previous * (1.0 + config.overspend_growth)
}
