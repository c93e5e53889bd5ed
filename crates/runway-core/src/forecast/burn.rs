//! Rolling burn estimator

use chrono::{DateTime, Duration, Utc};

use crate::models::Transaction;

/// Average daily variable outflow over the trailing `window_days`
///
/// Sums `|amount|` of non-subscription outflows dated on or after
/// `today - window_days` and divides by the window length, not by the number
/// of active days, so sparse histories still yield a smoothed rate.
pub fn rolling_daily_burn(txns: &[Transaction], today: DateTime<Utc>, window_days: i64) -> f64 {
    if window_days <= 0 {
        return 0.0;
    }
    let cutoff = today - Duration::days(window_days);

    let spent: f64 = txns
        .iter()
        .filter(|t| t.date >= cutoff && t.is_outflow() && !t.is_subscription)
        .map(|t| t.amount.abs())
        .sum();

    spent / window_days as f64
}

/// Total outflow (subscriptions included) dated in `[from, until)`
///
/// `until = None` leaves the window open-ended.
pub fn outflow_between(
    txns: &[Transaction],
    from: DateTime<Utc>,
    until: Option<DateTime<Utc>>,
) -> f64 {
    txns.iter()
        .filter(|t| t.date >= from && until.map_or(true, |u| t.date < u))
        .map(Transaction::outflow)
        .sum()
}
