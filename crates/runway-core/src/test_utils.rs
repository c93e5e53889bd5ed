//! Test utilities for runway-core
//!
//! Terse fixture builders shared by unit tests, integration tests and the CLI
//! tests (via the `test-utils` feature).

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{Cadence, Recurring, Transaction, WishItem};

/// Calendar date; panics on an invalid date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Midnight UTC on the given date
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// A specific hour on the given date, UTC
pub fn at_hour(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn txn(id: &str, date: DateTime<Utc>, amount: f64, category: &str) -> Transaction {
    Transaction::new(id, date, amount, category)
}

pub fn recurring(label: &str, amount: f64, cadence: Cadence, next_date: NaiveDate) -> Recurring {
    Recurring {
        label: label.to_string(),
        amount,
        cadence,
        next_date,
    }
}

pub fn wish(label: &str, price: f64) -> WishItem {
    WishItem::new(label, price)
}
