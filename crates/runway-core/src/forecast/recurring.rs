//! Recurring projector
//!
//! Steps each recurring commitment forward from its next date by a fixed
//! cadence interval and sums whatever lands in the current month. Monthly is
//! a 30-day step, so a "monthly" bill can land twice in a 31-day month.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Cadence, Recurring};

/// Last calendar day of the month containing `date`
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    end_of_month(date).day()
}

/// Occurrence dates of `recurring` from its next date through month end, inclusive
pub fn occurrences(recurring: &Recurring, today: NaiveDate) -> Vec<NaiveDate> {
    let month_end = end_of_month(today);
    let step = Duration::days(recurring.cadence.step_days());

    let mut dates = Vec::new();
    let mut current = recurring.next_date;
    while current <= month_end {
        dates.push(current);
        match current.checked_add_signed(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

/// Signed total expected to post between `next_date` and month end
///
/// Zero when the next date already falls after the month ends.
pub fn project_recurring(recurring: &Recurring, today: NaiveDate) -> f64 {
    occurrences(recurring, today)
        .iter()
        .fold(0.0, |total, _| total + recurring.amount)
}

/// Per-commitment breakdown of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringProjection {
    pub label: String,
    pub cadence: Cadence,
    pub amount: f64,
    pub occurrences: Vec<NaiveDate>,
    pub total: f64,
}

/// Break the committed total down by recurring entry, in input order
pub fn recurring_schedule(recurrings: &[Recurring], today: NaiveDate) -> Vec<RecurringProjection> {
    recurrings
        .iter()
        .map(|r| {
            let dates = occurrences(r, today);
            let total = dates.iter().fold(0.0, |total, _| total + r.amount);
            RecurringProjection {
                label: r.label.clone(),
                cadence: r.cadence,
                amount: r.amount,
                occurrences: dates,
                total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, recurring};

    #[test]
    fn test_month_boundaries() {
        assert_eq!(end_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(end_of_month(date(2023, 2, 10)), date(2023, 2, 28));
        assert_eq!(end_of_month(date(2024, 12, 31)), date(2024, 12, 31));
        assert_eq!(days_in_month(date(2024, 4, 1)), 30);
        assert_eq!(days_in_month(date(2024, 1, 31)), 31);
    }

    #[test]
    fn test_weekly_steps_through_month_end() {
        let today = date(2024, 5, 10);
        let r = recurring("Cleaner", -25.0, Cadence::Weekly, date(2024, 5, 11));

        // 11, 18, 25 May; 1 June is outside
        assert_eq!(
            occurrences(&r, today),
            vec![date(2024, 5, 11), date(2024, 5, 18), date(2024, 5, 25)]
        );
        assert_eq!(project_recurring(&r, today), -75.0);
    }

    #[test]
    fn test_month_end_is_inclusive() {
        let today = date(2024, 5, 10);
        let r = recurring("Rent", -1200.0, Cadence::Monthly, date(2024, 5, 31));
        assert_eq!(project_recurring(&r, today), -1200.0);
    }

    #[test]
    fn test_next_date_after_month_end_contributes_nothing() {
        let today = date(2024, 5, 10);
        let r = recurring("Rent", -1200.0, Cadence::Monthly, date(2024, 6, 1));
        assert_eq!(project_recurring(&r, today), 0.0);
        assert!(occurrences(&r, today).is_empty());
    }

    #[test]
    fn test_monthly_is_thirty_days_not_calendar() {
        // 1 May + 30 days = 31 May, still inside May
        let today = date(2024, 5, 1);
        let r = recurring("Salary", 2000.0, Cadence::Monthly, date(2024, 5, 1));
        assert_eq!(project_recurring(&r, today), 4000.0);
    }

    #[test]
    fn test_biweekly_and_fourweekly() {
        let today = date(2024, 5, 1);
        let bi = recurring("Pay", 900.0, Cadence::Biweekly, date(2024, 5, 3));
        let four = recurring("Insurance", -40.0, Cadence::Fourweekly, date(2024, 5, 3));

        // 3, 17, 31 May
        assert_eq!(project_recurring(&bi, today), 2700.0);
        // 3, 31 May
        assert_eq!(project_recurring(&four, today), -80.0);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let today = date(2024, 5, 10);
        let r = recurring("Gym", -35.0, Cadence::Weekly, date(2024, 5, 12));
        assert_eq!(project_recurring(&r, today), project_recurring(&r, today));
    }

    #[test]
    fn test_schedule_totals_match_projection() {
        let today = date(2024, 5, 10);
        let recurrings = vec![
            recurring("Rent", -1200.0, Cadence::Monthly, date(2024, 5, 28)),
            recurring("Cleaner", -25.0, Cadence::Weekly, date(2024, 5, 11)),
            recurring("Bonus", 500.0, Cadence::Monthly, date(2024, 7, 1)),
        ];

        let schedule = recurring_schedule(&recurrings, today);
        assert_eq!(schedule.len(), 3);
        for (projection, r) in schedule.iter().zip(&recurrings) {
            assert_eq!(projection.label, r.label);
            assert_eq!(projection.total, project_recurring(r, today));
        }
        assert!(schedule[2].occurrences.is_empty());
    }
}
