//! Per-category monthly outflow, the input to the cohort comparator

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::categorize::CategoryRules;
use crate::models::Transaction;

use super::types::CategorySpend;

/// (year, month) of the month before `date`
fn previous_month(date: NaiveDate) -> (i32, u32) {
    if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    }
}

/// Category for a transaction: its own label, else the rule table on the merchant
fn category_of(t: &Transaction, rules: &CategoryRules) -> String {
    let label = t.category.trim();
    if !label.is_empty() {
        return label.to_string();
    }
    rules.categorize_or_fallback(t.merchant.as_deref().unwrap_or(""))
}

/// Outflow per category for `today`'s month and the month before
///
/// Categories appear in order of first occurrence in `txns`. Inflows and rows
/// from other months are ignored.
pub fn month_over_month(
    txns: &[Transaction],
    today: DateTime<Utc>,
    rules: &CategoryRules,
) -> Vec<CategorySpend> {
    let day = today.date_naive();
    let this_month = (day.year(), day.month());
    let last_month = previous_month(day);

    let mut spend: Vec<CategorySpend> = Vec::new();

    for t in txns.iter().filter(|t| t.is_outflow()) {
        let d = t.date.date_naive();
        let month = (d.year(), d.month());
        if month != this_month && month != last_month {
            continue;
        }

        let category = category_of(t, rules);
        let idx = match spend.iter().position(|c| c.category == category) {
            Some(idx) => idx,
            None => {
                spend.push(CategorySpend::new(category, 0.0, 0.0));
                spend.len() - 1
            }
        };

        if month == this_month {
            spend[idx].this_month += t.outflow();
        } else {
            spend[idx].last_month += t.outflow();
        }
    }

    spend
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, txn};

    #[test]
    fn test_month_over_month_totals() {
        let today = at(2024, 5, 20);
        let txns = vec![
            txn("a", at(2024, 5, 2), -40.0, "Dining"),
            txn("b", at(2024, 4, 12), -25.0, "Dining"),
            txn("c", at(2024, 5, 3), -80.0, "Groceries"),
            txn("d", at(2024, 5, 3), -10.0, "Dining"),
            txn("e", at(2024, 3, 30), -999.0, "Dining"),
            txn("f", at(2024, 5, 1), 3000.0, "Salary"),
        ];

        let spend = month_over_month(&txns, today, &CategoryRules::default());
        assert_eq!(
            spend,
            vec![
                CategorySpend::new("Dining", 50.0, 25.0),
                CategorySpend::new("Groceries", 80.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_january_compares_with_december() {
        let today = at(2025, 1, 10);
        let txns = vec![
            txn("a", at(2024, 12, 28), -70.0, "Gifts"),
            txn("b", at(2025, 1, 2), -20.0, "Gifts"),
        ];

        let spend = month_over_month(&txns, today, &CategoryRules::default());
        assert_eq!(spend, vec![CategorySpend::new("Gifts", 20.0, 70.0)]);
    }

    #[test]
    fn test_blank_category_uses_rules() {
        let today = at(2024, 5, 20);
        let txns = vec![
            txn("a", at(2024, 5, 2), -60.0, "").with_merchant("TESCO STORES 3021"),
            txn("b", at(2024, 5, 4), -15.0, " ").with_merchant("Unknown Shop"),
        ];

        let spend = month_over_month(&txns, today, &CategoryRules::default());
        assert_eq!(spend[0].category, "Groceries");
        assert_eq!(spend[1].category, "Other");
    }
}
