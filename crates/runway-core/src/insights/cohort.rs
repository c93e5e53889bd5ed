//! Cohort comparator
//!
//! Compares each category against peer statistics and against last month.
//! Categories are visited in the caller's order and the output is cut off at
//! the configured maximum; insights are not ranked by magnitude.

use std::collections::HashMap;

use tracing::debug;

use crate::config::CohortConfig;

use super::types::{CategorySpend, CohortInsight, CohortInsightKind, PeerStats};

/// Produce up to `config.max_insights` comparison cards
pub fn compare_to_cohort(
    spend: &[CategorySpend],
    peers: &HashMap<String, PeerStats>,
    config: &CohortConfig,
) -> Vec<CohortInsight> {
    let mut insights = Vec::new();

    for cat in spend {
        if let Some(stats) = peers.get(&cat.category) {
            if let Some(insight) = above_peers(cat, stats, config) {
                insights.push(insight);
            }
        }
        if let Some(insight) = rising_trend(cat, config) {
            insights.push(insight);
        }
        if insights.len() >= config.max_insights {
            break;
        }
    }

    insights.truncate(config.max_insights);
    debug!(count = insights.len(), "Cohort comparison complete");
    insights
}

fn above_peers(
    cat: &CategorySpend,
    stats: &PeerStats,
    config: &CohortConfig,
) -> Option<CohortInsight> {
    // No ratio against an empty peer row
    if stats.median <= 0.0 {
        return None;
    }
    let deviation = (cat.this_month - stats.median) / stats.median;
    if deviation <= config.deviation_ratio || cat.this_month <= config.deviation_floor {
        return None;
    }

    Some(CohortInsight {
        kind: CohortInsightKind::AbovePeers,
        category: cat.category.clone(),
        title: format!("{} is above your peers", cat.category),
        body: format!(
            "You spent {:.2} on {} this month, {:.0}% more than the typical peer ({:.2}). \
             The top quarter spend {:.2} or more.",
            cat.this_month,
            cat.category,
            deviation * 100.0,
            stats.median,
            stats.p75
        ),
    })
}

fn rising_trend(cat: &CategorySpend, config: &CohortConfig) -> Option<CohortInsight> {
    if cat.this_month <= cat.last_month * config.trend_growth
        || cat.this_month <= config.trend_floor
    {
        return None;
    }

    let body = if cat.last_month > 0.0 {
        let growth = (cat.this_month / cat.last_month - 1.0) * 100.0;
        format!(
            "{} is up {:.0}% on last month ({:.2} vs {:.2}).",
            cat.category, growth, cat.this_month, cat.last_month
        )
    } else {
        format!(
            "You spent {:.2} on {} this month and nothing last month.",
            cat.this_month, cat.category
        )
    };

    Some(CohortInsight {
        kind: CohortInsightKind::RisingTrend,
        category: cat.category.clone(),
        title: format!("{} is trending up", cat.category),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peers(entries: &[(&str, f64, f64)]) -> HashMap<String, PeerStats> {
        entries
            .iter()
            .map(|(name, median, p75)| {
                (
                    name.to_string(),
                    PeerStats {
                        median: *median,
                        p75: *p75,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_deviation_insight() {
        let spend = vec![CategorySpend::new("Dining", 240.0, 230.0)];
        let stats = peers(&[("Dining", 180.0, 260.0)]);

        let insights = compare_to_cohort(&spend, &stats, &CohortConfig::default());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, CohortInsightKind::AbovePeers);
        assert!(insights[0].body.contains("33%"));
        assert!(insights[0].body.contains("260.00"));
    }

    #[test]
    fn test_deviation_floor() {
        // 100% above median but under the 40 floor
        let spend = vec![CategorySpend::new("Coffee", 30.0, 30.0)];
        let stats = peers(&[("Coffee", 15.0, 20.0)]);
        assert!(compare_to_cohort(&spend, &stats, &CohortConfig::default()).is_empty());
    }

    #[test]
    fn test_deviation_needs_more_than_15_percent() {
        let spend = vec![CategorySpend::new("Groceries", 115.0, 115.0)];
        let stats = peers(&[("Groceries", 100.0, 130.0)]);
        assert!(compare_to_cohort(&spend, &stats, &CohortConfig::default()).is_empty());
    }

    #[test]
    fn test_trend_insight() {
        let spend = vec![CategorySpend::new("Transport", 130.0, 100.0)];
        let insights = compare_to_cohort(&spend, &HashMap::new(), &CohortConfig::default());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, CohortInsightKind::RisingTrend);
        assert!(insights[0].body.contains("30%"));
    }

    #[test]
    fn test_trend_floor_and_growth() {
        let config = CohortConfig::default();
        // Big growth but tiny amount
        let small = vec![CategorySpend::new("Parking", 50.0, 10.0)];
        assert!(compare_to_cohort(&small, &HashMap::new(), &config).is_empty());
        // Exactly 25% growth
        let flat = vec![CategorySpend::new("Dining", 125.0, 100.0)];
        assert!(compare_to_cohort(&flat, &HashMap::new(), &config).is_empty());
    }

    #[test]
    fn test_trend_from_zero_last_month() {
        let spend = vec![CategorySpend::new("Travel", 400.0, 0.0)];
        let insights = compare_to_cohort(&spend, &HashMap::new(), &CohortConfig::default());
        assert_eq!(insights.len(), 1);
        assert!(insights[0].body.contains("nothing last month"));
    }

    #[test]
    fn test_both_insights_for_one_category() {
        let spend = vec![CategorySpend::new("Dining", 300.0, 150.0)];
        let stats = peers(&[("Dining", 200.0, 250.0)]);

        let insights = compare_to_cohort(&spend, &stats, &CohortConfig::default());
        let kinds: Vec<_> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![CohortInsightKind::AbovePeers, CohortInsightKind::RisingTrend]
        );
    }

    #[test]
    fn test_capped_at_three_in_input_order() {
        let names: Vec<String> = (0..10).map(|i| format!("Cat{}", i)).collect();
        let spend: Vec<CategorySpend> = names
            .iter()
            .map(|n| CategorySpend::new(n.clone(), 500.0, 100.0))
            .collect();
        let stats: HashMap<String, PeerStats> = names
            .iter()
            .map(|n| (n.clone(), PeerStats { median: 100.0, p75: 150.0 }))
            .collect();

        let insights = compare_to_cohort(&spend, &stats, &CohortConfig::default());
        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].category, "Cat0");
        assert_eq!(insights[1].category, "Cat0");
        assert_eq!(insights[2].category, "Cat1");
    }

    #[test]
    fn test_missing_or_zero_median_skips_deviation() {
        // Intentional departure from the plain ratio: (80 - 0) / 0 is infinite
        // and would flag any spend against an empty peer row.
        let spend = vec![CategorySpend::new("Pets", 80.0, 80.0)];
        let stats = peers(&[("Pets", 0.0, 0.0)]);
        assert!(compare_to_cohort(&spend, &stats, &CohortConfig::default()).is_empty());
    }
}
