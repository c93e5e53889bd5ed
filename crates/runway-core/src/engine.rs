//! Engine facade
//!
//! Bundles an [`EngineConfig`] with the forecasting and insight functions so
//! callers configure thresholds once. The engine holds no state beyond its
//! configuration; every call is a pure function of its arguments.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::affordability::{can_i_afford_it, Affordability};
use crate::config::EngineConfig;
use crate::forecast::{energy_bar, recurring_schedule, ForecastResult, RecurringProjection};
use crate::insights::{
    compare_to_cohort, month_over_month, CategorySpend, CohortInsight, MicroInsight,
    MicroInsightGenerator, PeerStats,
};
use crate::models::{Recurring, Transaction, WishItem};

/// Forecast plus the tips shown next to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub forecast: ForecastResult,
    pub schedule: Vec<RecurringProjection>,
    pub insights: Vec<MicroInsight>,
}

pub struct Engine {
    config: EngineConfig,
    micro: MicroInsightGenerator,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            micro: MicroInsightGenerator::new(),
        }
    }

    /// Replace the micro-insight heuristics
    pub fn with_micro_generator(mut self, generator: MicroInsightGenerator) -> Self {
        self.micro = generator;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn energy_bar(
        &self,
        balance: f64,
        txns: &[Transaction],
        recurrings: &[Recurring],
        today: DateTime<Utc>,
    ) -> ForecastResult {
        energy_bar(balance, txns, recurrings, today, &self.config.forecast)
    }

    pub fn can_i_afford_it(
        &self,
        balance: f64,
        txns: &[Transaction],
        recurrings: &[Recurring],
        items: &[WishItem],
        min_buffer: Option<f64>,
        today: DateTime<Utc>,
    ) -> Affordability {
        can_i_afford_it(
            balance,
            txns,
            recurrings,
            items,
            min_buffer,
            today,
            &self.config,
        )
    }

    pub fn compare_to_cohort(
        &self,
        spend: &[CategorySpend],
        peers: &HashMap<String, PeerStats>,
    ) -> Vec<CohortInsight> {
        compare_to_cohort(spend, peers, &self.config.cohort)
    }

    /// This month's and last month's outflow per category, categorized with the configured rules
    pub fn category_spend(&self, txns: &[Transaction], today: DateTime<Utc>) -> Vec<CategorySpend> {
        month_over_month(txns, today, &self.config.categories)
    }

    pub fn micro_insights(&self, txns: &[Transaction], now: DateTime<Utc>) -> Vec<MicroInsight> {
        self.micro.generate(txns, now, &self.config.micro)
    }

    pub fn dashboard(
        &self,
        balance: f64,
        txns: &[Transaction],
        recurrings: &[Recurring],
        now: DateTime<Utc>,
    ) -> Dashboard {
        Dashboard {
            forecast: self.energy_bar(balance, txns, recurrings, now),
            schedule: recurring_schedule(recurrings, now.date_naive()),
            insights: self.micro_insights(txns, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MicroConfig;
    use crate::insights::{MicroHeuristic, MicroInsightKind};
    use crate::models::Cadence;
    use crate::test_utils::{at, date, recurring, txn};

    struct AlwaysTip;

    impl MicroHeuristic for AlwaysTip {
        fn kind(&self) -> MicroInsightKind {
            MicroInsightKind::RoundUp
        }

        fn evaluate(
            &self,
            _txns: &[Transaction],
            _now: DateTime<Utc>,
            _config: &MicroConfig,
        ) -> Vec<MicroInsight> {
            vec![MicroInsight::new(self.kind(), "tip")]
        }
    }

    #[test]
    fn test_dashboard_combines_forecast_and_insights() {
        let engine = Engine::default();
        let now = at(2024, 5, 10);
        let txns = vec![txn("s", at(2024, 5, 1), -9.99, "Streaming").subscription("Netflix")];
        let recurrings = vec![recurring("Rent", -900.0, Cadence::Monthly, date(2024, 5, 28))];

        let dash = engine.dashboard(2000.0, &txns, &recurrings, now);
        assert_eq!(dash.forecast, engine.energy_bar(2000.0, &txns, &recurrings, now));
        assert_eq!(dash.schedule.len(), 1);
        assert_eq!(dash.schedule[0].total, dash.forecast.committed);
        assert_eq!(dash.insights.len(), 1);
    }

    #[test]
    fn test_custom_micro_generator() {
        let mut generator = MicroInsightGenerator::new();
        generator.register(Box::new(AlwaysTip));
        let engine = Engine::default().with_micro_generator(generator);

        let insights = engine.micro_insights(&[], at(2024, 5, 10));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].message, "tip");
    }

    #[test]
    fn test_config_thresholds_flow_through() {
        let mut config = EngineConfig::default();
        config.affordability.min_buffer = 1000.0;
        let engine = Engine::new(config);

        let result = engine.can_i_afford_it(900.0, &[], &[], &[], None, at(2024, 5, 10));
        assert_eq!(result.verdict, crate::affordability::Verdict::Amber);
    }

    #[test]
    fn test_category_spend_feeds_cohort() {
        let engine = Engine::default();
        let today = at(2024, 5, 20);
        let txns = vec![
            txn("a", at(2024, 5, 2), -300.0, "Dining"),
            txn("b", at(2024, 4, 2), -100.0, "Dining"),
        ];
        let peers = HashMap::from([(
            "Dining".to_string(),
            PeerStats {
                median: 150.0,
                p75: 220.0,
            },
        )]);

        let spend = engine.category_spend(&txns, today);
        assert_eq!(spend, vec![CategorySpend::new("Dining", 300.0, 100.0)]);

        let insights = engine.compare_to_cohort(&spend, &peers);
        assert_eq!(insights.len(), 2);
    }
}
