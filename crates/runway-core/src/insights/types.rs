//! Core types for the insight layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category's outflow this month and last month (positive amounts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub this_month: f64,
    pub last_month: f64,
}

impl CategorySpend {
    pub fn new(category: impl Into<String>, this_month: f64, last_month: f64) -> Self {
        Self {
            category: category.into(),
            this_month,
            last_month,
        }
    }
}

/// Peer cohort statistics for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeerStats {
    pub median: f64,
    /// 75th percentile
    pub p75: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortInsightKind {
    /// Spend is well above the peer median
    AbovePeers,
    /// Spend jumped compared to last month
    RisingTrend,
}

impl CohortInsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AbovePeers => "above_peers",
            Self::RisingTrend => "rising_trend",
        }
    }
}

/// A cohort comparison card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortInsight {
    pub kind: CohortInsightKind,
    pub category: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MicroInsightKind {
    UnusedSubscription,
    RoundUp,
    WeekendSkew,
}

impl MicroInsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnusedSubscription => "unused_subscription",
            Self::RoundUp => "round_up",
            Self::WeekendSkew => "weekend_skew",
        }
    }
}

impl fmt::Display for MicroInsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A one-line tip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroInsight {
    pub kind: MicroInsightKind,
    pub message: String,
}

impl MicroInsight {
    pub fn new(kind: MicroInsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for MicroInsight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
