//! Data models for runway
//!
//! Inputs arrive already normalized from whatever data layer the caller uses.
//! Field aliases accept the camelCase names dashboards tend to emit.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single ledger record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: DateTime<Utc>,
    /// Signed amount: negative = outflow, positive = inflow, zero is inert
    pub amount: f64,
    /// Blank categories are filled from the rule table on import
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Charge from a subscription-type merchant
    #[serde(default, alias = "isSubscription")]
    pub is_subscription: bool,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        date: DateTime<Utc>,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            category: category.into(),
            merchant: None,
            is_subscription: false,
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    /// Mark as a charge from the given subscription merchant
    pub fn subscription(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self.is_subscription = true;
        self
    }

    /// Money leaving the account, as a positive number (0 for inflows)
    pub fn outflow(&self) -> f64 {
        if self.amount < 0.0 {
            self.amount.abs()
        } else {
            0.0
        }
    }

    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }

    /// Merchant if known, otherwise the category
    pub fn display_name(&self) -> &str {
        self.merchant.as_deref().unwrap_or(&self.category)
    }
}

/// Repeat interval of a recurring cash flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Cadence {
    Weekly,
    Biweekly,
    Fourweekly,
    /// Approximated as a fixed 30-day step
    Monthly,
}

impl Cadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Fourweekly => "fourweekly",
            Self::Monthly => "monthly",
        }
    }

    /// Days between occurrences
    pub fn step_days(&self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::Biweekly => 14,
            Self::Fourweekly => 28,
            Self::Monthly => 30,
        }
    }

    /// Parse a cadence, treating anything unrecognised as monthly
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Monthly)
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "fourweekly" => Ok(Self::Fourweekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!("Unknown cadence: {}", s)),
        }
    }
}

impl From<String> for Cadence {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

/// A scheduled, repeating cash-flow commitment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurring {
    pub label: String,
    /// Signed amount: negative = bill, positive = income
    pub amount: f64,
    pub cadence: Cadence,
    /// Next expected occurrence, on or after the projection's "today"
    #[serde(alias = "nextDate")]
    pub next_date: NaiveDate,
}

/// When the user intends to buy a wishlist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishTiming {
    Now,
    Midmonth,
    Monthend,
}

impl WishTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Now => "now",
            Self::Midmonth => "midmonth",
            Self::Monthend => "monthend",
        }
    }
}

impl FromStr for WishTiming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "now" => Ok(Self::Now),
            "midmonth" => Ok(Self::Midmonth),
            "monthend" => Ok(Self::Monthend),
            _ => Err(format!("Unknown purchase timing: {}", s)),
        }
    }
}

/// A candidate purchase under evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishItem {
    pub label: String,
    pub price: f64,
    /// Carried for display; affordability always assumes immediate spend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<WishTiming>,
}

impl WishItem {
    pub fn new(label: impl Into<String>, price: f64) -> Self {
        Self {
            label: label.into(),
            price,
            when: None,
        }
    }
}
