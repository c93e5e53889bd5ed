//! Engine configuration
//!
//! Thresholds for every heuristic plus the category rule table.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/runway/config/engine.toml) when it exists
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::categorize::{CategoryRule, CategoryRules};
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Longest trailing window accepted from config (ten years)
const MAX_WINDOW_DAYS: i64 = 3650;

/// Forecast aggregator thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    /// Trailing window (and fixed divisor) for the daily burn rate
    pub burn_window_days: i64,
    /// Share of the balance committed bills must exceed for `heavy_bills`
    pub heavy_bills_ratio: f64,
    /// Length of each window in the overspend trend comparison
    pub trend_window_days: i64,
    /// Growth over the previous window that triggers `overspend_trend`
    pub overspend_growth: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            burn_window_days: 30,
            heavy_bills_ratio: 0.6,
            trend_window_days: 7,
            overspend_growth: 0.25,
        }
    }
}

/// Affordability layer thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct AffordabilityConfig {
    pub min_buffer: f64,
    pub delay_gain: f64,
    pub split_threshold: f64,
}

impl Default for AffordabilityConfig {
    fn default() -> Self {
        Self {
            min_buffer: 100.0,
            delay_gain: 50.0,
            split_threshold: 150.0,
        }
    }
}

/// Cohort comparator thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct CohortConfig {
    pub deviation_ratio: f64,
    pub deviation_floor: f64,
    pub trend_growth: f64,
    pub trend_floor: f64,
    pub max_insights: usize,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            deviation_ratio: 0.15,
            deviation_floor: 40.0,
            trend_growth: 1.25,
            trend_floor: 60.0,
            max_insights: 3,
        }
    }
}

/// Micro-insight thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct MicroConfig {
    pub unused_subscription_days: i64,
    pub missing_usage_days: i64,
    pub round_up_threshold: f64,
    pub weekend_ratio: f64,
    pub max_insights: usize,
}

impl Default for MicroConfig {
    fn default() -> Self {
        Self {
            unused_subscription_days: 60,
            missing_usage_days: 999,
            round_up_threshold: 10.0,
            weekend_ratio: 1.5,
            max_insights: 3,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub forecast: ForecastConfig,
    pub affordability: AffordabilityConfig,
    pub cohort: CohortConfig,
    pub micro: MicroConfig,
    pub categories: CategoryRules,
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl EngineConfig {
    /// Load configuration (override first, then embedded defaults)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        Self::load_with_source(override_path).map(|(config, _)| config)
    }

    /// Load configuration and report which layer supplied it
    pub fn load_with_source(override_path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let candidate = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        match candidate {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                debug!(path = %path.display(), "Loaded engine config override");
                Ok((Self::from_toml(&content)?, ConfigSource::File(path)))
            }
            Some(path) if override_path.is_some() => Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            ))),
            _ => Ok((Self::embedded()?, ConfigSource::Embedded)),
        }
    }

    /// The configuration compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Parse config from TOML content, keeping defaults for missing keys
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = EngineConfig::default();

        if let Some(f) = raw.forecast {
            let c = &mut config.forecast;
            if let Some(v) = f.burn_window_days {
                c.burn_window_days = window_days("burn_window_days", v)?;
            }
            if let Some(v) = f.heavy_bills_ratio {
                c.heavy_bills_ratio = v;
            }
            if let Some(v) = f.trend_window_days {
                c.trend_window_days = window_days("trend_window_days", v)?;
            }
            if let Some(v) = f.overspend_growth {
                c.overspend_growth = v;
            }
        }

        if let Some(a) = raw.affordability {
            let c = &mut config.affordability;
            if let Some(v) = a.min_buffer {
                c.min_buffer = v;
            }
            if let Some(v) = a.delay_gain {
                c.delay_gain = v;
            }
            if let Some(v) = a.split_threshold {
                c.split_threshold = v;
            }
        }

        if let Some(h) = raw.cohort {
            let c = &mut config.cohort;
            if let Some(v) = h.deviation_ratio {
                c.deviation_ratio = v;
            }
            if let Some(v) = h.deviation_floor {
                c.deviation_floor = v;
            }
            if let Some(v) = h.trend_growth {
                c.trend_growth = v;
            }
            if let Some(v) = h.trend_floor {
                c.trend_floor = v;
            }
            if let Some(v) = h.max_insights {
                c.max_insights = v;
            }
        }

        if let Some(m) = raw.micro {
            let c = &mut config.micro;
            if let Some(v) = m.unused_subscription_days {
                c.unused_subscription_days = v;
            }
            if let Some(v) = m.missing_usage_days {
                c.missing_usage_days = v;
            }
            if let Some(v) = m.round_up_threshold {
                c.round_up_threshold = v;
            }
            if let Some(v) = m.weekend_ratio {
                c.weekend_ratio = v;
            }
            if let Some(v) = m.max_insights {
                c.max_insights = v;
            }
        }

        if let Some(rules) = raw.categories {
            config.categories = CategoryRules::new(rules)?;
        }

        Ok(config)
    }
}

/// Window lengths must stay within what `chrono::Duration::days` accepts
fn window_days(key: &str, value: i64) -> Result<i64> {
    if !(1..=MAX_WINDOW_DAYS).contains(&value) {
        return Err(Error::Config(format!(
            "{} must be between 1 and {}, got {}",
            key, MAX_WINDOW_DAYS, value
        )));
    }
    Ok(value)
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("runway").join("config").join("engine.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    forecast: Option<RawForecast>,
    affordability: Option<RawAffordability>,
    cohort: Option<RawCohort>,
    micro: Option<RawMicro>,
    categories: Option<Vec<CategoryRule>>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    burn_window_days: Option<i64>,
    heavy_bills_ratio: Option<f64>,
    trend_window_days: Option<i64>,
    overspend_growth: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawAffordability {
    min_buffer: Option<f64>,
    delay_gain: Option<f64>,
    split_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCohort {
    deviation_ratio: Option<f64>,
    deviation_floor: Option<f64>,
    trend_growth: Option<f64>,
    trend_floor: Option<f64>,
    max_insights: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawMicro {
    unused_subscription_days: Option<i64>,
    missing_usage_days: Option<i64>,
    round_up_threshold: Option<f64>,
    weekend_ratio: Option<f64>,
    max_insights: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let embedded = EngineConfig::embedded().unwrap();
        let defaults = EngineConfig::default();

        assert_eq!(embedded.forecast, defaults.forecast);
        assert_eq!(embedded.affordability, defaults.affordability);
        assert_eq!(embedded.cohort, defaults.cohort);
        assert_eq!(embedded.micro, defaults.micro);
        // No [[categories]] in the embedded file: built-in table stays
        assert_eq!(embedded.categories.len(), defaults.categories.len());
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml(
            r#"
[affordability]
min_buffer = 250.0

[micro]
max_insights = 5
"#,
        )
        .unwrap();

        assert_eq!(config.affordability.min_buffer, 250.0);
        assert_eq!(config.affordability.split_threshold, 150.0);
        assert_eq!(config.micro.max_insights, 5);
        assert_eq!(config.forecast, ForecastConfig::default());
    }

    #[test]
    fn test_category_rules_replace_builtin() {
        let config = EngineConfig::from_toml(
            r#"
[[categories]]
pattern = "corner shop"
category = "Groceries"

[[categories]]
pattern = "^payroll"
pattern_type = "regex"
category = "Income"
priority = 3
"#,
        )
        .unwrap();

        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories.categorize("PAYROLL ACME"), Some("Income"));
        assert_eq!(config.categories.categorize("Corner Shop 12"), Some("Groceries"));
        assert_eq!(config.categories.categorize("NETFLIX"), None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(EngineConfig::from_toml("[forecast\n").is_err());
        assert!(EngineConfig::from_toml("[forecast]\nburn_window_days = 0\n").is_err());
        assert!(EngineConfig::from_toml(
            "[[categories]]\npattern = \"(\"\npattern_type = \"regex\"\ncategory = \"X\"\n"
        )
        .is_err());
    }

    #[test]
    fn test_window_lengths_are_bounded() {
        let huge = EngineConfig::from_toml("[forecast]\nburn_window_days = 9223372036854775807\n");
        assert!(matches!(huge, Err(Error::Config(_))));
        assert!(EngineConfig::from_toml("[forecast]\ntrend_window_days = 3651\n").is_err());

        let max = EngineConfig::from_toml("[forecast]\ntrend_window_days = 3650\n").unwrap();
        assert_eq!(max.forecast.trend_window_days, 3650);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[forecast]\nheavy_bills_ratio = 0.5").unwrap();

        let (config, source) = EngineConfig::load_with_source(Some(file.path())).unwrap();
        assert_eq!(config.forecast.heavy_bills_ratio, 0.5);
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(EngineConfig::load(Some(&missing)).is_err());
    }
}
