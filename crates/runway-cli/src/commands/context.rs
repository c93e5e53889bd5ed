//! Shared command utilities
//!
//! This module contains:
//! - `open_context` - Load the engine and pin the reference date
//! - `load_history` / `load_schedule` - Read input files with error context

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use runway_core::import::{load_recurrings, load_transactions};
use runway_core::{ConfigSource, Engine, EngineConfig, Recurring, Transaction};
use serde::Serialize;
use tracing::debug;

/// Everything a command needs besides its own arguments
pub struct RunContext {
    pub engine: Engine,
    pub now: DateTime<Utc>,
    pub json: bool,
}

impl RunContext {
    pub fn new(engine: Engine, now: DateTime<Utc>, json: bool) -> Self {
        Self { engine, now, json }
    }
}

/// Load configuration and resolve the reference date
pub fn open_context(config: Option<&Path>, today: Option<&str>, json: bool) -> Result<RunContext> {
    let (engine_config, source) =
        EngineConfig::load_with_source(config).context("Failed to load engine config")?;
    match &source {
        ConfigSource::File(path) => debug!(path = %path.display(), "Using config file"),
        ConfigSource::Embedded => debug!("Using built-in config"),
    }

    let now = resolve_now(today)?;
    Ok(RunContext::new(Engine::new(engine_config), now, json))
}

/// Parse `--today` (YYYY-MM-DD) as midday UTC, or take the current time
pub fn resolve_now(today: Option<&str>) -> Result<DateTime<Utc>> {
    match today {
        Some(s) => {
            let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .with_context(|| format!("Invalid --today '{}', expected YYYY-MM-DD", s))?;
            let noon = date
                .and_hms_opt(12, 0, 0)
                .with_context(|| format!("Invalid --today '{}'", s))?;
            Ok(noon.and_utc())
        }
        None => Ok(Utc::now()),
    }
}

/// Read a transaction history, or an empty one when no file is given
pub fn load_history(ctx: &RunContext, path: Option<&Path>) -> Result<Vec<Transaction>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    load_transactions(path, &ctx.engine.config().categories)
        .with_context(|| format!("Failed to load transactions from {}", path.display()))
}

/// Read recurring items, or none when no file is given
pub fn load_schedule(path: Option<&Path>) -> Result<Vec<Recurring>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    load_recurrings(path)
        .with_context(|| format!("Failed to load recurring items from {}", path.display()))
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}
