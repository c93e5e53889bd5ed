//! Configuration inspection command

use std::path::Path;

use anyhow::{Context, Result};
use runway_core::config::default_config_path;
use runway_core::{ConfigSource, EngineConfig};

use super::truncate;

pub fn cmd_config(override_path: Option<&Path>) -> Result<()> {
    let (config, source) =
        EngineConfig::load_with_source(override_path).context("Failed to load engine config")?;

    println!();
    println!("⚙️  Engine Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    match &source {
        ConfigSource::File(path) => println!("   Source: {}", path.display()),
        ConfigSource::Embedded => {
            println!("   Source: built-in defaults");
            if let Some(path) = default_config_path() {
                println!("   Override with: {}", path.display());
            }
        }
    }

    let f = &config.forecast;
    println!();
    println!("   Forecast:");
    println!("      Burn window:        {} days", f.burn_window_days);
    println!("      Heavy bills ratio:  {:.2}", f.heavy_bills_ratio);
    println!("      Trend window:       {} days", f.trend_window_days);
    println!("      Overspend growth:   {:.0}%", f.overspend_growth * 100.0);

    let a = &config.affordability;
    println!();
    println!("   Affordability:");
    println!("      Minimum buffer:     {:.2}", a.min_buffer);
    println!("      Delay gain:         {:.2}", a.delay_gain);
    println!("      Split threshold:    {:.2}", a.split_threshold);

    let c = &config.cohort;
    println!();
    println!("   Cohort:");
    println!(
        "      Above peers:        >{:.0}% and >{:.2} over median",
        c.deviation_ratio * 100.0,
        c.deviation_floor
    );
    println!(
        "      Rising trend:       >{:.2}x last month and >{:.2}",
        c.trend_growth, c.trend_floor
    );
    println!("      Max insights:       {}", c.max_insights);

    let m = &config.micro;
    println!();
    println!("   Micro-insights:");
    println!("      Unused after:       {} days", m.unused_subscription_days);
    println!("      Round-up under:     {:.2}", m.round_up_threshold);
    println!("      Weekend ratio:      {:.2}x", m.weekend_ratio);
    println!("      Max insights:       {}", m.max_insights);

    println!();
    println!("   Category rules: {}", config.categories.len());
    for rule in config.categories.rules() {
        println!(
            "      {:>3} {:8} {:28} → {}",
            rule.priority,
            rule.pattern_type.as_str(),
            truncate(&rule.pattern, 28),
            rule.category
        );
    }

    Ok(())
}
