//! Forecast and dashboard commands

use std::path::Path;

use anyhow::Result;
use runway_core::{Dashboard, ForecastResult, MicroInsight, RecurringProjection, RiskTag};

use super::context::{load_history, load_schedule, print_json, RunContext};
use super::truncate;

pub fn cmd_forecast(
    ctx: &RunContext,
    balance: f64,
    transactions: Option<&Path>,
    recurring: Option<&Path>,
) -> Result<()> {
    let txns = load_history(ctx, transactions)?;
    let recurrings = load_schedule(recurring)?;

    let result = ctx.engine.energy_bar(balance, &txns, &recurrings, ctx.now);

    if ctx.json {
        return print_json(&result);
    }

    print_forecast(ctx, balance, &result);
    Ok(())
}

pub fn cmd_dashboard(
    ctx: &RunContext,
    balance: f64,
    transactions: Option<&Path>,
    recurring: Option<&Path>,
) -> Result<()> {
    let txns = load_history(ctx, transactions)?;
    let recurrings = load_schedule(recurring)?;

    let dashboard = ctx.engine.dashboard(balance, &txns, &recurrings, ctx.now);

    if ctx.json {
        return print_json(&dashboard);
    }

    print_dashboard(ctx, balance, &dashboard);
    Ok(())
}

fn print_dashboard(ctx: &RunContext, balance: f64, dashboard: &Dashboard) {
    print_forecast(ctx, balance, &dashboard.forecast);
    print_schedule(&dashboard.schedule);
    print_tips(&dashboard.insights);
}

pub(crate) fn print_forecast(ctx: &RunContext, balance: f64, result: &ForecastResult) {
    println!();
    println!("📊 Month-End Forecast");
    println!(
        "   As of: {} ({} days left)",
        ctx.now.format("%Y-%m-%d"),
        result.days_left
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:24} {:>12.2}", "Balance", balance);
    println!("   {:24} {:>12.2}", "Committed", result.committed);
    println!("   {:24} {:>12.2}", "Variable spend", result.variable_to_month_end);
    println!("   {:24} {:>12.2}", "Projected month-end", result.projected_eom);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:24} {:>12.2}", "Safe to spend", result.safe_to_spend);

    if !result.risk.is_empty() {
        println!();
        println!("   ⚠️  Risks:");
        for tag in &result.risk {
            println!("      - {}", risk_label(*tag));
        }
    }
}

fn print_schedule(schedule: &[RecurringProjection]) {
    println!();
    println!("📅 Commitments Before Month-End");
    println!("   ─────────────────────────────────────────────────────────────");

    let due: Vec<_> = schedule.iter().filter(|p| !p.occurrences.is_empty()).collect();
    if due.is_empty() {
        println!("   Nothing scheduled.");
        return;
    }

    println!(
        "   {:24} │ {:10} │ {:>5} │ {:>10}",
        "Item", "Cadence", "Times", "Total"
    );
    println!("   ─────────────────────────┼────────────┼───────┼───────────");
    for projection in due {
        println!(
            "   {:24} │ {:10} │ {:>5} │ {:>10.2}",
            truncate(&projection.label, 24),
            projection.cadence.as_str(),
            projection.occurrences.len(),
            projection.total
        );
    }
}

fn print_tips(insights: &[MicroInsight]) {
    if insights.is_empty() {
        return;
    }

    println!();
    println!("💡 Tips");
    println!("   ─────────────────────────────────────────────────────────────");
    for insight in insights {
        println!("   {}", insight);
    }
}

fn risk_label(tag: RiskTag) -> &'static str {
    match tag {
        RiskTag::HeavyBills => "Bills take up most of your balance",
        RiskTag::OverspendTrend => "Spending this week is well above last week",
    }
}
