//! Cohort comparison and micro-insight commands

use std::path::Path;

use anyhow::{Context, Result};
use runway_core::import::load_peer_stats;

use super::context::{load_history, print_json, RunContext};
use super::truncate;

pub fn cmd_cohort(ctx: &RunContext, transactions: &Path, peers: &Path) -> Result<()> {
    let txns = load_history(ctx, Some(transactions))?;
    let peer_stats = load_peer_stats(peers)
        .with_context(|| format!("Failed to load peer stats from {}", peers.display()))?;

    let spend = ctx.engine.category_spend(&txns, ctx.now);
    let insights = ctx.engine.compare_to_cohort(&spend, &peer_stats);

    if ctx.json {
        return print_json(&insights);
    }

    println!();
    println!("👥 You vs. Your Peers");
    println!("   Month: {}", ctx.now.format("%Y-%m"));
    println!("   ─────────────────────────────────────────────────────────────");

    if spend.is_empty() {
        println!("   No spending found this month or last.");
        return Ok(());
    }

    println!(
        "   {:20} │ {:>10} │ {:>10} │ {:>10}",
        "Category", "This month", "Last month", "Peers"
    );
    println!("   ─────────────────────┼────────────┼────────────┼───────────");
    for row in &spend {
        let median = peer_stats
            .get(&row.category)
            .map(|p| format!("{:.2}", p.median))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ {:>10}",
            truncate(&row.category, 20),
            row.this_month,
            row.last_month,
            median
        );
    }

    println!();
    if insights.is_empty() {
        println!("   ✅ Nothing stands out this month.");
        return Ok(());
    }

    for insight in &insights {
        println!("   📌 {}", insight.title);
        println!("      {}", insight.body);
    }

    Ok(())
}

pub fn cmd_insights(ctx: &RunContext, transactions: &Path) -> Result<()> {
    let txns = load_history(ctx, Some(transactions))?;
    let insights = ctx.engine.micro_insights(&txns, ctx.now);

    if ctx.json {
        return print_json(&insights);
    }

    println!();
    println!("💡 Micro-Insights");
    println!("   ─────────────────────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   No tips right now.");
        return Ok(());
    }

    for insight in &insights {
        println!("   [{}] {}", insight.kind, insight.message);
    }

    Ok(())
}
