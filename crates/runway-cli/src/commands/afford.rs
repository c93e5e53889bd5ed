//! Affordability command

use std::path::Path;

use anyhow::{bail, Context, Result};
use runway_core::import::{load_wishlist, parse_wish_item};
use runway_core::{Verdict, WishItem};

use super::context::{load_history, load_schedule, print_json, RunContext};
use super::truncate;

#[allow(clippy::too_many_arguments)]
pub fn cmd_afford(
    ctx: &RunContext,
    balance: f64,
    transactions: Option<&Path>,
    recurring: Option<&Path>,
    items: &[String],
    wishlist: Option<&Path>,
    min_buffer: Option<f64>,
) -> Result<()> {
    let basket = collect_items(items, wishlist)?;
    if basket.is_empty() {
        bail!("Nothing to check. Pass --item LABEL=PRICE or --wishlist FILE");
    }

    let txns = load_history(ctx, transactions)?;
    let recurrings = load_schedule(recurring)?;

    let result = ctx
        .engine
        .can_i_afford_it(balance, &txns, &recurrings, &basket, min_buffer, ctx.now);

    if ctx.json {
        return print_json(&result);
    }

    println!();
    println!("🛒 Can I Afford It?");
    println!("   ─────────────────────────────────────────────────────────────");
    for item in &basket {
        let when = item.when.map(|w| format!(" ({})", w.as_str())).unwrap_or_default();
        println!("   {:32} {:>10.2}{}", truncate(&item.label, 32), item.price, when);
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:32} {:>10.2}", "Total", result.total);
    println!();
    println!(
        "   Month-end: {:.2} → {:.2}",
        result.before.projected_eom, result.after.projected_eom
    );
    println!(
        "   Safe to spend: {:.2} → {:.2}",
        result.before.safe_to_spend, result.after.safe_to_spend
    );
    println!();
    println!("   {} Verdict: {}", verdict_icon(result.verdict), result.verdict);

    if !result.suggestions.is_empty() {
        println!();
        println!("   💡 Suggestions:");
        for suggestion in &result.suggestions {
            println!("      - {}", suggestion);
        }
    }

    Ok(())
}

/// Merge `--item` arguments with a wishlist file
pub fn collect_items(items: &[String], wishlist: Option<&Path>) -> Result<Vec<WishItem>> {
    let mut basket = Vec::new();
    if let Some(path) = wishlist {
        basket.extend(
            load_wishlist(path)
                .with_context(|| format!("Failed to load wishlist from {}", path.display()))?,
        );
    }
    for raw in items {
        basket.push(parse_wish_item(raw).with_context(|| format!("Invalid --item '{}'", raw))?);
    }
    Ok(basket)
}

fn verdict_icon(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Green => "🟢",
        Verdict::Amber => "🟠",
        Verdict::Red => "🔴",
    }
}
