//! Runway CLI - Cash-flow forecasting and spending insights
//!
//! Usage:
//!   runway forecast --balance 1200 --transactions history.csv --recurring bills.toml
//!   runway afford --balance 1200 --transactions history.csv --item "Headphones=199"
//!   runway cohort --transactions history.csv --peers peers.json
//!   runway insights --transactions history.csv

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let open = || commands::open_context(cli.config.as_deref(), cli.today.as_deref(), cli.json);

    match &cli.command {
        Commands::Config => commands::cmd_config(cli.config.as_deref()),
        Commands::Forecast {
            balance,
            transactions,
            recurring,
        } => commands::cmd_forecast(
            &open()?,
            *balance,
            transactions.as_deref(),
            recurring.as_deref(),
        ),
        Commands::Afford {
            balance,
            transactions,
            recurring,
            items,
            wishlist,
            min_buffer,
        } => commands::cmd_afford(
            &open()?,
            *balance,
            transactions.as_deref(),
            recurring.as_deref(),
            items,
            wishlist.as_deref(),
            *min_buffer,
        ),
        Commands::Cohort {
            transactions,
            peers,
        } => commands::cmd_cohort(&open()?, transactions, peers),
        Commands::Insights { transactions } => commands::cmd_insights(&open()?, transactions),
        Commands::Dashboard {
            balance,
            transactions,
            recurring,
        } => commands::cmd_dashboard(
            &open()?,
            *balance,
            transactions.as_deref(),
            recurring.as_deref(),
        ),
    }
}
