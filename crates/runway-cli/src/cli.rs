//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Runway - See how far your money goes this month
#[derive(Parser)]
#[command(name = "runway")]
#[command(about = "Cash-flow forecasting and spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file
    ///
    /// Defaults to ~/.local/share/runway/config/engine.toml when present,
    /// otherwise the built-in thresholds.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) instead of the current date
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Print JSON instead of a formatted report
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project the balance to the end of the month
    Forecast {
        /// Current account balance
        #[arg(short, long, allow_hyphen_values = true)]
        balance: f64,

        /// Transaction history (.csv or .json)
        #[arg(short, long)]
        transactions: Option<PathBuf>,

        /// Recurring income and bills (.json or .toml)
        #[arg(short, long)]
        recurring: Option<PathBuf>,
    },

    /// Check whether a set of purchases is affordable this month
    Afford {
        /// Current account balance
        #[arg(short, long, allow_hyphen_values = true)]
        balance: f64,

        /// Transaction history (.csv or .json)
        #[arg(short, long)]
        transactions: Option<PathBuf>,

        /// Recurring income and bills (.json or .toml)
        #[arg(short, long)]
        recurring: Option<PathBuf>,

        /// Item to buy, as LABEL=PRICE or LABEL=PRICE@when (now, midmonth, monthend)
        #[arg(short, long = "item")]
        items: Vec<String>,

        /// Wishlist file (.json or .toml)
        #[arg(short, long)]
        wishlist: Option<PathBuf>,

        /// Month-end buffer required for a green verdict (overrides config)
        #[arg(long)]
        min_buffer: Option<f64>,
    },

    /// Compare this month's category spend with a peer cohort
    Cohort {
        /// Transaction history (.csv or .json)
        #[arg(short, long)]
        transactions: PathBuf,

        /// Peer statistics per category (.json or .toml)
        #[arg(short, long)]
        peers: PathBuf,
    },

    /// Show micro-insights (unused subscriptions, round-ups, weekend spend)
    Insights {
        /// Transaction history (.csv or .json)
        #[arg(short, long)]
        transactions: PathBuf,
    },

    /// Forecast, commitments and insights in one view
    Dashboard {
        /// Current account balance
        #[arg(short, long, allow_hyphen_values = true)]
        balance: f64,

        /// Transaction history (.csv or .json)
        #[arg(short, long)]
        transactions: Option<PathBuf>,

        /// Recurring income and bills (.json or .toml)
        #[arg(short, long)]
        recurring: Option<PathBuf>,
    },

    /// Show where configuration is loaded from and the effective thresholds
    Config,
}
