//! Loaders for engine inputs
//!
//! Transactions come from CSV exports or JSON arrays; recurrings, wishlists
//! and peer statistics from JSON or TOML. The format is picked by file
//! extension.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::categorize::CategoryRules;
use crate::error::{Error, Result};
use crate::insights::PeerStats;
use crate::models::{Recurring, Transaction, WishItem, WishTiming};

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
    Toml,
}

impl InputFormat {
    /// Detect format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::Import(format!(
                "Unsupported file type: {} (expected .csv, .json or .toml)",
                path.display()
            ))),
        }
    }
}

/// Load transactions from a `.csv` or `.json` file
pub fn load_transactions(path: &Path, rules: &CategoryRules) -> Result<Vec<Transaction>> {
    let txns = match InputFormat::from_path(path)? {
        InputFormat::Csv => parse_transactions_csv(fs::File::open(path)?, rules)?,
        InputFormat::Json => parse_transactions_json(&fs::read_to_string(path)?, rules)?,
        InputFormat::Toml => {
            return Err(Error::Import(
                "Transactions must be provided as CSV or JSON".into(),
            ))
        }
    };
    debug!(path = %path.display(), count = txns.len(), "Loaded transactions");
    Ok(txns)
}

/// Parse a JSON array of transactions, filling blank categories from `rules`
pub fn parse_transactions_json(content: &str, rules: &CategoryRules) -> Result<Vec<Transaction>> {
    let mut txns: Vec<Transaction> = serde_json::from_str(content)?;
    for t in &mut txns {
        fill_category(t, rules);
    }
    Ok(txns)
}

/// Column positions resolved from a CSV header row
struct Columns {
    id: Option<usize>,
    date: usize,
    amount: usize,
    category: Option<usize>,
    merchant: Option<usize>,
    subscription: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_lowercase().replace([' ', '-'], "_");
                names.contains(&h.as_str())
            })
        };

        Ok(Self {
            id: find(&["id", "transaction_id"]),
            date: find(&["date", "transaction_date", "timestamp"])
                .ok_or_else(|| Error::Import("Missing date column".into()))?,
            amount: find(&["amount", "value"])
                .ok_or_else(|| Error::Import("Missing amount column".into()))?,
            category: find(&["category"]),
            merchant: find(&["merchant", "description", "payee"]),
            subscription: find(&["is_subscription", "issubscription", "subscription"]),
        })
    }
}

/// Parse transactions from CSV with a header row
///
/// Required columns: `date`, `amount`. Optional: `id`, `category`,
/// `merchant` (or `description`/`payee`), `is_subscription`.
pub fn parse_transactions_csv<R: Read>(
    reader: R,
    rules: &CategoryRules,
) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::resolve(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let line = row + 2; // header is line 1

        let date_str = record
            .get(columns.date)
            .ok_or_else(|| Error::Import(format!("Line {}: missing date", line)))?;
        let date = parse_date(date_str).map_err(|e| at_line(line, e))?;

        let amount_str = record
            .get(columns.amount)
            .ok_or_else(|| Error::Import(format!("Line {}: missing amount", line)))?;
        let amount = parse_amount(amount_str).map_err(|e| at_line(line, e))?;

        let merchant = columns
            .merchant
            .and_then(|i| record.get(i))
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let category = columns
            .category
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .to_string();

        let is_subscription = columns
            .subscription
            .and_then(|i| record.get(i))
            .map(parse_flag)
            .unwrap_or(false);

        let id = columns
            .id
            .and_then(|i| record.get(i))
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| generate_id(&date, merchant.as_deref().unwrap_or(""), amount, row));

        let mut tx = Transaction {
            id,
            date,
            amount,
            category,
            merchant,
            is_subscription,
        };
        fill_category(&mut tx, rules);
        transactions.push(tx);
    }

    Ok(transactions)
}

fn at_line(line: usize, e: Error) -> Error {
    match e {
        Error::Import(msg) => Error::Import(format!("Line {}: {}", line, msg)),
        other => other,
    }
}

fn fill_category(tx: &mut Transaction, rules: &CategoryRules) {
    if tx.category.trim().is_empty() {
        tx.category = rules.categorize_or_fallback(tx.merchant.as_deref().unwrap_or(""));
    }
}

/// Stable id for rows that arrive without one
fn generate_id(date: &DateTime<Utc>, merchant: &str, amount: f64, row: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_rfc3339().as_bytes());
    hasher.update(merchant.as_bytes());
    hasher.update(amount.to_be_bytes());
    // Row index distinguishes identical same-day purchases
    hasher.update((row as u64).to_be_bytes());
    hex::encode(hasher.finalize())
}

/// Parse a timestamp or a bare date (taken as midnight UTC)
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.and_utc());
        }
    }

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
    ];
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc());
            }
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', '£', '€', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}

fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

/// Read a JSON or TOML document into `T`
fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    match InputFormat::from_path(path)? {
        InputFormat::Json => Ok(serde_json::from_str(&content)?),
        InputFormat::Toml => toml::from_str(&content)
            .map_err(|e| Error::Import(format!("Invalid TOML in {}: {}", path.display(), e))),
        InputFormat::Csv => Err(Error::Import(format!(
            "{} must be JSON or TOML",
            path.display()
        ))),
    }
}

/// JSON inputs are bare arrays; TOML needs a named array of tables
#[derive(Deserialize)]
#[serde(untagged)]
enum ListDocument<T> {
    Bare(Vec<T>),
    Recurring { recurring: Vec<T> },
    Items { item: Vec<T> },
}

impl<T> ListDocument<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(v) => v,
            Self::Recurring { recurring } => recurring,
            Self::Items { item } => item,
        }
    }
}

/// Load recurring commitments (`[ ... ]` JSON or `[[recurring]]` TOML)
pub fn load_recurrings(path: &Path) -> Result<Vec<Recurring>> {
    let doc: ListDocument<Recurring> = load_document(path)?;
    let recurrings = doc.into_vec();
    debug!(path = %path.display(), count = recurrings.len(), "Loaded recurrings");
    Ok(recurrings)
}

/// Load wishlist items (`[ ... ]` JSON or `[[item]]` TOML)
pub fn load_wishlist(path: &Path) -> Result<Vec<WishItem>> {
    let items: Vec<WishItem> = load_document::<ListDocument<WishItem>>(path)?.into_vec();
    if let Some(bad) = items.iter().find(|i| i.price <= 0.0) {
        return Err(Error::InvalidData(format!(
            "Wishlist item '{}' must have a positive price",
            bad.label
        )));
    }
    Ok(items)
}

/// Load peer statistics keyed by category
pub fn load_peer_stats(path: &Path) -> Result<HashMap<String, PeerStats>> {
    load_document(path)
}

/// Parse a `LABEL=PRICE[@when]` wishlist item
pub fn parse_wish_item(s: &str) -> Result<WishItem> {
    let (label, rest) = s
        .rsplit_once('=')
        .ok_or_else(|| Error::InvalidData(format!("Expected LABEL=PRICE, got: {}", s)))?;

    let (price_str, when) = match rest.split_once('@') {
        Some((price, when)) => (
            price,
            Some(when.parse::<WishTiming>().map_err(Error::InvalidData)?),
        ),
        None => (rest, None),
    };

    let price = parse_amount(price_str)?;
    if price <= 0.0 || label.trim().is_empty() {
        return Err(Error::InvalidData(format!(
            "Wishlist item needs a label and a positive price: {}",
            s
        )));
    }

    Ok(WishItem {
        label: label.trim().to_string(),
        price,
        when,
    })
}
