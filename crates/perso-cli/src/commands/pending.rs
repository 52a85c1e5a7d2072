//! Shared utilities
//!
//! This module contains:
//! - `open_config` - Load the review config with CLI error context
//! - `load_pending` - Read, parse and validate a pending-transaction CSV

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use perso_core::config::{load_config, parse_delimiter, ReviewConfig};
use perso_core::{parse_pending_csv, validate_all, CsvOptions, Transaction};
use tracing::info;

/// Load the review config from `--config`, the data dir override, or defaults
pub fn open_config(path: Option<&Path>) -> Result<ReviewConfig> {
    load_config(path).context("Failed to load review config")
}

/// Parse and validate pending transactions, with an optional delimiter override
pub fn load_pending(
    config: &ReviewConfig,
    file: &Path,
    delimiter: Option<&str>,
) -> Result<Vec<Transaction>> {
    let options = match delimiter {
        Some(d) => CsvOptions {
            delimiter: parse_delimiter(d)?,
        },
        None => config.csv_options(),
    };

    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;
    let parsed = parse_pending_csv(csv_file, &options)
        .with_context(|| format!("Failed to parse CSV: {}", file.display()))?;

    let today = Local::now().date_naive();
    let transactions = validate_all(&parsed, today).context("Invalid pending transaction")?;

    info!(
        "Loaded {} pending transactions from {}",
        transactions.len(),
        file.display()
    );

    Ok(transactions)
}
