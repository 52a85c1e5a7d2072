//! Boundary validation of transaction records
//!
//! The grouping pipeline assumes well-formed records. Everything coming from
//! a file or a user goes through here first.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::error::{Error, Result};
use crate::models::Transaction;

pub const MAX_LABEL_LEN: usize = 500;

/// Amounts must stay strictly inside +/- this bound
pub const MAX_ABS_AMOUNT: f64 = 1e9;

/// Dates more than this many days after today are rejected
pub const MAX_FUTURE_DAYS: i64 = 365;

fn earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Strip control characters (keeping tab and line breaks) and trim
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_ascii_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Round to currency precision
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Check one record and return its sanitized form
pub fn validate_transaction(tx: &Transaction, today: NaiveDate) -> Result<Transaction> {
    let label = sanitize_label(&tx.label);
    if label.is_empty() {
        return Err(Error::Validation(format!("transaction {}: empty label", tx.id)));
    }
    if label.chars().count() > MAX_LABEL_LEN {
        return Err(Error::Validation(format!(
            "transaction {}: label longer than {} characters",
            tx.id, MAX_LABEL_LEN
        )));
    }

    if !tx.amount.is_finite() || tx.amount.abs() >= MAX_ABS_AMOUNT {
        return Err(Error::Validation(format!(
            "transaction {}: amount {} out of range",
            tx.id, tx.amount
        )));
    }

    let earliest = earliest_date();
    if tx.date < earliest {
        return Err(Error::Validation(format!(
            "transaction {}: date {} is before {}",
            tx.id, tx.date, earliest
        )));
    }
    let latest = today + Duration::days(MAX_FUTURE_DAYS);
    if tx.date > latest {
        return Err(Error::Validation(format!(
            "transaction {}: date {} is more than one year in the future",
            tx.id, tx.date
        )));
    }

    Ok(Transaction {
        label,
        amount: round_cents(tx.amount),
        ..tx.clone()
    })
}

/// Validate a whole batch; ids must be unique
pub fn validate_all(transactions: &[Transaction], today: NaiveDate) -> Result<Vec<Transaction>> {
    let mut seen = HashSet::with_capacity(transactions.len());
    let mut valid = Vec::with_capacity(transactions.len());

    for tx in transactions {
        if !seen.insert(tx.id) {
            return Err(Error::Validation(format!("duplicate transaction id {}", tx.id)));
        }
        valid.push(validate_transaction(tx, today)?);
    }

    Ok(valid)
}
