//! Smart grouping of pending transactions
//!
//! Each transaction gets a group key:
//! - Manually ungrouped or excluded: `single_{id}`, never shared
//! - Cheques: normalized label plus amount, so different cheques stay apart
//! - Everything else: normalized label
//!
//! Transactions with equal keys are reviewed together as one batch.

use std::collections::{BTreeMap, HashSet};

use crate::format::group_amount;
use crate::models::{GroupKey, GroupStats, GroupedTransaction, Transaction};
use crate::normalize::normalize_label;

/// Cheque keyword phrases, matched as whole words
const CHEQUE_PHRASES: &[&[&str]] = &[
    &["CHQ"],
    &["CHEQUE"],
    &["REMISE", "CHEQUE"],
    &["REMISE", "CHQ"],
];

/// Split into word tokens: maximal runs of alphanumerics and `_`
fn word_tokens(s: &str) -> Vec<&str> {
    s.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// True when the label names a cheque or a cheque deposit
pub fn is_cheque_label(label: &str) -> bool {
    let upper = label.to_uppercase();
    let tokens = word_tokens(&upper);
    CHEQUE_PHRASES
        .iter()
        .any(|phrase| tokens.windows(phrase.len()).any(|w| w == *phrase))
}

/// Group key of a single transaction
pub fn group_key_for(tx: &Transaction, excluded_ids: &HashSet<i64>) -> GroupKey {
    if tx.is_manually_ungrouped || excluded_ids.contains(&tx.id) {
        return GroupKey::single(tx.id);
    }

    // Cheque numbers in free text are unreliable, the amount is part of the identity
    if is_cheque_label(&tx.label) {
        return GroupKey::from(format!(
            "{} | {}",
            normalize_label(&tx.label),
            group_amount(tx.amount)
        ));
    }

    GroupKey::from(normalize_label(&tx.label))
}

/// Annotate every transaction with its group key, preserving input order
pub fn assign_groups(
    transactions: &[Transaction],
    excluded_ids: &HashSet<i64>,
) -> Vec<GroupedTransaction> {
    transactions
        .iter()
        .map(|tx| GroupedTransaction {
            group_key: group_key_for(tx, excluded_ids),
            transaction: tx.clone(),
        })
        .collect()
}

/// One statistics row per distinct group key, ordered by key
pub fn aggregate(grouped: &[GroupedTransaction]) -> Vec<GroupStats> {
    let mut by_key: BTreeMap<&GroupKey, GroupStats> = BTreeMap::new();

    for row in grouped {
        let tx = &row.transaction;
        by_key
            .entry(&row.group_key)
            .and_modify(|stats| {
                stats.count += 1;
                if tx.date > stats.max_date {
                    stats.max_date = tx.date;
                }
                stats.max_amount = stats.max_amount.max(tx.amount.abs());
            })
            .or_insert_with(|| GroupStats {
                group_key: row.group_key.clone(),
                count: 1,
                max_date: tx.date,
                max_amount: tx.amount.abs(),
                is_single: row.group_key.is_single(),
            });
    }

    by_key.into_values().collect()
}

/// Members of one group, in input order
pub fn group_transactions<'a>(
    grouped: &'a [GroupedTransaction],
    key: &GroupKey,
) -> Vec<&'a GroupedTransaction> {
    grouped.iter().filter(|row| &row.group_key == key).collect()
}
