//! Review queue: grouping, statistics and ranking in one pass
//!
//! This is what a batch-validation screen consumes. Every call recomputes
//! everything from the given snapshot; exclusions must be passed each time.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::config::ReviewConfig;
use crate::grouping::{aggregate, assign_groups, group_transactions};
use crate::models::{GroupKey, GroupStats, GroupedTransaction, SortStrategy, Transaction};
use crate::ranking::rank_groups;

/// Per-call inputs of the review pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOptions {
    /// Transactions to keep out of any group for this call
    pub excluded_ids: HashSet<i64>,
    pub strategy: SortStrategy,
    pub max_groups: usize,
}

impl ReviewOptions {
    pub fn from_config(config: &ReviewConfig) -> Self {
        Self {
            excluded_ids: HashSet::new(),
            strategy: config.default_strategy,
            max_groups: config.max_groups,
        }
    }
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self::from_config(&ReviewConfig::default())
    }
}

/// One ranked group with its members
#[derive(Debug, Serialize)]
pub struct ReviewGroup<'a> {
    #[serde(flatten)]
    pub stats: &'a GroupStats,
    pub transactions: Vec<&'a GroupedTransaction>,
}

/// Result of running the pipeline over a snapshot of pending transactions
#[derive(Debug, Clone)]
pub struct ReviewQueue {
    grouped: Vec<GroupedTransaction>,
    stats: Vec<GroupStats>,
    ranked: Vec<GroupKey>,
}

impl ReviewQueue {
    /// Every transaction with its group key, in input order
    pub fn grouped(&self) -> &[GroupedTransaction] {
        &self.grouped
    }

    /// Keys selected for review, in display order
    pub fn ranked_keys(&self) -> &[GroupKey] {
        &self.ranked
    }

    /// Number of groups before the `max_groups` cap
    pub fn total_groups(&self) -> usize {
        self.stats.len()
    }

    /// Ranked groups with their member transactions
    pub fn groups(&self) -> Vec<ReviewGroup<'_>> {
        let by_key: HashMap<&GroupKey, &GroupStats> =
            self.stats.iter().map(|s| (&s.group_key, s)).collect();

        self.ranked
            .iter()
            .filter_map(|key| {
                by_key.get(key).map(|&stats| ReviewGroup {
                    stats,
                    transactions: group_transactions(&self.grouped, key),
                })
            })
            .collect()
    }

    /// Any group by key, whether or not it made the ranked selection
    pub fn group(&self, key: &GroupKey) -> Option<ReviewGroup<'_>> {
        let stats = self.stats.iter().find(|s| &s.group_key == key)?;
        Some(ReviewGroup {
            stats,
            transactions: group_transactions(&self.grouped, key),
        })
    }
}

/// Group, aggregate and rank a snapshot of pending transactions
pub fn build_review_queue(transactions: &[Transaction], options: &ReviewOptions) -> ReviewQueue {
    let grouped = assign_groups(transactions, &options.excluded_ids);
    let stats = aggregate(&grouped);
    let ranked = rank_groups(&stats, options.strategy, options.max_groups);

    debug!(
        transactions = transactions.len(),
        excluded = options.excluded_ids.len(),
        groups = stats.len(),
        selected = ranked.len(),
        strategy = %options.strategy,
        "Built review queue"
    );

    ReviewQueue {
        grouped,
        stats,
        ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(id: i64, label: &str, amount: f64, date: &str) -> Transaction {
        Transaction::new(
            id,
            label,
            amount,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, "CARREFOUR CB*6759", -50.0, "2024-01-01"),
            tx(2, "CARREFOUR CB*6759", -20.0, "2024-01-05"),
            tx(3, "CHQ 12345", -100.0, "2024-01-03"),
            tx(4, "PRLV SEPA EDF", -80.0, "2024-01-02"),
            tx(5, "PRLV SEPA EDF 01/02", -82.0, "2024-02-02"),
            tx(6, "PRLV SEPA EDF", -79.0, "2024-03-02"),
        ]
    }

    #[test]
    fn test_queue_ranks_by_count() {
        let queue = build_review_queue(&sample(), &ReviewOptions::default());
        let keys: Vec<&str> = queue.ranked_keys().iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["Edf", "Carrefour", "Chq | -100.00 €"]);
        assert_eq!(queue.total_groups(), 3);
    }

    #[test]
    fn test_groups_carry_members() {
        let queue = build_review_queue(&sample(), &ReviewOptions::default());
        let groups = queue.groups();
        assert_eq!(groups.len(), 3);

        let ids: Vec<i64> = groups[0].transactions.iter().map(|t| t.transaction.id).collect();
        assert_eq!(ids, vec![4, 5, 6]);
        assert_eq!(groups[0].stats.count, 3);
        assert_eq!(groups[0].stats.max_amount, 82.0);
    }

    #[test]
    fn test_exclusions_are_per_call() {
        let options = ReviewOptions {
            excluded_ids: [5].into_iter().collect(),
            ..Default::default()
        };
        let queue = build_review_queue(&sample(), &options);
        assert_eq!(queue.total_groups(), 4);
        assert_eq!(queue.ranked_keys().last().unwrap().as_str(), "single_5");

        // A fresh call without exclusions regroups the transaction
        let queue = build_review_queue(&sample(), &ReviewOptions::default());
        assert_eq!(queue.total_groups(), 3);
    }

    #[test]
    fn test_cap_keeps_total_groups() {
        let options = ReviewOptions {
            max_groups: 1,
            ..Default::default()
        };
        let queue = build_review_queue(&sample(), &options);
        assert_eq!(queue.ranked_keys().len(), 1);
        assert_eq!(queue.groups().len(), 1);
        assert_eq!(queue.total_groups(), 3);

        // Groups outside the selection are still reachable by key
        let cheque = queue.group(&GroupKey::from("Chq | -100.00 €")).unwrap();
        assert_eq!(cheque.transactions.len(), 1);
        assert!(queue.group(&GroupKey::from("Unknown")).is_none());
    }

    #[test]
    fn test_options_from_config() {
        let config = ReviewConfig {
            default_strategy: SortStrategy::DateOld,
            max_groups: 7,
            csv_delimiter: b',',
            ..Default::default()
        };
        let options = ReviewOptions::from_config(&config);
        assert_eq!(options.strategy, SortStrategy::DateOld);
        assert_eq!(options.max_groups, 7);
        assert!(options.excluded_ids.is_empty());
    }

    #[test]
    fn test_review_group_serializes_flat() {
        let queue = build_review_queue(&sample(), &ReviewOptions::default());
        let json = serde_json::to_value(&queue.groups()[1]).unwrap();
        assert_eq!(json["group_key"], "Carrefour");
        assert_eq!(json["count"], 2);
        assert_eq!(json["max_date"], "2024-01-05");
        assert_eq!(json["transactions"][0]["id"], 1);
        assert_eq!(json["transactions"][0]["group_key"], "Carrefour");
    }
}
