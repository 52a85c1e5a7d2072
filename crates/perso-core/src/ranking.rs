//! Ordering of review groups
//!
//! Label and cheque groups always come before forced singletons, whatever
//! the strategy. The strategy only orders groups within each of those two
//! partitions.

use std::cmp::Ordering;

use crate::models::{GroupKey, GroupStats, SortStrategy};

/// Number of groups shown on one review screen
pub const DEFAULT_MAX_GROUPS: usize = 40;

fn compare_by(strategy: SortStrategy, a: &GroupStats, b: &GroupStats) -> Ordering {
    match strategy {
        SortStrategy::Count => b.count.cmp(&a.count),
        SortStrategy::DateRecent => b.max_date.cmp(&a.max_date),
        SortStrategy::DateOld => a.max_date.cmp(&b.max_date),
        SortStrategy::AmountDesc => b.max_amount.total_cmp(&a.max_amount),
        SortStrategy::AmountAsc => a.max_amount.total_cmp(&b.max_amount),
    }
}

/// Sort groups and keep the first `max_groups` keys.
///
/// The sort is stable: groups that tie on both keys keep their input order.
pub fn rank_groups(
    stats: &[GroupStats],
    strategy: SortStrategy,
    max_groups: usize,
) -> Vec<GroupKey> {
    let mut sorted: Vec<&GroupStats> = stats.iter().collect();
    sorted.sort_by(|a, b| {
        a.is_single
            .cmp(&b.is_single)
            .then_with(|| compare_by(strategy, a, b))
    });

    sorted
        .into_iter()
        .take(max_groups)
        .map(|s| s.group_key.clone())
        .collect()
}

/// Same as [`rank_groups`] for a strategy name; unknown names sort by count
pub fn rank_groups_by_name(
    stats: &[GroupStats],
    sort_key: &str,
    max_groups: usize,
) -> Vec<GroupKey> {
    rank_groups(stats, SortStrategy::parse_lenient(sort_key), max_groups)
}

/// Display label and strategy for every sort option, default first
pub fn sort_options() -> Vec<(&'static str, SortStrategy)> {
    SortStrategy::all()
        .iter()
        .map(|strategy| (strategy.label(), *strategy))
        .collect()
}
