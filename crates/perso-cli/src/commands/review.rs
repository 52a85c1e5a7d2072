//! Review command implementations

use std::path::Path;

use anyhow::Result;
use perso_core::config::ReviewConfig;
use perso_core::format::format_currency;
use perso_core::{
    build_review_queue, sort_options, GroupKey, ReviewGroup, ReviewOptions, ReviewQueue,
    SortStrategy,
};
use serde::Serialize;

use super::{load_pending, truncate};

/// Arguments of `perso groups`
pub struct GroupsRequest<'a> {
    pub file: &'a Path,
    pub sort: Option<&'a str>,
    pub max_groups: Option<usize>,
    pub exclude: &'a [i64],
    pub delimiter: Option<&'a str>,
    pub json: bool,
}

#[derive(Serialize)]
struct GroupsOutput<'a> {
    strategy: SortStrategy,
    total_groups: usize,
    groups: Vec<ReviewGroup<'a>>,
}

/// Merge command-line overrides into the configured review defaults
pub fn review_options(
    config: &ReviewConfig,
    sort: Option<&str>,
    max_groups: Option<usize>,
    exclude: &[i64],
) -> Result<ReviewOptions> {
    let mut options = ReviewOptions::from_config(config);

    if let Some(sort) = sort {
        options.strategy = sort.parse::<SortStrategy>().map_err(|e| {
            anyhow::anyhow!(
                "{}. Use 'perso sort-options' to list valid strategies",
                e
            )
        })?;
    }
    if let Some(max_groups) = max_groups {
        options.max_groups = max_groups;
    }
    options.excluded_ids = exclude.iter().copied().collect();

    Ok(options)
}

pub fn cmd_groups(config: &ReviewConfig, request: &GroupsRequest) -> Result<()> {
    let options = review_options(config, request.sort, request.max_groups, request.exclude)?;
    let transactions = load_pending(config, request.file, request.delimiter)?;
    let queue = build_review_queue(&transactions, &options);

    if request.json {
        let output = GroupsOutput {
            strategy: options.strategy,
            total_groups: queue.total_groups(),
            groups: queue.groups(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("{}", render_groups(&queue, options.strategy));
    Ok(())
}

/// Text listing of the ranked groups of a queue
pub fn render_groups(queue: &ReviewQueue, strategy: SortStrategy) -> String {
    if queue.total_groups() == 0 {
        return "No pending transactions to review.\n".to_string();
    }

    let groups = queue.groups();
    let mut lines = vec![
        String::new(),
        format!(
            "📋 Groups to review ({} of {}, {})",
            groups.len(),
            queue.total_groups(),
            strategy.label()
        ),
        "   ─────────────────────────────────────────────────────────────".to_string(),
    ];

    for group in &groups {
        let stats = group.stats;
        lines.push(format!(
            "   {:>4} │ {} │ {:>12.2} € │ {}",
            stats.count,
            stats.max_date,
            stats.max_amount,
            truncate(stats.group_key.as_str(), 40)
        ));
    }

    if queue.total_groups() > groups.len() {
        lines.push(String::new());
        lines.push(format!(
            "   {} more groups not shown. Raise --max-groups to see them.",
            queue.total_groups() - groups.len()
        ));
    }

    lines.join("\n") + "\n"
}

pub fn cmd_show(
    config: &ReviewConfig,
    file: &Path,
    group: &str,
    exclude: &[i64],
    delimiter: Option<&str>,
    json: bool,
) -> Result<()> {
    let options = review_options(config, None, None, exclude)?;
    let transactions = load_pending(config, file, delimiter)?;
    let queue = build_review_queue(&transactions, &options);

    let review_group = queue
        .group(&GroupKey::from(group))
        .ok_or_else(|| anyhow::anyhow!("Group not found: {}", group))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&review_group)?);
        return Ok(());
    }

    println!();
    println!(
        "📂 {} ({} transactions)",
        review_group.stats.group_key, review_group.stats.count
    );
    println!("   ─────────────────────────────────────────────────────────────");

    for member in &review_group.transactions {
        let tx = &member.transaction;
        println!(
            "   [{}] {} │ {:>14} │ {}",
            tx.id,
            tx.date,
            format_currency(tx.amount, "€"),
            truncate(&tx.label, 40)
        );
    }

    Ok(())
}

pub fn cmd_sort_options() -> Result<()> {
    println!();
    println!("🔀 Sort strategies");
    println!("   ─────────────────────────────────────────────────────────────");

    for (label, strategy) in sort_options() {
        println!("   {:<12} │ {}", strategy.as_str(), label);
    }

    Ok(())
}
