//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Perso - Batch review of pending bank transactions
#[derive(Parser)]
#[command(name = "perso")]
#[command(about = "Group and rank pending bank transactions for review", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Review config file (defaults to the data dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List ranked groups of pending transactions
    Groups {
        /// CSV file of pending transactions
        #[arg(short, long)]
        file: PathBuf,

        /// Sort strategy: count, date_recent, date_old, amount_desc, amount_asc
        #[arg(short, long)]
        sort: Option<String>,

        /// Maximum number of groups to show
        #[arg(short, long)]
        max_groups: Option<usize>,

        /// Transaction id to keep out of any group (repeatable)
        #[arg(short, long)]
        exclude: Vec<i64>,

        /// CSV field separator (overrides config)
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the member transactions of one group
    Show {
        /// CSV file of pending transactions
        #[arg(short, long)]
        file: PathBuf,

        /// Group key as printed by `perso groups`
        #[arg(short, long)]
        group: String,

        /// Transaction id to keep out of any group (repeatable)
        #[arg(short, long)]
        exclude: Vec<i64>,

        /// CSV field separator (overrides config)
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how raw bank labels are normalized
    Normalize {
        /// Raw bank labels
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// List available sort strategies
    SortOptions,
}
